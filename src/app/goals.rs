//! Goal slice reducer.

use super::actions::AppAction;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    pub id: u64,
    pub name: String,
}

impl Goal {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

pub type GoalList = Arc<Vec<Arc<Goal>>>;

pub fn goals(state: Option<GoalList>, action: &AppAction) -> GoalList {
    let state = state.unwrap_or_default();

    match action {
        AppAction::AddGoal { goal } => {
            let mut next = Vec::with_capacity(state.len() + 1);
            next.extend(state.iter().cloned());
            next.push(Arc::new(goal.clone()));
            Arc::new(next)
        }
        AppAction::RemoveGoal { id } => {
            if !state.iter().any(|goal| goal.id == *id) {
                return state;
            }
            Arc::new(
                state
                    .iter()
                    .filter(|goal| goal.id != *id)
                    .cloned()
                    .collect(),
            )
        }
        _ => state,
    }
}
