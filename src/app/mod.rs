//! Todo and goal application built on the store.
//!
//! The application state is split into two slices, each owned by its own
//! reducer. [`app`] combines them; [`reduce_json`] accepts raw JSON actions
//! such as the ones a UI or a test driver would send.

mod actions;
mod goals;
mod todos;

pub use actions::{add_goal, add_todo, remove_goal, remove_todo, toggle_todo, AppAction};
pub use goals::{goals, Goal, GoalList};
pub use todos::{todos, Todo, TodoList};

use crate::error::ActionError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// Whole application state.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AppState {
    pub todos: TodoList,
    pub goals: GoalList,
}

/// Root reducer. Returns the previous state itself when neither slice
/// changed.
pub fn app(state: Option<Arc<AppState>>, action: &AppAction) -> Arc<AppState> {
    let todos = todos(state.as_ref().map(|s| Arc::clone(&s.todos)), action);
    let goals = goals(state.as_ref().map(|s| Arc::clone(&s.goals)), action);

    match state {
        Some(prev) if Arc::ptr_eq(&prev.todos, &todos) && Arc::ptr_eq(&prev.goals, &goals) => {
            prev
        }
        _ => Arc::new(AppState { todos, goals }),
    }
}

/// Decode a raw action.
///
/// Non-objects are rejected. Objects whose `type` is missing or unknown
/// decode to `None`, which reducers treat as a no-op. A known `type` with
/// a bad payload is `Malformed`.
pub fn decode_action(raw: &Value) -> Result<Option<AppAction>, ActionError> {
    let Some(object) = raw.as_object() else {
        return Err(ActionError::NotAnObject(raw.to_string()));
    };

    match object.get("type").and_then(Value::as_str) {
        Some(kind) if AppAction::TYPES.contains(&kind) => {
            Ok(Some(serde_json::from_value(raw.clone())?))
        }
        _ => Ok(None),
    }
}

/// Root reducer over raw JSON actions.
pub fn reduce_json(
    state: Option<Arc<AppState>>,
    raw: &Value,
) -> Result<Arc<AppState>, ActionError> {
    match decode_action(raw)? {
        Some(action) => Ok(app(state, &action)),
        None => Ok(state.unwrap_or_default()),
    }
}
