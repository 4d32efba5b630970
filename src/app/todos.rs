//! Todo slice reducer.

use super::actions::AppAction;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub complete: bool,
}

impl Todo {
    /// An incomplete todo.
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            complete: false,
        }
    }
}

/// Todos in insertion order. Untouched entries are shared between states.
pub type TodoList = Arc<Vec<Arc<Todo>>>;

/// Reduce the todo list. Returns `state` itself for actions that change
/// nothing.
pub fn todos(state: Option<TodoList>, action: &AppAction) -> TodoList {
    let state = state.unwrap_or_default();

    match action {
        AppAction::AddTodo { todo } => {
            let mut next = Vec::with_capacity(state.len() + 1);
            next.extend(state.iter().cloned());
            next.push(Arc::new(todo.clone()));
            Arc::new(next)
        }
        AppAction::RemoveTodo { id } => {
            if !state.iter().any(|todo| todo.id == *id) {
                return state;
            }
            Arc::new(
                state
                    .iter()
                    .filter(|todo| todo.id != *id)
                    .cloned()
                    .collect(),
            )
        }
        AppAction::ToggleTodo { id } => {
            if !state.iter().any(|todo| todo.id == *id) {
                return state;
            }
            Arc::new(
                state
                    .iter()
                    .map(|todo| {
                        if todo.id != *id {
                            Arc::clone(todo)
                        } else {
                            Arc::new(Todo {
                                complete: !todo.complete,
                                ..Todo::clone(todo)
                            })
                        }
                    })
                    .collect(),
            )
        }
        _ => state,
    }
}
