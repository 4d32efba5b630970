//! Actions understood by the todo/goal application.

use super::goals::Goal;
use super::todos::Todo;
use serde::{Deserialize, Serialize};

/// Every action the application reducer handles.
///
/// Serialized with a `type` tag, e.g. `{"type": "REMOVE_TODO", "id": 1}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppAction {
    AddTodo { todo: Todo },
    RemoveTodo { id: u64 },
    ToggleTodo { id: u64 },
    AddGoal { goal: Goal },
    RemoveGoal { id: u64 },
}

impl AppAction {
    /// Wire names of all action types.
    pub const TYPES: [&'static str; 5] = [
        "ADD_TODO",
        "REMOVE_TODO",
        "TOGGLE_TODO",
        "ADD_GOAL",
        "REMOVE_GOAL",
    ];

    /// The wire name of this action's type.
    pub fn kind(&self) -> &'static str {
        match self {
            AppAction::AddTodo { .. } => "ADD_TODO",
            AppAction::RemoveTodo { .. } => "REMOVE_TODO",
            AppAction::ToggleTodo { .. } => "TOGGLE_TODO",
            AppAction::AddGoal { .. } => "ADD_GOAL",
            AppAction::RemoveGoal { .. } => "REMOVE_GOAL",
        }
    }
}

// --- Action creators ---

pub fn add_todo(todo: Todo) -> AppAction {
    AppAction::AddTodo { todo }
}

pub fn remove_todo(id: u64) -> AppAction {
    AppAction::RemoveTodo { id }
}

pub fn toggle_todo(id: u64) -> AppAction {
    AppAction::ToggleTodo { id }
}

pub fn add_goal(goal: Goal) -> AppAction {
    AppAction::AddGoal { goal }
}

pub fn remove_goal(id: u64) -> AppAction {
    AppAction::RemoveGoal { id }
}
