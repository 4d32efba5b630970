//! Drives the todo/goal store through a fixed sequence of actions and logs
//! every state it commits.
//!
//! Run with `cargo run --example todo_app`.

use serde_json::{json, Value};
use unistore::app::{self, Goal, Todo};
use unistore::{Store, StoreConfig};

fn to_raw(action: app::AppAction) -> Value {
    serde_json::to_value(action).unwrap_or(Value::Null)
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let store = Store::with_config(
        app::reduce_json,
        StoreConfig {
            name: "todo-app".to_string(),
            ..Default::default()
        },
    );

    let logger = store.observe(|state| match serde_json::to_string(&*state) {
        Ok(json) => tracing::info!(state = %json, "The new state is"),
        Err(e) => tracing::error!(error = %e, "failed to encode state"),
    });

    let mut gym = Todo::new(2, "Go to the gym");
    gym.complete = true;

    let actions = vec![
        to_raw(app::add_todo(Todo::new(0, "Walk the dog"))),
        to_raw(app::add_todo(Todo::new(1, "Wash the car"))),
        to_raw(app::add_todo(gym)),
        to_raw(app::remove_todo(1)),
        to_raw(app::toggle_todo(0)),
        to_raw(app::add_goal(Goal::new(0, "Learn Redux"))),
        to_raw(app::add_goal(Goal::new(1, "Lose 20 pounds"))),
        json!(0),
    ];

    for action in actions {
        if let Err(e) = store.dispatch(action) {
            tracing::error!(error = %e, "dispatch failed");
        }
    }

    logger.unsubscribe();
}
