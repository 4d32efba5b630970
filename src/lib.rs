//! # Unistore
//!
//! A unidirectional state container: one piece of application state,
//! updated only by dispatching actions through a pure reducer, with
//! subscribers notified synchronously after every update.
//!
//! ## Core Concepts
//!
//! - **Store**: Holds the current state, the reducer, and the subscribers
//! - **Reducer**: Pure `(state, action) -> state` transition
//! - **Subscribers**: Zero-argument callbacks run after each committed dispatch
//! - **Unsubscribe**: Idempotent handle removing exactly one registration
//!
//! ## Example
//!
//! ```ignore
//! use unistore::app::{self, AppAction, Todo};
//! use unistore::Store;
//!
//! let store = Store::from_fn(app::app);
//!
//! let log = store.observe(|state| println!("{state:?}"));
//! store.dispatch(app::add_todo(Todo::new(0, "Walk the dog")))?;
//! log.unsubscribe();
//! ```

pub mod app;
pub mod error;
pub mod store;
pub mod subscriptions;
pub mod types;

// Re-exports
pub use error::{ActionError, Result, StoreError, SubscriberFailure};
pub use store::{PanicPolicy, Store, StoreConfig, WeakStore};
pub use subscriptions::{Unsubscribe, Watcher};
pub use types::*;
