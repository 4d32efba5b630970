//! Subscriber registry and subscription handles.
//!
//! Every `subscribe` call creates an independent registration identified by
//! a [`SubscriptionId`](crate::types::SubscriptionId). Removal goes through
//! the [`Unsubscribe`] handle returned at registration time, never by
//! comparing callbacks.
//!
//! # Example
//!
//! ```ignore
//! let unsubscribe = store.subscribe(|| println!("state changed"));
//! store.dispatch(action)?;
//! unsubscribe.unsubscribe();
//! unsubscribe.unsubscribe(); // no-op
//! ```

mod manager;
mod types;

pub use manager::{Subscriber, SubscriberRegistry};
pub use types::{Detach, Unsubscribe, Watcher};
