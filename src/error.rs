//! Error types for the store.

use crate::types::SubscriptionId;
use std::convert::Infallible;
use std::fmt;
use thiserror::Error;

/// Main error type for store operations.
///
/// `E` is the error type of the reducer the store was built with.
#[derive(Debug, Error)]
pub enum StoreError<E> {
    /// The reducer rejected the action. State was not updated and no
    /// subscriber was notified.
    #[error("Reducer failed: {0}")]
    Reducer(#[source] E),

    /// One or more subscribers panicked. The new state was committed and
    /// every other subscriber was still notified.
    #[error("{} subscriber(s) panicked during notification", .0.len())]
    SubscriberPanicked(Vec<SubscriberFailure>),

    #[error("Dispatch nesting exceeded limit of {limit}")]
    DispatchDepthExceeded { limit: usize },
}

impl<E> StoreError<E> {
    /// The reducer error, if this is a reducer failure.
    pub fn reducer_error(&self) -> Option<&E> {
        match self {
            StoreError::Reducer(e) => Some(e),
            _ => None,
        }
    }
}

/// A subscriber that panicked while being notified.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubscriberFailure {
    pub id: SubscriptionId,
    /// Panic payload, when it was a string.
    pub message: String,
}

impl fmt::Display for SubscriberFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "subscriber {} panicked: {}", self.id, self.message)
    }
}

/// Errors from decoding raw JSON actions.
#[derive(Debug, Error)]
pub enum ActionError {
    #[error("Action is not an object: {0}")]
    NotAnObject(String),

    #[error("Malformed action: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Result type for store operations.
pub type Result<T, E = Infallible> = std::result::Result<T, StoreError<E>>;
