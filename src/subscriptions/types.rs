//! Subscription handles.

use crate::types::SubscriptionId;
use crossbeam_channel::{Receiver, RecvError, RecvTimeoutError, TryRecvError};
use std::fmt;
use std::sync::{Arc, Weak};
use std::time::Duration;

/// Something that subscriptions can be detached from.
///
/// Implemented by the store so that handles stay non-generic over the
/// store's state and action types.
pub trait Detach: Send + Sync {
    /// Remove the registration. Returns false if it was already removed.
    fn detach(&self, id: SubscriptionId) -> bool;

    /// Whether the registration is still active.
    fn is_attached(&self, id: SubscriptionId) -> bool;
}

/// Handle that removes exactly one registration.
///
/// Calling [`unsubscribe`](Self::unsubscribe) more than once is a no-op.
/// Dropping the handle leaves the subscription in place. The handle holds
/// the store weakly and never keeps it alive.
#[derive(Clone)]
pub struct Unsubscribe {
    id: SubscriptionId,
    target: Weak<dyn Detach>,
}

impl Unsubscribe {
    pub(crate) fn new(id: SubscriptionId, target: Weak<dyn Detach>) -> Self {
        Self { id, target }
    }

    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Remove the registration. Returns true only on the call that actually
    /// removed it.
    pub fn unsubscribe(&self) -> bool {
        match self.target.upgrade() {
            Some(target) => target.detach(self.id),
            None => false,
        }
    }

    /// Whether the registration is still active on a live store.
    pub fn is_active(&self) -> bool {
        self.target
            .upgrade()
            .is_some_and(|target| target.is_attached(self.id))
    }
}

impl fmt::Debug for Unsubscribe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Unsubscribe").field("id", &self.id).finish()
    }
}

/// Channel-backed subscription that receives every committed state.
pub struct Watcher<S> {
    /// Channel to receive states.
    pub receiver: Receiver<Arc<S>>,
    unsubscribe: Unsubscribe,
}

impl<S> Watcher<S> {
    pub(crate) fn new(receiver: Receiver<Arc<S>>, unsubscribe: Unsubscribe) -> Self {
        Self {
            receiver,
            unsubscribe,
        }
    }

    pub fn id(&self) -> SubscriptionId {
        self.unsubscribe.id()
    }

    /// Receive the next state (blocking).
    pub fn recv(&self) -> Result<Arc<S>, RecvError> {
        self.receiver.recv()
    }

    /// Try to receive a state (non-blocking).
    pub fn try_recv(&self) -> Result<Arc<S>, TryRecvError> {
        self.receiver.try_recv()
    }

    /// Receive with timeout.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<Arc<S>, RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }

    /// Stop watching. States already buffered stay readable.
    pub fn unsubscribe(&self) -> bool {
        self.unsubscribe.unsubscribe()
    }
}
