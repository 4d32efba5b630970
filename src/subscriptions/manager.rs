//! Ordered registry of subscribers.

use crate::types::{Listener, SubscriptionId};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};

/// One registration in the registry.
#[derive(Clone)]
pub struct Subscriber {
    pub id: SubscriptionId,
    pub listener: Listener,
}

/// Holds subscribers in registration order.
///
/// The registry only stores and hands out registrations. Serializing
/// registry changes against dispatch is the store's job.
pub struct SubscriberRegistry {
    /// Active subscribers, oldest first.
    subscribers: RwLock<Vec<Subscriber>>,
    /// Counter for generating subscription IDs.
    next_id: AtomicU64,
}

impl SubscriberRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            subscribers: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Append a listener at the end of the registry.
    pub fn register(&self, listener: Listener) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::SeqCst));
        self.subscribers.write().push(Subscriber { id, listener });
        id
    }

    /// Remove the registration with this id. Returns false if it was
    /// already gone.
    pub fn remove(&self, id: SubscriptionId) -> bool {
        let mut subs = self.subscribers.write();
        match subs.iter().position(|sub| sub.id == id) {
            Some(index) => {
                subs.remove(index);
                true
            }
            None => false,
        }
    }

    /// Whether a registration is still active.
    pub fn contains(&self, id: SubscriptionId) -> bool {
        self.subscribers.read().iter().any(|sub| sub.id == id)
    }

    /// Copy of the current registrations, in order.
    ///
    /// Notification iterates this copy with no lock held, so listeners are
    /// free to subscribe or unsubscribe while being called.
    pub fn snapshot(&self) -> Vec<Subscriber> {
        self.subscribers.read().clone()
    }

    /// Get subscriber count.
    pub fn len(&self) -> usize {
        self.subscribers.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.read().is_empty()
    }
}

impl Default for SubscriberRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn noop() -> Listener {
        Arc::new(|| {})
    }

    #[test]
    fn test_register_remove() {
        let registry = SubscriberRegistry::new();

        let id = registry.register(noop());
        assert_eq!(registry.len(), 1);
        assert!(registry.contains(id));

        assert!(registry.remove(id));
        assert!(registry.is_empty());
        assert!(!registry.contains(id));
    }

    #[test]
    fn test_remove_is_idempotent() {
        let registry = SubscriberRegistry::new();
        let id = registry.register(noop());

        assert!(registry.remove(id));
        assert!(!registry.remove(id));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_same_listener_registered_twice() {
        let registry = SubscriberRegistry::new();
        let listener = noop();

        let first = registry.register(Arc::clone(&listener));
        let second = registry.register(Arc::clone(&listener));
        assert_ne!(first, second);

        registry.remove(first);
        assert_eq!(registry.len(), 1);
        assert!(registry.contains(second));
    }

    #[test]
    fn test_snapshot_preserves_order() {
        let registry = SubscriberRegistry::new();
        let ids: Vec<_> = (0..4).map(|_| registry.register(noop())).collect();

        registry.remove(ids[1]);

        let order: Vec<_> = registry.snapshot().iter().map(|sub| sub.id).collect();
        assert_eq!(order, vec![ids[0], ids[2], ids[3]]);
    }

    #[test]
    fn test_snapshot_is_detached() {
        let registry = SubscriberRegistry::new();
        let id = registry.register(noop());

        let snapshot = registry.snapshot();
        registry.remove(id);
        registry.register(noop());

        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].id, id);
    }
}
