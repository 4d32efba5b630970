//! Core types shared by the store and its subscription registry.

use std::fmt;
use std::sync::Arc;

/// Unique identifier for one subscription.
///
/// Ids are never reused within a store, so two registrations of the same
/// callback always carry different ids.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(pub u64);

impl fmt::Debug for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SubscriptionId({})", self.0)
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A zero-argument callback run after every committed dispatch.
pub type Listener = Arc<dyn Fn() + Send + Sync>;

/// A pure state transition `(state, action) -> state`.
///
/// `state` is `None` on the first dispatch of a store built without an
/// initial state; the reducer supplies its own default. A reducer that
/// does not care about an action should hand back the `Arc` it was given,
/// so callers can detect the no-op with [`Arc::ptr_eq`].
///
/// Any `Fn(Option<Arc<S>>, &A) -> Result<Arc<S>, E>` is a reducer.
pub trait Reducer<S, A>: Send + Sync {
    type Error;

    fn reduce(&self, state: Option<Arc<S>>, action: &A) -> Result<Arc<S>, Self::Error>;
}

impl<S, A, E, F> Reducer<S, A> for F
where
    F: Fn(Option<Arc<S>>, &A) -> Result<Arc<S>, E> + Send + Sync,
{
    type Error = E;

    fn reduce(&self, state: Option<Arc<S>>, action: &A) -> Result<Arc<S>, E> {
        self(state, action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;

    fn counter(state: Option<Arc<i64>>, delta: &i64) -> Result<Arc<i64>, Infallible> {
        if *delta == 0 {
            return Ok(state.unwrap_or_default());
        }
        Ok(Arc::new(state.map_or(0, |s| *s) + delta))
    }

    #[test]
    fn test_fn_is_reducer() {
        let next = counter.reduce(None, &5).unwrap();
        assert_eq!(*next, 5);
        let next = counter.reduce(Some(next), &-2).unwrap();
        assert_eq!(*next, 3);
    }

    #[test]
    fn test_noop_returns_same_arc() {
        let state = Arc::new(7);
        let next = counter.reduce(Some(Arc::clone(&state)), &0).unwrap();
        assert!(Arc::ptr_eq(&state, &next));
    }

    #[test]
    fn test_subscription_id_display() {
        assert_eq!(SubscriptionId(42).to_string(), "42");
        assert_eq!(format!("{:?}", SubscriptionId(3)), "SubscriptionId(3)");
    }
}
