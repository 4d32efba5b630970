//! Main Store struct tying the reducer, state slot, and subscribers together.

use crate::error::{Result, StoreError, SubscriberFailure};
use crate::subscriptions::{Detach, Subscriber, SubscriberRegistry, Unsubscribe, Watcher};
use crate::types::{Listener, Reducer, SubscriptionId};
use crossbeam_channel::{bounded, TrySendError};
use parking_lot::{ReentrantMutex, RwLock};
use std::any::Any;
use std::convert::Infallible;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock, Weak};
use tracing::{debug, trace, warn};

/// What happens when a subscriber panics during notification.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PanicPolicy {
    /// Catch the panic, keep notifying the remaining subscribers, and
    /// report every failure from `dispatch` once the round is over.
    #[default]
    Isolate,
    /// Let the panic unwind out of `dispatch`. Later subscribers are not
    /// notified for that round.
    Propagate,
}

/// Store configuration.
#[derive(Clone, Debug)]
pub struct StoreConfig {
    /// Name attached to log events.
    pub name: String,

    /// Max nesting of dispatch calls made from inside subscribers.
    /// Default: 64
    pub max_dispatch_depth: usize,

    /// Subscriber panic handling.
    pub panic_policy: PanicPolicy,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            name: "store".to_string(),
            max_dispatch_depth: 64,
            panic_policy: PanicPolicy::Isolate,
        }
    }
}

struct Inner<S, A, E> {
    /// Store configuration.
    config: StoreConfig,

    /// Bound once at construction.
    reducer: Box<dyn Reducer<S, A, Error = E>>,

    /// Last committed state. `None` until the first dispatch unless an
    /// initial state was given.
    state: RwLock<Option<Arc<S>>>,

    subscribers: SubscriberRegistry,

    /// Serializes dispatch and registry changes across threads. Re-entrant
    /// so subscribers can dispatch, subscribe and unsubscribe while being
    /// notified.
    gate: ReentrantMutex<()>,

    /// Nesting level of the dispatch currently holding the gate.
    depth: AtomicUsize,
}

impl<S, A, E> Inner<S, A, E> {
    /// Call each subscriber in order, applying the panic policy.
    fn notify(&self, subscribers: &[Subscriber]) -> Vec<SubscriberFailure> {
        let mut failures = Vec::new();

        for sub in subscribers {
            match self.config.panic_policy {
                PanicPolicy::Propagate => (sub.listener)(),
                PanicPolicy::Isolate => {
                    if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| (sub.listener)()))
                    {
                        let message = panic_message(payload.as_ref());
                        warn!(
                            store = %self.config.name,
                            subscription = %sub.id,
                            %message,
                            "subscriber panicked"
                        );
                        failures.push(SubscriberFailure {
                            id: sub.id,
                            message,
                        });
                    }
                }
            }
        }

        failures
    }
}

impl<S: Send + Sync, A, E> Detach for Inner<S, A, E> {
    fn detach(&self, id: SubscriptionId) -> bool {
        let _gate = self.gate.lock();
        let removed = self.subscribers.remove(id);
        if removed {
            debug!(store = %self.config.name, subscription = %id, "subscriber removed");
        }
        removed
    }

    fn is_attached(&self, id: SubscriptionId) -> bool {
        self.subscribers.contains(id)
    }
}

/// Decrements the dispatch depth when a dispatch ends, including on unwind.
struct DepthGuard<'a>(&'a AtomicUsize);

impl Drop for DepthGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

/// A single source of truth updated only through its reducer.
///
/// `Store` is a cheap handle: clones share the same state and subscribers.
/// Subscribers that need to read the store should hold a [`WeakStore`]
/// (see [`Store::downgrade`]) so the store can still be dropped.
pub struct Store<S, A, E = Infallible> {
    inner: Arc<Inner<S, A, E>>,
}

impl<S, A, E> Store<S, A, E>
where
    S: Send + Sync + 'static,
    A: 'static,
    E: 'static,
{
    /// Create a store with no state. The reducer supplies the initial
    /// state on the first dispatch.
    pub fn new<R>(reducer: R) -> Self
    where
        R: Reducer<S, A, Error = E> + 'static,
    {
        Self::with_config(reducer, StoreConfig::default())
    }

    /// Create a store with custom configuration.
    pub fn with_config<R>(reducer: R, config: StoreConfig) -> Self
    where
        R: Reducer<S, A, Error = E> + 'static,
    {
        Self::build(Box::new(reducer), None, config)
    }

    /// Create a store that starts from an explicit state.
    pub fn with_state<R>(reducer: R, initial: S, config: StoreConfig) -> Self
    where
        R: Reducer<S, A, Error = E> + 'static,
    {
        Self::build(Box::new(reducer), Some(Arc::new(initial)), config)
    }

    fn build(
        reducer: Box<dyn Reducer<S, A, Error = E>>,
        initial: Option<Arc<S>>,
        config: StoreConfig,
    ) -> Self {
        debug!(store = %config.name, initialized = initial.is_some(), "store created");
        Self {
            inner: Arc::new(Inner {
                config,
                reducer,
                state: RwLock::new(initial),
                subscribers: SubscriberRegistry::new(),
                gate: ReentrantMutex::new(()),
                depth: AtomicUsize::new(0),
            }),
        }
    }

    /// The last committed state.
    ///
    /// Returns the same allocation until the next dispatch commits.
    pub fn get_state(&self) -> Option<Arc<S>> {
        self.inner.state.read().clone()
    }

    /// Apply the reducer to the current state and notify subscribers.
    ///
    /// The new state is committed before any subscriber runs, and every
    /// subscriber registered when notification starts is called in
    /// registration order before this returns. A subscriber may dispatch
    /// again; the nested dispatch completes, including its own round of
    /// notifications, before the outer round continues.
    ///
    /// Returns the action back on success. On a reducer error the state is
    /// left as it was and nobody is notified.
    pub fn dispatch(&self, action: A) -> Result<A, E> {
        let inner = &*self.inner;
        let _gate = inner.gate.lock();

        let depth = inner.depth.fetch_add(1, Ordering::SeqCst) + 1;
        let _depth = DepthGuard(&inner.depth);
        if depth > inner.config.max_dispatch_depth {
            warn!(store = %inner.config.name, depth, "dispatch nesting limit exceeded");
            return Err(StoreError::DispatchDepthExceeded {
                limit: inner.config.max_dispatch_depth,
            });
        }

        let current = inner.state.read().clone();
        let next = match inner.reducer.reduce(current, &action) {
            Ok(next) => next,
            Err(e) => {
                debug!(store = %inner.config.name, depth, "reducer rejected action");
                return Err(StoreError::Reducer(e));
            }
        };
        *inner.state.write() = Some(next);

        let subscribers = inner.subscribers.snapshot();
        trace!(
            store = %inner.config.name,
            depth,
            subscribers = subscribers.len(),
            "state committed"
        );

        let failures = inner.notify(&subscribers);
        if failures.is_empty() {
            Ok(action)
        } else {
            Err(StoreError::SubscriberPanicked(failures))
        }
    }

    /// Register a listener, called after every committed dispatch.
    ///
    /// Each call creates a separate registration, even for the same
    /// callback. A listener added while a notification round is running is
    /// first called on the next dispatch.
    pub fn subscribe<F>(&self, listener: F) -> Unsubscribe
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.subscribe_listener(Arc::new(listener))
    }

    fn subscribe_listener(&self, listener: Listener) -> Unsubscribe {
        let _gate = self.inner.gate.lock();
        let id = self.inner.subscribers.register(listener);
        debug!(store = %self.inner.config.name, subscription = %id, "subscriber registered");

        let target: Weak<dyn Detach> = Arc::downgrade(&self.inner) as Weak<dyn Detach>;
        Unsubscribe::new(id, target)
    }

    /// Subscribe with a callback that receives the committed state.
    pub fn observe<F>(&self, f: F) -> Unsubscribe
    where
        F: Fn(Arc<S>) + Send + Sync + 'static,
    {
        let store = self.downgrade();
        self.subscribe(move || {
            if let Some(state) = store.upgrade().and_then(|store| store.get_state()) {
                f(state);
            }
        })
    }

    /// Subscribe through a bounded channel of committed states.
    ///
    /// When the buffer is full the new state is dropped for that watcher.
    /// Once the watcher's receiver is gone the subscription removes itself
    /// on the next dispatch.
    pub fn watch(&self, buffer_size: usize) -> Watcher<S> {
        let (sender, receiver) = bounded(buffer_size.max(1));
        let store = self.downgrade();
        let name = self.inner.config.name.clone();
        let handle: Arc<OnceLock<Unsubscribe>> = Arc::new(OnceLock::new());
        let own_handle = Arc::clone(&handle);

        let unsubscribe = self.subscribe(move || {
            let Some(state) = store.upgrade().and_then(|store| store.get_state()) else {
                return;
            };
            match sender.try_send(state) {
                Ok(()) => {}
                Err(TrySendError::Full(_)) => {
                    warn!(store = %name, "watcher buffer full, dropping state");
                }
                Err(TrySendError::Disconnected(_)) => {
                    if let Some(unsubscribe) = own_handle.get() {
                        unsubscribe.unsubscribe();
                    }
                }
            }
        });

        let _ = handle.set(unsubscribe.clone());
        Watcher::new(receiver, unsubscribe)
    }

    /// Get subscriber count.
    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.len()
    }

    pub fn config(&self) -> &StoreConfig {
        &self.inner.config
    }

    /// A handle that does not keep the store alive.
    pub fn downgrade(&self) -> WeakStore<S, A, E> {
        WeakStore {
            inner: Arc::downgrade(&self.inner),
        }
    }
}

impl<S, A> Store<S, A, Infallible>
where
    S: Send + Sync + 'static,
    A: 'static,
{
    /// Create a store from a reducer that cannot fail.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(Option<Arc<S>>, &A) -> Arc<S> + Send + Sync + 'static,
    {
        Self::new(
            move |state: Option<Arc<S>>, action: &A| -> std::result::Result<Arc<S>, Infallible> {
                Ok(f(state, action))
            },
        )
    }
}

impl<S, A, E> Clone for Store<S, A, E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S, A, E> fmt::Debug for Store<S, A, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("name", &self.inner.config.name)
            .field("subscribers", &self.inner.subscribers.len())
            .finish()
    }
}

/// Weak counterpart of [`Store`].
pub struct WeakStore<S, A, E = Infallible> {
    inner: Weak<Inner<S, A, E>>,
}

impl<S, A, E> WeakStore<S, A, E> {
    pub fn upgrade(&self) -> Option<Store<S, A, E>> {
        self.inner.upgrade().map(|inner| Store { inner })
    }
}

impl<S, A, E> Clone for WeakStore<S, A, E> {
    fn clone(&self) -> Self {
        Self {
            inner: Weak::clone(&self.inner),
        }
    }
}
