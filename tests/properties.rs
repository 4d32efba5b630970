//! Property tests over arbitrary dispatch sequences.

use parking_lot::Mutex;
use proptest::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use unistore::app::{self, AppAction, AppState, Goal, Todo};
use unistore::Store;

fn action_strategy() -> impl Strategy<Value = AppAction> {
    prop_oneof![
        (0u64..8, "[a-z]{1,8}").prop_map(|(id, name)| app::add_todo(Todo::new(id, name))),
        (0u64..8).prop_map(app::remove_todo),
        (0u64..8).prop_map(app::toggle_todo),
        (0u64..8, "[a-z]{1,8}").prop_map(|(id, name)| app::add_goal(Goal::new(id, name))),
        (0u64..8).prop_map(app::remove_goal),
    ]
}

proptest! {
    #[test]
    fn prop_state_is_fold_of_actions(actions in prop::collection::vec(action_strategy(), 0..40)) {
        let store: Store<AppState, AppAction> = Store::from_fn(app::app);
        let mut expected: Option<Arc<AppState>> = None;

        for action in actions {
            expected = Some(app::app(expected, &action));
            store.dispatch(action).unwrap();
            prop_assert_eq!(store.get_state(), expected.clone());
        }
    }

    #[test]
    fn prop_each_subscriber_notified_once_per_dispatch(
        subscribers in 1usize..6,
        actions in prop::collection::vec(action_strategy(), 0..20),
    ) {
        let store: Store<AppState, AppAction> = Store::from_fn(app::app);
        let log = Arc::new(Mutex::new(Vec::new()));

        for index in 0..subscribers {
            let log = Arc::clone(&log);
            store.subscribe(move || log.lock().push(index));
        }

        let dispatched = actions.len();
        for action in actions {
            store.dispatch(action).unwrap();
        }

        let expected: Vec<usize> = (0..dispatched).flat_map(|_| 0..subscribers).collect();
        prop_assert_eq!(&*log.lock(), &expected);
    }

    #[test]
    fn prop_unsubscribed_never_called_again(
        before in prop::collection::vec(action_strategy(), 0..10),
        after in prop::collection::vec(action_strategy(), 0..10),
    ) {
        let store: Store<AppState, AppAction> = Store::from_fn(app::app);
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_clone = Arc::clone(&calls);
        let unsubscribe = store.subscribe(move || {
            calls_clone.fetch_add(1, Ordering::SeqCst);
        });

        let count = before.len();
        for action in before {
            store.dispatch(action).unwrap();
        }
        unsubscribe.unsubscribe();
        for action in after {
            store.dispatch(action).unwrap();
        }

        prop_assert_eq!(calls.load(Ordering::SeqCst), count);
    }

    #[test]
    fn prop_get_state_is_stable(actions in prop::collection::vec(action_strategy(), 1..20)) {
        let store: Store<AppState, AppAction> = Store::from_fn(app::app);
        for action in actions {
            store.dispatch(action).unwrap();
        }

        let first = store.get_state().unwrap();
        for _ in 0..3 {
            prop_assert!(Arc::ptr_eq(&first, &store.get_state().unwrap()));
        }
    }
}
