//! In-flight request deduplication.
//!
//! A fetch in progress for key K registers a shared future; a concurrent
//! request for the same K awaits that future instead of issuing a second
//! remote call, and every waiter observes the single result.

use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::sync::Mutex;

use futures::future::{BoxFuture, FutureExt, Shared};
use tracing::debug;

type Pending<V> = Shared<BoxFuture<'static, V>>;

// == Single Flight ==
pub struct SingleFlight<K, V> {
    pending: Mutex<HashMap<K, Pending<V>>>,
}

impl<K, V> Default for SingleFlight<K, V> {
    fn default() -> Self {
        Self {
            pending: Mutex::new(HashMap::new()),
        }
    }
}

impl<K, V> SingleFlight<K, V>
where
    K: Eq + Hash + Clone + std::fmt::Debug,
    V: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self::default()
    }

    // == Run ==
    /// Runs `make()` unless a fetch for `key` is already in flight, in which
    /// case the caller joins it.
    ///
    /// The fetch keeps running as long as any waiter polls it; a dropped
    /// caller does not cancel it for the others.
    pub async fn run<F, Fut>(&self, key: K, make: F) -> V
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = V> + Send + 'static,
    {
        let shared = {
            let mut pending = self.lock();
            match pending.get(&key) {
                Some(existing) => {
                    debug!(key = ?key, "joining in-flight fetch");
                    existing.clone()
                }
                None => {
                    let fut = make().boxed().shared();
                    pending.insert(key.clone(), fut.clone());
                    fut
                }
            }
        };

        let output = shared.clone().await;

        // Only the registration we awaited is cleared; a newer one stays.
        let mut pending = self.lock();
        if pending
            .get(&key)
            .is_some_and(|current| current.ptr_eq(&shared))
        {
            pending.remove(&key);
        }

        output
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<K, Pending<V>>> {
        // The map holds no invariants a panicking holder could break.
        self.pending
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
