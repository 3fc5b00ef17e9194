//! Lookup Sweep Task
//!
//! Background task that periodically drops stale entries from the entity
//! lookup caches. Aggregate snapshots are only ever expired lazily.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::service::AdminCache;

/// Spawns the sweep loop, running every `interval_secs` seconds.
///
/// Abort the returned handle to stop it during shutdown.
pub fn spawn_sweep_task(cache: Arc<AdminCache>, interval_secs: u64) -> JoinHandle<()> {
    let interval = Duration::from_secs(interval_secs);

    tokio::spawn(async move {
        info!(interval_secs, "starting lookup sweep task");

        loop {
            tokio::time::sleep(interval).await;

            let removed = cache.sweep_lookups().await;
            if removed > 0 {
                info!(removed, "lookup sweep dropped stale entries");
            } else {
                debug!("lookup sweep found nothing stale");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ManualClock;
    use crate::client::mock::{self, MockAdminApi};
    use crate::config::Config;

    fn cache_with_user() -> (Arc<ManualClock>, Arc<AdminCache>) {
        let api = Arc::new(MockAdminApi::new());
        *api.users.lock().unwrap() = vec![mock::user(1)];
        let clock = Arc::new(ManualClock::new(0));
        let cache = AdminCache::with_clock(api, &Config::default(), clock.clone());
        (clock, Arc::new(cache))
    }

    #[tokio::test]
    async fn test_sweep_task_drops_stale_lookups() {
        let (clock, cache) = cache_with_user();
        cache.user(1).await.unwrap();
        clock.advance(Config::default().lookup_ttl_ms());

        let handle = spawn_sweep_task(cache.clone(), 1);
        tokio::time::sleep(Duration::from_millis(1500)).await;

        assert_eq!(cache.user_lookup().len().await, 0);
        handle.abort();
    }

    #[tokio::test]
    async fn test_sweep_task_keeps_fresh_lookups() {
        let (_clock, cache) = cache_with_user();
        cache.user(1).await.unwrap();

        let handle = spawn_sweep_task(cache.clone(), 1);
        tokio::time::sleep(Duration::from_millis(1500)).await;

        assert!(cache.user_lookup().contains(1).await);
        handle.abort();
    }

    #[tokio::test]
    async fn test_sweep_task_can_be_aborted() {
        let (_clock, cache) = cache_with_user();

        let handle = spawn_sweep_task(cache, 1);
        handle.abort();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(handle.is_finished());
    }
}
