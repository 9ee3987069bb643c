use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::config::AppConfig;
use crate::workflow::WorkflowRunner;

/// Shared router state: the workflow runner port plus a per-event lock map.
///
/// Concurrent requests against the same event would race each other on the
/// external site (it has no locking of its own), so runs are serialized per
/// `eventID`; distinct events still run concurrently.
#[derive(Clone)]
pub struct ServeState {
    config: Arc<AppConfig>,
    runner: Arc<dyn WorkflowRunner>,
    event_locks: Arc<DashMap<String, Arc<Mutex<()>>>>,
}

impl ServeState {
    pub fn new(config: Arc<AppConfig>, runner: Arc<dyn WorkflowRunner>) -> Self {
        Self {
            config,
            runner,
            event_locks: Arc::new(DashMap::new()),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn runner(&self) -> &dyn WorkflowRunner {
        self.runner.as_ref()
    }

    /// Acquire the per-event lock. The returned guard evicts the map entry
    /// on release when no other request holds or awaits it, so the map
    /// shrinks back to empty on an idle server instead of growing by one
    /// entry per distinct client-supplied event ID.
    pub async fn lock_event(&self, event_id: &str) -> EventLockGuard {
        let lock = self
            .event_locks
            .entry(event_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        let guard = lock.lock_owned().await;
        EventLockGuard {
            guard: Some(guard),
            key: event_id.to_string(),
            map: Arc::clone(&self.event_locks),
        }
    }

    #[cfg(test)]
    pub(crate) fn active_event_locks(&self) -> usize {
        self.event_locks.len()
    }
}

/// Holds the per-event mutex for the duration of one workflow run.
pub struct EventLockGuard {
    guard: Option<OwnedMutexGuard<()>>,
    key: String,
    map: Arc<DashMap<String, Arc<Mutex<()>>>>,
}

impl Drop for EventLockGuard {
    fn drop(&mut self) {
        // Release the mutex (and its Arc) first, then evict the entry only
        // when the map holds the sole remaining reference. A queued waiter
        // still owns an Arc, which keeps the entry alive for its turn.
        self.guard.take();
        self.map
            .remove_if(&self.key, |_, lock| Arc::strong_count(lock) == 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::{WorkflowOutcome, WorkflowRequest};
    use async_trait::async_trait;
    use cdp_session::SessionConfig;
    use std::time::Duration;
    use tokio::time::timeout;

    struct NoopRunner;

    #[async_trait]
    impl WorkflowRunner for NoopRunner {
        async fn run(&self, _request: WorkflowRequest) -> WorkflowOutcome {
            WorkflowOutcome {
                steps: Vec::new(),
                error: None,
            }
        }
    }

    fn state() -> ServeState {
        ServeState::new(
            Arc::new(AppConfig {
                port: 3000,
                credentials: crate::config::Credentials {
                    email: "ops@example.com".into(),
                    password: "hunter2".into(),
                },
                browser: SessionConfig::default(),
                base_url: "https://lu.ma".into(),
                deadline_offset: crate::config::offset_from_hours(-7).unwrap(),
            }),
            Arc::new(NoopRunner),
        )
    }

    #[tokio::test]
    async fn lock_map_empties_after_release() {
        let state = state();
        for i in 0..100 {
            let guard = state.lock_event(&format!("evt-{i}")).await;
            drop(guard);
        }
        assert_eq!(state.active_event_locks(), 0);
    }

    #[tokio::test]
    async fn entry_lives_while_a_guard_is_held() {
        let state = state();
        let guard = state.lock_event("evt-1").await;
        assert_eq!(state.active_event_locks(), 1);
        drop(guard);
        assert_eq!(state.active_event_locks(), 0);
    }

    #[tokio::test]
    async fn same_event_is_serialized() {
        let state = state();
        let _held = state.lock_event("evt-1").await;
        let second = timeout(Duration::from_millis(50), state.lock_event("evt-1")).await;
        assert!(second.is_err(), "second acquisition must queue");
    }

    #[tokio::test]
    async fn waiter_keeps_the_entry_alive_across_a_release() {
        let state = state();
        let held = state.lock_event("evt-1").await;
        let waiter = {
            let state = state.clone();
            tokio::spawn(async move {
                let _guard = state.lock_event("evt-1").await;
            })
        };
        // Let the waiter queue on the mutex before releasing.
        tokio::time::sleep(Duration::from_millis(20)).await;
        drop(held);
        waiter.await.unwrap();
        assert_eq!(state.active_event_locks(), 0);
    }

    #[tokio::test]
    async fn distinct_events_do_not_block_each_other() {
        let state = state();
        let _a = state.lock_event("evt-1").await;
        let b = timeout(Duration::from_millis(50), state.lock_event("evt-2")).await;
        assert!(b.is_ok());
        assert_eq!(state.active_event_locks(), 2);
    }
}
