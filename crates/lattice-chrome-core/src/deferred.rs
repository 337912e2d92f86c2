//! Coalesced "schedule once" calls.
//!
//! A [`DeferredCall`] wraps a callback and a [`TaskQueue`]. Calling
//! [`schedule`](DeferredCall::schedule) posts at most one task to the queue;
//! further requests while that task is pending are absorbed. When the task
//! runs it clears the pending flag *before* invoking the callback, so a
//! request made from inside the callback schedules a fresh pass on the next
//! turn instead of being lost.
//!
//! The callback reads whatever state is current when it runs, never a
//! snapshot taken at request time.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use crate::logging::targets;
use crate::task::TaskQueue;

type Callback = Arc<dyn Fn() + Send + Sync>;

struct DeferredState {
    pending: AtomicBool,
    requests: AtomicU64,
    runs: AtomicU64,
    callback: Callback,
}

/// Counters describing how a [`DeferredCall`] has been used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeferredStats {
    /// Number of `schedule()` requests, coalesced or not.
    pub requests: u64,
    /// Number of times the callback actually ran.
    pub runs: u64,
    /// Whether a run is currently pending.
    pub pending: bool,
}

/// A coalescing deferred call: at most one pending execution at a time.
pub struct DeferredCall {
    queue: Weak<TaskQueue>,
    state: Arc<DeferredState>,
}

impl DeferredCall {
    /// Create a deferred call that posts to `queue`.
    ///
    /// Only a weak reference to the queue is kept; once the event loop drops
    /// its queue, further requests are ignored.
    pub fn new<F>(queue: &Arc<TaskQueue>, callback: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Self {
            queue: Arc::downgrade(queue),
            state: Arc::new(DeferredState {
                pending: AtomicBool::new(false),
                requests: AtomicU64::new(0),
                runs: AtomicU64::new(0),
                callback: Arc::new(callback),
            }),
        }
    }

    /// Request a run on the next turn.
    ///
    /// Returns `true` if a task was posted, `false` if the request was
    /// coalesced into an already-pending run (or the queue is gone).
    pub fn schedule(&self) -> bool {
        self.state.requests.fetch_add(1, Ordering::Relaxed);

        if self.state.pending.swap(true, Ordering::AcqRel) {
            tracing::trace!(target: targets::TASK, "deferred call already pending, coalesced");
            return false;
        }

        let Some(queue) = self.queue.upgrade() else {
            self.state.pending.store(false, Ordering::Release);
            tracing::debug!(target: targets::TASK, "task queue dropped, deferred call ignored");
            return false;
        };

        let state = self.state.clone();
        queue.post(move || {
            state.pending.store(false, Ordering::Release);
            state.runs.fetch_add(1, Ordering::Relaxed);
            (state.callback)();
        });
        true
    }

    /// Check whether a run is pending.
    pub fn is_pending(&self) -> bool {
        self.state.pending.load(Ordering::Acquire)
    }

    /// Snapshot the request/run counters.
    pub fn stats(&self) -> DeferredStats {
        DeferredStats {
            requests: self.state.requests.load(Ordering::Relaxed),
            runs: self.state.runs.load(Ordering::Relaxed),
            pending: self.is_pending(),
        }
    }
}

impl std::fmt::Debug for DeferredCall {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeferredCall")
            .field("stats", &self.stats())
            .finish()
    }
}

static_assertions::assert_impl_all!(DeferredCall: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[test]
    fn test_requests_coalesce_into_one_run() {
        let queue = Arc::new(TaskQueue::new());
        let runs = Arc::new(AtomicU64::new(0));

        let runs_clone = runs.clone();
        let call = DeferredCall::new(&queue, move || {
            runs_clone.fetch_add(1, Ordering::SeqCst);
        });

        assert!(call.schedule());
        assert!(!call.schedule());
        assert!(!call.schedule());
        assert!(call.is_pending());
        assert_eq!(queue.pending_count(), 1);

        queue.run_turn();

        assert_eq!(runs.load(Ordering::SeqCst), 1);
        assert_eq!(
            call.stats(),
            DeferredStats {
                requests: 3,
                runs: 1,
                pending: false
            }
        );
    }

    #[test]
    fn test_run_observes_latest_state() {
        let queue = Arc::new(TaskQueue::new());
        let value = Arc::new(Mutex::new(0));
        let seen = Arc::new(Mutex::new(Vec::new()));

        let value_clone = value.clone();
        let seen_clone = seen.clone();
        let call = DeferredCall::new(&queue, move || {
            seen_clone.lock().push(*value_clone.lock());
        });

        for v in 1..=5 {
            *value.lock() = v;
            call.schedule();
        }
        queue.run_turn();

        assert_eq!(*seen.lock(), vec![5]);
    }

    #[test]
    fn test_schedule_from_callback_runs_next_turn() {
        let queue = Arc::new(TaskQueue::new());
        let runs = Arc::new(AtomicU64::new(0));
        let slot: Arc<Mutex<Option<Arc<DeferredCall>>>> = Arc::new(Mutex::new(None));

        let runs_clone = runs.clone();
        let slot_clone = slot.clone();
        let call = Arc::new(DeferredCall::new(&queue, move || {
            if runs_clone.fetch_add(1, Ordering::SeqCst) == 0
                && let Some(call) = slot_clone.lock().clone()
            {
                call.schedule();
            }
        }));
        *slot.lock() = Some(call.clone());

        call.schedule();
        queue.run_turn();
        assert_eq!(runs.load(Ordering::SeqCst), 1);
        assert!(call.is_pending());

        queue.run_turn();
        assert_eq!(runs.load(Ordering::SeqCst), 2);
        assert!(!call.is_pending());

        slot.lock().take();
    }

    #[test]
    fn test_dropped_queue_ignores_requests() {
        let queue = Arc::new(TaskQueue::new());
        let call = DeferredCall::new(&queue, || {});
        drop(queue);

        assert!(!call.schedule());
        assert!(!call.is_pending());
    }
}
