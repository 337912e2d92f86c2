//! Deferred task queue.
//!
//! Tasks posted here run after the current event dispatch completes. The
//! application's event loop (or a test) drains the queue once per turn with
//! [`TaskQueue::run_turn`]. Tasks posted while a turn is running are kept for
//! the next turn, so a task can never re-enter itself within one turn.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;

use crate::error::{Error, Result};
use crate::logging::targets;

/// A unique identifier for a deferred task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(u64);

impl TaskId {
    /// Get the raw u64 value of this task ID.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

/// Global counter for generating unique task IDs.
static NEXT_TASK_ID: AtomicU64 = AtomicU64::new(1);

fn next_task_id() -> TaskId {
    TaskId(NEXT_TASK_ID.fetch_add(1, Ordering::Relaxed))
}

/// A boxed task closure.
type BoxedTask = Box<dyn FnOnce() + Send + 'static>;

struct TaskData {
    id: TaskId,
    task: BoxedTask,
}

/// A FIFO queue of zero-delay deferred tasks.
///
/// The queue is shared (`Arc<TaskQueue>`) between whoever posts work and the
/// event loop that drains it. The lock is never held while a task runs.
pub struct TaskQueue {
    tasks: Mutex<VecDeque<TaskData>>,
}

impl TaskQueue {
    /// Create a new, empty task queue.
    pub fn new() -> Self {
        Self {
            tasks: Mutex::new(VecDeque::new()),
        }
    }

    /// Post a task to run on the next turn.
    ///
    /// Returns the task ID that can be used to cancel the task.
    pub fn post<F>(&self, task: F) -> TaskId
    where
        F: FnOnce() + Send + 'static,
    {
        let id = next_task_id();
        self.tasks.lock().push_back(TaskData {
            id,
            task: Box::new(task),
        });
        tracing::trace!(target: targets::TASK, task = id.as_u64(), "task posted");
        id
    }

    /// Cancel a pending task.
    ///
    /// Returns `true` if the task was found and cancelled.
    pub fn cancel(&self, id: TaskId) -> bool {
        let mut tasks = self.tasks.lock();
        if let Some(pos) = tasks.iter().position(|t| t.id == id) {
            tasks.remove(pos);
            true
        } else {
            false
        }
    }

    /// Cancel a pending task, reporting a task that is not pending as an error.
    pub fn try_cancel(&self, id: TaskId) -> Result<()> {
        if self.cancel(id) {
            Ok(())
        } else {
            Err(Error::TaskNotPending(id))
        }
    }

    /// Check if there are any pending tasks.
    pub fn has_pending(&self) -> bool {
        !self.tasks.lock().is_empty()
    }

    /// Get the number of pending tasks.
    pub fn pending_count(&self) -> usize {
        self.tasks.lock().len()
    }

    /// Run every task that was pending when the turn started.
    ///
    /// Returns the number of tasks executed.
    pub fn run_turn(&self) -> usize {
        let budget = self.pending_count();
        let mut executed = 0;

        while executed < budget {
            let Some(task_data) = self.tasks.lock().pop_front() else {
                break;
            };
            (task_data.task)();
            executed += 1;
        }

        if executed > 0 {
            tracing::trace!(target: targets::TASK, executed, "task turn finished");
        }
        executed
    }

    /// Run turns until the queue is empty or `max_turns` turns have run.
    ///
    /// Returns the total number of tasks executed.
    pub fn run_until_idle(&self, max_turns: usize) -> usize {
        let mut total = 0;
        for _ in 0..max_turns {
            let executed = self.run_turn();
            if executed == 0 {
                break;
            }
            total += executed;
        }
        total
    }
}

impl Default for TaskQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TaskQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskQueue")
            .field("pending", &self.pending_count())
            .finish()
    }
}

static_assertions::assert_impl_all!(TaskQueue: Send, Sync);
