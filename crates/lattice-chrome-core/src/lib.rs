//! Core systems for Lattice Chrome.
//!
//! This crate provides the foundational components the window-chrome crate is
//! built on:
//!
//! - **Signal/Slot System**: Observer-style notification between the host
//!   window, the title bar and the chrome controller
//! - **Task Queue**: Zero-delay deferred tasks drained once per event-loop turn
//! - **Deferred Calls**: A "schedule once" primitive that coalesces any number
//!   of requests into a single pending task
//!
//! # Signal/Slot Example
//!
//! ```
//! use lattice_chrome_core::Signal;
//!
//! let resized = Signal::<(i32, i32)>::new();
//!
//! let conn_id = resized.connect(|(w, h)| {
//!     println!("Resized to {}x{}", w, h);
//! });
//!
//! resized.emit((800, 600));
//! resized.disconnect(conn_id);
//! ```
//!
//! # Deferred Call Example
//!
//! ```
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use lattice_chrome_core::{DeferredCall, TaskQueue};
//!
//! let queue = Arc::new(TaskQueue::new());
//! let passes = Arc::new(AtomicUsize::new(0));
//!
//! let passes_clone = passes.clone();
//! let update = DeferredCall::new(&queue, move || {
//!     passes_clone.fetch_add(1, Ordering::SeqCst);
//! });
//!
//! // Three requests within one turn...
//! update.schedule();
//! update.schedule();
//! update.schedule();
//!
//! // ...produce a single pass when the turn ends.
//! queue.run_turn();
//! assert_eq!(passes.load(Ordering::SeqCst), 1);
//! ```

mod deferred;
mod error;
pub mod logging;
pub mod signal;
mod task;

pub use deferred::{DeferredCall, DeferredStats};
pub use error::{Error, Result};
pub use logging::PerfSpan;
pub use signal::{ConnectionGuard, ConnectionId, ConnectionScope, Signal};
pub use task::{TaskId, TaskQueue};
