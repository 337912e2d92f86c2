//! Logging facilities for Lattice Chrome.
//!
//! Lattice Chrome uses the `tracing` crate for instrumentation. To see logs,
//! install a tracing subscriber in your application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("lattice_chrome=debug")
//!     .init();
//! ```
//!
//! Reconciliation passes are logged under [`targets::CHROME`], region
//! computation under [`targets::REGION`].

/// Span names used throughout Lattice Chrome for tracing.
pub mod span_names {
    /// One reconciliation pass of the chrome controller.
    pub const RECONCILE: &str = "lattice_chrome::reconcile";
    /// Content-mask recomputation.
    pub const CONTENT_MASK: &str = "lattice_chrome::content_mask";
    /// Signal emission span.
    pub const SIGNAL: &str = "lattice_chrome::signal";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core crate target.
    pub const CORE: &str = "lattice_chrome_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "lattice_chrome_core::signal";
    /// Task queue and deferred calls target.
    pub const TASK: &str = "lattice_chrome_core::task";
    /// Chrome controller target.
    pub const CHROME: &str = "lattice_chrome::chrome";
    /// Region computation target.
    pub const REGION: &str = "lattice_chrome::region";
    /// Host window adapters target.
    pub const HOST: &str = "lattice_chrome::host";
    /// Performance spans target.
    pub const PERF: &str = "lattice_chrome::perf";
}

/// A guard for performance tracing spans.
///
/// Creates a span when constructed and exits it when dropped.
///
/// ```
/// use lattice_chrome_core::PerfSpan;
///
/// fn expensive_operation() {
///     let _span = PerfSpan::new("expensive_operation");
///     // ... work ...
/// }
/// # expensive_operation();
/// ```
pub struct PerfSpan {
    _span: tracing::span::EnteredSpan,
    started: std::time::Instant,
    operation: &'static str,
}

impl PerfSpan {
    /// Create a new performance span.
    pub fn new(operation: &'static str) -> Self {
        let span = tracing::trace_span!(target: "lattice_chrome::perf", "perf", operation);
        Self {
            _span: span.entered(),
            started: std::time::Instant::now(),
            operation,
        }
    }
}

impl Drop for PerfSpan {
    fn drop(&mut self) {
        tracing::trace!(
            target: targets::PERF,
            operation = self.operation,
            elapsed_us = self.started.elapsed().as_micros() as u64,
            "operation finished"
        );
    }
}
