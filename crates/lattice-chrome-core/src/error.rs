//! Error types for Lattice Chrome core systems.

use crate::signal::ConnectionId;
use crate::task::TaskId;

/// A specialized Result type for core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by the signal and task systems.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The connection ID is invalid or has already been disconnected.
    #[error("invalid or disconnected connection {0:?}")]
    InvalidConnection(ConnectionId),

    /// The task already ran, was cancelled, or never existed.
    #[error("task {} is not pending", .0.as_u64())]
    TaskNotPending(TaskId),
}
