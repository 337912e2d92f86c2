//! Error types for the render crate.

use thiserror::Error;

/// Errors that can occur while building masks and regions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// Coverage data does not match the mask dimensions.
    #[error("coverage data has {actual} bytes, expected {expected} for {width}x{height}")]
    CoverageSizeMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Error returned when a color string cannot be parsed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid color '{input}': expected #RRGGBB or #RRGGBBAA")]
pub struct ParseColorError {
    /// The rejected input.
    pub input: String,
}
