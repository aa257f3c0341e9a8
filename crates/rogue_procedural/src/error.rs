//! # Procedural Error Types

use thiserror::Error;

/// Errors raised when configuring generation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProceduralError {
    /// A range the generator samples from is empty.
    #[error("dungeon config: {field} must be at least 1")]
    EmptyRange {
        /// Name of the offending field.
        field: &'static str,
    },
}

/// Result type for procedural operations.
pub type ProceduralResult<T> = Result<T, ProceduralError>;
