//! # Rendering Error Types
//!
//! [`AtlasError`] is fatal at startup. [`RenderError`] is per call and is
//! logged, never propagated out of a frame.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading an atlas.
#[derive(Error, Debug)]
pub enum AtlasError {
    /// The descriptor could not be read.
    #[error("failed to read atlas {path}: {source}")]
    Io {
        /// Descriptor path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The descriptor is not valid TOML or is missing fields.
    #[error("failed to parse atlas {path}: {source}")]
    Parse {
        /// Descriptor path.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: toml::de::Error,
    },

    /// The descriptor parsed but describes an unusable layout.
    #[error("invalid atlas: {reason}")]
    Invalid {
        /// What was wrong.
        reason: &'static str,
    },
}

/// Result type for atlas operations.
pub type AtlasResult<T> = Result<T, AtlasError>;

/// A single backend call failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// The graphics backend rejected the call.
    #[error("backend error: {0}")]
    Backend(String),
}

/// Result type for backend calls.
pub type RenderResult<T> = Result<T, RenderError>;
