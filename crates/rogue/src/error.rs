//! # Engine Error Types
//!
//! Everything here is fatal and happens before the first frame. Per-frame
//! backend failures are [`RenderError`](rogue_rendering::RenderError)s and
//! are logged, not returned.

use std::path::PathBuf;

use rogue_core::{GridError, TimingError};
use rogue_procedural::ProceduralError;
use rogue_rendering::{AtlasError, RenderError};
use thiserror::Error;

/// Invalid or unreadable startup configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        /// Config path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The config is not valid TOML or has unknown or mistyped fields.
    #[error("failed to parse config {path}: {source}")]
    Parse {
        /// Config path, or `<inline>` for in-memory documents.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: toml::de::Error,
    },

    /// A field holds a value the engine cannot run with.
    #[error("invalid config field `{field}`: {reason}")]
    Invalid {
        /// Offending field.
        field: &'static str,
        /// What was wrong.
        reason: &'static str,
    },

    /// Scheduler settings are out of range.
    #[error(transparent)]
    Timing(#[from] TimingError),

    /// World dimensions are out of range.
    #[error(transparent)]
    Grid(#[from] GridError),

    /// Dungeon generator settings are out of range.
    #[error(transparent)]
    Dungeon(#[from] ProceduralError),
}

/// Result type for configuration.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Fatal initialisation failure.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Startup configuration rejected.
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),

    /// The atlas could not be loaded.
    #[error("atlas: {0}")]
    Atlas(#[from] AtlasError),

    /// The graphics backend could not be brought up.
    #[error("graphics backend: {0}")]
    Backend(#[source] RenderError),
}

/// Result type for engine construction.
pub type EngineResult<T> = Result<T, EngineError>;
