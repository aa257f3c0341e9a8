//! # ROGUE
//!
//! A fixed-timestep tile engine. The simulation runs at a constant rate no
//! matter how fast frames are drawn; the tile grid is rendered from a cache
//! that is rebuilt only when the grid changes.
//!
//! ## Startup
//!
//! ```text
//! EngineConfig ──validate──> EngineContext (seed, span)
//!                                   │
//!            AtlasProvider ──load──> World (atlas, dungeon grid, cache)
//!                                   │
//!                                Engine ──run──> shutdown (reverse release)
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use rogue::{Collaborators, Engine, EngineConfig, EngineContext, FrameLimit, IdleSimulation};
//! use rogue_core::MonotonicTimeSource;
//! use rogue_rendering::{HeadlessRenderer, TomlAtlasProvider};
//!
//! let config = EngineConfig::load("config/engine.toml".as_ref()).unwrap();
//! let context = EngineContext::from_config(&config);
//! let mut engine = Engine::new(config, context, Collaborators {
//!     renderer: HeadlessRenderer::new(),
//!     input: FrameLimit::new(600),
//!     time: MonotonicTimeSource::new(),
//!     simulation: IdleSimulation,
//!     atlases: Box::new(TomlAtlasProvider::new()),
//! }).unwrap();
//! engine.run();
//! engine.shutdown();
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod context;
pub mod engine;
pub mod error;
pub mod input;
pub mod simulation;
pub mod stats;
pub mod world;

pub use config::{EngineConfig, WorldConfig};
pub use context::EngineContext;
pub use engine::{Collaborators, Engine};
pub use error::{ConfigError, ConfigResult, EngineError, EngineResult};
pub use input::{FrameLimit, InputSource};
pub use simulation::{IdleSimulation, Simulation};
pub use stats::{FrameStats, FrameStatsAccumulator};
pub use world::{CameraOffset, World};
