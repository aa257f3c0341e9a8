//! # ROGUE
//!
//! Headless engine run.
//!
//! ```bash
//! # Default config
//! rogue
//!
//! # Explicit config, verbose
//! RUST_LOG=debug rogue config/engine.toml
//! ```
//!
//! Exits with status 1 if startup fails.

use std::path::{Path, PathBuf};

use rogue::{Collaborators, Engine, EngineConfig, EngineContext, EngineError, FrameLimit, IdleSimulation};
use rogue_core::MonotonicTimeSource;
use rogue_rendering::{HeadlessRenderer, TomlAtlasProvider};
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG: &str = "config/engine.toml";

fn main() {
    init_tracing();

    let path = std::env::args_os()
        .nth(1)
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG), PathBuf::from);

    if let Err(err) = run(&path) {
        tracing::error!(error = %err, "startup failed");
        std::process::exit(1);
    }
}

fn run(path: &Path) -> Result<(), EngineError> {
    let config = EngineConfig::load(path)?;
    tracing::info!(config = %path.display(), "configuration loaded");

    let context = EngineContext::from_config(&config);
    let input = config.max_frames.map_or_else(FrameLimit::unbounded, FrameLimit::new);

    let mut engine = Engine::new(
        config,
        context,
        Collaborators {
            renderer: HeadlessRenderer::new(),
            input,
            time: MonotonicTimeSource::new(),
            simulation: IdleSimulation,
            atlases: Box::new(TomlAtlasProvider::new()),
        },
    )?;

    engine.run();
    let (_stats, renderer) = engine.shutdown();
    tracing::info!(
        frames = renderer.frames(),
        draws = renderer.draws(),
        "headless renderer finished"
    );
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
