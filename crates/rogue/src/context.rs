//! Per-engine context: the seed and the root tracing span.

use std::time::{SystemTime, UNIX_EPOCH};

use rogue_procedural::WorldSeed;
use tracing::Span;

use crate::config::EngineConfig;

/// Built once at startup and handed to every component constructor.
///
/// Holds the state a process-wide singleton would otherwise hold: the root
/// span every engine log line is recorded under and the world seed.
#[derive(Debug, Clone)]
pub struct EngineContext {
    span: Span,
    seed: WorldSeed,
}

impl EngineContext {
    /// Creates a context with an explicit seed.
    #[must_use]
    pub fn new(seed: WorldSeed) -> Self {
        let span = tracing::info_span!("engine", seed = seed.value());
        Self { span, seed }
    }

    /// Uses the configured seed, or derives one from the wall clock.
    ///
    /// This is the only place a seed is ever made up.
    #[must_use]
    pub fn from_config(config: &EngineConfig) -> Self {
        let seed = config.seed.map_or_else(time_seed, WorldSeed::new);
        Self::new(seed)
    }

    /// The world seed.
    #[inline]
    #[must_use]
    pub const fn seed(&self) -> WorldSeed {
        self.seed
    }

    /// Root span for this engine instance.
    #[inline]
    #[must_use]
    pub const fn span(&self) -> &Span {
        &self.span
    }
}

/// Seed from nanoseconds since the Unix epoch.
fn time_seed() -> WorldSeed {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or_else(|_| WorldSeed::default(), |elapsed| WorldSeed::new(elapsed.as_nanos() as u64))
}
