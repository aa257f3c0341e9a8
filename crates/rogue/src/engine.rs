//! # Engine
//!
//! The composition root. Every frame, strictly in order:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │ 1. clock.sample()          clamped delta                 │
//! │ 2. input.poll()            quit noted, frame continues   │
//! │ 3. scheduler.advance()     0..n fixed ticks mutate grid  │
//! │ 4. world.refresh_cache()   rebuild only if dirty         │
//! │ 5. clear / draw / present  best effort, failures logged  │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! All grid writes happen in step 3, before step 4 reads the grid, so no
//! locking is needed.

use std::time::Instant;

use rogue_core::{FixedStepScheduler, FrameClock, TimeSource};
use rogue_rendering::{AtlasProvider, Renderer};

use crate::config::EngineConfig;
use crate::context::EngineContext;
use crate::error::EngineResult;
use crate::input::InputSource;
use crate::simulation::Simulation;
use crate::stats::{FrameStats, FrameStatsAccumulator};
use crate::world::World;

/// External systems the engine drives.
pub struct Collaborators<R, I, T, S> {
    /// Graphics backend.
    pub renderer: R,
    /// Event source.
    pub input: I,
    /// Clock.
    pub time: T,
    /// Per-tick game logic.
    pub simulation: S,
    /// Atlas loader. The world keeps it to release the atlas it loaded.
    pub atlases: Box<dyn AtlasProvider>,
}

/// Frame loop over a world.
pub struct Engine<R, I, T, S>
where
    R: Renderer,
    I: InputSource,
    T: TimeSource,
    S: Simulation,
{
    context: EngineContext,
    config: EngineConfig,
    renderer: R,
    input: I,
    simulation: S,
    clock: FrameClock<T>,
    scheduler: FixedStepScheduler,
    world: World,
    stats: FrameStatsAccumulator,
    frames: u64,
    quit_requested: bool,
}

impl<R, I, T, S> Engine<R, I, T, S>
where
    R: Renderer,
    I: InputSource,
    T: TimeSource,
    S: Simulation,
{
    /// Validates the config, builds the world and prepares the backend.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`](crate::EngineError) for an invalid config or
    /// an atlas that fails to load. Nothing is left acquired on error.
    pub fn new(
        config: EngineConfig,
        context: EngineContext,
        parts: Collaborators<R, I, T, S>,
    ) -> EngineResult<Self> {
        let Collaborators {
            mut renderer,
            input,
            time,
            simulation,
            atlases,
        } = parts;

        config.validate()?;
        let scheduler_config = config.scheduler()?;

        let world = {
            let _guard = context.span().enter();
            World::new(&context, &config, atlases)?
        };

        if let Err(err) = renderer.set_scale(config.render_scale) {
            tracing::error!(error = %err, scale = config.render_scale, "failed to set render scale");
        }

        let scheduler = FixedStepScheduler::new(scheduler_config);
        let clock = FrameClock::new(time, scheduler.tick_duration());

        tracing::info!(
            parent: context.span(),
            width = config.width,
            height = config.height,
            render_scale = config.render_scale,
            update_rate = scheduler_config.update_rate(),
            update_multiplicity = scheduler_config.multiplicity(),
            tiles = world.grid().len(),
            "engine initialised"
        );

        Ok(Self {
            stats: FrameStatsAccumulator::new(scheduler.tick_duration()),
            context,
            config,
            renderer,
            input,
            simulation,
            clock,
            scheduler,
            world,
            frames: 0,
            quit_requested: false,
        })
    }

    /// Runs one frame. Quit requested during the poll takes effect after
    /// this frame completes.
    pub fn frame(&mut self) -> FrameStats {
        let _guard = self.context.span().enter();
        let started = Instant::now();

        let delta = self.clock.sample();

        if self.input.poll() && !self.quit_requested {
            self.quit_requested = true;
            tracing::info!(frame = self.frames, "quit requested");
        }

        let simulation = &mut self.simulation;
        let world = &mut self.world;
        let ticks = self
            .scheduler
            .advance(delta, |tick| simulation.update(world.grid_mut(), tick));

        let cache_rebuilt = self.world.refresh_cache();

        let mut backend_failures = 0;
        if let Err(err) = self.renderer.clear(self.config.clear_color) {
            backend_failures += 1;
            tracing::warn!(error = %err, "clear failed");
        }
        let draw = self.world.draw(&mut self.renderer);
        backend_failures += draw.failed;
        if let Err(err) = self.renderer.present() {
            backend_failures += 1;
            tracing::warn!(error = %err, "present failed");
        }

        let stats = FrameStats {
            frame: self.frames,
            ticks: ticks.ticks,
            backlog_dropped: ticks.backlog_dropped,
            cache_rebuilt,
            draw_calls: draw.attempted,
            backend_failures,
            total_us: started.elapsed().as_micros() as u64,
        };
        self.frames += 1;
        self.stats.record(stats);
        stats
    }

    /// Runs frames until input requests quit. Returns the frames run.
    pub fn run(&mut self) -> u64 {
        let start = self.frames;
        while !self.quit_requested {
            self.frame();
        }
        self.frames - start
    }

    /// Logs the frame summary and tears the world down.
    ///
    /// Returns the accumulated statistics and the backend.
    pub fn shutdown(self) -> (FrameStatsAccumulator, R) {
        let Self {
            context,
            renderer,
            world,
            stats,
            ..
        } = self;

        let _guard = context.span().enter();
        stats.log_summary();
        world.teardown();
        tracing::info!("engine shut down");
        (stats, renderer)
    }

    /// True once input asked to quit.
    #[inline]
    #[must_use]
    pub const fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    /// Frames completed.
    #[inline]
    #[must_use]
    pub const fn frames(&self) -> u64 {
        self.frames
    }

    /// The world.
    #[inline]
    #[must_use]
    pub const fn world(&self) -> &World {
        &self.world
    }

    /// Mutable world, for setup between frames.
    #[inline]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// The scheduler.
    #[inline]
    #[must_use]
    pub const fn scheduler(&self) -> &FixedStepScheduler {
        &self.scheduler
    }

    /// The frame clock.
    #[inline]
    #[must_use]
    pub const fn clock(&self) -> &FrameClock<T> {
        &self.clock
    }

    /// The backend.
    #[inline]
    #[must_use]
    pub const fn renderer(&self) -> &R {
        &self.renderer
    }

    /// The simulation.
    #[inline]
    #[must_use]
    pub const fn simulation(&self) -> &S {
        &self.simulation
    }

    /// Accumulated frame statistics.
    #[inline]
    #[must_use]
    pub const fn stats(&self) -> &FrameStatsAccumulator {
        &self.stats
    }

    /// The engine context.
    #[inline]
    #[must_use]
    pub const fn context(&self) -> &EngineContext {
        &self.context
    }

    /// The active configuration.
    #[inline]
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }
}
