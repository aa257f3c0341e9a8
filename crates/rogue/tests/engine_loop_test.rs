//! # Engine Loop Integration Test
//!
//! Drives the full frame loop with manual time and a headless backend:
//! quit timing, tick/rebuild ordering, stall handling, teardown.

use std::cell::Cell;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::rc::Rc;
use std::time::Duration;

use rogue::{
    Collaborators, Engine, EngineConfig, EngineContext, EngineError, FrameLimit, IdleSimulation,
    Simulation,
};
use rogue_core::{Flip, ManualTimeSource, SparseTileGrid, Tick, Tile, TileCoord};
use rogue_procedural::WorldSeed;
use rogue_rendering::{
    Atlas, AtlasError, AtlasMeta, AtlasProvider, AtlasResult, HeadlessRenderer, Rect,
    RenderError, RenderResult, Renderer, Rgba, TextureHandle,
};

const TICK: Duration = Duration::from_nanos(16_666_666);

/// Counts loads and releases; optionally refuses to load.
#[derive(Clone, Default)]
struct CountingAtlases {
    loads: Rc<Cell<u32>>,
    releases: Rc<Cell<u32>>,
    fail: bool,
}

impl AtlasProvider for CountingAtlases {
    fn load(&mut self, _path: &Path) -> AtlasResult<Atlas> {
        self.loads.set(self.loads.get() + 1);
        if self.fail {
            return Err(AtlasError::Invalid {
                reason: "refused by test",
            });
        }
        Ok(Atlas {
            meta: AtlasMeta::new(16, 1, 49)?,
            texture: TextureHandle(u64::from(self.loads.get())),
        })
    }

    fn release(&mut self, _atlas: Atlas) {
        self.releases.set(self.releases.get() + 1);
    }
}

/// Writes one tile on a chosen tick and counts every tick.
#[derive(Default)]
struct MarkOnTick {
    mark_at: Option<u64>,
    ticks: Vec<Tick>,
}

impl Simulation for MarkOnTick {
    fn update(&mut self, grid: &mut SparseTileGrid, tick: Tick) {
        if self.mark_at == Some(tick.index) {
            grid.set(TileCoord::new(255, 255), Tile::new(1).with_flip(Flip::Both));
        }
        self.ticks.push(tick);
    }
}

fn config() -> EngineConfig {
    EngineConfig {
        seed: Some(5),
        ..EngineConfig::default()
    }
}

fn engine_with<S: Simulation>(
    config: EngineConfig,
    input: FrameLimit,
    time: ManualTimeSource,
    simulation: S,
    atlases: CountingAtlases,
) -> Result<Engine<HeadlessRenderer, FrameLimit, ManualTimeSource, S>, EngineError> {
    let context = EngineContext::from_config(&config);
    Engine::new(
        config,
        context,
        Collaborators {
            renderer: HeadlessRenderer::new(),
            input,
            time,
            simulation,
            atlases: Box::new(atlases),
        },
    )
}

#[test]
fn test_quit_honoured_after_current_frame() {
    let time = ManualTimeSource::new();
    let mut engine = engine_with(
        config(),
        FrameLimit::new(3),
        time,
        IdleSimulation,
        CountingAtlases::default(),
    )
    .unwrap();

    assert_eq!(engine.run(), 3);
    assert!(engine.quit_requested());
    // The quitting frame was still drawn and presented.
    assert_eq!(engine.renderer().frames(), 3);
    assert_eq!(engine.renderer().clears(), 3);
}

#[test]
fn test_mutation_during_tick_triggers_rebuild() {
    let time = ManualTimeSource::new();
    let simulation = MarkOnTick {
        mark_at: Some(5),
        ..MarkOnTick::default()
    };
    let mut engine = engine_with(
        config(),
        FrameLimit::unbounded(),
        time.clone(),
        simulation,
        CountingAtlases::default(),
    )
    .unwrap();
    let generated = engine.world().grid().len();

    let mut rebuilt = Vec::new();
    for _ in 0..8 {
        time.advance(TICK);
        let stats = engine.frame();
        assert_eq!(stats.ticks, 1);
        rebuilt.push(stats.cache_rebuilt);
    }

    // Fresh grid builds on the first frame, then only after the tick-5 write.
    assert_eq!(rebuilt, [true, false, false, false, false, true, false, false]);
    assert_eq!(engine.world().grid().len(), generated + 1);
    assert_eq!(engine.world().cache().len(), engine.world().grid().len());
    assert_eq!(engine.renderer().instances().len(), generated + 1);
    assert!(!engine.world().grid().is_dirty());

    let ticks = &engine.simulation().ticks;
    assert_eq!(ticks.len(), 8);
    assert!(ticks.iter().all(|t| (t.dt - 1.0 / 60.0).abs() < 1e-12));
}

#[test]
fn test_stall_yields_single_tick() {
    let time = ManualTimeSource::new();
    let mut engine = engine_with(
        config(),
        FrameLimit::unbounded(),
        time.clone(),
        IdleSimulation,
        CountingAtlases::default(),
    )
    .unwrap();

    // A debugger pause of five seconds.
    time.advance(Duration::from_secs(5));
    let stats = engine.frame();
    assert_eq!(stats.ticks, 1);
    assert!(!stats.backlog_dropped);
    assert_eq!(engine.clock().stalls(), 1);
}

#[test]
fn test_clock_regression_runs_no_tick() {
    let time = ManualTimeSource::new();
    time.set(Duration::from_secs(10));
    let mut engine = engine_with(
        config(),
        FrameLimit::unbounded(),
        time.clone(),
        IdleSimulation,
        CountingAtlases::default(),
    )
    .unwrap();

    time.set(Duration::from_secs(9));
    let stats = engine.frame();
    assert_eq!(stats.ticks, 0);
    assert_eq!(engine.clock().regressions(), 1);
    // The frame is still rendered.
    assert_eq!(engine.renderer().frames(), 1);
}

#[test]
fn test_backlog_dropped_with_batched_ticks() {
    let time = ManualTimeSource::new();
    let config = EngineConfig {
        update_multiplicity: 3,
        ..config()
    };
    let mut engine = engine_with(
        config,
        FrameLimit::unbounded(),
        time.clone(),
        IdleSimulation,
        CountingAtlases::default(),
    )
    .unwrap();

    // Exactly at the stall threshold: not clamped, two batches run.
    time.advance(TICK * 8);
    let first = engine.frame();
    assert_eq!(first.ticks, 6);
    assert_eq!(engine.scheduler().accumulator(), TICK * 2);

    // Leftover plus another full threshold overflows: backlog dropped.
    time.advance(TICK * 8);
    let second = engine.frame();
    assert_eq!(second.ticks, 1);
    assert!(second.backlog_dropped);
    assert_eq!(engine.scheduler().accumulator(), Duration::ZERO);
}

#[test]
fn test_tick_rate_independent_of_frame_rate() {
    let time = ManualTimeSource::new();
    let mut engine = engine_with(
        config(),
        FrameLimit::unbounded(),
        time.clone(),
        IdleSimulation,
        CountingAtlases::default(),
    )
    .unwrap();

    let frame = Duration::from_nanos(1_000_000_000 / 144);
    for _ in 0..1440 {
        time.advance(frame);
        engine.frame();
    }
    let ticks = engine.scheduler().tick_count();
    assert!((599..=600).contains(&ticks), "got {ticks} ticks");
    assert_eq!(engine.frames(), 1440);
}

#[test]
fn test_same_seed_same_world() {
    let a = engine_with(
        config(),
        FrameLimit::new(1),
        ManualTimeSource::new(),
        IdleSimulation,
        CountingAtlases::default(),
    )
    .unwrap();
    let b = engine_with(
        config(),
        FrameLimit::new(1),
        ManualTimeSource::new(),
        IdleSimulation,
        CountingAtlases::default(),
    )
    .unwrap();

    assert_eq!(a.context().seed(), WorldSeed::new(5));
    assert_eq!(a.world().grid(), b.world().grid());
    assert_eq!(a.world().generation_stats(), b.world().generation_stats());
}

#[test]
fn test_shutdown_releases_atlas_once() {
    let atlases = CountingAtlases::default();
    let mut engine = engine_with(
        config(),
        FrameLimit::new(2),
        ManualTimeSource::new(),
        IdleSimulation,
        atlases.clone(),
    )
    .unwrap();
    engine.run();

    let (stats, renderer) = engine.shutdown();
    assert_eq!(atlases.loads.get(), 1);
    assert_eq!(atlases.releases.get(), 1);
    assert_eq!(stats.frames_recorded, 2);
    assert_eq!(renderer.frames(), 2);
}

#[test]
fn test_dropped_engine_releases_atlas_once() {
    let atlases = CountingAtlases::default();
    let mut engine = engine_with(
        config(),
        FrameLimit::new(2),
        ManualTimeSource::new(),
        IdleSimulation,
        atlases.clone(),
    )
    .unwrap();
    engine.run();

    drop(engine);
    assert_eq!(atlases.loads.get(), 1);
    assert_eq!(atlases.releases.get(), 1);
}

#[test]
fn test_unwinding_engine_releases_atlas_once() {
    let atlases = CountingAtlases::default();
    let mut engine = engine_with(
        config(),
        FrameLimit::new(1),
        ManualTimeSource::new(),
        IdleSimulation,
        atlases.clone(),
    )
    .unwrap();

    let result = panic::catch_unwind(AssertUnwindSafe(move || {
        engine.run();
        panic!("frame loop aborted");
    }));

    assert!(result.is_err());
    assert_eq!(atlases.releases.get(), 1);
}

#[test]
fn test_atlas_failure_is_fatal() {
    let atlases = CountingAtlases {
        fail: true,
        ..CountingAtlases::default()
    };
    let result = engine_with(
        config(),
        FrameLimit::new(1),
        ManualTimeSource::new(),
        IdleSimulation,
        atlases.clone(),
    );

    assert!(matches!(result, Err(EngineError::Atlas(_))));
    assert_eq!(atlases.loads.get(), 1);
    assert_eq!(atlases.releases.get(), 0);
}

#[test]
fn test_invalid_config_fails_before_atlas_load() {
    let atlases = CountingAtlases::default();
    let config = EngineConfig {
        render_scale: 0,
        ..config()
    };
    let result = engine_with(
        config,
        FrameLimit::new(1),
        ManualTimeSource::new(),
        IdleSimulation,
        atlases.clone(),
    );

    assert!(matches!(result, Err(EngineError::Config(_))));
    assert_eq!(atlases.loads.get(), 0);
}

/// Backend whose draws always fail.
#[derive(Default)]
struct BrokenDraws {
    draws: u32,
    presents: u32,
}

impl Renderer for BrokenDraws {
    fn clear(&mut self, _color: Rgba) -> RenderResult<()> {
        Ok(())
    }

    fn draw(&mut self, _: TextureHandle, _: Rect, _: Rect, _: Flip, _: f64) -> RenderResult<()> {
        self.draws += 1;
        Err(RenderError::Backend("device lost".into()))
    }

    fn present(&mut self) -> RenderResult<()> {
        self.presents += 1;
        Ok(())
    }
}

#[test]
fn test_draw_failures_do_not_abort_frame() {
    let config = config();
    let context = EngineContext::from_config(&config);
    let mut engine = Engine::new(
        config,
        context,
        Collaborators {
            renderer: BrokenDraws::default(),
            input: FrameLimit::new(1),
            time: ManualTimeSource::new(),
            simulation: IdleSimulation,
            atlases: Box::new(CountingAtlases::default()),
        },
    )
    .unwrap();

    let tiles = engine.world().grid().len() as u32;
    let stats = engine.frame();

    assert_eq!(stats.draw_calls, tiles);
    assert_eq!(stats.backend_failures, tiles);
    assert_eq!(engine.renderer().draws, tiles);
    assert_eq!(engine.renderer().presents, 1);
}
