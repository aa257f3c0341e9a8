//! Per-tick simulation hook.

use rogue_core::{SparseTileGrid, Tick};

/// Game logic run once per fixed tick.
///
/// The grid may only be mutated from here; the render cache picks the
/// changes up after the frame's last tick.
pub trait Simulation {
    /// Advances the game by one fixed step of `tick.dt` seconds.
    fn update(&mut self, grid: &mut SparseTileGrid, tick: Tick);
}

/// Simulation that leaves the world untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdleSimulation;

impl Simulation for IdleSimulation {
    #[inline]
    fn update(&mut self, _grid: &mut SparseTileGrid, _tick: Tick) {}
}
