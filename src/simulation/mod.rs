//! Life - generation controller
//!
//! `LifeCore` owns the grid, the partition scheduler and the run state.
//! Every mutation goes through it, so nothing outside can observe or edit a
//! buffer while an advance is in flight:
//! - commands/  - cell edits, snapshot loads, resets
//! - control/   - play/pause/step, the command queue and the clock tick
//! - step/      - one advance, with optional perf timing
//! - init/      - construction and runtime settings
//! - facade.rs  - wasm-bindgen wrapper for JS hosts

use std::sync::mpsc::{Receiver, Sender};

use crate::core::{BoundaryPolicy, DecayRates, LifeConfig, LifeError, LifeResult, RunState};
use crate::domain::draws::DrawSource;
use crate::domain::rule::TransitionRule;
use crate::domain::seeding::InitialState;
use crate::grid::{CellState, Grid, GridView, Snapshot};
use crate::systems::scheduler::{AdvanceReport, PartitionScheduler, StepContext};

#[path = "perf/perf_timer.rs"]
mod perf_timer;
#[path = "perf/perf_stats.rs"]
mod perf_stats;
#[path = "step/step.rs"]
mod step;
#[path = "commands/commands.rs"]
mod commands;
#[path = "control/control.rs"]
mod control;
#[path = "init/init.rs"]
mod init;
#[path = "init/settings.rs"]
mod settings;
mod facade;

pub use commands::Command;
pub use control::{CommandSender, TickOutcome};
pub use facade::Life;
pub use perf_stats::PerfStats;

/// The simulation engine.
pub struct LifeCore {
    config: LifeConfig,
    grid: Grid,
    scheduler: PartitionScheduler,
    rule: TransitionRule,
    draws: DrawSource,
    state: RunState,

    // Queued commands from other threads, drained between advances
    inbox: Receiver<Command>,
    outbox: Sender<Command>,

    // Perf metrics
    perf_enabled: bool,
    perf_stats: PerfStats,
}

impl LifeCore {
    /// Engine with an all-dead grid.
    pub fn new(config: LifeConfig) -> LifeResult<Self> {
        init::create_life_core(config, &InitialState::dead())
    }

    pub fn with_initial(config: LifeConfig, initial: &InitialState) -> LifeResult<Self> {
        init::create_life_core(config, initial)
    }

    /// Engine restored from a snapshot; the snapshot's dimensions replace the configured ones.
    pub fn from_snapshot(config: LifeConfig, snapshot: &Snapshot) -> LifeResult<Self> {
        init::create_from_snapshot(config, snapshot)
    }

    /// Configuration in effect, with the seed filled in.
    pub fn config(&self) -> &LifeConfig { &self.config }

    pub fn width(&self) -> u32 { self.grid.width() }

    pub fn height(&self) -> u32 { self.grid.height() }

    pub fn generation(&self) -> u64 { self.grid.generation() }

    pub fn state(&self) -> RunState { self.state }

    pub fn is_running(&self) -> bool { self.state.is_running() }

    pub fn population(&self) -> usize { self.grid.population() }

    pub fn seed(&self) -> u64 { self.draws.seed() }

    pub fn p_flip(&self) -> f64 { self.rule.p_flip() }

    pub fn decay(&self) -> Option<DecayRates> { self.rule.decay() }

    pub fn boundary(&self) -> BoundaryPolicy { self.config.boundary }

    pub fn workers(&self) -> usize { self.scheduler.workers() }

    pub fn get(&self, x: u32, y: u32) -> LifeResult<CellState> {
        self.grid.get(x, y)
    }

    /// Copy of the current generation for renderers and persistence.
    pub fn snapshot(&self) -> Snapshot {
        self.grid.snapshot()
    }

    /// Borrow of the current generation; the borrow itself rules out a concurrent advance.
    pub fn view(&self) -> GridView<'_> {
        self.grid.view()
    }

    /// Pointer to the current buffer (one byte per cell) for JS rendering.
    pub fn cells_ptr(&self) -> *const u8 {
        self.grid.cells_ptr()
    }

    pub fn cells_len(&self) -> usize {
        self.grid.size()
    }

    // === Controller commands ===

    pub fn play(&mut self) {
        control::play(self)
    }

    pub fn pause(&mut self) {
        control::pause(self)
    }

    /// One advance; only while paused.
    pub fn step(&mut self) -> LifeResult<AdvanceReport> {
        control::step(self)
    }

    /// Clock entry point: drain queued commands, then advance once if running.
    /// An advance failure is reported in the outcome next to the drained commands.
    pub fn tick(&mut self) -> TickOutcome {
        control::tick(self)
    }

    /// Apply every queued command in arrival order; returns the rejections.
    pub fn pump_commands(&mut self) -> Vec<LifeError> {
        control::pump_commands(self)
    }

    /// Handle for queueing commands from other threads.
    pub fn command_sender(&self) -> CommandSender {
        control::command_sender(self)
    }

    pub fn apply(&mut self, command: Command) -> LifeResult<()> {
        commands::apply(self, command)
    }

    pub fn set_cell(&mut self, x: u32, y: u32, state: CellState) -> LifeResult<()> {
        commands::set_cell(self, x, y, state)
    }

    /// Flip one cell; returns its new state.
    pub fn toggle_cell(&mut self, x: u32, y: u32) -> LifeResult<CellState> {
        commands::toggle_cell(self, x, y)
    }

    pub fn load_snapshot(&mut self, snapshot: &Snapshot) -> LifeResult<()> {
        commands::load_snapshot(self, snapshot)
    }

    /// Refill the grid, restart at generation 0 and pause. Allowed in any state.
    pub fn reset(&mut self, initial: &InitialState) -> LifeResult<()> {
        commands::reset(self, initial)
    }

    // === Settings ===

    /// Symmetric flip with probability `p_flip`; replaces any decay rates.
    pub fn set_p_flip(&mut self, p_flip: f64) -> LifeResult<()> {
        settings::set_p_flip(self, p_flip)
    }

    /// Density-scaled death and revival instead of the flip.
    pub fn set_decay(&mut self, rates: DecayRates) -> LifeResult<()> {
        settings::set_decay(self, rates)
    }

    /// Replace the draw seed; later advances use the new stream.
    pub fn reseed(&mut self, seed: u64) {
        settings::reseed(self, seed)
    }

    /// Enable or disable per-advance perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        settings::enable_perf_metrics(self, enabled)
    }

    /// Last advance perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        settings::get_perf_stats(self)
    }

    fn step_context(&self) -> StepContext {
        StepContext {
            boundary: self.config.boundary,
            rule: self.rule,
            draws: self.draws,
        }
    }

    fn advance(&mut self) -> LifeResult<AdvanceReport> {
        step::advance(self)
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
