//! Noisy Life Engine - parallel, non-deterministic Game of Life
//!
//! Architecture:
//! - core/        - errors, run state, configuration
//! - spatial/     - double-buffered grid, neighbour counting, row partitions
//! - domain/      - transition rule, coordinate-keyed draws, patterns, seeding
//! - systems/     - partition scheduler (worker pool + barrier)
//! - simulation/  - generation controller and the JS facade

pub mod core;
pub mod spatial;
pub mod domain;
pub mod systems;
pub mod simulation;

// Short paths for the most used modules
pub use spatial::grid;
pub use domain::rule;

use wasm_bindgen::prelude::*;

// Browser builds initialise rayon's global pool from JS
#[cfg(all(feature = "parallel", target_arch = "wasm32"))]
pub use wasm_bindgen_rayon::init_thread_pool;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    web_sys::console::log_1(&"Noisy Life engine initialized".into());
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// Re-export main types
pub use crate::core::{BoundaryPolicy, DecayRates, LifeConfig, LifeError, LifeResult, RunState};
pub use domain::draws::{DrawSource, RandomDraw};
pub use domain::patterns::Pattern;
pub use domain::rule::{classic_next, TransitionRule};
pub use domain::seeding::InitialState;
pub use grid::{CellState, Grid, GridView, Snapshot};
pub use simulation::{Command, CommandSender, Life, LifeCore, PerfStats, TickOutcome};
pub use spatial::neighbors::count_live_neighbors;
pub use spatial::partition::{partition_rows, verify_coverage, Partition};
pub use systems::scheduler::{AdvanceReport, PartitionReport, PartitionScheduler, StepContext};
