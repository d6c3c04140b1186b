use std::sync::mpsc;

use crate::core::{LifeConfig, LifeResult, RunState};
use crate::domain::draws::{entropy_seed, DrawSource};
use crate::domain::rule::TransitionRule;
use crate::domain::seeding::InitialState;
use crate::grid::{Grid, Snapshot};
use crate::systems::scheduler::PartitionScheduler;

use super::perf_stats::PerfStats;
use super::LifeCore;

pub(super) fn create_life_core(config: LifeConfig, initial: &InitialState) -> LifeResult<LifeCore> {
    config.validate()?;
    let seed = resolve_seed(&config)?;
    let grid = initial.build(config.width, config.height, config.boundary, seed)?;
    assemble(config, grid, seed)
}

pub(super) fn create_from_snapshot(mut config: LifeConfig, snapshot: &Snapshot) -> LifeResult<LifeCore> {
    // Reject a malformed snapshot before anything is sized from its header.
    snapshot.check_shape()?;
    config.width = snapshot.width;
    config.height = snapshot.height;
    config.validate()?;
    let seed = resolve_seed(&config)?;
    let grid = Grid::from_snapshot(snapshot)?;
    assemble(config, grid, seed)
}

fn resolve_seed(config: &LifeConfig) -> LifeResult<u64> {
    match config.seed {
        Some(seed) => Ok(seed),
        None => entropy_seed(),
    }
}

fn assemble(mut config: LifeConfig, grid: Grid, seed: u64) -> LifeResult<LifeCore> {
    let rule = TransitionRule::from_config(&config)?;
    config.seed = Some(seed);
    let scheduler = PartitionScheduler::new(config.resolved_workers());
    let (outbox, inbox) = mpsc::channel();

    log::info!(
        "life engine {}x{} ({:?}), {}, {} workers, seed {}",
        grid.width(),
        grid.height(),
        config.boundary,
        rule,
        scheduler.workers(),
        seed
    );

    Ok(LifeCore {
        config,
        grid,
        scheduler,
        rule,
        draws: DrawSource::new(seed),
        state: RunState::Paused,
        inbox,
        outbox,
        perf_enabled: false,
        perf_stats: PerfStats::default(),
    })
}
