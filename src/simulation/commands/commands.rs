use crate::core::{LifeError, LifeResult};
use crate::domain::seeding::InitialState;
use crate::grid::{CellState, Snapshot};

use super::LifeCore;

/// Everything an input handler, persistence layer or driver can ask of the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Play,
    Pause,
    Step,
    Reset(InitialState),
    SetCell { x: u32, y: u32, state: CellState },
    ToggleCell { x: u32, y: u32 },
    LoadSnapshot(Snapshot),
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Play => "play",
            Command::Pause => "pause",
            Command::Step => "step",
            Command::Reset(_) => "reset",
            Command::SetCell { .. } => "set cell",
            Command::ToggleCell { .. } => "toggle cell",
            Command::LoadSnapshot(_) => "load snapshot",
        }
    }
}

pub(super) fn apply(world: &mut LifeCore, command: Command) -> LifeResult<()> {
    match command {
        Command::Play => world.play(),
        Command::Pause => world.pause(),
        Command::Step => {
            world.step()?;
        }
        Command::Reset(initial) => reset(world, &initial)?,
        Command::SetCell { x, y, state } => set_cell(world, x, y, state)?,
        Command::ToggleCell { x, y } => {
            toggle_cell(world, x, y)?;
        }
        Command::LoadSnapshot(snapshot) => load_snapshot(world, &snapshot)?,
    }
    Ok(())
}

/// Cell edits and loads are only accepted while paused.
fn require_paused(world: &LifeCore, operation: &'static str) -> LifeResult<()> {
    if world.state.is_running() {
        return Err(LifeError::InvalidOperation {
            operation,
            state: world.state,
        });
    }
    Ok(())
}

pub(super) fn set_cell(world: &mut LifeCore, x: u32, y: u32, state: CellState) -> LifeResult<()> {
    require_paused(world, "set cell")?;
    world.grid.set(x, y, state)
}

pub(super) fn toggle_cell(world: &mut LifeCore, x: u32, y: u32) -> LifeResult<CellState> {
    require_paused(world, "toggle cell")?;
    let next = world.grid.get(x, y)?.flipped();
    world.grid.set(x, y, next)?;
    Ok(next)
}

pub(super) fn load_snapshot(world: &mut LifeCore, snapshot: &Snapshot) -> LifeResult<()> {
    require_paused(world, "load snapshot")?;
    world.grid.load(snapshot)?;
    log::info!(
        "loaded {}x{} snapshot at generation {}",
        snapshot.width,
        snapshot.height,
        snapshot.generation
    );
    Ok(())
}

pub(super) fn reset(world: &mut LifeCore, initial: &InitialState) -> LifeResult<()> {
    initial.apply(&mut world.grid, world.config.boundary, world.draws.seed())?;
    world.state = crate::core::RunState::Paused;
    world.perf_stats.reset();
    log::info!("reset to {:?}, population {}", initial, world.grid.population());
    Ok(())
}
