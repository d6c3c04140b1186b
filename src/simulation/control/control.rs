use std::sync::mpsc::{Sender, TryRecvError};

use crate::core::{LifeError, LifeResult, RunState};
use crate::systems::scheduler::AdvanceReport;

use super::{Command, LifeCore};

/// Cloneable handle for queueing commands from any thread.
///
/// Queued commands are applied in arrival order by `LifeCore::pump_commands`
/// or at the start of the next `tick`, never during an advance.
#[derive(Clone)]
pub struct CommandSender {
    tx: Sender<Command>,
}

impl CommandSender {
    /// Hands the command back if the engine is gone.
    pub fn send(&self, command: Command) -> Result<(), Command> {
        self.tx.send(command).map_err(|err| err.0)
    }
}

/// Result of one clock tick.
#[derive(Debug, Default)]
pub struct TickOutcome {
    /// Queued commands applied before the advance.
    pub applied: usize,
    /// Queued commands that were rejected, in arrival order.
    pub rejected: Vec<LifeError>,
    /// Report of the advance, if the engine was running and it succeeded.
    pub advanced: Option<AdvanceReport>,
    /// Why the advance failed; the grid kept its previous generation.
    pub advance_error: Option<LifeError>,
}

impl TickOutcome {
    /// The advance error, if any, as a `Result`.
    pub fn into_result(self) -> LifeResult<Option<AdvanceReport>> {
        match self.advance_error {
            Some(err) => Err(err),
            None => Ok(self.advanced),
        }
    }
}

pub(super) fn play(world: &mut LifeCore) {
    if world.state != RunState::Running {
        log::debug!("play at generation {}", world.grid.generation());
    }
    world.state = RunState::Running;
}

pub(super) fn pause(world: &mut LifeCore) {
    if world.state != RunState::Paused {
        log::debug!("pause at generation {}", world.grid.generation());
    }
    world.state = RunState::Paused;
}

pub(super) fn step(world: &mut LifeCore) -> LifeResult<AdvanceReport> {
    if world.state.is_running() {
        return Err(LifeError::InvalidOperation {
            operation: "step",
            state: world.state,
        });
    }
    world.advance()
}

pub(super) fn tick(world: &mut LifeCore) -> TickOutcome {
    let (applied, rejected) = drain(world);
    let mut outcome = TickOutcome {
        applied,
        rejected,
        ..TickOutcome::default()
    };

    if world.state.is_running() {
        match world.advance() {
            Ok(report) => outcome.advanced = Some(report),
            Err(err) => {
                log::warn!("tick at generation {} failed: {}", world.grid.generation(), err);
                outcome.advance_error = Some(err);
            }
        }
    }
    outcome
}

pub(super) fn pump_commands(world: &mut LifeCore) -> Vec<LifeError> {
    drain(world).1
}

pub(super) fn command_sender(world: &LifeCore) -> CommandSender {
    CommandSender {
        tx: world.outbox.clone(),
    }
}

fn drain(world: &mut LifeCore) -> (usize, Vec<LifeError>) {
    let mut applied = 0;
    let mut rejected = Vec::new();
    loop {
        let command = match world.inbox.try_recv() {
            Ok(command) => command,
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
        };
        let name = command.name();
        match world.apply(command) {
            Ok(()) => applied += 1,
            Err(err) => {
                log::warn!("queued {} rejected: {}", name, err);
                rejected.push(err);
            }
        }
    }
    (applied, rejected)
}
