use std::fmt;

use serde::{Deserialize, Serialize};

/// Generation controller state. Engines start `Paused`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RunState {
    #[default]
    Paused,
    Running,
}

impl RunState {
    #[inline]
    pub fn is_running(self) -> bool {
        self == RunState::Running
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunState::Paused => f.write_str("paused"),
            RunState::Running => f.write_str("running"),
        }
    }
}
