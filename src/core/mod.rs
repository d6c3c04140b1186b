//! Core - error taxonomy, run state and engine configuration shared by every layer.

pub mod config;
pub mod error;
mod state;

pub use config::{BoundaryPolicy, DecayRates, LifeConfig};
pub use error::{LifeError, LifeResult};
pub use state::RunState;
