//! Transition rule: classic B3/S23 followed by a random perturbation.
//!
//! Two perturbations are available:
//! - flip: invert the classic outcome with probability `p_flip`;
//! - decay: kill classic survivors and births with `death_prob`, revive
//!   classic deaths with a probability scaled by how empty the grid is.
//!
//! Both consume exactly one draw per cell and reduce to classic Life at zero.

use std::fmt;

use crate::core::config::{validate_p_flip, DecayRates};
use crate::core::{LifeConfig, LifeResult};
use crate::grid::CellState;

use super::draws::RandomDraw;

/// Conway's rule: survive on 2 or 3, birth on exactly 3.
#[inline]
pub fn classic_next(current: CellState, live_neighbors: u8) -> CellState {
    match (current, live_neighbors) {
        (CellState::Alive, 2) | (CellState::Alive, 3) => CellState::Alive,
        (CellState::Dead, 3) => CellState::Alive,
        _ => CellState::Dead,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionRule {
    p_flip: f64,
    decay: Option<DecayRates>,
}

impl Default for TransitionRule {
    fn default() -> Self {
        Self::classic()
    }
}

impl TransitionRule {
    pub fn new(p_flip: f64) -> LifeResult<Self> {
        validate_p_flip(p_flip)?;
        Ok(Self { p_flip, decay: None })
    }

    pub fn with_decay(rates: DecayRates) -> LifeResult<Self> {
        rates.validate()?;
        Ok(Self { p_flip: 0.0, decay: Some(rates) })
    }

    /// Rule described by a validated config: decay when set, otherwise the flip.
    pub fn from_config(config: &LifeConfig) -> LifeResult<Self> {
        match config.decay {
            Some(rates) => Self::with_decay(rates),
            None => Self::new(config.p_flip),
        }
    }

    /// Plain deterministic Life.
    pub const fn classic() -> Self {
        Self { p_flip: 0.0, decay: None }
    }

    #[inline]
    pub fn p_flip(&self) -> f64 {
        self.p_flip
    }

    #[inline]
    pub fn decay(&self) -> Option<DecayRates> {
        self.decay
    }

    /// True when draws cannot change any outcome.
    pub fn is_classic(&self) -> bool {
        match self.decay {
            Some(rates) => rates.death_prob == 0.0 && rates.max_revival_prob == 0.0,
            None => self.p_flip == 0.0,
        }
    }

    /// Whether `perturb` reads the grid density.
    #[inline]
    pub fn uses_density(&self) -> bool {
        self.decay.is_some()
    }

    /// Next state of one cell. Consumes exactly one draw. `density` is the live
    /// fraction of the whole current generation.
    #[inline]
    pub fn next_state(
        &self,
        current: CellState,
        live_neighbors: u8,
        draw: RandomDraw,
        density: f64,
    ) -> CellState {
        self.perturb(classic_next(current, live_neighbors), draw, density).0
    }

    /// Perturb the classic `candidate`; also reports whether it changed.
    #[inline]
    pub(crate) fn perturb(&self, candidate: CellState, draw: RandomDraw, density: f64) -> (CellState, bool) {
        let threshold = match (self.decay, candidate) {
            (None, _) => self.p_flip,
            (Some(rates), CellState::Alive) => rates.death_prob,
            (Some(rates), CellState::Dead) => rates.revival_prob(density),
        };
        if draw.value() < threshold {
            (candidate.flipped(), true)
        } else {
            (candidate, false)
        }
    }
}

impl fmt::Display for TransitionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.decay {
            Some(rates) => write!(
                f,
                "decay (death {}, revival {}..{})",
                rates.death_prob, rates.base_revival_prob, rates.max_revival_prob
            ),
            None => write!(f, "p_flip {}", self.p_flip),
        }
    }
}
