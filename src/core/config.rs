//! Engine configuration.
//!
//! Parsed from JSON on the JS side (camelCase keys), built in code natively.
//! Missing keys fall back to the defaults below.

use serde::{Deserialize, Serialize};

use super::{LifeError, LifeResult};

/// How neighbours are counted at the grid edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BoundaryPolicy {
    /// Off-grid cells are dead.
    Bounded,
    /// Edges wrap to the opposite side.
    #[default]
    Toroidal,
}

/// Largest grid accepted, in cells. Each buffer holds one byte per cell.
pub const MAX_CELLS: usize = 1 << 30;

/// Asymmetric perturbation: classic survivors and births die with
/// `death_prob`, classic deaths revive with a probability that climbs from
/// `base_revival_prob` on a full grid to `max_revival_prob` on an empty one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DecayRates {
    pub death_prob: f64,
    pub base_revival_prob: f64,
    pub max_revival_prob: f64,
}

impl Default for DecayRates {
    fn default() -> Self {
        Self {
            death_prob: 0.02,
            base_revival_prob: 0.02,
            max_revival_prob: 0.10,
        }
    }
}

impl DecayRates {
    pub fn new(death_prob: f64, base_revival_prob: f64, max_revival_prob: f64) -> LifeResult<Self> {
        let rates = Self {
            death_prob,
            base_revival_prob,
            max_revival_prob,
        };
        rates.validate()?;
        Ok(rates)
    }

    pub fn validate(&self) -> LifeResult<()> {
        validate_probability("deathProb", self.death_prob)?;
        validate_probability("baseRevivalProb", self.base_revival_prob)?;
        validate_probability("maxRevivalProb", self.max_revival_prob)?;
        if self.base_revival_prob > self.max_revival_prob {
            return Err(LifeError::InvalidConfig(format!(
                "baseRevivalProb {} exceeds maxRevivalProb {}",
                self.base_revival_prob, self.max_revival_prob
            )));
        }
        Ok(())
    }

    /// Revival probability for a grid whose live fraction is `density`.
    #[inline]
    pub fn revival_prob(&self, density: f64) -> f64 {
        let sparseness = 1.0 - density.clamp(0.0, 1.0);
        self.base_revival_prob + (self.max_revival_prob - self.base_revival_prob) * sparseness
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LifeConfig {
    pub width: u32,
    pub height: u32,
    pub boundary: BoundaryPolicy,
    /// Probability that a cell's classic next state is inverted. 0 = classic Life.
    pub p_flip: f64,
    /// Density-scaled death/revival instead of the symmetric flip. Requires `p_flip = 0`.
    pub decay: Option<DecayRates>,
    /// Partition worker count; 0 picks the available parallelism.
    pub worker_count: usize,
    /// Fixed seed for reproducible runs. `None` draws one at construction.
    pub seed: Option<u64>,
}

impl Default for LifeConfig {
    fn default() -> Self {
        Self {
            width: 60,
            height: 60,
            boundary: BoundaryPolicy::Toroidal,
            p_flip: 0.0,
            decay: None,
            worker_count: 0,
            seed: None,
        }
    }
}

impl LifeConfig {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> LifeResult<Self> {
        let config: LifeConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_boundary(mut self, boundary: BoundaryPolicy) -> Self {
        self.boundary = boundary;
        self
    }

    pub fn with_p_flip(mut self, p_flip: f64) -> Self {
        self.p_flip = p_flip;
        self
    }

    pub fn with_decay(mut self, rates: DecayRates) -> Self {
        self.decay = Some(rates);
        self
    }

    pub fn with_workers(mut self, worker_count: usize) -> Self {
        self.worker_count = worker_count;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> LifeResult<()> {
        validate_dimensions(self.width, self.height)?;
        validate_p_flip(self.p_flip)?;
        if let Some(rates) = &self.decay {
            rates.validate()?;
            if self.p_flip != 0.0 {
                return Err(LifeError::InvalidConfig(
                    "pFlip and decay cannot both be set".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Worker count with the "auto" value resolved.
    pub fn resolved_workers(&self) -> usize {
        if self.worker_count > 0 {
            return self.worker_count;
        }
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
    }
}

pub(crate) fn validate_dimensions(width: u32, height: u32) -> LifeResult<usize> {
    let invalid = LifeError::InvalidDimensions { width, height };
    if width == 0 || height == 0 {
        return Err(invalid);
    }
    (width as usize)
        .checked_mul(height as usize)
        .filter(|&cells| cells <= MAX_CELLS)
        .ok_or(invalid)
}

pub(crate) fn validate_p_flip(p_flip: f64) -> LifeResult<()> {
    validate_probability("p_flip", p_flip)
}

fn validate_probability(name: &str, value: f64) -> LifeResult<()> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(LifeError::InvalidConfig(format!(
            "{} must be within [0, 1], got {}",
            name, value
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_describe_a_classic_toroidal_board() {
        let config = LifeConfig::default();
        assert_eq!((config.width, config.height), (60, 60));
        assert_eq!(config.boundary, BoundaryPolicy::Toroidal);
        assert_eq!(config.p_flip, 0.0);
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn json_uses_camel_case_and_fills_defaults() {
        let config = LifeConfig::from_json(
            r#"{"width": 8, "height": 4, "boundary": "bounded", "pFlip": 0.05, "seed": 7}"#,
        )
        .unwrap();
        assert_eq!(config.width, 8);
        assert_eq!(config.height, 4);
        assert_eq!(config.boundary, BoundaryPolicy::Bounded);
        assert_eq!(config.p_flip, 0.05);
        assert_eq!(config.worker_count, 0);
        assert_eq!(config.seed, Some(7));
    }

    #[test]
    fn rejects_zero_dimensions() {
        let err = LifeConfig::new(0, 5).validate().unwrap_err();
        assert_eq!(err, LifeError::InvalidDimensions { width: 0, height: 5 });
        assert!(LifeConfig::from_json(r#"{"height": 0}"#).is_err());
    }

    #[test]
    fn rejects_out_of_range_probabilities() {
        for p in [-0.1, 1.5, f64::NAN, f64::INFINITY] {
            let err = LifeConfig::default().with_p_flip(p).validate().unwrap_err();
            assert!(matches!(err, LifeError::InvalidConfig(_)), "p_flip {p}");
        }
        assert!(LifeConfig::default().with_p_flip(1.0).validate().is_ok());
    }

    #[test]
    fn rejects_grids_too_large_to_allocate() {
        for (w, h) in [(u32::MAX, u32::MAX), (70_000, 70_000)] {
            let err = LifeConfig::new(w, h).validate().unwrap_err();
            assert_eq!(err, LifeError::InvalidDimensions { width: w, height: h });
        }
        assert!(LifeConfig::from_json(r#"{"width": 4000000000, "height": 4000000000}"#).is_err());
        assert_eq!(validate_dimensions(1 << 15, 1 << 15), Ok(MAX_CELLS));
    }

    #[test]
    fn decay_rates_parse_with_defaults() {
        let config = LifeConfig::from_json(r#"{"decay": {"deathProb": 0.05}}"#).unwrap();
        let rates = config.decay.unwrap();
        assert_eq!(rates.death_prob, 0.05);
        assert_eq!(rates.base_revival_prob, 0.02);
        assert_eq!(rates.max_revival_prob, 0.10);
    }

    #[test]
    fn decay_rates_are_validated() {
        assert!(DecayRates::new(0.0, 0.2, 0.1).is_err());
        assert!(DecayRates::new(1.2, 0.0, 0.1).is_err());
        let both = LifeConfig::default().with_p_flip(0.1).with_decay(DecayRates::default());
        assert!(matches!(both.validate(), Err(LifeError::InvalidConfig(_))));
        assert!(LifeConfig::default().with_decay(DecayRates::default()).validate().is_ok());
    }

    #[test]
    fn revival_climbs_as_the_grid_empties() {
        let rates = DecayRates::new(0.02, 0.02, 0.10).unwrap();
        assert_eq!(rates.revival_prob(1.0), 0.02);
        assert!((rates.revival_prob(0.0) - 0.10).abs() < 1e-12);
        assert!((rates.revival_prob(0.5) - 0.06).abs() < 1e-12);
        assert!(rates.revival_prob(0.2) > rates.revival_prob(0.8));
    }

    #[test]
    fn malformed_json_is_a_decode_error() {
        let err = LifeConfig::from_json("{width: }").unwrap_err();
        assert!(matches!(err, LifeError::Decode(_)));
    }

    #[test]
    fn explicit_worker_count_wins_over_auto() {
        assert_eq!(LifeConfig::default().with_workers(3).resolved_workers(), 3);
        assert!(LifeConfig::default().resolved_workers() >= 1);
    }
}
