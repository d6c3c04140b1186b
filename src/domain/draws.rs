//! Coordinate-keyed random draws.
//!
//! Each row of each generation gets its own `SmallRng`, seeded from a
//! SplitMix64 mix of `(seed, generation, row)`, and hands out one draw per cell
//! from left to right. A row is never split across partitions, so the draw a
//! cell sees depends only on its coordinates and the generation, not on which
//! worker ran it or when.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::core::LifeResult;

const GOLDEN_GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;

/// Uniform value in `[0, 1)`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct RandomDraw(f64);

impl RandomDraw {
    /// Clamps into `[0, 1)`.
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return RandomDraw(0.0);
        }
        RandomDraw(value.clamp(0.0, 1.0 - f64::EPSILON))
    }

    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }
}

#[inline]
pub(crate) fn splitmix64(mut z: u64) -> u64 {
    z = z.wrapping_add(GOLDEN_GAMMA);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawSource {
    seed: u64,
}

impl DrawSource {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Draw stream for row `y` of the step that produces `generation + 1`.
    pub fn row(&self, generation: u64, y: u32) -> RowDraws {
        let key = splitmix64(splitmix64(splitmix64(self.seed) ^ generation) ^ u64::from(y));
        RowDraws {
            rng: SmallRng::seed_from_u64(key),
        }
    }

    /// Draw for a single cell. Walks the row stream, so prefer `row` in loops.
    pub fn cell(&self, generation: u64, x: u32, y: u32) -> RandomDraw {
        let mut row = self.row(generation, y);
        for _ in 0..x {
            row.next_draw();
        }
        row.next_draw()
    }
}

pub struct RowDraws {
    rng: SmallRng,
}

impl RowDraws {
    #[inline]
    pub fn next_draw(&mut self) -> RandomDraw {
        RandomDraw(self.rng.random::<f64>())
    }
}

impl Iterator for RowDraws {
    type Item = RandomDraw;

    fn next(&mut self) -> Option<RandomDraw> {
        Some(self.next_draw())
    }
}

/// Seed for runs configured without one.
pub fn entropy_seed() -> LifeResult<u64> {
    #[cfg(target_arch = "wasm32")]
    {
        let hi = (js_sys::Math::random() * (u32::MAX as f64)) as u64;
        let lo = js_sys::Date::now() as u64;
        Ok(splitmix64((hi << 32) ^ lo))
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        use rand::rngs::OsRng;
        use rand::TryRngCore;

        use crate::core::LifeError;

        OsRng
            .try_next_u64()
            .map_err(|err| LifeError::Entropy(err.to_string()))
    }
}
