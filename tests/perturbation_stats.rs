use noisy_life_engine::{DecayRates, InitialState, LifeConfig, LifeCore};

const SIDE: u32 = 64;
const TRIALS: u64 = 20;

/// Fraction of cells alive after one advance from an all-dead grid, pooled over trials.
fn observed_birth_rate(p_flip: f64) -> f64 {
    let config = LifeConfig::new(SIDE, SIDE).with_p_flip(p_flip).with_seed(1).with_workers(4);
    let mut life = LifeCore::new(config).unwrap();
    let mut alive = 0u64;
    for trial in 0..TRIALS {
        life.reseed(1000 + trial);
        life.reset(&InitialState::dead()).unwrap();
        let report = life.step().unwrap();
        assert_eq!(report.flips, report.population, "only flips can create life here");
        alive += report.population;
    }
    alive as f64 / (TRIALS * u64::from(SIDE * SIDE)) as f64
}

#[test]
fn birth_rate_converges_to_p_flip() {
    let n = (TRIALS * u64::from(SIDE * SIDE)) as f64;
    for q in [0.01, 0.05, 0.1] {
        let observed = observed_birth_rate(q);
        let sigma = (q * (1.0 - q) / n).sqrt();
        let z = (observed - q) / sigma;
        assert!(z.abs() < 5.0, "q={q}: observed {observed}, z={z}");
    }
}

#[test]
fn zero_probability_keeps_dead_grids_dead() {
    assert_eq!(observed_birth_rate(0.0), 0.0);
}

#[test]
fn certain_flip_fills_a_dead_grid() {
    assert_eq!(observed_birth_rate(1.0), 1.0);
}

#[test]
fn decay_revives_empty_grids_at_the_max_rate() {
    let rates = DecayRates::new(0.02, 0.02, 0.10).unwrap();
    let config = LifeConfig::new(SIDE, SIDE).with_decay(rates).with_seed(1).with_workers(4);
    let mut life = LifeCore::new(config).unwrap();
    let mut alive = 0u64;
    for trial in 0..TRIALS {
        life.reseed(500 + trial);
        life.reset(&InitialState::dead()).unwrap();
        alive += life.step().unwrap().population;
    }
    let n = (TRIALS * u64::from(SIDE * SIDE)) as f64;
    let observed = alive as f64 / n;
    let sigma = (0.1 * 0.9 / n).sqrt();
    assert!(((observed - 0.1) / sigma).abs() < 5.0, "observed {observed}");
}
