use crate::core::{DecayRates, LifeResult};
use crate::domain::draws::DrawSource;
use crate::domain::rule::TransitionRule;

use super::perf_stats::PerfStats;
use super::LifeCore;

/// Switch to the symmetric flip, dropping any decay rates.
pub(super) fn set_p_flip(world: &mut LifeCore, p_flip: f64) -> LifeResult<()> {
    world.rule = TransitionRule::new(p_flip)?;
    world.config.p_flip = p_flip;
    world.config.decay = None;
    Ok(())
}

pub(super) fn set_decay(world: &mut LifeCore, rates: DecayRates) -> LifeResult<()> {
    world.rule = TransitionRule::with_decay(rates)?;
    world.config.p_flip = 0.0;
    world.config.decay = Some(rates);
    log::debug!("perturbation switched to {}", world.rule);
    Ok(())
}

pub(super) fn reseed(world: &mut LifeCore, seed: u64) {
    world.draws = DrawSource::new(seed);
    world.config.seed = Some(seed);
}

pub(super) fn enable_perf_metrics(world: &mut LifeCore, enabled: bool) {
    world.perf_enabled = enabled;
    if !enabled {
        world.perf_stats.reset();
    }
}

pub(super) fn get_perf_stats(world: &LifeCore) -> PerfStats {
    world.perf_stats.clone()
}
