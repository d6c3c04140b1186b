use crate::core::LifeResult;
use crate::systems::scheduler::AdvanceReport;

use super::perf_timer::timed;
use super::LifeCore;

/// One generation advance through the scheduler. Blocks until every partition
/// has finished; on failure nothing is swapped and the perf snapshot is kept.
pub(super) fn advance(world: &mut LifeCore) -> LifeResult<AdvanceReport> {
    let ctx = world.step_context();
    if !world.perf_enabled {
        return world.scheduler.advance(&mut world.grid, &ctx);
    }

    let (result, elapsed) = timed(|| world.scheduler.advance(&mut world.grid, &ctx));
    let report = result?;
    let workers = world.scheduler.workers();
    let size = world.grid.size();
    world.perf_stats.record(&report, workers, size, elapsed);
    Ok(report)
}
