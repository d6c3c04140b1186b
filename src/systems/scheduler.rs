//! Partition Scheduler - one generation advance, split by rows
//!
//! Phase 1: plan row partitions and verify they tile the grid.
//! Phase 2: hand every partition its own disjoint slice of the next buffer and
//!          run them on the worker pool; the current buffer is shared read-only.
//! Phase 3: barrier (collect every result), then swap only if all succeeded.
//!
//! No locks guard the cell buffers: the borrow checker proves the write
//! slices are disjoint, and the current buffer is immutably borrowed for the
//! whole dispatch.

use std::panic::{self, AssertUnwindSafe};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::core::{BoundaryPolicy, LifeError, LifeResult};
use crate::domain::draws::DrawSource;
use crate::domain::rule::{classic_next, TransitionRule};
use crate::grid::{CellState, Grid, GridView};
use crate::spatial::neighbors::count_live_neighbors;
use crate::spatial::partition::{partition_rows, verify_coverage, Partition};

/// Everything a partition task needs besides the buffers.
#[derive(Debug, Clone, Copy)]
pub struct StepContext {
    pub boundary: BoundaryPolicy,
    pub rule: TransitionRule,
    pub draws: DrawSource,
}

/// Per-advance inputs shared by every partition task.
#[derive(Debug, Clone, Copy)]
struct Pass {
    /// Generation being read.
    generation: u64,
    /// Live fraction of that generation; only read by density-scaled rules.
    density: f64,
}

/// What one partition task did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PartitionReport {
    pub index: usize,
    pub rows_written: u32,
    pub births: u64,
    pub deaths: u64,
    pub flips: u64,
    pub population: u64,
}

/// Totals for one completed advance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdvanceReport {
    /// Generation now current.
    pub generation: u64,
    pub partitions: usize,
    pub births: u64,
    pub deaths: u64,
    /// Cells whose classic outcome was inverted by the perturbation.
    pub flips: u64,
    pub population: u64,
}

pub struct PartitionScheduler {
    workers: usize,
    /// Owned for the engine's lifetime; `None` falls back to rayon's global pool.
    #[cfg(feature = "parallel")]
    pool: Option<rayon::ThreadPool>,
    #[cfg(test)]
    fail_partition: Option<usize>,
}

impl PartitionScheduler {
    pub fn new(workers: usize) -> Self {
        let workers = workers.max(1);

        #[cfg(feature = "parallel")]
        let pool = match rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("life-worker-{}", i))
            .build()
        {
            Ok(pool) => Some(pool),
            Err(err) => {
                log::warn!(
                    "could not build a {}-thread worker pool ({}); using the global pool",
                    workers,
                    err
                );
                None
            }
        };

        Self {
            workers,
            #[cfg(feature = "parallel")]
            pool,
            #[cfg(test)]
            fail_partition: None,
        }
    }

    #[inline]
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Row partitions for a grid of `height` rows.
    pub fn plan(&self, height: u32) -> Vec<Partition> {
        partition_rows(height, self.workers)
    }

    /// Compute the next generation into the back buffer and swap it in.
    ///
    /// On any error the grid is left exactly as it was (same current buffer,
    /// same generation), so the advance can be retried.
    pub fn advance(&self, grid: &mut Grid, ctx: &StepContext) -> LifeResult<AdvanceReport> {
        let plan = self.plan(grid.height());
        self.advance_with_plan(grid, ctx, &plan)
    }

    pub(crate) fn advance_with_plan(
        &self,
        grid: &mut Grid,
        ctx: &StepContext,
        plan: &[Partition],
    ) -> LifeResult<AdvanceReport> {
        let height = grid.height();
        let width = grid.width() as usize;
        let generation = grid.generation();

        verify_coverage(plan, height)?;

        let results = {
            let (current, next) = grid.buffers_mut();
            let density = if ctx.rule.uses_density() { current.density() } else { 0.0 };
            let pass = Pass { generation, density };
            let tasks = split_rows(plan, next, width)?;
            self.dispatch(current, tasks, ctx, pass)
        };

        let mut report = AdvanceReport {
            partitions: plan.len(),
            ..AdvanceReport::default()
        };
        for (partition, result) in plan.iter().zip(results) {
            let part = result?;
            if part.rows_written as usize != partition.len() {
                return Err(LifeError::CoverageViolation(format!(
                    "partition {} wrote {} of {} rows",
                    partition.index,
                    part.rows_written,
                    partition.len()
                )));
            }
            report.births += part.births;
            report.deaths += part.deaths;
            report.flips += part.flips;
            report.population += part.population;
        }

        grid.swap();
        report.generation = grid.generation();
        log::debug!(
            "generation {} ready: {} partitions, population {}, +{} -{} ({} flipped)",
            report.generation,
            report.partitions,
            report.population,
            report.births,
            report.deaths,
            report.flips
        );
        Ok(report)
    }

    #[cfg(feature = "parallel")]
    fn dispatch(
        &self,
        current: GridView<'_>,
        tasks: Vec<(Partition, &mut [CellState])>,
        ctx: &StepContext,
        pass: Pass,
    ) -> Vec<LifeResult<PartitionReport>> {
        let run = || {
            tasks
                .into_par_iter()
                .map(|(partition, out)| self.run_guarded(current, partition, out, ctx, pass))
                .collect::<Vec<_>>()
        };
        match &self.pool {
            Some(pool) => pool.install(run),
            None => run(),
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn dispatch(
        &self,
        current: GridView<'_>,
        tasks: Vec<(Partition, &mut [CellState])>,
        ctx: &StepContext,
        pass: Pass,
    ) -> Vec<LifeResult<PartitionReport>> {
        tasks
            .into_iter()
            .map(|(partition, out)| self.run_guarded(current, partition, out, ctx, pass))
            .collect()
    }

    /// Run one partition, turning a panic into `PartitionFailure`.
    fn run_guarded(
        &self,
        current: GridView<'_>,
        partition: Partition,
        out: &mut [CellState],
        ctx: &StepContext,
        pass: Pass,
    ) -> LifeResult<PartitionReport> {
        let fail = self.should_fail(partition.index);
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            if fail {
                panic!("injected failure in partition {}", partition.index);
            }
            run_partition(current, partition, out, ctx, pass)
        }));
        match outcome {
            Ok(report) => {
                log::trace!(
                    "partition {} rows {}..{} done",
                    partition.index,
                    partition.start,
                    partition.end
                );
                Ok(report)
            }
            Err(payload) => Err(LifeError::PartitionFailure {
                index: partition.index,
                start: partition.start,
                end: partition.end,
                reason: panic_message(payload.as_ref()),
            }),
        }
    }

    #[cfg(test)]
    fn should_fail(&self, index: usize) -> bool {
        self.fail_partition == Some(index)
    }

    #[cfg(not(test))]
    #[inline(always)]
    fn should_fail(&self, _index: usize) -> bool {
        false
    }

    /// Make partition `index` panic on every advance (`None` clears it).
    #[cfg(test)]
    pub(crate) fn inject_failure(&mut self, index: Option<usize>) {
        self.fail_partition = index;
    }
}

/// Carve the next buffer into one exclusive row-slice per partition.
fn split_rows<'a>(
    plan: &[Partition],
    mut rest: &'a mut [CellState],
    width: usize,
) -> LifeResult<Vec<(Partition, &'a mut [CellState])>> {
    let mut tasks = Vec::with_capacity(plan.len());
    for partition in plan {
        let len = partition.len() * width;
        if len > rest.len() {
            return Err(LifeError::CoverageViolation(format!(
                "partition {} runs past the last row",
                partition.index
            )));
        }
        let (head, tail) = std::mem::take(&mut rest).split_at_mut(len);
        tasks.push((*partition, head));
        rest = tail;
    }
    if !rest.is_empty() {
        return Err(LifeError::CoverageViolation(format!(
            "{} cells left without a partition",
            rest.len()
        )));
    }
    Ok(tasks)
}

/// Write rows `partition.rows()` of the next generation into `out`.
fn run_partition(
    current: GridView<'_>,
    partition: Partition,
    out: &mut [CellState],
    ctx: &StepContext,
    pass: Pass,
) -> PartitionReport {
    let width = current.width() as usize;
    let classic = ctx.rule.is_classic();
    let mut report = PartitionReport {
        index: partition.index,
        ..PartitionReport::default()
    };

    for (y, row_out) in partition.rows().zip(out.chunks_exact_mut(width)) {
        // Classic rules ignore draws, so the row stream is never built.
        let mut draws = (!classic).then(|| ctx.draws.row(pass.generation, y));
        for (x, slot) in row_out.iter_mut().enumerate() {
            let x = x as u32;
            let was = current.at(x, y);
            let live = count_live_neighbors(current, x, y, ctx.boundary);
            let candidate = classic_next(was, live);
            let (next, flipped) = match draws.as_mut() {
                Some(row) => ctx.rule.perturb(candidate, row.next_draw(), pass.density),
                None => (candidate, false),
            };
            *slot = next;

            match (was, next) {
                (CellState::Dead, CellState::Alive) => report.births += 1,
                (CellState::Alive, CellState::Dead) => report.deaths += 1,
                _ => {}
            }
            report.flips += u64::from(flipped);
            report.population += u64::from(next.is_alive());
        }
        report.rows_written += 1;
    }
    report
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "worker panicked".to_string()
    }
}
