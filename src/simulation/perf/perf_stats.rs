use wasm_bindgen::prelude::*;

use crate::systems::scheduler::AdvanceReport;

/// Numbers from the most recent advance.
#[wasm_bindgen]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PerfStats {
    pub(super) step_ms: f64,
    pub(super) generation: u64,
    pub(super) partitions: u32,
    pub(super) workers: u32,
    pub(super) births: u32,
    pub(super) deaths: u32,
    pub(super) flips: u32,
    pub(super) population: u32,
    pub(super) grid_size: u32,
}

impl PerfStats {
    pub(crate) fn reset(&mut self) {
        *self = PerfStats::default();
    }

    pub(crate) fn record(&mut self, report: &AdvanceReport, workers: usize, grid_size: usize, step_ms: f64) {
        self.step_ms = step_ms;
        self.generation = report.generation;
        self.partitions = saturate(report.partitions as u64);
        self.workers = saturate(workers as u64);
        self.births = saturate(report.births);
        self.deaths = saturate(report.deaths);
        self.flips = saturate(report.flips);
        self.population = saturate(report.population);
        self.grid_size = saturate(grid_size as u64);
    }
}

fn saturate(value: u64) -> u32 {
    value.min(u32::MAX as u64) as u32
}

#[wasm_bindgen]
impl PerfStats {
    #[wasm_bindgen(getter)]
    pub fn step_ms(&self) -> f64 { self.step_ms }
    #[wasm_bindgen(getter)]
    pub fn generation(&self) -> u64 { self.generation }
    #[wasm_bindgen(getter)]
    pub fn partitions(&self) -> u32 { self.partitions }
    #[wasm_bindgen(getter)]
    pub fn workers(&self) -> u32 { self.workers }
    #[wasm_bindgen(getter)]
    pub fn births(&self) -> u32 { self.births }
    #[wasm_bindgen(getter)]
    pub fn deaths(&self) -> u32 { self.deaths }
    #[wasm_bindgen(getter)]
    pub fn flips(&self) -> u32 { self.flips }
    #[wasm_bindgen(getter)]
    pub fn population(&self) -> u32 { self.population }
    #[wasm_bindgen(getter)]
    pub fn grid_size(&self) -> u32 { self.grid_size }
}
