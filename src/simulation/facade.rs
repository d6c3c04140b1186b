use wasm_bindgen::prelude::*;

use crate::core::{DecayRates, LifeConfig, LifeError};
use crate::domain::patterns::Pattern;
use crate::domain::seeding::InitialState;
use crate::grid::{CellState, Snapshot};

use super::perf_stats::PerfStats;
use super::LifeCore;

fn js_err(err: LifeError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[wasm_bindgen]
pub struct Life {
    core: LifeCore,
}

#[wasm_bindgen]
impl Life {
    /// Dead toroidal grid with default settings.
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32) -> Result<Life, JsValue> {
        let core = LifeCore::new(LifeConfig::new(width, height)).map_err(js_err)?;
        Ok(Self { core })
    }

    /// Build from a JSON `LifeConfig` (camelCase keys, all optional).
    #[wasm_bindgen(js_name = fromConfig)]
    pub fn from_config(json: &str) -> Result<Life, JsValue> {
        let config = LifeConfig::from_json(json).map_err(js_err)?;
        let core = LifeCore::new(config).map_err(js_err)?;
        Ok(Self { core })
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 { self.core.width() }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 { self.core.height() }

    #[wasm_bindgen(getter)]
    pub fn generation(&self) -> u64 { self.core.generation() }

    #[wasm_bindgen(getter)]
    pub fn running(&self) -> bool { self.core.is_running() }

    #[wasm_bindgen(getter)]
    pub fn population(&self) -> u32 { self.core.population() as u32 }

    #[wasm_bindgen(getter)]
    pub fn seed(&self) -> u64 { self.core.seed() }

    #[wasm_bindgen(getter)]
    pub fn workers(&self) -> u32 { self.core.workers() as u32 }

    pub fn play(&mut self) {
        self.core.play();
    }

    pub fn pause(&mut self) {
        self.core.pause();
    }

    pub fn step(&mut self) -> Result<(), JsValue> {
        self.core.step().map(|_| ()).map_err(js_err)
    }

    /// Driver tick; returns true when a generation was computed.
    pub fn tick(&mut self) -> Result<bool, JsValue> {
        let advanced = self.core.tick().into_result().map_err(js_err)?;
        Ok(advanced.is_some())
    }

    pub fn get_cell(&self, x: u32, y: u32) -> Result<bool, JsValue> {
        self.core.get(x, y).map(CellState::is_alive).map_err(js_err)
    }

    pub fn set_cell(&mut self, x: u32, y: u32, alive: bool) -> Result<(), JsValue> {
        self.core
            .set_cell(x, y, CellState::from_alive(alive))
            .map_err(js_err)
    }

    /// Flip a clicked cell; returns whether it is now alive.
    pub fn toggle_cell(&mut self, x: u32, y: u32) -> Result<bool, JsValue> {
        self.core
            .toggle_cell(x, y)
            .map(CellState::is_alive)
            .map_err(js_err)
    }

    pub fn clear(&mut self) -> Result<(), JsValue> {
        self.core.reset(&InitialState::dead()).map_err(js_err)
    }

    pub fn randomize(&mut self, density: f64) -> Result<(), JsValue> {
        self.core
            .reset(&InitialState::random(density))
            .map_err(js_err)
    }

    /// Reset to a named pattern (`block`, `tub`, `loaf`, `beehive`, `blinker`, `glider`, `plus`).
    pub fn load_pattern(&mut self, name: &str, x: u32, y: u32) -> Result<(), JsValue> {
        let pattern: Pattern = name.parse().map_err(js_err)?;
        self.core
            .reset(&InitialState::pattern(pattern, x, y))
            .map_err(js_err)
    }

    pub fn set_p_flip(&mut self, p_flip: f64) -> Result<(), JsValue> {
        self.core.set_p_flip(p_flip).map_err(js_err)
    }

    /// Density-scaled death and revival; `set_p_flip` switches back to the flip.
    pub fn set_decay(
        &mut self,
        death_prob: f64,
        base_revival_prob: f64,
        max_revival_prob: f64,
    ) -> Result<(), JsValue> {
        let rates = DecayRates::new(death_prob, base_revival_prob, max_revival_prob).map_err(js_err)?;
        self.core.set_decay(rates).map_err(js_err)
    }

    pub fn reseed(&mut self, seed: u64) {
        self.core.reseed(seed);
    }

    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        self.core.snapshot().to_json().map_err(js_err)
    }

    pub fn load_snapshot_json(&mut self, json: &str) -> Result<(), JsValue> {
        let snapshot = Snapshot::from_json(json).map_err(js_err)?;
        self.core.load_snapshot(&snapshot).map_err(js_err)
    }

    /// Pointer to the current generation (one byte per cell, row-major) for rendering.
    pub fn cells_ptr(&self) -> *const u8 {
        self.core.cells_ptr()
    }

    pub fn cells_len(&self) -> usize {
        self.core.cells_len()
    }

    /// Enable or disable per-step perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        self.core.enable_perf_metrics(enabled);
    }

    /// Get last step perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        self.core.get_perf_stats()
    }
}
