//! Millisecond clock for perf stats. `Instant` is unavailable in browsers,
//! so wasm builds read `Date.now()` instead.

#[cfg(target_arch = "wasm32")]
fn now_ms() -> f64 {
    js_sys::Date::now()
}

#[cfg(not(target_arch = "wasm32"))]
fn now_ms() -> f64 {
    use std::sync::OnceLock;
    use std::time::Instant;

    static ORIGIN: OnceLock<Instant> = OnceLock::new();
    ORIGIN.get_or_init(Instant::now).elapsed().as_secs_f64() * 1000.0
}

/// Run `work` and return its result with the elapsed wall time in ms.
pub(crate) fn timed<T>(work: impl FnOnce() -> T) -> (T, f64) {
    let started = now_ms();
    let out = work();
    (out, (now_ms() - started).max(0.0))
}
