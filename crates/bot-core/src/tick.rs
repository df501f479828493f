/// Per-tick timing data captured once by the host loop.
///
/// `dt_ms` is the monotonic wall-clock delta since the previous tick, not a
/// value derived from the tick index; interpolation stays correct when the
/// host's tick duration drifts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickContext {
    pub tick: u64,
    pub dt_ms: f32,
}

impl TickContext {
    pub fn new(tick: u64, dt_ms: f32) -> Self {
        Self { tick, dt_ms }
    }

    pub fn dt_seconds(&self) -> f32 {
        self.dt_ms / 1000.0
    }
}
