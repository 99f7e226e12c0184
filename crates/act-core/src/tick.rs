/// Tolerance used when comparing accumulated tick time against authored durations.
///
/// Summing `1/60` sixty times in `f32` does not land exactly on `1.0`.
pub const TIME_EPSILON: f32 = 1e-4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickContext {
    pub tick: u64,
    pub dt_seconds: f32,
}

impl TickContext {
    pub fn new(tick: u64, dt_seconds: f32) -> Self {
        Self { tick, dt_seconds }
    }

    /// Context for the tick following this one, with the same step.
    pub fn next(self) -> Self {
        Self {
            tick: self.tick.wrapping_add(1),
            dt_seconds: self.dt_seconds,
        }
    }

    /// `false` for zero, negative or non-finite steps, which leaves must not divide by.
    pub fn has_duration(&self) -> bool {
        self.dt_seconds.is_finite() && self.dt_seconds > 0.0
    }
}
