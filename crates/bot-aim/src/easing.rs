use crate::math::AimDelta;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Baseline turn sensitivity; tasks scale it with their speed multiplier.
pub const BASE_SENSITIVITY: f32 = 3.0;

/// Divisor turning `dt_ms * sensitivity` into a linear step bound (degrees).
pub const K_LINEAR: f32 = 20.0;

/// Divisor turning `dt_ms * sensitivity` into an ease-out fraction.
pub const K_EASE_OUT: f32 = 400.0;

/// Per-tick ease-in acceleration, in degrees per tick, for a sensitivity.
fn ease_in_acceleration(sensitivity: f32) -> f32 {
    sensitivity / 2.0
}

/// Interpolation curve applied to the raw angular delta each tick.
///
/// Every curve returns a step whose magnitude never exceeds the raw delta's,
/// so no curve can overshoot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Easing {
    /// Constant-rate turn: clamp the delta to `dt_ms * sensitivity / K_LINEAR`.
    Linear,
    /// Accelerate from a carried velocity until caught up with the delta.
    EaseIn,
    /// Cover a fixed fraction `min(1, dt_ms * sensitivity / K_EASE_OUT)` of
    /// the remaining delta, slowing as it closes.
    EaseOut,
    /// The smaller-magnitude of the EaseIn and EaseOut candidates.
    EaseInOut,
}

impl Easing {
    /// Produce the bounded step for this tick.
    ///
    /// `velocity` is the task's carried ease-in speed (degrees per tick); it
    /// keeps accelerating even when the ease-out candidate wins, so EaseInOut
    /// ramps up while it approaches.
    pub fn step(self, delta: AimDelta, dt_ms: f32, sensitivity: f32, velocity: &mut f32) -> AimDelta {
        match self {
            Easing::Linear => linear(delta, dt_ms, sensitivity),
            Easing::EaseOut => ease_out(delta, dt_ms, sensitivity),
            Easing::EaseIn => ease_in(delta, sensitivity, velocity),
            Easing::EaseInOut => {
                let accel = ease_in(delta, sensitivity, velocity);
                let decel = ease_out(delta, dt_ms, sensitivity);
                if accel.magnitude() <= decel.magnitude() {
                    accel
                } else {
                    decel
                }
            }
        }
    }
}

fn linear(delta: AimDelta, dt_ms: f32, sensitivity: f32) -> AimDelta {
    let max = dt_ms.max(0.0) * sensitivity / K_LINEAR;
    delta.clamped(max)
}

fn ease_out(delta: AimDelta, dt_ms: f32, sensitivity: f32) -> AimDelta {
    let fraction = (dt_ms.max(0.0) * sensitivity / K_EASE_OUT).min(1.0);
    delta.scaled(fraction)
}

fn ease_in(delta: AimDelta, sensitivity: f32, velocity: &mut f32) -> AimDelta {
    let magnitude = delta.magnitude();
    if *velocity < magnitude {
        *velocity += ease_in_acceleration(sensitivity);
        delta.clamped(*velocity)
    } else {
        // Fully caught up; the raw delta is already the smaller step.
        delta
    }
}
