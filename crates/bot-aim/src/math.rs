use core::ops::{Add, Mul, Sub};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    pub fn distance(self, other: Vec3) -> f32 {
        (other - self).length()
    }

    pub fn horizontal_length(self) -> f32 {
        (self.x * self.x + self.z * self.z).sqrt()
    }
}

impl Add for Vec3 {
    type Output = Vec3;

    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Vec3;

    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Vec3;

    fn mul(self, rhs: f32) -> Vec3 {
        Vec3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

/// Agent look direction in degrees.
///
/// Yaw 0 faces +Z and increases turning toward -X; pitch is positive looking
/// down and is clamped to [-90, 90] when a step is applied.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Orientation {
    pub yaw: f32,
    pub pitch: f32,
}

impl Orientation {
    pub const fn new(yaw: f32, pitch: f32) -> Self {
        Self { yaw, pitch }
    }

    /// Orientation looking from `eye` toward `point`.
    pub fn looking_at(eye: Vec3, point: Vec3) -> Self {
        let to = point - eye;
        let yaw = (-to.x).atan2(to.z).to_degrees();
        let pitch = (-to.y).atan2(to.horizontal_length()).to_degrees();
        Self { yaw, pitch }
    }

    /// Shortest-path angular delta from `self` to `desired`, each axis
    /// wrapped to (-180, 180] so the seam never produces a long-way turn.
    pub fn delta_to(self, desired: Orientation) -> AimDelta {
        AimDelta {
            yaw: wrap_degrees(desired.yaw - self.yaw),
            pitch: wrap_degrees(desired.pitch - self.pitch),
        }
    }

    pub fn stepped(self, step: AimDelta) -> Orientation {
        Orientation {
            yaw: wrap_degrees(self.yaw + step.yaw),
            pitch: (self.pitch + step.pitch).clamp(-90.0, 90.0),
        }
    }
}

/// A 2D angular delta (yaw, pitch) in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AimDelta {
    pub yaw: f32,
    pub pitch: f32,
}

impl AimDelta {
    pub const fn new(yaw: f32, pitch: f32) -> Self {
        Self { yaw, pitch }
    }

    pub fn magnitude(self) -> f32 {
        (self.yaw * self.yaw + self.pitch * self.pitch).sqrt()
    }

    pub fn scaled(self, factor: f32) -> AimDelta {
        AimDelta {
            yaw: self.yaw * factor,
            pitch: self.pitch * factor,
        }
    }

    /// Shrink to `max` magnitude, preserving direction. Never grows the
    /// delta, so a bounded step cannot overshoot the target.
    pub fn clamped(self, max: f32) -> AimDelta {
        let max = max.max(0.0);
        let magnitude = self.magnitude();
        if magnitude <= max || magnitude <= f32::EPSILON {
            self
        } else {
            self.scaled(max / magnitude)
        }
    }
}

/// Wrap an angle in degrees to (-180, 180].
pub fn wrap_degrees(degrees: f32) -> f32 {
    let mut wrapped = degrees % 360.0;
    if wrapped <= -180.0 {
        wrapped += 360.0;
    } else if wrapped > 180.0 {
        wrapped -= 360.0;
    }
    wrapped
}
