use crate::math::{Orientation, Vec3};
use crate::world::AimWorldView;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Stable identifier for a trackable entity in the host environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EntityId(pub u64);

/// What an aim task steers toward. Resolved lazily every tick: a tracked
/// entity may move or disappear between ticks.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AimTarget {
    /// Look at a fixed world point.
    FixedPoint(Vec3),
    /// Follow a live entity's position.
    TrackedEntity(EntityId),
    /// Travel direction toward a point: yaw only, pitch level.
    Waypoint(Vec3),
}

impl AimTarget {
    /// Compute the desired orientation for `agent`, or `None` when the
    /// target (or the agent itself) is no longer resolvable.
    pub fn resolve<W>(&self, agent: W::Agent, env: &W) -> Option<Orientation>
    where
        W: AimWorldView + ?Sized,
    {
        let eye = env.eye_position(agent)?;
        match *self {
            AimTarget::FixedPoint(point) => Some(Orientation::looking_at(eye, point)),
            AimTarget::TrackedEntity(id) => {
                let point = env.entity_position(id)?;
                Some(Orientation::looking_at(eye, point))
            }
            AimTarget::Waypoint(point) => {
                let full = Orientation::looking_at(eye, point);
                Some(Orientation::new(full.yaw, 0.0))
            }
        }
    }
}
