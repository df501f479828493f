use bot_core::{EnvMut, EnvView};

use crate::math::{Orientation, Vec3};
use crate::target::EntityId;

/// Read access to the slice of the environment orientation control needs.
///
/// `None` from an accessor means the agent (or entity) is gone; conditions
/// translate that into task failure.
pub trait AimWorldView: EnvView {
    fn orientation(&self, agent: Self::Agent) -> Option<Orientation>;

    fn eye_position(&self, agent: Self::Agent) -> Option<Vec3>;

    fn entity_position(&self, id: EntityId) -> Option<Vec3>;
}

pub trait AimWorldMut: EnvMut + AimWorldView {
    fn set_orientation(&mut self, agent: Self::Agent, orientation: Orientation);
}
