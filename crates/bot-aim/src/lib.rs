//! Priority-scheduled orientation control built on `bot-core`.
//!
//! An [`AimScheduler`] owns a tier-ordered queue of [`AimTask`]s and advances
//! only the head task each tick: the task's [`Condition`] decides whether to
//! suspend, step, snap, or finish, and the selected [`Easing`] curve bounds
//! the applied angular step so orientation never overshoots the target.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod condition;
pub mod easing;
pub mod math;
pub mod scheduler;
pub mod target;
pub mod task;
pub mod world;

pub use condition::{AimFeedback, Condition, ConditionResult, Snap, UntilAligned, Watch};
pub use easing::{Easing, BASE_SENSITIVITY, K_EASE_OUT, K_LINEAR};
pub use math::{wrap_degrees, AimDelta, Orientation, Vec3};
pub use scheduler::AimScheduler;
pub use target::{AimTarget, EntityId};
pub use task::{AimTask, PriorityTier};
pub use world::{AimWorldMut, AimWorldView};
