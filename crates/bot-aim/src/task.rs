use bot_core::TickContext;

use crate::condition::{AimFeedback, Condition};
use crate::easing::Easing;
use crate::target::AimTarget;
use crate::world::AimWorldMut;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Execution tier. Immediate tasks run before everything queued;
/// Preferential tasks run before Normal tasks but behind queued
/// Immediate/Preferential work; Normal tasks are FIFO among themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PriorityTier {
    Immediate,
    Preferential,
    Normal,
}

/// A scheduled unit of orientation work, owned exclusively by the
/// [`AimScheduler`](crate::AimScheduler) from enqueue to dequeue.
pub struct AimTask<W>
where
    W: AimWorldMut + 'static,
{
    priority: PriorityTier,
    target: AimTarget,
    pub(crate) condition: Box<dyn Condition<W>>,
    easing: Easing,
    speed_multiplier: f32,
    /// Carried ease-in velocity, in degrees per tick.
    pub(crate) velocity: f32,
    pub(crate) feedback: AimFeedback,
    pub(crate) on_success: Option<Box<dyn FnOnce(&TickContext, W::Agent, &mut W) + 'static>>,
    pub(crate) on_failure: Option<Box<dyn FnOnce(&TickContext, W::Agent, &mut W) + 'static>>,
}

impl<W> AimTask<W>
where
    W: AimWorldMut + 'static,
{
    pub fn new(
        priority: PriorityTier,
        target: AimTarget,
        condition: Box<dyn Condition<W>>,
        easing: Easing,
    ) -> Self {
        Self {
            priority,
            target,
            condition,
            easing,
            speed_multiplier: 1.0,
            velocity: 0.0,
            feedback: AimFeedback::default(),
            on_success: None,
            on_failure: None,
        }
    }

    pub fn with_speed(mut self, multiplier: f32) -> Self {
        self.speed_multiplier = multiplier.max(0.0);
        self
    }

    pub fn on_success(
        mut self,
        callback: impl FnOnce(&TickContext, W::Agent, &mut W) + 'static,
    ) -> Self {
        self.on_success = Some(Box::new(callback));
        self
    }

    pub fn on_failure(
        mut self,
        callback: impl FnOnce(&TickContext, W::Agent, &mut W) + 'static,
    ) -> Self {
        self.on_failure = Some(Box::new(callback));
        self
    }

    pub fn priority(&self) -> PriorityTier {
        self.priority
    }

    pub fn target(&self) -> AimTarget {
        self.target
    }

    pub fn easing(&self) -> Easing {
        self.easing
    }

    pub fn speed_multiplier(&self) -> f32 {
        self.speed_multiplier
    }

    pub fn feedback(&self) -> AimFeedback {
        self.feedback
    }
}
