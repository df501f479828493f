use bot_core::TickContext;

use crate::world::AimWorldView;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Per-tick decision for the head aim task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ConditionResult {
    /// Do nothing this tick; the task stays at the head.
    Suspend,
    /// Compute and apply one interpolated step.
    Exec,
    /// Terminal: invoke the success callback and dequeue.
    Success,
    /// Terminal: invoke the failure callback and dequeue.
    Failure,
    /// Resolve instantly to the target orientation and finish as Success.
    Force,
}

/// Scheduler-written, condition-read task state.
///
/// The scheduler records resolution failures and the residual angular error
/// here; the condition owns the policy of what to do about them.
#[derive(Debug, Clone, Copy, Default)]
pub struct AimFeedback {
    /// The target failed to resolve on the most recent Exec/Force attempt.
    pub target_lost: bool,
    /// Angular error (degrees) remaining after the last applied step.
    pub error: Option<f32>,
}

/// Decides, every tick, whether the owning task progresses, finishes, fails,
/// or snaps. Pure policy: conditions never touch the environment mutably.
pub trait Condition<W>: 'static
where
    W: AimWorldView + 'static,
{
    fn check(
        &mut self,
        ctx: &TickContext,
        agent: W::Agent,
        env: &W,
        feedback: &AimFeedback,
    ) -> ConditionResult;
}

/// Step until the residual error falls within `tolerance` degrees, then
/// succeed. Fails once the scheduler reports the target gone.
#[derive(Debug, Clone, Copy)]
pub struct UntilAligned {
    pub tolerance: f32,
}

impl UntilAligned {
    pub fn new(tolerance: f32) -> Self {
        Self { tolerance }
    }
}

impl<W> Condition<W> for UntilAligned
where
    W: AimWorldView + 'static,
{
    fn check(
        &mut self,
        _ctx: &TickContext,
        _agent: W::Agent,
        _env: &W,
        feedback: &AimFeedback,
    ) -> ConditionResult {
        if feedback.target_lost {
            return ConditionResult::Failure;
        }
        match feedback.error {
            Some(error) if error <= self.tolerance => ConditionResult::Success,
            _ => ConditionResult::Exec,
        }
    }
}

/// Always snap: the task resolves in a single `process()` call.
#[derive(Debug, Clone, Copy, Default)]
pub struct Snap;

impl<W> Condition<W> for Snap
where
    W: AimWorldView + 'static,
{
    fn check(
        &mut self,
        _ctx: &TickContext,
        _agent: W::Agent,
        _env: &W,
        feedback: &AimFeedback,
    ) -> ConditionResult {
        if feedback.target_lost {
            return ConditionResult::Failure;
        }
        ConditionResult::Force
    }
}

/// Closure adapter for custom policies.
pub struct Watch<F> {
    check: F,
}

impl<F> Watch<F> {
    pub fn new(check: F) -> Self {
        Self { check }
    }
}

impl<F, W> Condition<W> for Watch<F>
where
    F: FnMut(&TickContext, W::Agent, &W, &AimFeedback) -> ConditionResult + 'static,
    W: AimWorldView + 'static,
{
    fn check(
        &mut self,
        ctx: &TickContext,
        agent: W::Agent,
        env: &W,
        feedback: &AimFeedback,
    ) -> ConditionResult {
        (self.check)(ctx, agent, env, feedback)
    }
}
