use std::collections::VecDeque;

use bot_core::TickContext;

use crate::condition::ConditionResult;
use crate::easing::BASE_SENSITIVITY;
use crate::task::{AimTask, PriorityTier};
use crate::world::AimWorldMut;

/// Tier-ordered task queue driving an agent's look direction.
///
/// The host calls [`process`](AimScheduler::process) exactly once per
/// simulation tick; only the head task advances, so orientation mutates at
/// most once per tick.
pub struct AimScheduler<W>
where
    W: AimWorldMut + 'static,
{
    tasks: VecDeque<AimTask<W>>,
}

impl<W> AimScheduler<W>
where
    W: AimWorldMut + 'static,
{
    pub fn new() -> Self {
        Self {
            tasks: VecDeque::new(),
        }
    }

    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn current(&self) -> Option<&AimTask<W>> {
        self.tasks.front()
    }

    /// Hard cancel: drops every queued task without invoking callbacks.
    pub fn clear(&mut self) {
        self.tasks.clear();
    }

    /// Insert by tier: Immediate at the front, Normal at the back,
    /// Preferential immediately before the first Normal task present (or at
    /// the back if none). Strict tier ordering, FIFO within a tier.
    pub fn add_task(&mut self, task: AimTask<W>) {
        match task.priority() {
            PriorityTier::Immediate => self.tasks.push_front(task),
            PriorityTier::Normal => self.tasks.push_back(task),
            PriorityTier::Preferential => {
                let at = self
                    .tasks
                    .iter()
                    .position(|queued| queued.priority() == PriorityTier::Normal);
                match at {
                    Some(index) => self.tasks.insert(index, task),
                    None => self.tasks.push_back(task),
                }
            }
        }
    }

    /// Advance the head task by one tick.
    pub fn process(&mut self, ctx: &TickContext, agent: W::Agent, env: &mut W) {
        let verdict = {
            let Some(task) = self.tasks.front_mut() else {
                return;
            };
            task.condition.check(ctx, agent, &*env, &task.feedback)
        };

        match verdict {
            ConditionResult::Suspend => {}
            ConditionResult::Success => self.finish(ctx, agent, env, true),
            ConditionResult::Failure => self.finish(ctx, agent, env, false),
            ConditionResult::Exec => self.exec_step(ctx, agent, env),
            ConditionResult::Force => self.force_snap(ctx, agent, env),
        }
    }

    fn finish(&mut self, ctx: &TickContext, agent: W::Agent, env: &mut W, success: bool) {
        let Some(mut task) = self.tasks.pop_front() else {
            return;
        };
        let callback = if success {
            task.on_success.take()
        } else {
            task.on_failure.take()
        };
        if let Some(callback) = callback {
            callback(ctx, agent, env);
        }
    }

    fn exec_step(&mut self, ctx: &TickContext, agent: W::Agent, env: &mut W) {
        let Some(task) = self.tasks.front_mut() else {
            return;
        };

        let desired = match task.target().resolve(agent, &*env) {
            Some(desired) => desired,
            None => {
                // The condition owns the failure policy; it sees this flag
                // on its next check.
                task.feedback.target_lost = true;
                return;
            }
        };
        let Some(current) = env.orientation(agent) else {
            task.feedback.target_lost = true;
            return;
        };

        let raw = current.delta_to(desired);
        let sensitivity = BASE_SENSITIVITY * task.speed_multiplier();
        let step = task
            .easing()
            .step(raw, ctx.dt_ms, sensitivity, &mut task.velocity);
        let next = current.stepped(step);
        env.set_orientation(agent, next);

        task.feedback.target_lost = false;
        task.feedback.error = Some(next.delta_to(desired).magnitude());
    }

    /// Bypass interpolation entirely: snap to the resolved orientation and
    /// finish as Success within this single `process` call.
    fn force_snap(&mut self, ctx: &TickContext, agent: W::Agent, env: &mut W) {
        let desired = {
            let Some(task) = self.tasks.front_mut() else {
                return;
            };
            match task.target().resolve(agent, &*env) {
                Some(desired) => desired,
                None => {
                    task.feedback.target_lost = true;
                    return;
                }
            }
        };

        env.set_orientation(agent, desired);
        self.finish(ctx, agent, env, true);
    }
}

impl<W> Default for AimScheduler<W>
where
    W: AimWorldMut + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}
