use std::collections::VecDeque;

use crate::action::{ActionState, AutomationAction, SubActions};
use crate::{EnvMut, TickContext};

/// FIFO sequence of automation actions; only the head is ever ticked or
/// queried, so exactly one action is mutated per simulation tick.
///
/// The host calls [`tick`](ActionQueue::tick) then
/// [`evaluate`](ActionQueue::evaluate) once per simulation tick.
pub struct ActionQueue<W>
where
    W: EnvMut + 'static,
{
    actions: VecDeque<Box<dyn AutomationAction<W>>>,
}

impl<W> ActionQueue<W>
where
    W: EnvMut + 'static,
{
    pub fn new() -> Self {
        Self {
            actions: VecDeque::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn push_back(&mut self, action: Box<dyn AutomationAction<W>>) {
        self.actions.push_back(action);
    }

    /// Insert ahead of the current head. The inserted action reaches a
    /// terminal state before the previous head's `tick()` runs again.
    pub fn push_front(&mut self, action: Box<dyn AutomationAction<W>>) {
        self.actions.push_front(action);
    }

    /// Hard cancel: drops every queued action without invoking any callback.
    /// Distinct from an action reaching `Failure`, which does invoke
    /// `on_failure`. Callers interrupting mid-flight work are responsible for
    /// releasing any environment effects (held inputs, open operations) the
    /// cancelled actions left behind.
    pub fn clear(&mut self) {
        self.actions.clear();
    }

    /// Advance the head action by one tick, then splice any sub-actions it
    /// requested ahead of it, preserving request order.
    pub fn tick(&mut self, ctx: &TickContext, agent: W::Agent, env: &mut W) {
        let Some(head) = self.actions.front_mut() else {
            return;
        };

        let mut sub = SubActions::new();
        head.tick(ctx, agent, env, &mut sub);

        for action in sub.into_requests().into_iter().rev() {
            self.actions.push_front(action);
        }
    }

    /// Read the head's state and pop it if terminal, invoking the matching
    /// callback. The queue never interprets *why* an action finished.
    pub fn evaluate(&mut self, ctx: &TickContext, agent: W::Agent, env: &mut W) {
        let state = match self.actions.front() {
            Some(head) => head.state(ctx, agent, &*env),
            None => return,
        };

        match state {
            ActionState::Progress => {}
            ActionState::Success => {
                if let Some(mut head) = self.actions.pop_front() {
                    head.on_success(ctx, agent, env);
                }
            }
            ActionState::Failure => {
                if let Some(mut head) = self.actions.pop_front() {
                    head.on_failure(ctx, agent, env);
                }
            }
        }
    }
}

impl<W> Default for ActionQueue<W>
where
    W: EnvMut + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}
