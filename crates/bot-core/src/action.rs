use crate::{EnvMut, TickContext};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Lifecycle state reported by an action's `state()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ActionState {
    Progress,
    Success,
    Failure,
}

impl ActionState {
    pub fn is_terminal(self) -> bool {
        !matches!(self, ActionState::Progress)
    }
}

/// A unit of sequenced work owned by an [`ActionQueue`](crate::ActionQueue).
///
/// `state()` is the sole authority on termination: a `Progress` result keeps
/// the action queued and retried every tick, so implementations must bound
/// their own waiting (e.g. an internal tick counter resolving to `Failure`)
/// rather than stall forever. Implementations own all of their mutable
/// sub-state; actions never observe or mutate other actions.
pub trait AutomationAction<W>: 'static
where
    W: EnvMut + 'static,
{
    /// Report the current lifecycle state. Read-only: called by the queue
    /// before deciding whether to pop.
    fn state(&self, ctx: &TickContext, agent: W::Agent, env: &W) -> ActionState;

    /// Advance one tick of work. Sub-tasks pushed into `sub` are inserted
    /// ahead of this action and complete before `tick` is called again.
    fn tick(&mut self, ctx: &TickContext, agent: W::Agent, env: &mut W, sub: &mut SubActions<W>);

    fn on_success(&mut self, _ctx: &TickContext, _agent: W::Agent, _env: &mut W) {}

    fn on_failure(&mut self, _ctx: &TickContext, _agent: W::Agent, _env: &mut W) {}
}

/// Front-insertion requests collected while an action ticks.
///
/// This is the sole decomposition mechanism: there is no recursive call
/// stack, a parent expresses "do this first" purely through queue order.
pub struct SubActions<W>
where
    W: EnvMut + 'static,
{
    requests: Vec<Box<dyn AutomationAction<W>>>,
}

impl<W> SubActions<W>
where
    W: EnvMut + 'static,
{
    pub fn push(&mut self, action: Box<dyn AutomationAction<W>>) {
        self.requests.push(action);
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    pub(crate) fn new() -> Self {
        Self {
            requests: Vec::new(),
        }
    }

    pub(crate) fn into_requests(self) -> Vec<Box<dyn AutomationAction<W>>> {
        self.requests
    }
}
