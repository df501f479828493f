use bot_aim::Vec3;
use bot_core::{ActionState, AutomationAction, SubActions, TickContext};

use crate::world::{BlockPos, Face, MineWorldMut, MineWorldView, MoveIntent};

/// Walk to a point by holding a movement intent toward it.
///
/// Succeeds within `arrival` distance of the goal; fails once the internal
/// tick budget runs out, so a blocked path cannot stall the queue forever.
#[derive(Debug, Clone)]
pub struct MoveToAction {
    goal: Vec3,
    arrival: f32,
    max_ticks: u32,
    elapsed: u32,
}

impl MoveToAction {
    pub fn new(goal: Vec3, arrival: f32, max_ticks: u32) -> Self {
        Self {
            goal,
            arrival,
            max_ticks,
            elapsed: 0,
        }
    }
}

impl<W> AutomationAction<W> for MoveToAction
where
    W: MineWorldMut + 'static,
{
    fn state(&self, _ctx: &TickContext, agent: W::Agent, env: &W) -> ActionState {
        let Some(pos) = env.position(agent) else {
            return ActionState::Failure;
        };

        if pos.distance(self.goal) <= self.arrival {
            ActionState::Success
        } else if self.elapsed >= self.max_ticks {
            ActionState::Failure
        } else {
            ActionState::Progress
        }
    }

    fn tick(
        &mut self,
        _ctx: &TickContext,
        agent: W::Agent,
        env: &mut W,
        _sub: &mut SubActions<W>,
    ) {
        self.elapsed += 1;
        env.set_move_intent(agent, Some(MoveIntent { toward: self.goal }));
    }

    fn on_success(&mut self, _ctx: &TickContext, agent: W::Agent, env: &mut W) {
        env.set_move_intent(agent, None);
    }

    fn on_failure(&mut self, _ctx: &TickContext, agent: W::Agent, env: &mut W) {
        env.set_move_intent(agent, None);
    }
}

/// Break the block at `pos`, approaching first when out of reach.
///
/// The approach is a front-inserted [`MoveToAction`]: it finishes before this
/// action ticks again, and is requested at most once so an unreachable block
/// resolves to Failure instead of pacing back and forth.
pub struct BreakBlockAction {
    pos: BlockPos,
    reach: f32,
    max_ticks: u32,
    elapsed: u32,
    approach_requested: bool,
    started: bool,
    unreachable: bool,
}

impl BreakBlockAction {
    pub fn new(pos: BlockPos, reach: f32, max_ticks: u32) -> Self {
        Self {
            pos,
            reach,
            max_ticks,
            elapsed: 0,
            approach_requested: false,
            started: false,
            unreachable: false,
        }
    }
}

impl<W> AutomationAction<W> for BreakBlockAction
where
    W: MineWorldMut + 'static,
{
    fn state(&self, _ctx: &TickContext, _agent: W::Agent, env: &W) -> ActionState {
        if !env.is_solid(self.pos) {
            return ActionState::Success;
        }

        if self.unreachable || self.elapsed >= self.max_ticks {
            ActionState::Failure
        } else {
            ActionState::Progress
        }
    }

    fn tick(&mut self, _ctx: &TickContext, agent: W::Agent, env: &mut W, sub: &mut SubActions<W>) {
        self.elapsed += 1;

        let Some(pos) = env.position(agent) else {
            self.unreachable = true;
            return;
        };

        if pos.distance(self.pos.center()) > self.reach {
            if self.approach_requested {
                self.unreachable = true;
                return;
            }

            let Some(stand) = approach_point(env, self.pos) else {
                self.unreachable = true;
                return;
            };

            self.approach_requested = true;
            sub.push(Box::new(MoveToAction::new(stand, 0.5, self.max_ticks)));
            return;
        }

        let Some(face) = exposed_face(env, self.pos) else {
            self.unreachable = true;
            return;
        };

        if self.started {
            env.continue_break(agent, self.pos, face);
        } else {
            self.started = true;
            env.begin_break(agent, self.pos, face);
        }
    }

    fn on_failure(&mut self, _ctx: &TickContext, agent: W::Agent, env: &mut W) {
        if self.started {
            env.cancel_break(agent);
        }
    }
}

/// Idle for a fixed number of ticks.
#[derive(Debug, Clone)]
pub struct WaitAction {
    ticks: u32,
    elapsed: u32,
}

impl WaitAction {
    pub fn new(ticks: u32) -> Self {
        Self { ticks, elapsed: 0 }
    }
}

impl<W> AutomationAction<W> for WaitAction
where
    W: MineWorldMut + 'static,
{
    fn state(&self, _ctx: &TickContext, _agent: W::Agent, _env: &W) -> ActionState {
        if self.elapsed >= self.ticks {
            ActionState::Success
        } else {
            ActionState::Progress
        }
    }

    fn tick(
        &mut self,
        _ctx: &TickContext,
        _agent: W::Agent,
        _env: &mut W,
        _sub: &mut SubActions<W>,
    ) {
        self.elapsed += 1;
    }
}

/// First open standing cell horizontally adjacent to `pos`: the cell and its
/// headroom are both non-solid. Fixed face order for determinism.
pub fn approach_point<W>(env: &W, pos: BlockPos) -> Option<Vec3>
where
    W: MineWorldView + ?Sized,
{
    for face in Face::HORIZONTAL {
        let cell = pos.neighbor(face);
        if !env.is_solid(cell) && !env.is_solid(cell.neighbor(Face::Up)) {
            let center = cell.center();
            return Some(Vec3::new(center.x, cell.y as f32, center.z));
        }
    }
    None
}

/// First exposed face of `pos`, or `None` when the block is fully buried.
fn exposed_face<W>(env: &W, pos: BlockPos) -> Option<Face>
where
    W: MineWorldView + ?Sized,
{
    Face::ALL
        .into_iter()
        .find(|&face| !env.is_solid(pos.neighbor(face)))
}
