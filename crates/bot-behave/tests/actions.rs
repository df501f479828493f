use std::collections::BTreeSet;

use bot_aim::{AimWorldMut, AimWorldView, EntityId, Orientation, Vec3};
use bot_behave::{
    BlockPos, BreakBlockAction, Face, MineWorldMut, MineWorldView, MoveIntent, MoveToAction,
    WaitAction,
};
use bot_core::{ActionQueue, EnvMut, EnvView, TickContext};

const AGENT: u64 = 1;

struct MineEnv {
    pos: Vec3,
    orientation: Orientation,
    health: f32,
    max_health: f32,
    solid: BTreeSet<BlockPos>,
    intent: Option<MoveIntent>,
    break_op: Option<BreakOp>,
    move_speed: f32,
    break_ticks: u32,
    calls: Vec<&'static str>,
}

struct BreakOp {
    pos: BlockPos,
    progress: f32,
    touched: bool,
}

impl MineEnv {
    fn new(pos: Vec3) -> Self {
        Self {
            pos,
            orientation: Orientation::default(),
            health: 20.0,
            max_health: 20.0,
            solid: BTreeSet::new(),
            intent: None,
            break_op: None,
            move_speed: 0.5,
            break_ticks: 3,
            calls: Vec::new(),
        }
    }

    /// Integrate one tick of physics: held intents move the agent, an open
    /// break operation advances only if it was touched this tick.
    fn step(&mut self) {
        if let Some(intent) = self.intent {
            let to = intent.toward - self.pos;
            let distance = to.length();
            self.pos = if distance <= self.move_speed {
                intent.toward
            } else {
                self.pos + to * (self.move_speed / distance)
            };
        }

        if let Some(op) = self.break_op.as_mut() {
            if !op.touched {
                self.break_op = None;
            } else {
                op.touched = false;
                op.progress += 1.0 / self.break_ticks as f32;
                if op.progress >= 1.0 - 1e-6 {
                    self.solid.remove(&op.pos);
                    self.break_op = None;
                }
            }
        }
    }
}

impl EnvView for MineEnv {
    type Agent = u64;
}

impl EnvMut for MineEnv {}

impl AimWorldView for MineEnv {
    fn orientation(&self, _agent: u64) -> Option<Orientation> {
        Some(self.orientation)
    }

    fn eye_position(&self, _agent: u64) -> Option<Vec3> {
        Some(self.pos + Vec3::new(0.0, 1.62, 0.0))
    }

    fn entity_position(&self, _id: EntityId) -> Option<Vec3> {
        None
    }
}

impl AimWorldMut for MineEnv {
    fn set_orientation(&mut self, _agent: u64, orientation: Orientation) {
        self.orientation = orientation;
    }
}

impl MineWorldView for MineEnv {
    fn position(&self, _agent: u64) -> Option<Vec3> {
        Some(self.pos)
    }

    fn health(&self, _agent: u64) -> f32 {
        self.health
    }

    fn max_health(&self, _agent: u64) -> f32 {
        self.max_health
    }

    fn is_solid(&self, pos: BlockPos) -> bool {
        self.solid.contains(&pos)
    }

    fn break_progress(&self, _agent: u64) -> Option<f32> {
        self.break_op.as_ref().map(|op| op.progress)
    }

    fn nearest_deposit(&self, _origin: Vec3, _radius: f32) -> Option<BlockPos> {
        None
    }
}

impl MineWorldMut for MineEnv {
    fn begin_break(&mut self, _agent: u64, pos: BlockPos, _face: Face) {
        self.calls.push("begin_break");
        self.break_op = Some(BreakOp {
            pos,
            progress: 0.0,
            touched: true,
        });
    }

    fn continue_break(&mut self, _agent: u64, _pos: BlockPos, _face: Face) {
        self.calls.push("continue_break");
        if let Some(op) = self.break_op.as_mut() {
            op.touched = true;
        }
    }

    fn cancel_break(&mut self, _agent: u64) {
        self.calls.push("cancel_break");
        self.break_op = None;
    }

    fn set_move_intent(&mut self, _agent: u64, intent: Option<MoveIntent>) {
        self.intent = intent;
    }
}

fn run_tick(queue: &mut ActionQueue<MineEnv>, env: &mut MineEnv, tick: u64) {
    let ctx = TickContext::new(tick, 50.0);
    queue.tick(&ctx, AGENT, env);
    queue.evaluate(&ctx, AGENT, env);
    env.step();
}

#[test]
fn move_to_walks_to_the_goal_and_releases_the_intent() {
    let mut env = MineEnv::new(Vec3::new(0.5, 0.0, 0.5));
    let mut queue = ActionQueue::new();

    let goal = Vec3::new(4.5, 0.0, 0.5);
    queue.push_back(Box::new(MoveToAction::new(goal, 0.25, 50)));

    let mut tick = 0;
    while !queue.is_empty() {
        run_tick(&mut queue, &mut env, tick);
        tick += 1;
        assert!(tick < 50, "move did not finish");
    }

    assert!(env.pos.distance(goal) <= 0.25);
    assert!(env.intent.is_none());
}

#[test]
fn move_to_fails_after_its_tick_budget() {
    let mut env = MineEnv::new(Vec3::new(0.5, 0.0, 0.5));
    env.move_speed = 0.0; // Path blocked: intents never move the agent.
    let mut queue = ActionQueue::new();

    queue.push_back(Box::new(MoveToAction::new(
        Vec3::new(10.5, 0.0, 0.5),
        0.25,
        5,
    )));

    for tick in 0..7 {
        run_tick(&mut queue, &mut env, tick);
    }

    assert!(queue.is_empty());
    assert!(env.intent.is_none());
    assert_eq!(env.pos, Vec3::new(0.5, 0.0, 0.5));
}

#[test]
fn break_block_in_reach_grinds_until_the_block_is_gone() {
    let mut env = MineEnv::new(Vec3::new(0.5, 0.0, 0.5));
    let block = BlockPos::new(2, 0, 0);
    env.solid.insert(block);

    let mut queue = ActionQueue::new();
    queue.push_back(Box::new(BreakBlockAction::new(block, 4.0, 50)));

    let mut tick = 0;
    while !queue.is_empty() {
        run_tick(&mut queue, &mut env, tick);
        tick += 1;
        assert!(tick < 20, "break did not finish");
    }

    assert!(!env.solid.contains(&block));
    assert_eq!(env.calls[0], "begin_break");
    assert!(env.calls[1..].iter().all(|call| *call == "continue_break"));
}

#[test]
fn break_block_out_of_reach_approaches_first() {
    let mut env = MineEnv::new(Vec3::new(0.5, 0.0, 0.5));
    let block = BlockPos::new(8, 0, 0);
    env.solid.insert(block);

    let mut queue = ActionQueue::new();
    queue.push_back(Box::new(BreakBlockAction::new(block, 4.0, 100)));

    // First tick decomposes: the approach move becomes the head.
    run_tick(&mut queue, &mut env, 0);
    assert_eq!(queue.len(), 2);
    assert!(env.calls.is_empty(), "no break call before the approach");

    let mut tick = 1;
    while !queue.is_empty() {
        run_tick(&mut queue, &mut env, tick);
        tick += 1;
        assert!(tick < 100, "approach-and-break did not finish");
    }

    assert!(!env.solid.contains(&block));
    assert!(env.calls.contains(&"begin_break"));
}

#[test]
fn break_block_fails_when_fully_buried() {
    let mut env = MineEnv::new(Vec3::new(0.5, 0.0, 0.5));
    let block = BlockPos::new(2, 0, 0);
    env.solid.insert(block);
    for face in Face::ALL {
        env.solid.insert(block.neighbor(face));
    }

    let mut queue = ActionQueue::new();
    queue.push_back(Box::new(BreakBlockAction::new(block, 4.0, 50)));

    run_tick(&mut queue, &mut env, 0);
    run_tick(&mut queue, &mut env, 1);

    assert!(queue.is_empty());
    assert!(env.solid.contains(&block));
    assert!(!env.calls.contains(&"begin_break"));
}

#[test]
fn wait_counts_down_in_ticks() {
    let mut env = MineEnv::new(Vec3::default());
    let mut queue = ActionQueue::new();

    queue.push_back(Box::new(WaitAction::new(3)));

    for tick in 0..3 {
        run_tick(&mut queue, &mut env, tick);
        assert!(!queue.is_empty() || tick == 2);
    }

    assert!(queue.is_empty());
}
