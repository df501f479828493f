use std::collections::BTreeMap;

use bot_aim::{AimWorldMut, AimWorldView, EntityId, Orientation, Vec3};
use bot_behave::{BlockPos, Face, MineWorldMut, MineWorldView, MoveIntent};
use bot_core::{EnvMut, EnvView};

use crate::layout::{LayoutKind, WorldLayout};

const EYE_HEIGHT: f32 = 1.62;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Stone,
    Ore,
}

#[derive(Debug, Clone, Copy)]
pub struct Block {
    pub kind: BlockKind,
    /// Seconds of sustained breaking needed to clear the block.
    pub hardness: f32,
}

#[derive(Debug)]
struct BreakOp {
    pos: BlockPos,
    progress: f32,
    touched: bool,
}

#[derive(Debug)]
struct Body {
    pos: Vec3,
    orientation: Orientation,
    health: f32,
    max_health: f32,
    alive: bool,
    intent: Option<MoveIntent>,
    break_op: Option<BreakOp>,
}

/// Minimal block-grid environment: enough world for the gathering routine
/// to move, aim, and mine in, with none of the host concerns the kernel
/// treats as external.
#[derive(Debug)]
pub struct SimWorld {
    blocks: BTreeMap<BlockPos, Block>,
    entities: BTreeMap<u64, Vec3>,
    body: Body,
    /// Walking speed in blocks per second.
    move_speed: f32,
}

impl SimWorld {
    pub fn new(spawn: Vec3) -> Self {
        Self {
            blocks: BTreeMap::new(),
            entities: BTreeMap::new(),
            body: Body {
                pos: spawn,
                orientation: Orientation::default(),
                health: 20.0,
                max_health: 20.0,
                alive: true,
                intent: None,
                break_op: None,
            },
            move_speed: 4.3,
        }
    }

    pub fn from_layout(layout: &WorldLayout) -> Self {
        let spawn = Vec3::new(layout.spawn[0], layout.spawn[1], layout.spawn[2]);
        let mut world = Self::new(spawn);
        for block in &layout.blocks {
            let kind = match block.kind {
                LayoutKind::Stone => BlockKind::Stone,
                LayoutKind::Ore => BlockKind::Ore,
            };
            world.set_block(
                BlockPos::new(block.pos[0], block.pos[1], block.pos[2]),
                Block {
                    kind,
                    hardness: block.hardness,
                },
            );
        }
        for entity in &layout.entities {
            world
                .entities
                .insert(entity.id, Vec3::new(entity.pos[0], entity.pos[1], entity.pos[2]));
        }
        world
    }

    /// Built-in demo field: a short line of veins, one of them partially
    /// walled in so the approach search has something to do.
    pub fn demo() -> Self {
        let mut world = Self::new(Vec3::new(0.5, 0.0, 0.5));
        let ore = Block {
            kind: BlockKind::Ore,
            hardness: 1.0,
        };
        let stone = Block {
            kind: BlockKind::Stone,
            hardness: 0.75,
        };

        world.set_block(BlockPos::new(6, 0, 2), ore);
        world.set_block(BlockPos::new(9, 0, -1), ore);
        world.set_block(BlockPos::new(8, 0, -1), stone);
        world.set_block(BlockPos::new(10, 0, -1), stone);
        world.set_block(BlockPos::new(12, 0, 4), ore);
        world
    }

    pub fn set_block(&mut self, pos: BlockPos, block: Block) {
        self.blocks.insert(pos, block);
    }

    pub fn damage(&mut self, _agent: u64, amount: f32) {
        self.body.health = (self.body.health - amount).max(0.0);
        if self.body.health <= 0.0 {
            self.body.alive = false;
        }
    }

    pub fn agent_position(&self) -> Vec3 {
        self.body.pos
    }

    pub fn agent_health(&self) -> f32 {
        self.body.health
    }

    pub fn ore_remaining(&self) -> usize {
        self.blocks
            .values()
            .filter(|block| block.kind == BlockKind::Ore)
            .count()
    }

    /// Integrate one tick: held intents move the body, an open break
    /// operation advances only if it was continued this tick.
    pub fn step(&mut self, dt_ms: f32) {
        let dt = dt_ms.max(0.0) / 1000.0;

        if let Some(intent) = self.body.intent {
            let to = intent.toward - self.body.pos;
            let distance = to.length();
            let reach = self.move_speed * dt;
            self.body.pos = if distance <= reach {
                intent.toward
            } else {
                self.body.pos + to * (reach / distance)
            };
        }

        if let Some(op) = self.body.break_op.as_mut() {
            if !op.touched {
                self.body.break_op = None;
            } else {
                op.touched = false;
                let hardness = self
                    .blocks
                    .get(&op.pos)
                    .map(|block| block.hardness)
                    .unwrap_or(0.0)
                    .max(0.05);
                op.progress += dt / hardness;
                if op.progress >= 1.0 {
                    self.blocks.remove(&op.pos);
                    self.body.break_op = None;
                }
            }
        }
    }
}

impl EnvView for SimWorld {
    type Agent = u64;
}

impl EnvMut for SimWorld {}

impl AimWorldView for SimWorld {
    fn orientation(&self, _agent: u64) -> Option<Orientation> {
        self.body.alive.then_some(self.body.orientation)
    }

    fn eye_position(&self, _agent: u64) -> Option<Vec3> {
        self.body
            .alive
            .then_some(self.body.pos + Vec3::new(0.0, EYE_HEIGHT, 0.0))
    }

    fn entity_position(&self, id: EntityId) -> Option<Vec3> {
        self.entities.get(&id.0).copied()
    }
}

impl AimWorldMut for SimWorld {
    fn set_orientation(&mut self, _agent: u64, orientation: Orientation) {
        self.body.orientation = orientation;
    }
}

impl MineWorldView for SimWorld {
    fn position(&self, _agent: u64) -> Option<Vec3> {
        self.body.alive.then_some(self.body.pos)
    }

    fn health(&self, _agent: u64) -> f32 {
        self.body.health
    }

    fn max_health(&self, _agent: u64) -> f32 {
        self.body.max_health
    }

    fn is_solid(&self, pos: BlockPos) -> bool {
        self.blocks.contains_key(&pos)
    }

    fn break_progress(&self, _agent: u64) -> Option<f32> {
        self.body.break_op.as_ref().map(|op| op.progress)
    }

    fn nearest_deposit(&self, origin: Vec3, radius: f32) -> Option<BlockPos> {
        let mut best: Option<(f32, BlockPos)> = None;
        for (&pos, block) in &self.blocks {
            if block.kind != BlockKind::Ore {
                continue;
            }
            let distance = origin.distance(pos.center());
            if distance > radius {
                continue;
            }
            if best.map(|(d, _)| distance < d).unwrap_or(true) {
                best = Some((distance, pos));
            }
        }
        best.map(|(_, pos)| pos)
    }
}

impl MineWorldMut for SimWorld {
    fn begin_break(&mut self, _agent: u64, pos: BlockPos, _face: Face) {
        self.body.break_op = Some(BreakOp {
            pos,
            progress: 0.0,
            touched: true,
        });
    }

    fn continue_break(&mut self, agent: u64, pos: BlockPos, face: Face) {
        match self.body.break_op.as_mut() {
            Some(op) if op.pos == pos => op.touched = true,
            // Switched targets without an explicit cancel; restart.
            _ => self.begin_break(agent, pos, face),
        }
    }

    fn cancel_break(&mut self, _agent: u64) {
        self.body.break_op = None;
    }

    fn set_move_intent(&mut self, _agent: u64, intent: Option<MoveIntent>) {
        self.body.intent = intent;
    }
}
