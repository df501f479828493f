use bot_aim::{AimWorldMut, AimWorldView, Vec3};

/// Integer block coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Center of the block volume, the point interact/aim code targets.
    pub fn center(self) -> Vec3 {
        Vec3::new(
            self.x as f32 + 0.5,
            self.y as f32 + 0.5,
            self.z as f32 + 0.5,
        )
    }

    pub fn neighbor(self, face: Face) -> BlockPos {
        let (dx, dy, dz) = face.offset();
        BlockPos::new(self.x + dx, self.y + dy, self.z + dz)
    }
}

/// Block face, named from the perspective of the block being faced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Face {
    Up,
    Down,
    North,
    South,
    West,
    East,
}

impl Face {
    /// All faces in a fixed order for deterministic iteration.
    pub const ALL: [Face; 6] = [
        Face::Up,
        Face::North,
        Face::South,
        Face::West,
        Face::East,
        Face::Down,
    ];

    /// Horizontal faces only, for standing-position searches.
    pub const HORIZONTAL: [Face; 4] = [Face::North, Face::South, Face::West, Face::East];

    pub fn offset(self) -> (i32, i32, i32) {
        match self {
            Face::Up => (0, 1, 0),
            Face::Down => (0, -1, 0),
            Face::North => (0, 0, -1),
            Face::South => (0, 0, 1),
            Face::West => (-1, 0, 0),
            Face::East => (1, 0, 0),
        }
    }
}

/// A held directional input: walk toward `toward` until released.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveIntent {
    pub toward: Vec3,
}

/// Read access to the slice of the environment mining behaviors need.
pub trait MineWorldView: AimWorldView {
    fn position(&self, agent: Self::Agent) -> Option<Vec3>;

    fn health(&self, agent: Self::Agent) -> f32;

    fn max_health(&self, agent: Self::Agent) -> f32;

    fn is_solid(&self, pos: BlockPos) -> bool;

    /// Progress of the agent's open break operation in [0, 1], or `None`
    /// when no operation is open.
    fn break_progress(&self, agent: Self::Agent) -> Option<f32>;

    /// Nearest interactable deposit within `radius` of `origin`, or `None`.
    /// Chunk scanning itself belongs to the host; this is only the lookup.
    fn nearest_deposit(&self, origin: Vec3, radius: f32) -> Option<BlockPos>;
}

pub trait MineWorldMut: AimWorldMut + MineWorldView {
    fn begin_break(&mut self, agent: Self::Agent, pos: BlockPos, face: Face);

    /// Must be called every tick to keep the operation open; the host
    /// cancels an untouched operation.
    fn continue_break(&mut self, agent: Self::Agent, pos: BlockPos, face: Face);

    fn cancel_break(&mut self, agent: Self::Agent);

    /// Press (`Some`) or release (`None`) the movement input.
    fn set_move_intent(&mut self, agent: Self::Agent, intent: Option<MoveIntent>);
}
