use core::fmt::Debug;

/// Stable identifier for a controlled agent.
///
/// Determinism requires stable ordering (`Ord`) and a stable numeric ID for
/// logs and trace events.
pub trait AgentId: Copy + Ord + Eq + Debug {
    fn stable_id(self) -> u64;
}

impl AgentId for u64 {
    fn stable_id(self) -> u64 {
        self
    }
}

impl AgentId for u32 {
    fn stable_id(self) -> u64 {
        self as u64
    }
}

/// Read-only access to the host environment.
///
/// The kernel intentionally does not prescribe which queries an environment
/// must expose; subsystems (orientation, mining, movement) define extension
/// traits for the narrow slices they consume.
pub trait EnvView {
    type Agent: AgentId;
}

/// Write access / effect sink.
pub trait EnvMut: EnvView {}
