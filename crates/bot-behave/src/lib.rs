//! Behavior state machines and reference actions built on `bot-core` and
//! `bot-aim`.
//!
//! [`GatherRoutine`] is the model consumer for the action queue: every
//! multi-phase routine in the system follows the same discipline. Work is
//! enqueued on state entry, the routine waits for the queue to drain, a
//! safety check runs every tick with an emergency escape path, and
//! unrecoverable failures disable the routine instead of retrying forever.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod actions;
pub mod gather;
pub mod toggle;
pub mod world;

pub use actions::{approach_point, BreakBlockAction, MoveToAction, WaitAction};
pub use gather::{GatherConfig, GatherRoutine, GatherState};
pub use toggle::Toggle;
pub use world::{BlockPos, Face, MineWorldMut, MineWorldView, MoveIntent};
