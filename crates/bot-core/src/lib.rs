//! Tick-driven, engine-agnostic automation kernel primitives.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod action;
pub mod env;
pub mod queue;
pub mod tick;

pub use action::{ActionState, AutomationAction, SubActions};
pub use env::{AgentId, EnvMut, EnvView};
pub use queue::ActionQueue;
pub use tick::TickContext;
