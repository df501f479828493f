//! Tooling primitives for the automation kernel.
//!
//! This crate is intentionally lightweight and engine-agnostic. Higher-level
//! integrations (log forwarding, inspectors, overlays) should live in host
//! crates.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod trace;

pub use trace::{NullTraceSink, TraceEvent, TraceLog, TraceSink, VecTraceSink};
