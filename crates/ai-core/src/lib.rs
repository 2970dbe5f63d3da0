//! Deterministic tick clock and blackboard primitives for bot agents.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod blackboard;
pub mod tick;

pub use blackboard::{BbScope, Blackboard};
pub use tick::{Tick, TickContext};
