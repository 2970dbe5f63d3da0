//! Behavior tree runtime over the `ai-core` blackboard.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod bt;
pub mod composite;
pub mod decorator;
pub mod leaf;
pub mod repository;

pub use bt::{interval_allows, BehaviorNode, BtStatus, ExecuteContext, NodeKind};
pub use composite::{Selector, Sequence};
pub use decorator::{Cooldown, Inverter, Repeat, Succeeder};
pub use leaf::{Condition, HasKey, Task};
pub use repository::BehaviorRepository;
