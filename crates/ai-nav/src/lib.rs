//! Grid navigation for a fixed 1024x1024 tile arena.
//!
//! [`NodeProcessor`] caches per-cell edges derived from a [`TileMap`] and
//! patches them locally when doors or bricks change. [`Pathfinder`] runs A*
//! on top of it, and [`RegionRegistry`] answers cheap reachability checks.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod edge;
pub mod map;
pub mod math;
pub mod node;
pub mod path;
pub mod pathfinder;
pub mod point;
pub mod processor;
pub mod region;

pub use edge::EdgeSet;
pub use map::{tiles, ArenaMap, OccupiedRect, OccupiedScratch, TileId, TileMap, MAX_FOOTPRINT};
pub use math::Vec2;
pub use node::Node;
pub use path::Path;
pub use pathfinder::Pathfinder;
pub use point::{CoordOffset, NodePoint, GRID_SIZE};
pub use processor::{DoorSolidMethod, NodeProcessor};
pub use region::{RegionId, RegionRegistry};
