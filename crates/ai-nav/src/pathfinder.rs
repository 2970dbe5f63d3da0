use core::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::map::TileMap;
use crate::node::Node;
use crate::point::{CoordOffset, NodePoint};
use crate::processor::NodeProcessor;
use crate::{Path, Vec2};

#[derive(Debug, Clone, Copy)]
struct OpenEntry {
    f: f32,
    h: f32,
    index: u32,
}

impl OpenEntry {
    fn key_cmp(&self, other: &Self) -> Ordering {
        self.f
            .total_cmp(&other.f)
            .then(self.h.total_cmp(&other.h))
            .then(self.index.cmp(&other.index))
    }
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.key_cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenEntry {}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering to make BinaryHeap behave like a min-heap.
        other.key_cmp(self)
    }
}

/// Octile distance: exact cost on an open 8-connected grid.
pub fn octile(a: NodePoint, b: NodePoint) -> f32 {
    let dx = (a.x as f32 - b.x as f32).abs();
    let dy = (a.y as f32 - b.y as f32).abs();
    let (lo, hi) = if dx < dy { (dx, dy) } else { (dy, dx) };
    hi + (core::f32::consts::SQRT_2 - 1.0) * lo
}

/// A* over the processor's node array.
///
/// Open/closed membership, costs and parents live on the nodes themselves;
/// the only side allocation is the reusable open queue. One search runs at a
/// time (`&mut self`), which is what keeps the shared node array valid.
pub struct Pathfinder {
    processor: NodeProcessor,
    open: BinaryHeap<OpenEntry>,
    max_expansions: Option<usize>,
    last_expansions: usize,
}

impl Pathfinder {
    pub fn new(processor: NodeProcessor) -> Self {
        Self {
            processor,
            open: BinaryHeap::new(),
            max_expansions: None,
            last_expansions: 0,
        }
    }

    /// Give up (empty path) after expanding this many nodes.
    pub fn with_max_expansions(mut self, max: usize) -> Self {
        self.max_expansions = Some(max);
        self
    }

    pub fn processor(&self) -> &NodeProcessor {
        &self.processor
    }

    pub fn processor_mut(&mut self) -> &mut NodeProcessor {
        &mut self.processor
    }

    /// Nodes expanded by the most recent search.
    pub fn last_expansions(&self) -> usize {
        self.last_expansions
    }

    pub fn find_path<M: TileMap>(&mut self, map: &M, start: Vec2, goal: Vec2, radius: f32) -> Path {
        if (self.processor.radius() - radius).abs() > f32::EPSILON {
            tracing::debug!(
                built = self.processor.radius(),
                requested = radius,
                "Radius changed; rebuilding edges before search"
            );
            self.processor.rebuild(map, radius);
        }

        self.processor.begin_search();
        self.open.clear();
        self.last_expansions = 0;

        let (Some(start_point), Some(goal_point)) =
            (NodePoint::from_world(start), NodePoint::from_world(goal))
        else {
            return Path::empty();
        };
        if !self.processor.is_traversable(start_point) || !self.processor.is_traversable(goal_point) {
            return Path::empty();
        }
        let (Some(start_index), Some(goal_index)) = (start_point.index(), goal_point.index()) else {
            return Path::empty();
        };

        let h0 = octile(start_point, goal_point);
        let Some(start_node) = self.processor.get_node_at(start_index) else {
            return Path::empty();
        };
        start_node.g = 0.0;
        start_node.f = h0;
        start_node.flags |= Node::OPENSET | Node::TOUCHED;
        self.open.push(OpenEntry {
            f: h0,
            h: h0,
            index: start_index as u32,
        });

        while let Some(entry) = self.open.pop() {
            let index = entry.index as usize;
            let Some(node) = self.processor.get_node_at(index) else {
                continue;
            };
            if !node.is_open() || node.f != entry.f {
                // Stale heap entry.
                continue;
            }
            node.flags &= !Node::OPENSET;
            let g = node.g;

            if index == goal_index {
                return self.reconstruct(goal_index);
            }

            self.last_expansions += 1;
            if let Some(max) = self.max_expansions {
                if self.last_expansions >= max {
                    tracing::debug!(max, "Search expansion budget exhausted");
                    return Path::empty();
                }
            }

            let Some(point) = NodePoint::from_index(index) else {
                continue;
            };
            let edges = self.processor.find_edges(map, point);

            for i in edges.iter() {
                let offset = CoordOffset::from_index(i);
                let Some(next) = point.offset(offset) else {
                    continue;
                };
                let Some(next_index) = next.index() else {
                    continue;
                };
                let Some(neighbor) = self.processor.get_node_at(next_index) else {
                    continue;
                };
                if neighbor.is_closed() {
                    continue;
                }

                let tentative_g = g + offset.cost();
                if neighbor.is_touched() && tentative_g >= neighbor.g {
                    continue;
                }

                let h = octile(next, goal_point);
                neighbor.g = tentative_g;
                neighbor.f = tentative_g + h;
                neighbor.parent = index as u32;
                neighbor.flags |= Node::OPENSET | Node::TOUCHED;
                self.open.push(OpenEntry {
                    f: neighbor.f,
                    h,
                    index: next_index as u32,
                });
            }
        }

        tracing::debug!(
            start_x = start_point.x,
            start_y = start_point.y,
            goal_x = goal_point.x,
            goal_y = goal_point.y,
            "No path found"
        );
        Path::empty()
    }

    fn reconstruct(&self, goal_index: usize) -> Path {
        let mut cells = Vec::new();
        let mut current = Some(goal_index);
        while let Some(index) = current {
            let Some(point) = NodePoint::from_index(index) else {
                return Path::empty();
            };
            cells.push(point);
            current = self
                .processor
                .node(point)
                .and_then(|node| node.parent_index());
        }
        cells.reverse();
        Path::new(cells.into_iter().map(NodePoint::center).collect())
    }
}

impl core::fmt::Debug for Pathfinder {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Pathfinder")
            .field("processor", &self.processor)
            .field("max_expansions", &self.max_expansions)
            .finish()
    }
}
