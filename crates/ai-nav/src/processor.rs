use crate::edge::EdgeSet;
use crate::map::{footprint_tiles, tiles, OccupiedScratch, TileMap};
use crate::node::Node;
use crate::point::{CoordOffset, NodePoint, GRID_CELLS};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How door-dependent edges are resolved at query time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DoorSolidMethod {
    /// Doors never close a route.
    AlwaysOpen,
    /// Doors are permanent walls.
    AlwaysSolid,
    /// Doors are checked against the live map on every query.
    #[default]
    Dynamic,
}

/// Owns the per-cell node records and their cached edges for the whole arena.
pub struct NodeProcessor {
    nodes: Vec<Node>,
    edges: Vec<EdgeSet>,
    door_method: DoorSolidMethod,
    radius: f32,
    generation: u32,
    scratch: OccupiedScratch,
}

impl NodeProcessor {
    pub fn new(door_method: DoorSolidMethod) -> Self {
        Self {
            nodes: vec![Node::default(); GRID_CELLS],
            edges: vec![EdgeSet::empty(); GRID_CELLS],
            door_method,
            radius: 0.0,
            generation: 0,
            scratch: OccupiedScratch::new(),
        }
    }

    pub fn door_method(&self) -> DoorSolidMethod {
        self.door_method
    }

    pub fn set_door_method(&mut self, method: DoorSolidMethod) {
        self.door_method = method;
    }

    /// Collision radius the cached edges were built for.
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Starts a new search generation. Every node touched afterwards is
    /// re-initialized lazily by [`get_node`](Self::get_node).
    pub fn begin_search(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        if self.generation == 0 {
            for node in self.nodes.iter_mut() {
                node.generation = 0;
            }
            self.generation = 1;
        }
    }

    /// Node at `point`, initialized for the current search. `None` outside the arena.
    pub fn get_node(&mut self, point: NodePoint) -> Option<&mut Node> {
        let index = point.index()?;
        self.get_node_at(index)
    }

    pub(crate) fn get_node_at(&mut self, index: usize) -> Option<&mut Node> {
        let generation = self.generation;
        let node = self.nodes.get_mut(index)?;
        if node.generation != generation {
            node.reinitialize(generation);
        }
        Some(node)
    }

    /// Read-only view of a node, without touching its search state.
    pub fn node(&self, point: NodePoint) -> Option<&Node> {
        self.nodes.get(point.index()?)
    }

    pub fn is_traversable(&self, point: NodePoint) -> bool {
        self.node(point).map(|n| n.is_traversable()).unwrap_or(false)
    }

    /// Cached edges, before door resolution.
    pub fn cached_edges(&self, point: NodePoint) -> EdgeSet {
        point
            .index()
            .map(|idx| self.edges[idx])
            .unwrap_or_default()
    }

    pub fn traversable_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_traversable()).count()
    }

    /// Full recomputation of one cell's edges from the map.
    ///
    /// Diagonals are only considered once both orthogonals they cut past are
    /// open. Footprints wider than a tile test destinations against the
    /// occupancy rects gathered once into `scratch`.
    pub fn calculate_edges<M: TileMap>(
        &self,
        map: &M,
        point: NodePoint,
        radius: f32,
        scratch: &mut OccupiedScratch,
    ) -> EdgeSet {
        let mut edges = EdgeSet::empty();
        if !point.in_bounds() {
            return edges;
        }

        let use_rects = radius > 0.5;
        if use_rects {
            map.occupied_rects(point, radius, scratch);
        }

        for (i, offset) in CoordOffset::ALL.iter().enumerate() {
            if let Some((a, b)) = CoordOffset::diagonal_requirements(i) {
                if !edges.is_set(a) || !edges.is_set(b) {
                    continue;
                }
            }

            let Some(dest) = point.offset(*offset) else {
                continue;
            };

            if use_rects {
                if !scratch.contains(dest) {
                    continue;
                }
            } else if map.is_solid_empty_doors(dest) {
                continue;
            }

            if !self.is_traversable(dest) {
                continue;
            }

            edges.set(i);
            if tiles::is_dynamic(map.tile_id(dest)) {
                edges.dynamic_set(i);
            }
        }

        edges
    }

    /// Usable edges for `point` under the configured door method.
    pub fn find_edges<M: TileMap>(&self, map: &M, point: NodePoint) -> EdgeSet {
        let mut edges = self.cached_edges(point);

        for i in 0..8 {
            if !edges.dynamic_is_set(i) {
                continue;
            }

            match self.door_method {
                DoorSolidMethod::AlwaysOpen => {}
                DoorSolidMethod::AlwaysSolid => edges.erase(i),
                DoorSolidMethod::Dynamic => {
                    let blocked = point
                        .offset(CoordOffset::from_index(i))
                        .map(|dest| map.is_solid(dest))
                        .unwrap_or(true);
                    if blocked {
                        edges.erase(i);
                    }
                }
            }
        }

        // A closed door also closes the diagonals that cut past it.
        for i in 4..8 {
            if let Some((a, b)) = CoordOffset::diagonal_requirements(i) {
                if edges.is_set(i) && !(edges.is_set(a) && edges.is_set(b)) {
                    edges.erase(i);
                }
            }
        }

        edges
    }

    /// Rebuilds traversability and every cached edge for `radius`.
    ///
    /// Returns the number of traversable cells.
    pub fn rebuild<M: TileMap>(&mut self, map: &M, radius: f32) -> usize {
        self.radius = radius;

        let mut traversable = 0;
        for (index, node) in self.nodes.iter_mut().enumerate() {
            node.flags &= !Node::TRAVERSABLE;
            let Some(point) = NodePoint::from_index(index) else {
                continue;
            };
            if !map.is_solid_empty_doors(point) {
                node.flags |= Node::TRAVERSABLE;
                traversable += 1;
            }
        }

        let mut scratch = core::mem::take(&mut self.scratch);
        let mut overflowed = 0usize;
        for index in 0..GRID_CELLS {
            let Some(point) = NodePoint::from_index(index) else {
                continue;
            };
            self.edges[index] = if self.nodes[index].is_traversable() {
                let edges = self.calculate_edges(map, point, radius, &mut scratch);
                overflowed += scratch.overflowed() as usize;
                edges
            } else {
                EdgeSet::empty()
            };
        }
        self.scratch = scratch;

        if overflowed > 0 {
            tracing::warn!(radius, cells = overflowed, "Occupancy scratch overflowed during rebuild");
        }
        tracing::info!(radius, traversable, "Rebuilt navigation edges");
        traversable
    }

    /// Re-derives the cells whose edges can observe the tile at `point`.
    ///
    /// Touches a square of side `2 * (footprint + 1) + 1` around `point`,
    /// independent of arena size. Returns the number of cells recomputed.
    pub fn patch<M: TileMap>(&mut self, map: &M, point: NodePoint) -> usize {
        let Some(index) = point.index() else {
            return 0;
        };

        let node = &mut self.nodes[index];
        if map.is_solid_empty_doors(point) {
            node.flags &= !Node::TRAVERSABLE;
        } else {
            node.flags |= Node::TRAVERSABLE;
        }

        let radius = self.radius;
        let reach = footprint_tiles(radius) as i32 + 1;
        let mut scratch = core::mem::take(&mut self.scratch);
        let mut patched = 0;

        for dy in -reach..=reach {
            for dx in -reach..=reach {
                let x = point.x as i32 + dx;
                let y = point.y as i32 + dy;
                if x < 0 || y < 0 {
                    continue;
                }
                let cell = NodePoint::new(x as u16, y as u16);
                let Some(cell_index) = cell.index() else {
                    continue;
                };
                self.edges[cell_index] = if self.nodes[cell_index].is_traversable() {
                    self.calculate_edges(map, cell, radius, &mut scratch)
                } else {
                    EdgeSet::empty()
                };
                patched += 1;
            }
        }

        self.scratch = scratch;
        tracing::trace!(x = point.x, y = point.y, patched, "Patched navigation edges");
        patched
    }
}

impl core::fmt::Debug for NodeProcessor {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("NodeProcessor")
            .field("door_method", &self.door_method)
            .field("radius", &self.radius)
            .field("generation", &self.generation)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::ArenaMap;

    #[test]
    fn stale_nodes_are_reinitialized_but_keep_traversable() {
        let map = ArenaMap::new();
        let mut processor = NodeProcessor::new(DoorSolidMethod::Dynamic);
        processor.rebuild(&map, 0.5);

        let p = NodePoint::new(3, 3);
        processor.begin_search();
        {
            let node = processor.get_node(p).unwrap();
            node.g = 7.0;
            node.f = 9.0;
            node.parent = 12;
            node.flags |= Node::OPENSET | Node::TOUCHED;
        }

        processor.begin_search();
        let node = processor.get_node(p).unwrap();
        assert_eq!(node.g, 0.0);
        assert_eq!(node.f, 0.0);
        assert_eq!(node.parent_index(), None);
        assert!(!node.is_open());
        assert!(!node.is_touched());
        assert!(node.is_traversable());
    }

    #[test]
    fn same_generation_keeps_search_state() {
        let mut processor = NodeProcessor::new(DoorSolidMethod::Dynamic);
        let p = NodePoint::new(1, 1);
        processor.begin_search();
        processor.get_node(p).unwrap().g = 4.0;
        assert_eq!(processor.get_node(p).unwrap().g, 4.0);
    }

    #[test]
    fn generation_wrap_clears_stamps() {
        let mut processor = NodeProcessor::new(DoorSolidMethod::Dynamic);
        processor.generation = u32::MAX;
        let p = NodePoint::new(2, 2);
        processor.get_node(p).unwrap().g = 3.0;

        processor.begin_search();
        assert_eq!(processor.generation, 1);
        assert_eq!(processor.get_node(p).unwrap().g, 0.0);
    }

    #[test]
    fn out_of_range_has_no_node_or_edges() {
        let mut processor = NodeProcessor::new(DoorSolidMethod::Dynamic);
        assert!(processor.get_node(NodePoint::new(1024, 0)).is_none());
        assert!(processor.cached_edges(NodePoint::new(0, 1024)).is_empty());
    }

    #[test]
    fn corner_cells_only_link_inward() {
        let map = ArenaMap::new();
        let mut processor = NodeProcessor::new(DoorSolidMethod::Dynamic);
        processor.rebuild(&map, 0.5);

        let edges = processor.cached_edges(NodePoint::new(0, 0));
        // South, East and South-East only.
        assert_eq!(edges.iter().collect::<Vec<_>>(), vec![1, 3, 7]);
    }

    #[test]
    fn wall_blocks_orthogonal_and_both_adjacent_diagonals() {
        let mut map = ArenaMap::new();
        map.set_tile(NodePoint::new(11, 10), tiles::WALL_FIRST);
        let mut processor = NodeProcessor::new(DoorSolidMethod::Dynamic);
        processor.rebuild(&map, 0.5);

        let edges = processor.cached_edges(NodePoint::new(10, 10));
        assert!(!edges.is_set(3));
        assert!(!edges.is_set(5));
        assert!(!edges.is_set(7));
        assert!(edges.is_set(2));
        assert!(edges.is_set(4));
    }

    #[test]
    fn door_edges_are_marked_dynamic() {
        let mut map = ArenaMap::new();
        map.set_door(NodePoint::new(10, 9), true);
        map.set_door(NodePoint::new(10, 11), false);
        let mut processor = NodeProcessor::new(DoorSolidMethod::Dynamic);
        processor.rebuild(&map, 0.5);

        let edges = processor.cached_edges(NodePoint::new(10, 10));
        assert!(edges.is_set(0) && edges.dynamic_is_set(0));
        // An open door still counts so it can close later.
        assert!(edges.is_set(1) && edges.dynamic_is_set(1));
        assert!(!edges.dynamic_is_set(2));
    }

    #[test]
    fn closed_door_also_closes_dependent_diagonals() {
        let mut map = ArenaMap::new();
        let from = NodePoint::new(10, 10);
        map.set_door(NodePoint::new(11, 10), true);
        let mut processor = NodeProcessor::new(DoorSolidMethod::Dynamic);
        processor.rebuild(&map, 0.5);

        let (east, south, north_east, south_east) = (3, 1, 5, 7);
        let edges = processor.find_edges(&map, from);
        assert!(!edges.is_set(east));
        assert!(edges.is_set(south));
        assert!(!edges.is_set(north_east));
        assert!(!edges.is_set(south_east));

        processor.set_door_method(DoorSolidMethod::AlwaysSolid);
        let edges = processor.find_edges(&map, from);
        assert!(!edges.is_set(north_east) && !edges.is_set(south_east));

        processor.set_door_method(DoorSolidMethod::AlwaysOpen);
        let edges = processor.find_edges(&map, from);
        assert!(edges.is_set(east) && edges.is_set(south_east));
    }

    #[test]
    fn wide_footprint_cannot_enter_one_tile_gap() {
        let mut map = ArenaMap::new();
        // Vertical wall at x = 20 with a one tile gap at y = 20.
        map.fill(NodePoint::new(20, 0), NodePoint::new(20, 40), tiles::WALL_FIRST);
        map.set_tile(NodePoint::new(20, 20), tiles::EMPTY);

        let mut processor = NodeProcessor::new(DoorSolidMethod::Dynamic);
        processor.rebuild(&map, 0.5);
        assert!(processor.cached_edges(NodePoint::new(19, 20)).is_set(3));

        processor.rebuild(&map, 1.0);
        assert!(!processor.cached_edges(NodePoint::new(19, 20)).is_set(3));
        assert!(processor.cached_edges(NodePoint::new(18, 20)).is_set(3));
    }

    #[test]
    fn patch_tracks_brick_placement() {
        let mut map = ArenaMap::new();
        let mut processor = NodeProcessor::new(DoorSolidMethod::Dynamic);
        processor.rebuild(&map, 0.5);

        let brick = NodePoint::new(50, 50);
        map.place_brick(brick);
        let patched = processor.patch(&map, brick);
        assert!(patched > 0 && patched <= 25);
        assert!(!processor.is_traversable(brick));
        assert!(!processor.cached_edges(NodePoint::new(49, 50)).is_set(3));

        map.clear_brick(brick);
        processor.patch(&map, brick);
        assert!(processor.is_traversable(brick));
        assert!(processor.cached_edges(NodePoint::new(49, 50)).is_set(3));
    }
}
