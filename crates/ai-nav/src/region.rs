use crate::map::footprint_tiles;
use crate::point::{CoordOffset, NodePoint, GRID_CELLS};
use crate::processor::NodeProcessor;
use crate::Vec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Connected-component id of a traversable cell.
///
/// Ids are assigned in cell-index order, so they are stable for a given map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RegionId(pub u32);

const NO_REGION: u32 = u32::MAX;

/// Coarse reachability oracle built from the processor's cached edges.
///
/// Door edges count as open, so `connected` over-approximates: `false` means
/// no search can succeed, `true` only means one might.
pub struct RegionRegistry {
    regions: Vec<u32>,
    /// Union-find over region ids; regions joined by a patch share a root.
    links: Vec<u32>,
    count: u32,
}

impl RegionRegistry {
    /// A registry with no regions; every query is disconnected.
    pub fn empty() -> Self {
        Self {
            regions: Vec::new(),
            links: Vec::new(),
            count: 0,
        }
    }

    pub fn build(processor: &NodeProcessor) -> Self {
        let mut parent: Vec<u32> = (0..GRID_CELLS as u32).collect();

        for index in 0..GRID_CELLS {
            let Some(point) = NodePoint::from_index(index) else {
                continue;
            };
            let edges = processor.cached_edges(point);
            for i in edges.iter() {
                let Some(next) = point.offset(CoordOffset::from_index(i)) else {
                    continue;
                };
                if let Some(next_index) = next.index() {
                    union(&mut parent, index as u32, next_index as u32);
                }
            }
        }

        let mut regions = vec![NO_REGION; GRID_CELLS];
        let mut root_ids = vec![NO_REGION; GRID_CELLS];
        let mut count = 0u32;

        for index in 0..GRID_CELLS {
            let Some(point) = NodePoint::from_index(index) else {
                continue;
            };
            if !processor.is_traversable(point) {
                continue;
            }
            let root = find(&mut parent, index as u32) as usize;
            if root_ids[root] == NO_REGION {
                root_ids[root] = count;
                count += 1;
            }
            regions[index] = root_ids[root];
        }

        tracing::debug!(regions = count, "Built region registry");
        Self {
            regions,
            links: (0..count).collect(),
            count,
        }
    }

    /// Folds a local edge patch around `center` into the registry.
    ///
    /// Cells that became traversable get a region, and regions now linked by
    /// a cached edge are merged. Regions are never split, so a patch that
    /// closes a route leaves `connected` over-approximating. Covers the same
    /// square [`NodeProcessor::patch`] recomputes. Returns the number of
    /// merges.
    pub fn absorb_patch(&mut self, processor: &NodeProcessor, center: NodePoint) -> usize {
        if self.regions.is_empty() || !center.in_bounds() {
            return 0;
        }

        let reach = footprint_tiles(processor.radius()) as i32 + 1;
        let cells = || {
            (-reach..=reach).flat_map(move |dy| {
                (-reach..=reach).filter_map(move |dx| {
                    let x = center.x as i32 + dx;
                    let y = center.y as i32 + dy;
                    if x < 0 || y < 0 {
                        return None;
                    }
                    let cell = NodePoint::new(x as u16, y as u16);
                    cell.in_bounds().then_some(cell)
                })
            })
        };

        for cell in cells() {
            let Some(index) = cell.index() else {
                continue;
            };
            if !processor.is_traversable(cell) {
                self.regions[index] = NO_REGION;
            } else if self.regions[index] == NO_REGION {
                let id = self.links.len() as u32;
                self.links.push(id);
                self.regions[index] = id;
                self.count += 1;
            }
        }

        let mut merged = 0;
        for cell in cells() {
            let Some(index) = cell.index() else {
                continue;
            };
            let from = self.regions[index];
            if from == NO_REGION {
                continue;
            }
            for i in processor.cached_edges(cell).iter() {
                let Some(next_index) = cell
                    .offset(CoordOffset::from_index(i))
                    .and_then(NodePoint::index)
                else {
                    continue;
                };
                let to = self.regions[next_index];
                if to == NO_REGION {
                    continue;
                }
                let (ra, rb) = (find(&mut self.links, from), find(&mut self.links, to));
                if ra != rb {
                    union(&mut self.links, ra, rb);
                    self.count -= 1;
                    merged += 1;
                }
            }
        }

        if merged > 0 {
            tracing::debug!(x = center.x, y = center.y, merged, "Merged regions after patch");
        }
        merged
    }

    /// Number of distinct regions, counting merged ones once.
    pub fn region_count(&self) -> usize {
        self.count as usize
    }

    pub fn region(&self, point: NodePoint) -> Option<RegionId> {
        let id = *self.regions.get(point.index()?)?;
        if id == NO_REGION {
            return None;
        }
        let mut root = id;
        while self.links[root as usize] != root {
            root = self.links[root as usize];
        }
        Some(RegionId(root))
    }

    pub fn connected(&self, a: Vec2, b: Vec2) -> bool {
        let (Some(a), Some(b)) = (NodePoint::from_world(a), NodePoint::from_world(b)) else {
            return false;
        };
        match (self.region(a), self.region(b)) {
            (Some(ra), Some(rb)) => ra == rb,
            _ => false,
        }
    }
}

impl Default for RegionRegistry {
    fn default() -> Self {
        Self::empty()
    }
}

impl core::fmt::Debug for RegionRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RegionRegistry")
            .field("regions", &self.count)
            .finish()
    }
}

fn find(parent: &mut [u32], mut x: u32) -> u32 {
    while parent[x as usize] != x {
        let grand = parent[parent[x as usize] as usize];
        parent[x as usize] = grand;
        x = grand;
    }
    x
}

fn union(parent: &mut [u32], a: u32, b: u32) {
    let ra = find(parent, a);
    let rb = find(parent, b);
    if ra == rb {
        return;
    }
    // Lower index wins so roots do not depend on edge visit order.
    if ra < rb {
        parent[rb as usize] = ra;
    } else {
        parent[ra as usize] = rb;
    }
}
