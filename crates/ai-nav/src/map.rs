//! Map collaborator: tile lookups, solidity tests and occupancy queries.

use crate::point::{NodePoint, GRID_CELLS, GRID_SIZE};

pub type TileId = u8;

pub mod tiles {
    use super::TileId;

    pub const EMPTY: TileId = 0;
    pub const WALL_FIRST: TileId = 1;
    pub const WALL_LAST: TileId = 161;
    pub const DOOR_FIRST: TileId = 162;
    pub const DOOR_LAST: TileId = 169;
    /// Written in place of a door tile while the door is open.
    pub const DOOR_OPEN: TileId = DOOR_LAST + 1;
    pub const SAFE: TileId = 171;
    pub const BRICK: TileId = 250;

    pub const fn is_door(id: TileId) -> bool {
        id >= DOOR_FIRST && id <= DOOR_LAST
    }

    /// Door tiles plus the open-door marker: any tile whose solidity can
    /// change when doors toggle.
    pub const fn is_dynamic(id: TileId) -> bool {
        id >= DOOR_FIRST && id <= DOOR_OPEN
    }

    pub const fn is_solid(id: TileId) -> bool {
        (id >= WALL_FIRST && id <= DOOR_LAST) || id == BRICK
    }

    pub const fn is_solid_empty_doors(id: TileId) -> bool {
        is_solid(id) && !is_door(id)
    }
}

/// Inclusive tile rectangle a footprint of some radius can fully occupy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OccupiedRect {
    pub start: NodePoint,
    pub end: NodePoint,
}

impl OccupiedRect {
    pub fn contains(&self, p: NodePoint) -> bool {
        p.x >= self.start.x && p.x <= self.end.x && p.y >= self.start.y && p.y <= self.end.y
    }
}

/// Widest footprint, in tiles, whose candidate rects always fit in an
/// [`OccupiedScratch`]. Radii up to `MAX_FOOTPRINT / 2` tiles are supported.
pub const MAX_FOOTPRINT: u16 = 16;

/// Bounded rect buffer reused across edge calculations.
///
/// Sized for every candidate rect of a [`MAX_FOOTPRINT`] footprint. Pushes
/// beyond capacity are dropped and recorded in `overflowed`; the buffer never
/// grows.
#[derive(Debug, Clone)]
pub struct OccupiedScratch {
    rects: [OccupiedRect; Self::CAPACITY],
    len: usize,
    overflowed: bool,
}

impl OccupiedScratch {
    pub const CAPACITY: usize = (MAX_FOOTPRINT as usize + 2) * (MAX_FOOTPRINT as usize + 2);

    pub fn new() -> Self {
        let zero = OccupiedRect {
            start: NodePoint::new(0, 0),
            end: NodePoint::new(0, 0),
        };
        Self {
            rects: [zero; Self::CAPACITY],
            len: 0,
            overflowed: false,
        }
    }

    pub fn clear(&mut self) {
        self.len = 0;
        self.overflowed = false;
    }

    pub fn push(&mut self, rect: OccupiedRect) -> bool {
        if self.len >= Self::CAPACITY {
            self.overflowed = true;
            return false;
        }
        self.rects[self.len] = rect;
        self.len += 1;
        true
    }

    pub fn as_slice(&self) -> &[OccupiedRect] {
        &self.rects[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn overflowed(&self) -> bool {
        self.overflowed
    }

    pub fn contains(&self, p: NodePoint) -> bool {
        self.as_slice().iter().any(|r| r.contains(p))
    }
}

impl Default for OccupiedScratch {
    fn default() -> Self {
        Self::new()
    }
}

/// Footprint side length, in tiles, for a collision radius.
pub fn footprint_tiles(radius: f32) -> u16 {
    ((radius * 2.0).ceil() as u16).max(1)
}

pub trait TileMap {
    /// Tile id at `p`. Only called with in-bounds points.
    fn tile_id(&self, p: NodePoint) -> TileId;

    /// Solidity with doors blocking. Out of bounds is solid.
    fn is_solid(&self, p: NodePoint) -> bool {
        !p.in_bounds() || tiles::is_solid(self.tile_id(p))
    }

    /// Solidity with doors treated as open. Out of bounds is solid.
    fn is_solid_empty_doors(&self, p: NodePoint) -> bool {
        !p.in_bounds() || tiles::is_solid_empty_doors(self.tile_id(p))
    }

    /// Collects every footprint-sized block of open tiles that could contain
    /// a step from `center` to one of its neighbors.
    fn occupied_rects(&self, center: NodePoint, radius: f32, out: &mut OccupiedScratch) {
        out.clear();
        let d = footprint_tiles(radius) as i32;
        let (cx, cy) = (center.x as i32, center.y as i32);
        let max_start = GRID_SIZE as i32 - d;

        for sy in (cy - d).max(0)..=(cy + 1).min(max_start) {
            for sx in (cx - d).max(0)..=(cx + 1).min(max_start) {
                let open = (sy..sy + d).all(|y| {
                    (sx..sx + d).all(|x| !self.is_solid_empty_doors(NodePoint::new(x as u16, y as u16)))
                });
                if !open {
                    continue;
                }
                let rect = OccupiedRect {
                    start: NodePoint::new(sx as u16, sy as u16),
                    end: NodePoint::new((sx + d - 1) as u16, (sy + d - 1) as u16),
                };
                if !out.push(rect) {
                    return;
                }
            }
        }
    }
}

/// In-memory arena map. Every tile starts empty.
#[derive(Clone)]
pub struct ArenaMap {
    tiles: Vec<TileId>,
}

impl ArenaMap {
    pub fn new() -> Self {
        Self {
            tiles: vec![tiles::EMPTY; GRID_CELLS],
        }
    }

    pub fn set_tile(&mut self, p: NodePoint, id: TileId) {
        if let Some(idx) = p.index() {
            self.tiles[idx] = id;
        }
    }

    /// Fills the inclusive rectangle `a..=b` with `id`.
    pub fn fill(&mut self, a: NodePoint, b: NodePoint, id: TileId) {
        for y in a.y.min(b.y)..=a.y.max(b.y) {
            for x in a.x.min(b.x)..=a.x.max(b.x) {
                self.set_tile(NodePoint::new(x, y), id);
            }
        }
    }

    /// Draws a one-tile-thick wall ring around the inclusive rectangle.
    pub fn outline(&mut self, a: NodePoint, b: NodePoint, id: TileId) {
        let (x0, x1) = (a.x.min(b.x), a.x.max(b.x));
        let (y0, y1) = (a.y.min(b.y), a.y.max(b.y));
        self.fill(NodePoint::new(x0, y0), NodePoint::new(x1, y0), id);
        self.fill(NodePoint::new(x0, y1), NodePoint::new(x1, y1), id);
        self.fill(NodePoint::new(x0, y0), NodePoint::new(x0, y1), id);
        self.fill(NodePoint::new(x1, y0), NodePoint::new(x1, y1), id);
    }

    pub fn set_door(&mut self, p: NodePoint, closed: bool) {
        let id = if closed {
            tiles::DOOR_FIRST
        } else {
            tiles::DOOR_OPEN
        };
        self.set_tile(p, id);
    }

    pub fn place_brick(&mut self, p: NodePoint) {
        self.set_tile(p, tiles::BRICK);
    }

    pub fn clear_brick(&mut self, p: NodePoint) {
        if self.tile_at(p) == Some(tiles::BRICK) {
            self.set_tile(p, tiles::EMPTY);
        }
    }

    pub fn tile_at(&self, p: NodePoint) -> Option<TileId> {
        p.index().map(|idx| self.tiles[idx])
    }
}

impl Default for ArenaMap {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for ArenaMap {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let solid = self.tiles.iter().filter(|&&t| tiles::is_solid(t)).count();
        f.debug_struct("ArenaMap").field("solid_tiles", &solid).finish()
    }
}

impl TileMap for ArenaMap {
    fn tile_id(&self, p: NodePoint) -> TileId {
        self.tile_at(p).unwrap_or(tiles::WALL_FIRST)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doors_block_only_the_strict_check() {
        let mut map = ArenaMap::new();
        let p = NodePoint::new(5, 5);
        map.set_door(p, true);
        assert!(map.is_solid(p));
        assert!(!map.is_solid_empty_doors(p));

        map.set_door(p, false);
        assert!(!map.is_solid(p));
        assert!(tiles::is_dynamic(map.tile_id(p)));
    }

    #[test]
    fn out_of_bounds_is_solid() {
        let map = ArenaMap::new();
        assert!(map.is_solid(NodePoint::new(1024, 0)));
        assert!(map.is_solid_empty_doors(NodePoint::new(0, 2000)));
    }

    #[test]
    fn occupied_rects_skip_blocks_touching_walls() {
        let mut map = ArenaMap::new();
        map.set_tile(NodePoint::new(11, 10), tiles::WALL_FIRST);

        let mut scratch = OccupiedScratch::new();
        map.occupied_rects(NodePoint::new(10, 10), 1.0, &mut scratch);

        assert!(!scratch.is_empty());
        assert!(!scratch.contains(NodePoint::new(11, 10)));
        assert!(scratch.contains(NodePoint::new(9, 10)));
        assert!(scratch
            .as_slice()
            .iter()
            .all(|r| !r.contains(NodePoint::new(11, 10))));
    }

    #[test]
    fn scratch_clamps_at_capacity() {
        let mut scratch = OccupiedScratch::new();
        let rect = OccupiedRect {
            start: NodePoint::new(0, 0),
            end: NodePoint::new(1, 1),
        };
        for _ in 0..OccupiedScratch::CAPACITY {
            assert!(scratch.push(rect));
        }
        assert!(!scratch.push(rect));
        assert!(scratch.overflowed());
        assert_eq!(scratch.len(), OccupiedScratch::CAPACITY);

        scratch.clear();
        assert!(scratch.is_empty());
        assert!(!scratch.overflowed());
    }

    #[test]
    fn widest_footprint_fits_every_candidate_rect() {
        let map = ArenaMap::new();
        let mut scratch = OccupiedScratch::new();

        map.occupied_rects(NodePoint::new(100, 100), 3.5, &mut scratch);
        assert_eq!(scratch.len(), 81);
        assert!(!scratch.overflowed());

        let radius = f32::from(MAX_FOOTPRINT) / 2.0;
        map.occupied_rects(NodePoint::new(100, 100), radius, &mut scratch);
        assert_eq!(scratch.len(), OccupiedScratch::CAPACITY);
        assert!(!scratch.overflowed());
        assert!(scratch.contains(NodePoint::new(101, 100)));
    }
}
