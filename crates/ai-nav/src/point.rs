use crate::Vec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Side length of the square arena, in tiles.
pub const GRID_SIZE: u16 = 1024;
pub const GRID_CELLS: usize = GRID_SIZE as usize * GRID_SIZE as usize;

/// Integer tile coordinate. Only points inside the arena map to a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NodePoint {
    pub x: u16,
    pub y: u16,
}

impl NodePoint {
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    /// Tile containing `pos`, or `None` outside the arena.
    pub fn from_world(pos: Vec2) -> Option<Self> {
        let x = pos.x.floor();
        let y = pos.y.floor();
        if !(0.0..GRID_SIZE as f32).contains(&x) || !(0.0..GRID_SIZE as f32).contains(&y) {
            return None;
        }
        Some(Self::new(x as u16, y as u16))
    }

    pub fn in_bounds(self) -> bool {
        self.x < GRID_SIZE && self.y < GRID_SIZE
    }

    pub fn index(self) -> Option<usize> {
        if !self.in_bounds() {
            return None;
        }
        Some(self.y as usize * GRID_SIZE as usize + self.x as usize)
    }

    pub fn from_index(index: usize) -> Option<Self> {
        if index >= GRID_CELLS {
            return None;
        }
        let size = GRID_SIZE as usize;
        Some(Self::new((index % size) as u16, (index / size) as u16))
    }

    /// Neighbor in direction `offset`; `None` if it leaves the arena.
    pub fn offset(self, offset: CoordOffset) -> Option<Self> {
        let x = self.x as i32 + offset.x as i32;
        let y = self.y as i32 + offset.y as i32;
        if x < 0 || y < 0 || x >= GRID_SIZE as i32 || y >= GRID_SIZE as i32 {
            return None;
        }
        Some(Self::new(x as u16, y as u16))
    }

    pub fn center(self) -> Vec2 {
        Vec2::new(self.x as f32 + 0.5, self.y as f32 + 0.5)
    }
}

/// One of the eight compass steps. `y` grows southward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CoordOffset {
    pub x: i8,
    pub y: i8,
}

impl CoordOffset {
    pub const NORTH: CoordOffset = CoordOffset { x: 0, y: -1 };
    pub const SOUTH: CoordOffset = CoordOffset { x: 0, y: 1 };
    pub const WEST: CoordOffset = CoordOffset { x: -1, y: 0 };
    pub const EAST: CoordOffset = CoordOffset { x: 1, y: 0 };
    pub const NORTH_WEST: CoordOffset = CoordOffset { x: -1, y: -1 };
    pub const NORTH_EAST: CoordOffset = CoordOffset { x: 1, y: -1 };
    pub const SOUTH_WEST: CoordOffset = CoordOffset { x: -1, y: 1 };
    pub const SOUTH_EAST: CoordOffset = CoordOffset { x: 1, y: 1 };

    /// Edge-bit order. Orthogonals come first so diagonals can check them.
    pub const ALL: [CoordOffset; 8] = [
        Self::NORTH,
        Self::SOUTH,
        Self::WEST,
        Self::EAST,
        Self::NORTH_WEST,
        Self::NORTH_EAST,
        Self::SOUTH_WEST,
        Self::SOUTH_EAST,
    ];

    pub const fn from_index(index: usize) -> CoordOffset {
        Self::ALL[index & 7]
    }

    pub const fn is_diagonal(self) -> bool {
        self.x != 0 && self.y != 0
    }

    /// The two orthogonal edge indices a diagonal edge index depends on.
    pub const fn diagonal_requirements(index: usize) -> Option<(usize, usize)> {
        match index {
            4 => Some((0, 2)),
            5 => Some((0, 3)),
            6 => Some((1, 2)),
            7 => Some((1, 3)),
            _ => None,
        }
    }

    pub fn cost(self) -> f32 {
        if self.is_diagonal() {
            core::f32::consts::SQRT_2
        } else {
            1.0
        }
    }
}
