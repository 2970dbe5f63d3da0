#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Cached neighbor connectivity for one cell.
///
/// Bit `i` refers to `CoordOffset::ALL[i]`. `dynamic` is always a subset of
/// `passable` and marks edges whose destination is a door tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EdgeSet {
    passable: u8,
    dynamic: u8,
}

impl EdgeSet {
    pub const fn empty() -> Self {
        Self {
            passable: 0,
            dynamic: 0,
        }
    }

    pub fn is_set(self, index: usize) -> bool {
        index < 8 && self.passable & (1 << index) != 0
    }

    pub fn set(&mut self, index: usize) {
        if index < 8 {
            self.passable |= 1 << index;
        }
    }

    /// Clears the edge and its dynamic marker.
    pub fn erase(&mut self, index: usize) {
        if index < 8 {
            self.passable &= !(1 << index);
            self.dynamic &= !(1 << index);
        }
    }

    pub fn dynamic_is_set(self, index: usize) -> bool {
        index < 8 && self.dynamic & (1 << index) != 0
    }

    /// Marks an already-set edge as door dependent. No-op on unset edges.
    pub fn dynamic_set(&mut self, index: usize) {
        if self.is_set(index) {
            self.dynamic |= 1 << index;
        }
    }

    pub fn passable_bits(self) -> u8 {
        self.passable
    }

    pub fn dynamic_bits(self) -> u8 {
        self.dynamic
    }

    pub fn is_empty(self) -> bool {
        self.passable == 0
    }

    pub fn iter(self) -> impl Iterator<Item = usize> {
        (0..8).filter(move |&i| self.is_set(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dynamic_stays_subset_of_passable() {
        let mut edges = EdgeSet::empty();
        edges.dynamic_set(3);
        assert_eq!(edges.dynamic_bits(), 0);

        edges.set(3);
        edges.dynamic_set(3);
        assert!(edges.dynamic_is_set(3));

        edges.erase(3);
        assert!(!edges.is_set(3));
        assert!(!edges.dynamic_is_set(3));
    }

    #[test]
    fn iter_yields_set_indices_in_order() {
        let mut edges = EdgeSet::empty();
        edges.set(5);
        edges.set(0);
        edges.set(9);
        assert_eq!(edges.iter().collect::<Vec<_>>(), vec![0, 5]);
    }
}
