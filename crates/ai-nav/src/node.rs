/// Search and traversability record for one cell.
///
/// `g`, `f`, `parent` and the `OPENSET`/`TOUCHED` flags belong to the search
/// that stamped `generation`; a node whose stamp is stale is re-initialized by
/// `NodeProcessor::get_node` before use.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node {
    pub flags: u8,
    pub g: f32,
    pub f: f32,
    pub parent: u32,
    pub(crate) generation: u32,
}

impl Node {
    pub const TRAVERSABLE: u8 = 1 << 0;
    pub const OPENSET: u8 = 1 << 1;
    pub const TOUCHED: u8 = 1 << 2;

    /// Flags that survive re-initialization.
    pub const PERSISTENT: u8 = Self::TRAVERSABLE;

    pub const NO_PARENT: u32 = u32::MAX;

    pub fn is_traversable(&self) -> bool {
        self.flags & Self::TRAVERSABLE != 0
    }

    pub fn is_open(&self) -> bool {
        self.flags & Self::OPENSET != 0
    }

    pub fn is_touched(&self) -> bool {
        self.flags & Self::TOUCHED != 0
    }

    /// Touched but no longer open: expanded by the current search.
    pub fn is_closed(&self) -> bool {
        self.is_touched() && !self.is_open()
    }

    pub fn parent_index(&self) -> Option<usize> {
        (self.parent != Self::NO_PARENT).then_some(self.parent as usize)
    }

    pub(crate) fn reinitialize(&mut self, generation: u32) {
        self.flags &= Self::PERSISTENT;
        self.g = 0.0;
        self.f = 0.0;
        self.parent = Self::NO_PARENT;
        self.generation = generation;
    }
}

impl Default for Node {
    fn default() -> Self {
        Self {
            flags: 0,
            g: 0.0,
            f: 0.0,
            parent: Self::NO_PARENT,
            generation: 0,
        }
    }
}
