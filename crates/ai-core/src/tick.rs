use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Game tick on a 31-bit wrapping clock.
///
/// Ticks are only comparable through modular difference: a tick that has
/// wrapped past zero is still "after" one close to the top of the range.
/// Never compare the raw values with `<`/`>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Tick(u32);

impl Tick {
    pub const MASK: u32 = 0x7FFF_FFFF;

    pub const fn new(value: u32) -> Self {
        Self(value & Self::MASK)
    }

    pub const fn value(self) -> u32 {
        self.0
    }

    pub const fn wrapping_add(self, ticks: u32) -> Self {
        Self::new(self.0.wrapping_add(ticks))
    }

    /// Signed distance from `other` to `self` on the wrapping clock.
    pub const fn diff(self, other: Tick) -> i32 {
        ((self.0 << 1).wrapping_sub(other.0 << 1) as i32) >> 1
    }

    pub const fn is_after(self, other: Tick) -> bool {
        self.diff(other) > 0
    }

    pub const fn is_at_or_after(self, other: Tick) -> bool {
        self.diff(other) >= 0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for Tick {
    fn from(value: u32) -> Self {
        Tick::new(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickContext {
    pub tick: Tick,
    pub dt_seconds: f32,
}

impl TickContext {
    pub fn new(tick: Tick, dt_seconds: f32) -> Self {
        Self { tick, dt_seconds }
    }
}
