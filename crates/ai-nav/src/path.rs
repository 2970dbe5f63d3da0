use crate::Vec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Ordered world-space waypoints from start to goal.
///
/// An empty path means no route. Paths are replaced wholesale on replan.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Path {
    points: Vec<Vec2>,
}

impl Path {
    pub fn new(points: Vec<Vec2>) -> Self {
        Self { points }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Number of moves between consecutive waypoints.
    pub fn step_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    pub fn first(&self) -> Option<Vec2> {
        self.points.first().copied()
    }

    pub fn last(&self) -> Option<Vec2> {
        self.points.last().copied()
    }

    pub fn total_length(&self) -> f32 {
        self.points.windows(2).map(|w| w[0].distance(w[1])).sum()
    }

    /// Index of the next waypoint to head for from `position`.
    ///
    /// Progress is taken from the closest waypoint, so points already passed
    /// are never steered back to. `None` once the closest waypoint and every
    /// one after it lie within `arrival`.
    pub fn next_index(&self, position: Vec2, arrival: f32) -> Option<usize> {
        let closest = self
            .points
            .iter()
            .enumerate()
            .min_by(|a, b| a.1.distance(position).total_cmp(&b.1.distance(position)))?
            .0;
        self.points[closest..]
            .iter()
            .position(|p| p.distance(position) > arrival)
            .map(|i| closest + i)
    }
}
