//! Keyboard navigation between diagram nodes.

use crate::node::{Diagram, NodeId};

/// A navigation direction, in screen coordinates (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Whether the offset `(dx, dy)` from the current center falls into this
    /// direction's 90° sector, bounded by the two diagonals.
    ///
    /// Offsets exactly on a diagonal satisfy two neighbouring directions.
    pub fn contains_offset(self, dx: i64, dy: i64) -> bool {
        match self {
            Direction::Left => dy >= dx && dy <= -dx,
            Direction::Right => dy <= dx && dy >= -dx,
            Direction::Up => dy <= dx && dy <= -dx,
            Direction::Down => dy >= dx && dy >= -dx,
        }
    }

    /// Unit step for keyboard moves and resizes.
    pub fn unit(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// Strategy for picking the next node when navigating with arrow keys.
pub trait TraverseStrategy {
    /// Find the node to move to from `current`. Returns `current` when there is
    /// nothing in that direction.
    fn find_next(&self, diagram: &Diagram, current: NodeId, direction: Direction) -> NodeId;
}

/// Picks the node whose center is closest to the current node's center among
/// all nodes lying in the requested direction.
///
/// Ties keep the candidate seen first in render order.
#[derive(Debug, Clone, Copy, Default)]
pub struct NearestInDirection;

impl TraverseStrategy for NearestInDirection {
    fn find_next(&self, diagram: &Diagram, current: NodeId, direction: Direction) -> NodeId {
        let Some(origin) = diagram.node(current).map(|n| n.center()) else {
            return current;
        };

        let mut best: Option<(NodeId, i64)> = None;
        for node in diagram.nodes() {
            if node.id() == current {
                continue;
            }
            let center = node.center();
            let dx = i64::from(center.x) - i64::from(origin.x);
            let dy = i64::from(center.y) - i64::from(origin.y);
            if !direction.contains_offset(dx, dy) {
                continue;
            }
            // Squared distance orders candidates exactly like the Euclidean one.
            let dist = dx * dx + dy * dy;
            match best {
                Some((_, best_dist)) if dist >= best_dist => {}
                _ => best = Some((node.id(), dist)),
            }
        }

        best.map_or(current, |(id, _)| id)
    }
}
