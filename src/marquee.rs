//! Rubber-band rectangle for selecting several nodes at once.

use log::trace;

use crate::geometry::{Point, Rect};
use crate::hit_test::nodes_in_selection_box;
use crate::node::{Diagram, NodeId};

/// A transient selection rectangle, active between [`Marquee::start`] and
/// [`Marquee::stop`].
///
/// The set of nodes under the marquee is recomputed from scratch on every
/// [`Marquee::move_to`]. After `stop` the last set stays available until the
/// next `start`.
#[derive(Debug, Clone, Default)]
pub struct Marquee {
    origin: Point,
    current_rect: Option<Rect>,
    elements: Vec<NodeId>,
}

impl Marquee {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a new marquee at `(x, y)`.
    pub fn start(&mut self, x: i32, y: i32) {
        self.origin = Point::new(x, y);
        self.current_rect = Some(Rect::new(x, y, 0, 0));
        self.elements.clear();
    }

    /// Stretch the marquee to `(drag_x, drag_y)` and recompute which nodes
    /// it intersects.
    pub fn move_to(&mut self, drag_x: i32, drag_y: i32, diagram: &Diagram) {
        let rect = Rect::from_corners(self.origin, Point::new(drag_x, drag_y));
        self.current_rect = Some(rect);
        self.elements = nodes_in_selection_box(&rect, diagram.nodes());
        trace!(rect:? = rect, hits = self.elements.len(); "Marquee moved");
    }

    /// Deactivate the marquee and return the nodes it last covered.
    pub fn stop(&mut self) -> &[NodeId] {
        self.current_rect = None;
        &self.elements
    }

    /// Nodes under the marquee as of the last move.
    pub fn elements(&self) -> &[NodeId] {
        &self.elements
    }

    pub fn is_active(&self) -> bool {
        self.current_rect.is_some()
    }

    /// The current rectangle, or `None` when inactive.
    pub fn rect(&self) -> Option<Rect> {
        self.current_rect
    }

    pub fn origin(&self) -> Point {
        self.origin
    }
}
