//! Test harness for a diagram session.
//!
//! Provides a complete setup mirroring how an application wires
//! [`DiagramSession`] to a window, with callback tracking and helper methods
//! for simulating user interactions.

#![allow(dead_code)]

use super::{CallbackTracker, TrackingHandler};
use slint::platform::{Key as SlintKey, PointerEventButton};
use slint::{Model, SharedString};
use slint_diagram_gestures::{
    Diagram, DiagramNode, DiagramSession, EngineConfig, GestureState, Key, KeyModifiers, NodeId,
    Point, PointerModifiers,
};

/// Test harness for a two-node diagram.
///
/// Node A sits at (100, 100), node B at (400, 200); both are 150x100.
pub struct SessionTestHarness {
    pub session: DiagramSession,
    pub tracker: CallbackTracker,
    pub nodes: Vec<NodeId>,
}

impl SessionTestHarness {
    /// Create a new test harness with the default two nodes.
    pub fn new() -> Self {
        Self::with_nodes(vec![(100, 100, 150, 100), (400, 200, 150, 100)])
    }

    /// Create a new test harness with custom node rectangles `(x, y, w, h)`.
    pub fn with_nodes(rects: Vec<(i32, i32, i32, i32)>) -> Self {
        Self::with_config(rects, EngineConfig::default())
    }

    /// Create a new test harness with custom nodes and configuration.
    pub fn with_config(rects: Vec<(i32, i32, i32, i32)>, config: EngineConfig) -> Self {
        let mut diagram = Diagram::new();
        let nodes = rects
            .into_iter()
            .map(|(x, y, w, h)| diagram.add_node(x, y, w, h))
            .collect();

        let session = DiagramSession::new(diagram, config);
        let tracker = CallbackTracker::new();
        session.set_handler(TrackingHandler(tracker.clone()));

        session.subscribe({
            let tracker = tracker.clone();
            move |snapshot| {
                *tracker.selection_changed.borrow_mut() += 1;
                tracker.snapshots.borrow_mut().push(snapshot.model_ids());
            }
        });

        Self { session, tracker, nodes }
    }

    /// Node id by creation index.
    pub fn id(&self, index: usize) -> NodeId {
        self.nodes[index]
    }

    /// A copy of a node's current state.
    pub fn node(&self, index: usize) -> DiagramNode {
        self.session
            .diagram()
            .borrow()
            .node(self.nodes[index])
            .cloned()
            .expect("node exists")
    }

    pub fn position(&self, index: usize) -> (i32, i32) {
        let node = self.node(index);
        (node.x(), node.y())
    }

    pub fn size(&self, index: usize) -> (i32, i32) {
        let node = self.node(index);
        (node.width(), node.height())
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.session.is_selected(self.nodes[index])
    }

    pub fn selected_count(&self) -> usize {
        self.session.selection().len()
    }

    pub fn state(&self) -> GestureState {
        self.session.controller().borrow().state()
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.session.diagram().borrow().focused()
    }

    /// Selected ids as published to the Slint model.
    pub fn model_ids(&self) -> Vec<i32> {
        self.session.selection_model().iter().collect()
    }

    /// Check the two-way invariant between node flags and selection membership.
    pub fn assert_selection_invariant(&self) {
        let diagram = self.session.diagram();
        let diagram = diagram.borrow();
        for node in diagram.nodes() {
            assert_eq!(
                node.is_selected(),
                self.session.is_selected(node.id()),
                "selected flag out of sync for {:?}",
                node.id()
            );
        }
    }

    // === Mouse event helpers ===

    /// Simulate mouse down at the given position.
    pub fn mouse_down(&self, x: i32, y: i32) {
        self.session.press(Point::new(x, y), PointerModifiers::primary());
    }

    /// Simulate mouse down with the multi-select key held.
    pub fn shift_mouse_down(&self, x: i32, y: i32) {
        self.session.press(Point::new(x, y), PointerModifiers::multi_select());
    }

    /// Simulate mouse down with a specific Slint button.
    pub fn mouse_down_button(&self, x: i32, y: i32, button: PointerEventButton) {
        self.session.press(Point::new(x, y), PointerModifiers::from_button(button, false));
    }

    /// Simulate mouse move with a button held.
    pub fn mouse_move(&self, x: i32, y: i32) {
        self.session.drag(Point::new(x, y));
    }

    /// Simulate mouse up at the given position.
    pub fn mouse_up(&self, x: i32, y: i32) {
        self.session.release(Point::new(x, y));
    }

    /// Simulate a complete click (down + up + click) at the given position.
    pub fn click(&self, x: i32, y: i32) {
        self.mouse_down(x, y);
        self.mouse_up(x, y);
        self.session.click(Point::new(x, y), 1, PointerModifiers::primary());
    }

    /// Simulate a double click at the given position.
    pub fn double_click(&self, x: i32, y: i32) {
        self.click(x, y);
        self.mouse_down(x, y);
        self.mouse_up(x, y);
        self.session.click(Point::new(x, y), 2, PointerModifiers::primary());
    }

    /// Simulate a complete drag from start to end.
    pub fn drag(&self, start_x: i32, start_y: i32, end_x: i32, end_y: i32) {
        self.mouse_down(start_x, start_y);
        self.mouse_move(end_x, end_y);
        self.mouse_up(end_x, end_y);
    }

    // === Keyboard event helpers ===

    /// Simulate a key press without modifiers, as Slint would deliver it.
    pub fn key_press(&self, key: SlintKey) {
        let callback = self.session.key_pressed_callback();
        callback(SharedString::from(key), false, false);
    }

    /// Simulate a key press and the release of every modifier.
    pub fn key_tap(&self, key: Key) {
        self.session.key(key, KeyModifiers::none());
        self.session.key_released(KeyModifiers::none());
    }

    /// Simulate a key press with Shift held.
    pub fn shift_key(&self, key: Key) {
        self.session.key(key, KeyModifiers::shift());
    }

    /// Simulate a key press with Control held.
    pub fn control_key(&self, key: Key) {
        self.session.key(key, KeyModifiers::control());
    }

    /// Simulate releasing all modifier keys.
    pub fn release_modifiers(&self) {
        self.session.key_released(KeyModifiers::none());
    }
}

impl Default for SessionTestHarness {
    fn default() -> Self {
        Self::new()
    }
}
