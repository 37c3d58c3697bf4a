//! Common test utilities for integration tests.

#![allow(dead_code)]

pub mod harness;

use slint_diagram_gestures::{GestureHandler, Key, NodeId, Point};
use std::cell::RefCell;
use std::rc::Rc;

/// Tracks callback invocations for testing.
///
/// Each field records calls to the corresponding callback with their arguments.
#[derive(Default, Clone)]
pub struct CallbackTracker {
    /// Count of selection listener calls
    pub selection_changed: Rc<RefCell<usize>>,
    /// Model ids of every delivered snapshot, in order
    pub snapshots: Rc<RefCell<Vec<Vec<i32>>>>,
    /// (node, open_in_new_window)
    pub double_clicked: Rc<RefCell<Vec<(NodeId, bool)>>>,
    /// Single-click targets
    pub clicked: Rc<RefCell<Vec<Option<NodeId>>>>,
    /// (node, key)
    pub key_forwarded: Rc<RefCell<Vec<(NodeId, Key)>>>,
    /// (node, position)
    pub popup_menu: Rc<RefCell<Vec<(Option<NodeId>, Point)>>>,
}

impl CallbackTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all recorded callbacks.
    pub fn clear(&self) {
        *self.selection_changed.borrow_mut() = 0;
        self.snapshots.borrow_mut().clear();
        self.double_clicked.borrow_mut().clear();
        self.clicked.borrow_mut().clear();
        self.key_forwarded.borrow_mut().clear();
        self.popup_menu.borrow_mut().clear();
    }
}

/// Handler that records everything into a [`CallbackTracker`].
pub struct TrackingHandler(pub CallbackTracker);

impl GestureHandler for TrackingHandler {
    fn node_double_clicked(&mut self, node: NodeId, open_in_new_window: bool) {
        self.0.double_clicked.borrow_mut().push((node, open_in_new_window));
    }

    fn node_clicked(&mut self, node: Option<NodeId>, _at: Point) {
        self.0.clicked.borrow_mut().push(node);
    }

    fn key_forwarded(&mut self, node: NodeId, key: Key) {
        self.0.key_forwarded.borrow_mut().push((node, key));
    }

    fn popup_menu(&mut self, node: Option<NodeId>, at: Point) {
        self.0.popup_menu.borrow_mut().push((node, at));
    }
}
