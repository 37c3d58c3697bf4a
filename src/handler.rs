use crate::geometry::Point;
use crate::input::Key;
use crate::node::NodeId;

/// Receives the gestures the engine does not interpret itself.
///
/// The application decides what opening, editing or a context menu means for
/// its nodes. Every method defaults to doing nothing.
///
/// # Example
///
/// ```ignore
/// struct Opener;
///
/// impl GestureHandler for Opener {
///     fn node_double_clicked(&mut self, node: NodeId, open_in_new_window: bool) {
///         open_editor(node, open_in_new_window);
///     }
/// }
/// ```
pub trait GestureHandler {
    /// A double-click was broadcast to a selected node.
    fn node_double_clicked(&mut self, _node: NodeId, _open_in_new_window: bool) {}

    /// A single click landed on `node`, or on empty canvas when `None`.
    fn node_clicked(&mut self, _node: Option<NodeId>, _at: Point) {}

    /// A key the engine does not handle, forwarded to a selected node.
    fn key_forwarded(&mut self, _node: NodeId, _key: Key) {}

    /// Post a context menu for `node`, or for the canvas when `None`.
    fn popup_menu(&mut self, _node: Option<NodeId>, _at: Point) {}
}

/// Handler that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopHandler;

impl GestureHandler for NoopHandler {}
