//! Diagram nodes and the node collection they live in.
//!
//! The external diagram model owns node creation and removal. The engine only
//! touches position, size and the `selected`/`focused`/`dragging`/`resizing`
//! flags.

use crate::geometry::{Point, Rect};
use crate::hit_test::NodeGeometry;

/// Opaque handle identifying a node by identity.
///
/// Two nodes with the same geometry are still distinct: membership in the
/// selection is always keyed by `NodeId`, never by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Index of the node in render order.
    pub fn index(self) -> usize {
        self.0
    }

    /// Id as published to Slint models.
    pub fn model_id(self) -> i32 {
        i32::try_from(self.0).unwrap_or(i32::MAX)
    }

    /// Inverse of [`NodeId::model_id`]. Negative ids map to `None`.
    pub fn from_model_id(id: i32) -> Option<Self> {
        usize::try_from(id).ok().map(NodeId)
    }
}

/// A positioned, sized, selectable box on the diagram canvas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramNode {
    id: NodeId,
    x: i32,
    y: i32,
    width: i32,
    height: i32,
    selected: bool,
    focused: bool,
    dragging: bool,
    resizing: bool,
}

impl DiagramNode {
    fn new(id: NodeId, rect: Rect) -> Self {
        Self {
            id,
            x: rect.x,
            y: rect.y,
            width: rect.width.max(1),
            height: rect.height.max(1),
            selected: false,
            focused: false,
            dragging: false,
            resizing: false,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn is_resizing(&self) -> bool {
        self.resizing
    }

    /// Bounding rectangle `[x, x + width) × [y, y + height)`.
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn center(&self) -> Point {
        self.bounds().center()
    }

    pub fn set_position(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;
    }

    /// Set the size. Extents below 1 are raised to 1.
    pub fn set_size(&mut self, width: i32, height: i32) {
        self.width = width.max(1);
        self.height = height.max(1);
    }

    /// True when `point` lies within the node's bounds.
    pub fn collides(&self, point: Point) -> bool {
        self.bounds().contains(point)
    }

    /// The resize handle: a square of side `handle_size` anchored at the
    /// bottom-right corner, never larger than the node itself.
    pub fn handle_rect(&self, handle_size: i32) -> Rect {
        let w = handle_size.clamp(1, self.width);
        let h = handle_size.clamp(1, self.height);
        Rect::new(self.x + self.width - w, self.y + self.height - h, w, h)
    }

    /// True when `point` falls on the resize handle.
    pub fn is_handle(&self, point: Point, handle_size: i32) -> bool {
        self.handle_rect(handle_size).contains(point)
    }

    pub(crate) fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    pub(crate) fn set_dragging(&mut self, dragging: bool) {
        self.dragging = dragging;
    }

    pub(crate) fn set_resizing(&mut self, resizing: bool) {
        self.resizing = resizing;
    }
}

impl NodeGeometry for DiagramNode {
    fn id(&self) -> NodeId {
        self.id
    }

    fn rect(&self) -> Rect {
        self.bounds()
    }
}

impl NodeGeometry for &DiagramNode {
    fn id(&self) -> NodeId {
        self.id
    }

    fn rect(&self) -> Rect {
        self.bounds()
    }
}

/// The diagram's node collection, in render order.
///
/// Later nodes are drawn on top of earlier ones. At most one node is focused
/// at any time.
#[derive(Debug, Clone, Default)]
pub struct Diagram {
    nodes: Vec<DiagramNode>,
    focused: Option<NodeId>,
}

impl Diagram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node on top of all existing ones.
    pub fn add_node(&mut self, x: i32, y: i32, width: i32, height: i32) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(DiagramNode::new(id, Rect::new(x, y, width, height)));
        id
    }

    /// Add a node that is already flagged as selected, e.g. restored from a
    /// saved diagram. Pair with [`crate::SelectionSet::from_diagram`].
    pub fn add_selected_node(&mut self, x: i32, y: i32, width: i32, height: i32) -> NodeId {
        let id = self.add_node(x, y, width, height);
        self.nodes[id.0].selected = true;
        id
    }

    pub fn node(&self, id: NodeId) -> Option<&DiagramNode> {
        self.nodes.get(id.0)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut DiagramNode> {
        self.nodes.get_mut(id.0)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        id.0 < self.nodes.len()
    }

    /// Nodes in render order.
    pub fn nodes(&self) -> impl Iterator<Item = &DiagramNode> + '_ {
        self.nodes.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().map(|n| n.id)
    }

    /// The first node in render order, if any.
    pub fn first(&self) -> Option<NodeId> {
        self.nodes.first().map(|n| n.id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    /// Move focus to `id`, or drop it with `None`.
    ///
    /// Unknown ids drop focus as well; the previously focused node always
    /// loses its flag first.
    pub fn set_focus(&mut self, id: Option<NodeId>) {
        if let Some(prev) = self.focused.take() {
            if let Some(node) = self.nodes.get_mut(prev.0) {
                node.focused = false;
            }
        }
        if let Some(node) = id.and_then(|id| self.nodes.get_mut(id.0)) {
            node.focused = true;
            self.focused = Some(node.id);
        }
    }
}
