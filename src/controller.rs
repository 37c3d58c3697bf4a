//! The gesture state machine.
//!
//! [`GestureController`] interprets press/drag/release/click/key events and
//! drives the [`SelectionSet`], the [`Marquee`] and node geometry. It owns the
//! selection and the marquee; the node collection is passed in with every
//! event because the diagram model may change between calls.
//!
//! # Example
//!
//! ```
//! use slint_diagram_gestures::{Diagram, EngineConfig, GestureController, Point, PointerModifiers};
//!
//! let mut diagram = Diagram::new();
//! let a = diagram.add_node(10, 10, 80, 50);
//! let b = diagram.add_node(200, 10, 80, 50);
//!
//! let mut ctrl = GestureController::new(EngineConfig::default());
//! ctrl.press(&mut diagram, Point::new(0, 0), PointerModifiers::primary());
//! ctrl.drag(&mut diagram, Point::new(300, 100));
//! ctrl.release(&mut diagram, Point::new(300, 100));
//!
//! assert!(ctrl.selection().contains(a));
//! assert!(ctrl.selection().contains(b));
//! ```

use log::{debug, trace};

use crate::config::EngineConfig;
use crate::geometry::{Point, Rect};
use crate::handler::{GestureHandler, NoopHandler};
use crate::hit_test::find_node_at;
use crate::input::{Key, KeyModifiers, PointerModifiers};
use crate::marquee::Marquee;
use crate::node::{Diagram, NodeId};
use crate::selection::SelectionSet;
use crate::traverse::{Direction, NearestInDirection, TraverseStrategy};

/// The gesture currently in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GestureState {
    #[default]
    Idle,
    /// Pointer drag on empty canvas stretching the marquee.
    MarqueeActive,
    /// Pointer drag moving the selection.
    Dragging,
    /// Pointer drag on a resize handle.
    Resizing,
    /// Shift+arrow keys moving the selection.
    KeyMoving,
    /// Ctrl+arrow keys resizing the selection.
    KeyResizing,
}

impl GestureState {
    /// True while a pointer gesture owns the controller.
    pub fn is_pointer_gesture(self) -> bool {
        matches!(
            self,
            GestureState::MarqueeActive | GestureState::Dragging | GestureState::Resizing
        )
    }
}

/// Geometry of a node when the current gesture began.
#[derive(Debug, Clone, Copy)]
struct Anchor {
    id: NodeId,
    rect: Rect,
}

/// Turns input gestures into selection changes, marquee updates and node
/// moves/resizes.
pub struct GestureController {
    config: EngineConfig,
    selection: SelectionSet,
    marquee: Marquee,
    state: GestureState,
    press_point: Point,
    anchors: Vec<Anchor>,
    key_delta: (i32, i32),
    strategy: Box<dyn TraverseStrategy>,
    handler: Box<dyn GestureHandler>,
}

impl Default for GestureController {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl GestureController {
    /// Create a controller with an empty selection.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            selection: SelectionSet::new(),
            marquee: Marquee::new(),
            state: GestureState::Idle,
            press_point: Point::default(),
            anchors: Vec::new(),
            key_delta: (0, 0),
            strategy: Box::new(NearestInDirection),
            handler: Box::new(NoopHandler),
        }
    }

    /// Create a controller whose selection adopts the nodes already flagged
    /// as selected in `diagram`.
    pub fn for_diagram(diagram: &Diagram, config: EngineConfig) -> Self {
        let mut ctrl = Self::new(config);
        ctrl.selection = SelectionSet::from_diagram(diagram);
        ctrl
    }

    /// Replace the navigation strategy (default: [`NearestInDirection`]).
    pub fn with_strategy(mut self, strategy: impl TraverseStrategy + 'static) -> Self {
        self.strategy = Box::new(strategy);
        self
    }

    /// Replace the handler receiving clicks, menus and forwarded keys.
    pub fn with_handler(mut self, handler: impl GestureHandler + 'static) -> Self {
        self.handler = Box::new(handler);
        self
    }

    pub fn set_handler(&mut self, handler: impl GestureHandler + 'static) {
        self.handler = Box::new(handler);
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    /// Mutable access, e.g. to subscribe listeners or select programmatically.
    pub fn selection_mut(&mut self) -> &mut SelectionSet {
        &mut self.selection
    }

    pub fn marquee(&self) -> &Marquee {
        &self.marquee
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    // === Pointer events ===

    /// A pointer button went down.
    pub fn press(&mut self, diagram: &mut Diagram, point: Point, modifiers: PointerModifiers) {
        if self.state != GestureState::Idle {
            // The release of the previous gesture never arrived.
            self.end_gesture(diagram);
        }

        let hit = find_node_at(point, diagram.nodes());
        debug!(x = point.x, y = point.y, node:? = hit; "Pointer pressed");

        if modifiers.context_menu_trigger {
            self.popup_at(diagram, hit, point, modifiers);
            return;
        }

        let Some(id) = hit else {
            if !modifiers.multi_select {
                self.selection.clear(diagram);
            }
            if modifiers.primary_button {
                self.marquee.start(point.x, point.y);
                self.state = GestureState::MarqueeActive;
                debug!("Marquee started");
            }
            return;
        };

        self.toggle(diagram, id, modifiers.multi_select);
        if !modifiers.is_button_one() {
            return;
        }

        self.press_point = point;
        let handle_size = self.config.handle_size;
        let on_handle = diagram
            .node(id)
            .is_some_and(|n| n.is_selected() && n.is_handle(point, handle_size));

        if on_handle {
            self.selection.select_only(diagram, id);
            self.anchor_nodes(diagram, [id]);
            if let Some(node) = diagram.node_mut(id) {
                node.set_resizing(true);
            }
            self.state = GestureState::Resizing;
            debug!(node:? = id; "Resize started");
        } else {
            let ids: Vec<NodeId> = self.selection.iter().collect();
            self.anchor_nodes(diagram, ids);
            for anchor in &self.anchors {
                if let Some(node) = diagram.node_mut(anchor.id) {
                    node.set_dragging(true);
                }
            }
            self.state = GestureState::Dragging;
            debug!(nodes = self.anchors.len(); "Drag started");
        }
    }

    /// The pointer moved with a button held.
    pub fn drag(&mut self, diagram: &mut Diagram, point: Point) {
        match self.state {
            GestureState::MarqueeActive => self.marquee.move_to(point.x, point.y, diagram),
            GestureState::Dragging => {
                let (dx, dy) = point.offset_from(self.press_point);
                let (dx, dy) = (self.config.snap(dx), self.config.snap(dy));
                self.move_anchored(diagram, dx, dy);
            }
            GestureState::Resizing => {
                let (dx, dy) = point.offset_from(self.press_point);
                let (dx, dy) = (self.config.snap(dx), self.config.snap(dy));
                self.resize_anchored(diagram, dx, dy);
            }
            _ => {}
        }
    }

    /// The pointer button went up.
    pub fn release(&mut self, diagram: &mut Diagram, _point: Point) {
        match self.state {
            GestureState::MarqueeActive => {
                let hits = self.marquee.stop().to_vec();
                debug!(hits = hits.len(); "Marquee released");
                self.selection.add_all(diagram, hits);
                self.state = GestureState::Idle;
            }
            GestureState::Dragging | GestureState::Resizing => self.end_gesture(diagram),
            _ => return,
        }
        self.restore_focus(diagram);
    }

    /// A click completed. Double-clicks on a selected node are broadcast to
    /// the whole selection; single clicks go to the handler.
    pub fn click(
        &mut self,
        diagram: &mut Diagram,
        point: Point,
        click_count: u32,
        modifiers: PointerModifiers,
    ) {
        let hit = find_node_at(point, diagram.nodes());
        if click_count > 1 {
            if modifiers.is_button_one() && hit.is_some_and(|id| self.selection.contains(id)) {
                debug!(nodes = self.selection.len(); "Double-click broadcast");
                self.selection
                    .double_click(modifiers.open_in_new_window, self.handler.as_mut());
            }
        } else if click_count == 1 {
            self.handler.node_clicked(hit, point);
        }
    }

    // === Keyboard events ===

    /// A key was pressed. Ignored while a pointer gesture is in progress.
    pub fn key(&mut self, diagram: &mut Diagram, key: Key, modifiers: KeyModifiers) {
        if self.state.is_pointer_gesture() {
            return;
        }

        if let Some(direction) = key.direction() {
            if modifiers.control {
                self.keyboard_resize(diagram, direction);
            } else if modifiers.shift {
                self.keyboard_move(diagram, direction);
            } else {
                self.navigate(diagram, direction);
            }
            return;
        }

        match key {
            Key::Plus => self.resize_with_fixed_ratio(diagram, self.config.grid_size),
            Key::Minus => self.resize_with_fixed_ratio(diagram, -self.config.grid_size),
            Key::Char('a') | Key::Char('A') => self.select_all(diagram),
            Key::Escape => {
                self.end_gesture(diagram);
                self.selection.clear(diagram);
            }
            Key::Space | Key::Enter | Key::Menu => self.post_menu(diagram),
            other => self.selection.forward_key(other, self.handler.as_mut()),
        }
    }

    /// A key was released; `modifiers` are those still held. Ends a keyboard
    /// move once Shift is up and a keyboard resize once Control is up.
    pub fn key_released(&mut self, diagram: &mut Diagram, modifiers: KeyModifiers) {
        let done = match self.state {
            GestureState::KeyMoving => !modifiers.shift,
            GestureState::KeyResizing => !modifiers.control,
            _ => false,
        };
        if done {
            self.end_gesture(diagram);
        }
    }

    // === Internals ===

    fn toggle(&mut self, diagram: &mut Diagram, id: NodeId, multi_select: bool) {
        let selected = self.selection.contains(id);
        match (multi_select, selected) {
            (true, true) => {
                self.selection.remove(diagram, id);
                if diagram.focused() == Some(id) {
                    diagram.set_focus(None);
                }
                return;
            }
            (true, false) => self.selection.add(diagram, id),
            (false, false) => self.selection.select_only(diagram, id),
            (false, true) => {}
        }
        diagram.set_focus(Some(id));
    }

    fn popup_at(
        &mut self,
        diagram: &mut Diagram,
        hit: Option<NodeId>,
        point: Point,
        modifiers: PointerModifiers,
    ) {
        match hit {
            Some(id) => {
                self.selection.select_only(diagram, id);
                diagram.set_focus(Some(id));
            }
            None if !modifiers.multi_select => self.selection.clear(diagram),
            None => {}
        }
        self.handler.popup_menu(hit, point);
    }

    fn anchor_nodes<I>(&mut self, diagram: &Diagram, ids: I)
    where
        I: IntoIterator<Item = NodeId>,
    {
        self.anchors = ids
            .into_iter()
            .filter_map(|id| diagram.node(id).map(|n| Anchor { id, rect: n.bounds() }))
            .collect();
    }

    /// Move every anchored node to its start position plus `(dx, dy)`.
    ///
    /// All or nothing: if any node would end up left of or above the origin
    /// no node moves. Returns whether the move was applied.
    fn move_anchored(&mut self, diagram: &mut Diagram, dx: i32, dy: i32) -> bool {
        if self.anchors.iter().any(|a| a.rect.x + dx < 0 || a.rect.y + dy < 0) {
            trace!(dx = dx, dy = dy; "Move rejected");
            return false;
        }
        for anchor in &self.anchors {
            if let Some(node) = diagram.node_mut(anchor.id) {
                node.set_position(anchor.rect.x + dx, anchor.rect.y + dy);
            }
        }
        trace!(dx = dx, dy = dy, nodes = self.anchors.len(); "Selection moved");
        true
    }

    /// Resize every anchored node to its start size plus `(dx, dy)`, floored
    /// at the configured minimum.
    fn resize_anchored(&mut self, diagram: &mut Diagram, dx: i32, dy: i32) {
        let (min_w, min_h) = (self.config.min_width, self.config.min_height);
        for anchor in &self.anchors {
            if let Some(node) = diagram.node_mut(anchor.id) {
                node.set_size(
                    (anchor.rect.width + dx).max(min_w),
                    (anchor.rect.height + dy).max(min_h),
                );
            }
        }
        trace!(dx = dx, dy = dy, nodes = self.anchors.len(); "Selection resized");
    }

    fn end_gesture(&mut self, diagram: &mut Diagram) {
        for anchor in self.anchors.drain(..) {
            if let Some(node) = diagram.node_mut(anchor.id) {
                node.set_dragging(false);
                node.set_resizing(false);
            }
        }
        if self.marquee.is_active() {
            self.marquee.stop();
        }
        if self.state != GestureState::Idle {
            debug!(state:? = self.state; "Gesture ended");
        }
        self.state = GestureState::Idle;
        self.key_delta = (0, 0);
    }

    /// A focused node must stay selected after a pointer gesture.
    fn restore_focus(&mut self, diagram: &mut Diagram) {
        let Some(focused) = diagram.focused() else {
            return;
        };
        if !self.selection.contains(focused) {
            debug!(node:? = focused; "Restoring focused node to selection");
            self.selection.select_only(diagram, focused);
            diagram.set_focus(Some(focused));
        }
    }

    /// The node keyboard navigation starts from: the focused node, else any
    /// selected node, else the first node. `None` on an empty diagram.
    fn navigation_origin(&self, diagram: &Diagram) -> Option<NodeId> {
        diagram
            .focused()
            .filter(|&id| diagram.contains(id))
            .or_else(|| self.selection.any_vertex())
            .or_else(|| diagram.first())
    }

    fn navigate(&mut self, diagram: &mut Diagram, direction: Direction) {
        self.end_gesture(diagram);
        let Some(current) = self.navigation_origin(diagram) else {
            return;
        };
        let next = self.strategy.find_next(diagram, current, direction);
        debug!(from:? = current, to:? = next, direction:? = direction; "Navigated");
        self.selection.select_only(diagram, next);
        diagram.set_focus(Some(next));
    }

    fn start_keyboard_gesture(&mut self, diagram: &mut Diagram, state: GestureState) -> bool {
        if self.state == state {
            return true;
        }
        self.end_gesture(diagram);
        if self.selection.is_empty() {
            return false;
        }
        let ids: Vec<NodeId> = self.selection.iter().collect();
        self.anchor_nodes(diagram, ids);
        for anchor in &self.anchors {
            if let Some(node) = diagram.node_mut(anchor.id) {
                match state {
                    GestureState::KeyResizing => node.set_resizing(true),
                    _ => node.set_dragging(true),
                }
            }
        }
        self.key_delta = (0, 0);
        self.state = state;
        debug!(state:? = state, nodes = self.anchors.len(); "Keyboard gesture started");
        true
    }

    fn step(&self, direction: Direction) -> (i32, i32) {
        let (ux, uy) = direction.unit();
        (
            self.key_delta.0 + ux * self.config.grid_size,
            self.key_delta.1 + uy * self.config.grid_size,
        )
    }

    fn keyboard_move(&mut self, diagram: &mut Diagram, direction: Direction) {
        if !self.start_keyboard_gesture(diagram, GestureState::KeyMoving) {
            return;
        }
        let (dx, dy) = self.step(direction);
        if self.move_anchored(diagram, dx, dy) {
            self.key_delta = (dx, dy);
        }
    }

    fn keyboard_resize(&mut self, diagram: &mut Diagram, direction: Direction) {
        if !self.start_keyboard_gesture(diagram, GestureState::KeyResizing) {
            return;
        }
        let (dx, dy) = self.step(direction);
        self.key_delta = (dx, dy);
        self.resize_anchored(diagram, dx, dy);
    }

    fn resize_with_fixed_ratio(&mut self, diagram: &mut Diagram, delta: i32) {
        self.end_gesture(diagram);
        let ids: Vec<NodeId> = self.selection.iter().collect();
        self.anchor_nodes(diagram, ids);
        self.resize_anchored(diagram, delta, delta);
        self.anchors.clear();
    }

    fn select_all(&mut self, diagram: &mut Diagram) {
        self.end_gesture(diagram);
        let ids: Vec<NodeId> = diagram.ids().collect();
        self.selection.add_all(diagram, ids);
    }

    /// Post the context menu of one selected node near its top-right corner.
    fn post_menu(&mut self, diagram: &mut Diagram) {
        self.end_gesture(diagram);
        let Some(id) = self.selection.any_vertex() else {
            return;
        };
        self.selection.select_only(diagram, id);
        let offset = self.config.popup_offset;
        if let Some(node) = diagram.node(id) {
            let at = Point::new(node.x() + node.width() - offset, node.y() + offset);
            self.handler.popup_menu(Some(id), at);
        }
    }
}
