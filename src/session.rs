//! Shared wiring between a Slint window and the gesture engine.
//!
//! [`DiagramSession`] bundles the [`Diagram`] and its [`GestureController`]
//! behind `Rc<RefCell<_>>` so it can be cloned into Slint callbacks, keeps a
//! `VecModel<i32>` of selected ids in sync, and delivers selection listeners
//! and [`GestureHandler`] callbacks only after every internal borrow has been
//! released, in the order the engine produced them.
//!
//! # Example
//!
//! ```ignore
//! use slint_diagram_gestures::{DiagramSession, EngineConfig};
//!
//! slint::include_modules!();
//!
//! fn main() {
//!     let window = MainWindow::new().unwrap();
//!     let session = DiagramSession::new(load_diagram(), EngineConfig::default());
//!
//!     window.set_selected_ids(session.selection_model());
//!     window.on_pointer_pressed(session.pointer_pressed_callback());
//!     window.on_pointer_moved(session.pointer_moved_callback());
//!     window.on_pointer_released(session.pointer_released_callback());
//!     window.on_key_pressed(session.key_pressed_callback());
//!     window.on_is_selected(session.is_selected_callback());
//!
//!     window.run().unwrap();
//! }
//! ```

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use slint::platform::PointerEventButton;
use slint::{ModelRc, SharedString, VecModel};

use crate::config::EngineConfig;
use crate::controller::GestureController;
use crate::geometry::Point;
use crate::handler::{GestureHandler, NoopHandler};
use crate::input::{Key, KeyModifiers, PointerModifiers};
use crate::node::{Diagram, NodeId};
use crate::selection::SelectionSnapshot;

type SessionListener = Rc<dyn Fn(&SelectionSnapshot)>;
type EventQueue = Rc<RefCell<VecDeque<Deferred>>>;

/// Engine output held back until the engine is no longer borrowed.
enum Deferred {
    Selection(SelectionSnapshot),
    DoubleClicked(NodeId, bool),
    Clicked(Option<NodeId>, Point),
    KeyForwarded(NodeId, Key),
    PopupMenu(Option<NodeId>, Point),
}

/// Controller-side handler that queues every hook for the session.
struct QueueHandler(EventQueue);

impl GestureHandler for QueueHandler {
    fn node_double_clicked(&mut self, node: NodeId, open_in_new_window: bool) {
        self.0
            .borrow_mut()
            .push_back(Deferred::DoubleClicked(node, open_in_new_window));
    }

    fn node_clicked(&mut self, node: Option<NodeId>, at: Point) {
        self.0.borrow_mut().push_back(Deferred::Clicked(node, at));
    }

    fn key_forwarded(&mut self, node: NodeId, key: Key) {
        self.0.borrow_mut().push_back(Deferred::KeyForwarded(node, key));
    }

    fn popup_menu(&mut self, node: Option<NodeId>, at: Point) {
        self.0.borrow_mut().push_back(Deferred::PopupMenu(node, at));
    }
}

/// One open diagram together with its gesture controller.
///
/// Clone this session to share it across callbacks.
#[derive(Clone)]
pub struct DiagramSession {
    diagram: Rc<RefCell<Diagram>>,
    controller: Rc<RefCell<GestureController>>,
    pending: EventQueue,
    flushing: Rc<Cell<bool>>,
    listeners: Rc<RefCell<Vec<SessionListener>>>,
    handler: Rc<RefCell<Box<dyn GestureHandler>>>,
    selection_model: Rc<VecModel<i32>>,
}

impl DiagramSession {
    /// Open a session. Nodes already flagged as selected form the initial
    /// selection.
    pub fn new(diagram: Diagram, config: EngineConfig) -> Self {
        let mut controller = GestureController::for_diagram(&diagram, config);
        let pending: EventQueue = Rc::new(RefCell::new(VecDeque::new()));
        controller.selection_mut().subscribe({
            let pending = pending.clone();
            move |snapshot: &SelectionSnapshot| {
                pending
                    .borrow_mut()
                    .push_back(Deferred::Selection(snapshot.clone()))
            }
        });
        controller.set_handler(QueueHandler(pending.clone()));
        let handler: Box<dyn GestureHandler> = Box::new(NoopHandler);

        let selection_model = Rc::new(VecModel::default());
        controller.selection().sync_to_model(&selection_model);

        Self {
            diagram: Rc::new(RefCell::new(diagram)),
            controller: Rc::new(RefCell::new(controller)),
            pending,
            flushing: Rc::new(Cell::new(false)),
            listeners: Rc::new(RefCell::new(Vec::new())),
            handler: Rc::new(RefCell::new(handler)),
            selection_model,
        }
    }

    /// Get access to the diagram.
    pub fn diagram(&self) -> Rc<RefCell<Diagram>> {
        self.diagram.clone()
    }

    /// Get access to the controller.
    pub fn controller(&self) -> Rc<RefCell<GestureController>> {
        self.controller.clone()
    }

    /// Selected node ids, kept in sync after every change.
    pub fn selection_model(&self) -> ModelRc<i32> {
        ModelRc::from(self.selection_model.clone())
    }

    /// Install the application's handler.
    ///
    /// Its callbacks run after the triggering event has been processed and
    /// may call back into the session. Do not call this from inside one of
    /// them.
    pub fn set_handler(&self, handler: impl GestureHandler + 'static) {
        *self.handler.borrow_mut() = Box::new(handler);
    }

    /// Register a selection listener.
    ///
    /// Listeners run after the event that changed the selection has been
    /// fully processed and may call back into the session.
    pub fn subscribe(&self, listener: impl Fn(&SelectionSnapshot) + 'static) {
        self.listeners.borrow_mut().push(Rc::new(listener));
    }

    pub fn selection(&self) -> SelectionSnapshot {
        self.controller.borrow().selection().snapshot()
    }

    pub fn is_selected(&self, id: NodeId) -> bool {
        self.controller.borrow().selection().contains(id)
    }

    /// Deselect everything, e.g. when the diagram is closed.
    pub fn clear_selection(&self) {
        self.with_engine(|ctrl, diagram| ctrl.selection_mut().clear(diagram));
    }

    // === Event entry points ===

    pub fn press(&self, point: Point, modifiers: PointerModifiers) {
        self.with_engine(|ctrl, diagram| ctrl.press(diagram, point, modifiers));
    }

    pub fn drag(&self, point: Point) {
        self.with_engine(|ctrl, diagram| ctrl.drag(diagram, point));
    }

    pub fn release(&self, point: Point) {
        self.with_engine(|ctrl, diagram| ctrl.release(diagram, point));
    }

    pub fn click(&self, point: Point, click_count: u32, modifiers: PointerModifiers) {
        self.with_engine(|ctrl, diagram| ctrl.click(diagram, point, click_count, modifiers));
    }

    pub fn key(&self, key: Key, modifiers: KeyModifiers) {
        self.with_engine(|ctrl, diagram| ctrl.key(diagram, key, modifiers));
    }

    pub fn key_released(&self, modifiers: KeyModifiers) {
        self.with_engine(|ctrl, diagram| ctrl.key_released(diagram, modifiers));
    }

    // === Callback factories ===

    /// Returns a callback for pointer presses: `(x, y, button, multi_select)`.
    pub fn pointer_pressed_callback(&self) -> impl Fn(f32, f32, PointerEventButton, bool) {
        let session = self.clone();
        move |x, y, button, multi_select| {
            session.press(logical_point(x, y), PointerModifiers::from_button(button, multi_select));
        }
    }

    /// Returns a callback for pointer moves while a button is held.
    pub fn pointer_moved_callback(&self) -> impl Fn(f32, f32) {
        let session = self.clone();
        move |x, y| session.drag(logical_point(x, y))
    }

    /// Returns a callback for pointer releases.
    pub fn pointer_released_callback(&self) -> impl Fn(f32, f32) {
        let session = self.clone();
        move |x, y| session.release(logical_point(x, y))
    }

    /// Returns a callback for key presses: `(text, shift, control) -> handled`.
    ///
    /// Text that does not map to a single key is left unhandled.
    pub fn key_pressed_callback(&self) -> impl Fn(SharedString, bool, bool) -> bool {
        let session = self.clone();
        move |text, shift, control| match Key::from_text(text.as_str()) {
            Some(key) => {
                session.key(key, KeyModifiers { shift, control });
                true
            }
            None => false,
        }
    }

    /// Returns a callback for key releases: `(shift_held, control_held)`.
    pub fn key_released_callback(&self) -> impl Fn(bool, bool) {
        let session = self.clone();
        move |shift, control| session.key_released(KeyModifiers { shift, control })
    }

    /// Returns a callback answering whether a model id is selected.
    pub fn is_selected_callback(&self) -> impl Fn(i32) -> bool {
        let session = self.clone();
        move |id| NodeId::from_model_id(id).is_some_and(|id| session.is_selected(id))
    }

    // === Internals ===

    fn with_engine<R>(&self, f: impl FnOnce(&mut GestureController, &mut Diagram) -> R) -> R {
        let result = {
            let mut diagram = self.diagram.borrow_mut();
            let mut ctrl = self.controller.borrow_mut();
            f(&mut ctrl, &mut diagram)
        };
        self.flush();
        result
    }

    /// Deliver queued work with no borrows held.
    ///
    /// Events queued by re-entrant calls are appended and delivered by the
    /// outermost flush, so everything arrives in production order.
    fn flush(&self) {
        if self.flushing.replace(true) {
            return;
        }
        loop {
            let next = self.pending.borrow_mut().pop_front();
            let Some(event) = next else {
                break;
            };
            self.deliver(event);
        }
        self.flushing.set(false);
    }

    fn deliver(&self, event: Deferred) {
        match event {
            Deferred::Selection(snapshot) => {
                self.selection_model.set_vec(snapshot.model_ids());
                let listeners: Vec<SessionListener> = self.listeners.borrow().clone();
                for listener in listeners {
                    listener(&snapshot);
                }
            }
            Deferred::DoubleClicked(node, open_in_new_window) => self
                .handler
                .borrow_mut()
                .node_double_clicked(node, open_in_new_window),
            Deferred::Clicked(node, at) => self.handler.borrow_mut().node_clicked(node, at),
            Deferred::KeyForwarded(node, key) => self.handler.borrow_mut().key_forwarded(node, key),
            Deferred::PopupMenu(node, at) => self.handler.borrow_mut().popup_menu(node, at),
        }
    }
}

fn logical_point(x: f32, y: f32) -> Point {
    Point::new(x.round() as i32, y.round() as i32)
}
