use std::fmt;
use std::rc::Rc;

use indexmap::IndexSet;
use log::{debug, trace};
use slint::VecModel;

use crate::handler::GestureHandler;
use crate::input::Key;
use crate::node::{Diagram, NodeId};

/// Immutable copy of the selection taken right after a mutation.
///
/// Listeners receive this instead of a live view, so they can hold on to it or
/// trigger further changes without observing a half-applied state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectionSnapshot(Rc<[NodeId]>);

impl SelectionSnapshot {
    pub fn ids(&self) -> &[NodeId] {
        &self.0
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.0.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Ids as published to Slint models.
    pub fn model_ids(&self) -> Vec<i32> {
        self.0.iter().map(|id| id.model_id()).collect()
    }
}

/// Callback invoked after every selection change.
pub type SelectionListener = Box<dyn FnMut(&SelectionSnapshot)>;

/// Handle returned by [`SelectionSet::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// The authoritative set of selected nodes.
///
/// Every mutation keeps the two-way invariant with the nodes' own flag:
/// a node is flagged `selected` exactly when it is a member of this set.
/// Unknown ids are ignored by every operation.
#[derive(Default)]
pub struct SelectionSet {
    selected: IndexSet<NodeId>,
    listeners: Vec<(ListenerId, SelectionListener)>,
    next_listener: u64,
}

impl fmt::Debug for SelectionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionSet")
            .field("selected", &self.selected)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a selection from the nodes that are already flagged as selected.
    pub fn from_diagram(diagram: &Diagram) -> Self {
        let mut set = Self::new();
        set.selected
            .extend(diagram.nodes().filter(|n| n.is_selected()).map(|n| n.id()));
        set
    }

    /// Register a listener. It is called synchronously after each change.
    pub fn subscribe(&mut self, listener: impl FnMut(&SelectionSnapshot) + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns false when the id was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    /// Add a node to the selection.
    pub fn add(&mut self, diagram: &mut Diagram, id: NodeId) {
        if self.insert(diagram, id) {
            debug!(node:? = id; "Node added to selection");
            self.notify();
        }
    }

    /// Remove a node from the selection.
    pub fn remove(&mut self, diagram: &mut Diagram, id: NodeId) {
        if !self.selected.shift_remove(&id) {
            return;
        }
        if let Some(node) = diagram.node_mut(id) {
            node.set_selected(false);
        }
        debug!(node:? = id; "Node removed from selection");
        self.notify();
    }

    /// Deselect everything. Listeners hear about it once, and not at all
    /// when the selection was already empty.
    pub fn clear(&mut self, diagram: &mut Diagram) {
        if self.selected.is_empty() {
            return;
        }
        for id in self.selected.drain(..) {
            if let Some(node) = diagram.node_mut(id) {
                node.set_selected(false);
            }
        }
        debug!("Selection cleared");
        self.notify();
    }

    /// Replace the selection with a single node.
    pub fn select_only(&mut self, diagram: &mut Diagram, id: NodeId) {
        self.clear(diagram);
        self.add(diagram, id);
    }

    /// Add several nodes. Listeners are notified once if anything was added.
    pub fn add_all<I>(&mut self, diagram: &mut Diagram, ids: I)
    where
        I: IntoIterator<Item = NodeId>,
    {
        let mut added = 0usize;
        for id in ids {
            if self.insert(diagram, id) {
                added += 1;
            }
        }
        if added > 0 {
            debug!(added = added, total = self.selected.len(); "Nodes added to selection");
            self.notify();
        }
    }

    /// Any selected node, or `None` when the selection is empty.
    ///
    /// Deterministic: the earliest inserted member still selected.
    pub fn any_vertex(&self) -> Option<NodeId> {
        self.selected.first().copied()
    }

    /// Forward a double-click to every selected node.
    pub fn double_click(&self, open_in_new_window: bool, handler: &mut dyn GestureHandler) {
        for &id in &self.selected {
            handler.node_double_clicked(id, open_in_new_window);
        }
    }

    /// Forward an unhandled key to every selected node.
    pub fn forward_key(&self, key: Key, handler: &mut dyn GestureHandler) {
        for &id in &self.selected {
            handler.key_forwarded(id, key);
        }
    }

    /// Check if a node is selected
    pub fn contains(&self, id: NodeId) -> bool {
        self.selected.contains(&id)
    }

    /// Selected nodes in insertion order
    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.selected.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn snapshot(&self) -> SelectionSnapshot {
        SelectionSnapshot(self.selected.iter().copied().collect())
    }

    /// Publish the selected ids to a Slint model, replacing its contents.
    pub fn sync_to_model(&self, model: &VecModel<i32>) {
        model.set_vec(self.snapshot().model_ids());
    }

    fn insert(&mut self, diagram: &mut Diagram, id: NodeId) -> bool {
        let Some(node) = diagram.node_mut(id) else {
            return false;
        };
        if node.is_selected() {
            return false;
        }
        node.set_selected(true);
        self.selected.insert(id);
        true
    }

    fn notify(&mut self) {
        if self.listeners.is_empty() {
            return;
        }
        let snapshot = self.snapshot();
        trace!(listeners = self.listeners.len(), selected = snapshot.len(); "Notifying selection listeners");
        for (_, listener) in self.listeners.iter_mut() {
            listener(&snapshot);
        }
    }
}
