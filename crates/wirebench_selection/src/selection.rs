// SPDX-License-Identifier: MIT OR Apache-2.0
//! Ordered selection state.
//!
//! Three insertion-ordered, duplicate-free sets (nodes, connections,
//! joints) form the single source of truth for "what is selected". The
//! sets are never handed out mutably; outside code observes them through
//! the read accessors and the subscription mechanism.

use indexmap::IndexSet;
use wirebench_graph::{ConnectionId, Graph, GraphElement, JointId, NodeId};

/// A change to the selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionEvent {
    /// An element was added to the selection
    Selected(GraphElement),
    /// An element was removed from the selection
    Deselected(GraphElement),
    /// The whole selection was emptied in one step
    Cleared,
}

type Listener = Box<dyn Fn(&SelectionEvent)>;

/// The set of currently selected elements
///
/// Mutation happens through the
/// [`SelectionManager`](crate::SelectionManager), which validates elements
/// against the graph model first.
#[derive(Default)]
pub struct SelectionSet {
    nodes: IndexSet<NodeId>,
    connections: IndexSet<ConnectionId>,
    joints: IndexSet<JointId>,
    version: u64,
    listeners: Vec<Listener>,
}

impl std::fmt::Debug for SelectionSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionSet")
            .field("nodes", &self.nodes)
            .field("connections", &self.connections)
            .field("joints", &self.joints)
            .field("version", &self.version)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl SelectionSet {
    /// Create an empty selection
    pub fn new() -> Self {
        Self::default()
    }

    /// Selected nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().copied()
    }

    /// Selected connections in insertion order
    pub fn connections(&self) -> impl Iterator<Item = ConnectionId> + '_ {
        self.connections.iter().copied()
    }

    /// Selected joints in insertion order
    pub fn joints(&self) -> impl Iterator<Item = JointId> + '_ {
        self.joints.iter().copied()
    }

    /// All selected elements
    ///
    /// Order is deterministic: nodes, then connections, then joints, each
    /// in insertion order.
    pub fn items(&self) -> Vec<GraphElement> {
        let mut items = Vec::with_capacity(self.len());
        items.extend(self.nodes().map(GraphElement::Node));
        items.extend(self.connections().map(GraphElement::Connection));
        items.extend(self.joints().map(GraphElement::Joint));
        items
    }

    /// Check if an element is selected
    pub fn is_selected(&self, element: GraphElement) -> bool {
        match element {
            GraphElement::Node(id) => self.nodes.contains(&id),
            GraphElement::Connection(id) => self.connections.contains(&id),
            GraphElement::Joint(id) => self.joints.contains(&id),
        }
    }

    /// Number of selected elements across all three sets
    pub fn len(&self) -> usize {
        self.nodes.len() + self.connections.len() + self.joints.len()
    }

    /// Check if nothing is selected
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.connections.is_empty() && self.joints.is_empty()
    }

    /// Version counter, bumped on every observable change
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Register a change listener
    pub fn subscribe(&mut self, listener: impl Fn(&SelectionEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    fn notify(&mut self, event: SelectionEvent) {
        self.version += 1;
        for listener in &self.listeners {
            listener(&event);
        }
    }

    /// Add an element; idempotent. Returns true if the selection changed.
    pub(crate) fn insert(&mut self, element: GraphElement) -> bool {
        let inserted = match element {
            GraphElement::Node(id) => self.nodes.insert(id),
            GraphElement::Connection(id) => self.connections.insert(id),
            GraphElement::Joint(id) => self.joints.insert(id),
        };
        if inserted {
            self.notify(SelectionEvent::Selected(element));
        }
        inserted
    }

    /// Remove an element; no-op if absent. Returns true if it was selected.
    pub(crate) fn remove(&mut self, element: GraphElement) -> bool {
        let removed = match element {
            GraphElement::Node(id) => self.nodes.shift_remove(&id),
            GraphElement::Connection(id) => self.connections.shift_remove(&id),
            GraphElement::Joint(id) => self.joints.shift_remove(&id),
        };
        if removed {
            self.notify(SelectionEvent::Deselected(element));
        }
        removed
    }

    /// Empty all three sets as one observable change
    pub(crate) fn clear(&mut self) {
        if self.is_empty() {
            return;
        }
        self.nodes.clear();
        self.connections.clear();
        self.joints.clear();
        self.notify(SelectionEvent::Cleared);
    }

    /// Drop every selected element that no longer exists in the graph
    pub(crate) fn retain_existing(&mut self, graph: &Graph) {
        let stale: Vec<GraphElement> = self
            .items()
            .into_iter()
            .filter(|e| !graph.contains(*e))
            .collect();
        for element in stale {
            self.remove(element);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_insert_idempotent() {
        let mut selection = SelectionSet::new();
        let node = NodeId::new();
        assert!(selection.insert(GraphElement::Node(node)));
        assert!(!selection.insert(GraphElement::Node(node)));
        assert_eq!(selection.len(), 1);
    }

    #[test]
    fn test_items_order_is_nodes_connections_joints() {
        let mut selection = SelectionSet::new();
        let joint = JointId::new();
        let node_a = NodeId::new();
        let node_b = NodeId::new();
        let conn = ConnectionId::new();

        // Interleave insertion across types; items() still groups by type.
        selection.insert(GraphElement::Joint(joint));
        selection.insert(GraphElement::Node(node_a));
        selection.insert(GraphElement::Connection(conn));
        selection.insert(GraphElement::Node(node_b));

        assert_eq!(
            selection.items(),
            vec![
                GraphElement::Node(node_a),
                GraphElement::Node(node_b),
                GraphElement::Connection(conn),
                GraphElement::Joint(joint),
            ]
        );
    }

    #[test]
    fn test_is_selected_matches_items() {
        let mut selection = SelectionSet::new();
        let node = NodeId::new();
        let conn = ConnectionId::new();
        selection.insert(GraphElement::Node(node));
        selection.insert(GraphElement::Connection(conn));
        selection.remove(GraphElement::Connection(conn));

        for element in [GraphElement::Node(node), GraphElement::Connection(conn)] {
            assert_eq!(
                selection.is_selected(element),
                selection.items().contains(&element)
            );
        }
    }

    #[test]
    fn test_clear_is_single_event() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);

        let mut selection = SelectionSet::new();
        selection.subscribe(move |event| sink.borrow_mut().push(*event));
        selection.insert(GraphElement::Node(NodeId::new()));
        selection.insert(GraphElement::Joint(JointId::new()));
        events.borrow_mut().clear();

        selection.clear();
        assert_eq!(events.borrow().as_slice(), &[SelectionEvent::Cleared]);
        assert!(selection.is_empty());

        // Clearing an empty selection is not an observable change.
        let version = selection.version();
        selection.clear();
        assert_eq!(selection.version(), version);
    }

    #[test]
    fn test_version_increases_on_changes() {
        let mut selection = SelectionSet::new();
        let v0 = selection.version();
        let node = NodeId::new();
        selection.insert(GraphElement::Node(node));
        let v1 = selection.version();
        selection.remove(GraphElement::Node(node));
        let v2 = selection.version();
        assert!(v0 < v1 && v1 < v2);

        // No-op removals do not bump the version.
        selection.remove(GraphElement::Node(node));
        assert_eq!(selection.version(), v2);
    }
}
