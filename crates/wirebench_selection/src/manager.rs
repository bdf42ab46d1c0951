// SPDX-License-Identifier: MIT OR Apache-2.0
//! Selection manager: the facade the editor interacts with.
//!
//! Owns the selection state, the clipboard buffer, the editor properties
//! and the connection-selection predicate. The graph is passed into each
//! call rather than held; the manager never mutates it outside a committed
//! [`CommandUnit`](wirebench_graph::CommandUnit), so an undo engine sees a
//! single mutation discipline.

use crate::builder::{build_delete, build_paste, PendingDelete, PendingPaste};
use crate::clipboard::Clipboard;
use crate::error::{Result, SelectionError};
use crate::properties::{BoxSelectMode, EditorProperties, Rect};
use crate::selection::{SelectionEvent, SelectionSet};
use wirebench_graph::{Connection, Graph, GraphElement, NodeId};

type ConnectionPredicate = Box<dyn Fn(&Connection, Rect) -> bool>;

/// Tracks the current selection and provides cut/copy/paste/delete
pub struct SelectionManager {
    selection: SelectionSet,
    clipboard: Clipboard,
    properties: EditorProperties,
    connection_predicate: Option<ConnectionPredicate>,
}

impl std::fmt::Debug for SelectionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionManager")
            .field("selection", &self.selection)
            .field("clipboard", &self.clipboard)
            .field("properties", &self.properties)
            .field("connection_predicate", &self.connection_predicate.is_some())
            .finish()
    }
}

impl Default for SelectionManager {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionManager {
    /// Create a manager with an empty selection and clipboard
    pub fn new() -> Self {
        Self {
            selection: SelectionSet::new(),
            clipboard: Clipboard::new(),
            properties: EditorProperties::default(),
            connection_predicate: None,
        }
    }

    /// Read access to the selection state
    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    /// Register a selection-change listener
    pub fn subscribe(&mut self, listener: impl Fn(&SelectionEvent) + 'static) {
        self.selection.subscribe(listener);
    }

    /// Check if an element is selected
    pub fn is_selected(&self, element: GraphElement) -> bool {
        self.selection.is_selected(element)
    }

    /// Select an element
    ///
    /// Idempotent; selecting has no side effect beyond membership. Fails
    /// with [`SelectionError::InvalidElement`] when the element is not in
    /// the graph.
    pub fn select(&mut self, graph: &Graph, element: GraphElement) -> Result<()> {
        if !graph.contains(element) {
            return Err(SelectionError::InvalidElement(element));
        }
        self.selection.insert(element);
        Ok(())
    }

    /// Deselect an element; no-op if it was not selected
    ///
    /// Like [`select`](Self::select), an element unknown to the graph is an
    /// error rather than a silent no-op.
    pub fn deselect(&mut self, graph: &Graph, element: GraphElement) -> Result<()> {
        if !graph.contains(element) {
            return Err(SelectionError::InvalidElement(element));
        }
        self.selection.remove(element);
        Ok(())
    }

    /// Deselect everything as a single observable change
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Drop selected elements that no longer exist in the graph
    ///
    /// Call after any structural change made outside this manager.
    pub fn graph_changed(&mut self, graph: &Graph) {
        self.selection.retain_existing(graph);
    }

    /// Copy the selected nodes and their internal connections
    ///
    /// With no nodes selected there is no capturable sub-graph, and the
    /// clipboard keeps its previous contents.
    pub fn copy(&mut self, graph: &Graph) {
        if self.selection.nodes().next().is_none() {
            return;
        }
        let snapshot = Clipboard::capture(graph, self.selection.nodes());
        tracing::info!(
            nodes = snapshot.nodes().len(),
            connections = snapshot.connections().len(),
            "copied selection"
        );
        self.clipboard = snapshot;
    }

    /// Cut the selection: copy it, then delete it as one atomic unit
    pub fn cut(&mut self, graph: &mut Graph) -> Result<()> {
        if let Some(pending) = self.begin_cut(graph)? {
            self.commit_delete(pending, graph)?;
        }
        Ok(())
    }

    /// Copy the selection and build the delete unit without applying it
    ///
    /// The clipboard is replaced as soon as this returns; dropping the
    /// pending delete without committing leaves the graph untouched but
    /// the snapshot taken. Returns `None` for an empty selection, in which
    /// case the clipboard is untouched too.
    pub fn begin_cut(&mut self, graph: &Graph) -> Result<Option<PendingDelete>> {
        let pending = build_delete(graph, &self.selection)?;
        if pending.is_some() {
            self.copy(graph);
        }
        Ok(pending)
    }

    /// Delete the selected nodes and connections as one atomic unit
    ///
    /// Connections touching a selected node are removed with it, joints
    /// cascade with their connection.
    pub fn delete_selection(&mut self, graph: &mut Graph) -> Result<()> {
        if let Some(pending) = self.begin_delete(graph)? {
            self.commit_delete(pending, graph)?;
        }
        Ok(())
    }

    /// Build the delete unit for the selection without applying it
    pub fn begin_delete(&self, graph: &Graph) -> Result<Option<PendingDelete>> {
        build_delete(graph, &self.selection)
    }

    /// Apply a pending delete, then prune the selection
    pub fn commit_delete(&mut self, pending: PendingDelete, graph: &mut Graph) -> Result<()> {
        tracing::info!(
            nodes = pending.removed_nodes.len(),
            connections = pending.removed_connections.len(),
            ops = pending.unit().len(),
            "deleting selection"
        );
        pending.into_unit().apply(graph)?;
        self.selection.retain_existing(graph);
        Ok(())
    }

    /// Paste the clipboard contents; no-op when the buffer is empty
    ///
    /// Non-destructive and repeatable: every call creates all-new
    /// identities. The pasted elements replace the current selection.
    pub fn paste(&mut self, graph: &mut Graph) -> Result<()> {
        if let Some(pending) = self.begin_paste()? {
            self.commit_paste(pending, graph)?;
        }
        Ok(())
    }

    /// Build the paste unit without applying it
    ///
    /// The positional offset comes from
    /// [`EditorProperties::paste_offset`]. Returns `None` when the
    /// clipboard is empty.
    pub fn begin_paste(&self) -> Result<Option<PendingPaste>> {
        build_paste(&self.clipboard, self.properties.paste_offset)
    }

    /// Apply a pending paste and select the pasted elements
    pub fn commit_paste(&mut self, pending: PendingPaste, graph: &mut Graph) -> Result<()> {
        tracing::info!(
            nodes = pending.pasted_nodes.len(),
            connections = pending.pasted_connections.len(),
            ops = pending.unit().len(),
            "pasting clipboard"
        );
        let pasted_nodes = pending.pasted_nodes.clone();
        let pasted_connections = pending.pasted_connections.clone();
        pending.into_unit().apply(graph)?;

        self.selection.clear();
        for id in pasted_nodes {
            self.selection.insert(GraphElement::Node(id));
        }
        for id in pasted_connections {
            self.selection.insert(GraphElement::Connection(id));
        }
        Ok(())
    }

    /// Apply a completed box-selection drag
    ///
    /// `node_hits` are the nodes whose geometry intersects the rectangle,
    /// decided by the widget. Connections have no intrinsic geometry:
    /// candidates are filtered through the registered predicate, and with
    /// no predicate registered no connection is selected. Whether the box
    /// replaces or extends the selection follows
    /// [`EditorProperties::box_select_mode`].
    pub fn apply_box_selection(
        &mut self,
        graph: &Graph,
        rect: Rect,
        node_hits: &[NodeId],
    ) -> Result<()> {
        // Validate the widget's hits before touching the selection, so a
        // bad hit has no partial effect.
        for id in node_hits {
            if graph.node(*id).is_none() {
                return Err(SelectionError::InvalidElement(GraphElement::Node(*id)));
            }
        }

        if self.properties.box_select_mode == BoxSelectMode::Replace {
            self.selection.clear();
        }

        for id in node_hits {
            self.selection.insert(GraphElement::Node(*id));
        }

        if let Some(predicate) = &self.connection_predicate {
            let hits: Vec<_> = graph
                .connections()
                .filter(|c| predicate(c, rect))
                .map(|c| c.id)
                .collect();
            for id in hits {
                self.selection.insert(GraphElement::Connection(id));
            }
        }
        Ok(())
    }

    /// Set the predicate deciding whether a connection lies inside a
    /// selection rectangle
    ///
    /// Single slot, last write wins; `None` restores the default of never
    /// box-selecting connections.
    pub fn set_connection_selection_predicate(&mut self, predicate: Option<ConnectionPredicate>) {
        self.connection_predicate = predicate;
    }

    /// Set the editor properties read by this core
    pub fn set_editor_properties(&mut self, properties: EditorProperties) {
        self.properties = properties;
    }

    /// Current editor properties
    pub fn editor_properties(&self) -> &EditorProperties {
        &self.properties
    }
}
