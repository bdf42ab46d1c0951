// SPDX-License-Identifier: MIT OR Apache-2.0
//! Topology-safe command builders.
//!
//! The builders turn a delete or paste intent into a single
//! [`CommandUnit`] whose operations leave the graph structurally
//! consistent at every step: connections are removed before their endpoint
//! nodes, and pasted nodes are added before the connections that reference
//! them. The unit is returned *uncommitted* inside a pending change-set,
//! so the caller can append further operations that must commit or roll
//! back together with it.

use crate::clipboard::Clipboard;
use crate::error::SelectionError;
use crate::selection::SelectionSet;
use indexmap::IndexSet;
use std::collections::HashMap;
use wirebench_graph::{
    CommandUnit, Connection, ConnectionId, Endpoint, Graph, GraphOp, Joint, JointId, Node, NodeId,
    PortId,
};

/// A delete change-set that has not been applied yet
///
/// `removed_nodes`/`removed_connections` summarise what the unit will
/// remove (full payload copies, usable by an undo engine). Append extra
/// operations through [`unit_mut`](Self::unit_mut) before committing.
#[derive(Debug)]
pub struct PendingDelete {
    /// Nodes the unit removes
    pub removed_nodes: Vec<Node>,
    /// Connections the unit removes, explicit and implied
    pub removed_connections: Vec<Connection>,
    unit: CommandUnit,
}

impl PendingDelete {
    /// The not-yet-committed command unit
    pub fn unit(&self) -> &CommandUnit {
        &self.unit
    }

    /// Mutable access for appending operations
    pub fn unit_mut(&mut self) -> &mut CommandUnit {
        &mut self.unit
    }

    pub(crate) fn into_unit(self) -> CommandUnit {
        self.unit
    }
}

/// A paste change-set that has not been applied yet
#[derive(Debug)]
pub struct PendingPaste {
    /// IDs of the nodes the unit adds
    pub pasted_nodes: Vec<NodeId>,
    /// IDs of the connections the unit adds
    pub pasted_connections: Vec<ConnectionId>,
    unit: CommandUnit,
}

impl PendingPaste {
    /// The not-yet-committed command unit
    pub fn unit(&self) -> &CommandUnit {
        &self.unit
    }

    /// Mutable access for appending operations
    pub fn unit_mut(&mut self) -> &mut CommandUnit {
        &mut self.unit
    }

    pub(crate) fn into_unit(self) -> CommandUnit {
        self.unit
    }
}

/// Build the delete unit for the current selection
///
/// Expands the explicitly selected connections with every connection
/// touching a selected node, then emits remove-connection operations
/// followed by remove-node operations. Returns `None` when there is
/// nothing to delete.
pub fn build_delete(
    graph: &Graph,
    selection: &SelectionSet,
) -> Result<Option<PendingDelete>, SelectionError> {
    if selection.nodes().next().is_none() && selection.connections().next().is_none() {
        return Ok(None);
    }

    let selected_nodes: IndexSet<NodeId> = selection.nodes().collect();
    let touches_selected = |connection: &Connection| {
        selected_nodes.contains(&connection.source.node)
            || selected_nodes.contains(&connection.target.node)
    };

    // Union of explicitly selected connections and connections implied by
    // the selected nodes.
    let mut connection_ids: IndexSet<ConnectionId> = selection.connections().collect();
    for connection in graph.connections() {
        if touches_selected(connection) {
            connection_ids.insert(connection.id);
        }
    }

    let mut removed_nodes = Vec::with_capacity(selected_nodes.len());
    for id in &selected_nodes {
        let node = graph.node(*id).ok_or_else(|| {
            SelectionError::InconsistentTopology(format!(
                "selected node {id:?} is not in the graph"
            ))
        })?;
        removed_nodes.push(node.clone());
    }

    let mut removed_connections = Vec::with_capacity(connection_ids.len());
    for id in &connection_ids {
        let connection = graph.connection(*id).ok_or_else(|| {
            SelectionError::InconsistentTopology(format!(
                "selected connection {id:?} is not in the graph"
            ))
        })?;
        removed_connections.push(connection.clone());
    }

    // Expansion covered every connection touching a removed node; check it
    // actually did before emitting anything.
    for connection in graph.connections() {
        if connection_ids.contains(&connection.id) {
            continue;
        }
        if touches_selected(connection) {
            return Err(SelectionError::InconsistentTopology(format!(
                "connection {:?} would dangle after delete",
                connection.id
            )));
        }
    }

    let mut unit = CommandUnit::new();
    unit.extend(connection_ids.iter().map(|id| GraphOp::RemoveConnection(*id)));
    unit.extend(selected_nodes.iter().map(|id| GraphOp::RemoveNode(*id)));

    Ok(Some(PendingDelete {
        removed_nodes,
        removed_connections,
        unit,
    }))
}

/// Build the paste unit from the clipboard
///
/// Every node copy gets a fresh node ID and fresh port IDs; connection
/// endpoints are re-resolved through the old→new mapping, joints get fresh
/// IDs. Repeated calls produce independent identities each time. Returns
/// `None` when the clipboard is empty.
pub fn build_paste(
    clipboard: &Clipboard,
    offset: Option<[f32; 2]>,
) -> Result<Option<PendingPaste>, SelectionError> {
    if clipboard.is_empty() {
        return Ok(None);
    }

    let mut node_map: HashMap<NodeId, NodeId> = HashMap::new();
    let mut port_map: HashMap<PortId, PortId> = HashMap::new();

    let mut pasted_nodes = Vec::with_capacity(clipboard.nodes().len());
    let mut unit = CommandUnit::new();

    for original in clipboard.nodes() {
        let mut node = original.clone();
        node.id = NodeId::new();
        node_map.insert(original.id, node.id);
        for port in &mut node.ports {
            let fresh = PortId::new();
            port_map.insert(port.id, fresh);
            port.id = fresh;
        }
        if let Some([dx, dy]) = offset {
            node.position[0] += dx;
            node.position[1] += dy;
        }
        pasted_nodes.push(node.id);
        unit.push(GraphOp::AddNode(node));
    }

    let mut pasted_connections = Vec::with_capacity(clipboard.connections().len());
    for original in clipboard.connections() {
        let source = remap_endpoint(original.source, &node_map, &port_map)?;
        let target = remap_endpoint(original.target, &node_map, &port_map)?;

        let mut connection = Connection::new(source, target);
        connection.joints = original
            .joints
            .iter()
            .map(|joint| {
                let mut copy = Joint {
                    id: JointId::new(),
                    position: joint.position,
                };
                if let Some([dx, dy]) = offset {
                    copy.position[0] += dx;
                    copy.position[1] += dy;
                }
                copy
            })
            .collect();

        pasted_connections.push(connection.id);
        unit.push(GraphOp::AddConnection(connection));
    }

    Ok(Some(PendingPaste {
        pasted_nodes,
        pasted_connections,
        unit,
    }))
}

fn remap_endpoint(
    endpoint: Endpoint,
    node_map: &HashMap<NodeId, NodeId>,
    port_map: &HashMap<PortId, PortId>,
) -> Result<Endpoint, SelectionError> {
    // The capture rule guarantees both endpoints are in the buffer; a miss
    // means the buffer invariant was broken.
    let node = node_map.get(&endpoint.node).ok_or_else(|| {
        SelectionError::InconsistentTopology(format!(
            "clipboard connection references uncaptured node {:?}",
            endpoint.node
        ))
    })?;
    let port = port_map.get(&endpoint.port).ok_or_else(|| {
        SelectionError::InconsistentTopology(format!(
            "clipboard connection references uncaptured port {:?}",
            endpoint.port
        ))
    })?;
    Ok(Endpoint::new(*node, *port))
}
