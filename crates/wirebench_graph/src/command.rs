// SPDX-License-Identifier: MIT OR Apache-2.0
//! Atomic command units for structural graph mutation.
//!
//! A [`CommandUnit`] is an ordered, appendable batch of add/remove
//! operations applied to a [`Graph`] as a whole. `apply` validates the
//! entire batch against the current graph before touching it, so a failing
//! unit leaves the graph exactly as it was. This is the single mutation
//! discipline an undo/redo engine can wrap: a unit either applies fully or
//! not at all.

use crate::connection::{Connection, ConnectionId};
use crate::graph::{Graph, GraphError};
use crate::node::{Node, NodeId};
use std::collections::{HashMap, HashSet};

/// A single structural operation
#[derive(Debug, Clone)]
pub enum GraphOp {
    /// Insert a node
    AddNode(Node),
    /// Insert a connection (both endpoints must exist when it executes)
    AddConnection(Connection),
    /// Remove a node (all referencing connections must be removed earlier
    /// in the same unit)
    RemoveNode(NodeId),
    /// Remove a connection and its joints
    RemoveConnection(ConnectionId),
}

/// An atomic, appendable batch of structural operations
#[derive(Debug, Clone, Default)]
pub struct CommandUnit {
    ops: Vec<GraphOp>,
}

impl CommandUnit {
    /// Create an empty unit
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an operation
    pub fn push(&mut self, op: GraphOp) {
        self.ops.push(op);
    }

    /// Append several operations
    pub fn extend(&mut self, ops: impl IntoIterator<Item = GraphOp>) {
        self.ops.extend(ops);
    }

    /// Operations in execution order
    pub fn ops(&self) -> &[GraphOp] {
        &self.ops
    }

    /// Check if the unit contains no operations
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Number of operations
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Apply all operations to the graph, or none of them
    ///
    /// The whole batch is validated against the current graph first; the
    /// graph is only mutated once validation has passed in full.
    pub fn apply(self, graph: &mut Graph) -> Result<(), CommandError> {
        self.validate(graph)?;

        for op in self.ops {
            // Validation guarantees each primitive succeeds.
            match op {
                GraphOp::AddNode(node) => {
                    graph.add_node(node);
                }
                GraphOp::AddConnection(connection) => {
                    graph
                        .insert_connection(connection)
                        .map_err(CommandError::Graph)?;
                }
                GraphOp::RemoveNode(node_id) => {
                    graph.remove_node(node_id).map_err(CommandError::Graph)?;
                }
                GraphOp::RemoveConnection(connection_id) => {
                    graph
                        .remove_connection(connection_id)
                        .ok_or(CommandError::UnknownConnection(connection_id))?;
                }
            }
        }
        Ok(())
    }

    /// Dry-run the batch against the graph without mutating it
    fn validate(&self, graph: &Graph) -> Result<(), CommandError> {
        // Nodes added earlier in the unit, by payload, so added connections
        // can resolve ports against them.
        let mut added_nodes: HashMap<NodeId, &Node> = HashMap::new();
        let mut removed_nodes: HashSet<NodeId> = HashSet::new();
        let mut added_connections: HashMap<ConnectionId, &Connection> = HashMap::new();
        let mut removed_connections: HashSet<ConnectionId> = HashSet::new();

        for op in &self.ops {
            match op {
                GraphOp::AddNode(node) => {
                    let live = (graph.node(node.id).is_some()
                        || added_nodes.contains_key(&node.id))
                        && !removed_nodes.contains(&node.id);
                    if live {
                        return Err(CommandError::DuplicateNode(node.id));
                    }
                    removed_nodes.remove(&node.id);
                    added_nodes.insert(node.id, node);
                }
                GraphOp::AddConnection(connection) => {
                    let live = (graph.connection(connection.id).is_some()
                        || added_connections.contains_key(&connection.id))
                        && !removed_connections.contains(&connection.id);
                    if live {
                        return Err(CommandError::DuplicateConnection(connection.id));
                    }
                    let mut ports = [None, None];
                    for (slot, endpoint) in [connection.source, connection.target]
                        .into_iter()
                        .enumerate()
                    {
                        let node = if removed_nodes.contains(&endpoint.node) {
                            None
                        } else {
                            added_nodes
                                .get(&endpoint.node)
                                .copied()
                                .or_else(|| graph.node(endpoint.node))
                        };
                        let Some(node) = node else {
                            return Err(CommandError::UnknownEndpoint {
                                connection: connection.id,
                                node: endpoint.node,
                            });
                        };
                        let Some(port) = node.port(endpoint.port) else {
                            return Err(CommandError::Graph(GraphError::PortNotFound(
                                endpoint.port,
                            )));
                        };
                        ports[slot] = Some(port);
                    }
                    if let (Some(source), Some(target)) = (ports[0], ports[1]) {
                        if !source.can_connect(target) {
                            return Err(CommandError::Graph(GraphError::IncompatiblePorts));
                        }
                    }
                    removed_connections.remove(&connection.id);
                    added_connections.insert(connection.id, connection);
                }
                GraphOp::RemoveNode(node_id) => {
                    let live = (graph.node(*node_id).is_some()
                        || added_nodes.contains_key(node_id))
                        && !removed_nodes.contains(node_id);
                    if !live {
                        return Err(CommandError::UnknownNode(*node_id));
                    }
                    // Every live connection touching this node must already
                    // be scheduled for removal: connections go first.
                    let unit_added = added_connections
                        .values()
                        .filter(|c| c.involves_node(*node_id))
                        .map(|c| c.id);
                    let in_graph = graph.connections_for_node(*node_id).map(|c| c.id);
                    for connection_id in in_graph.chain(unit_added) {
                        if !removed_connections.contains(&connection_id) {
                            return Err(CommandError::DanglingConnection {
                                connection: connection_id,
                                node: *node_id,
                            });
                        }
                    }
                    added_nodes.remove(node_id);
                    removed_nodes.insert(*node_id);
                }
                GraphOp::RemoveConnection(connection_id) => {
                    let live = (graph.connection(*connection_id).is_some()
                        || added_connections.contains_key(connection_id))
                        && !removed_connections.contains(connection_id);
                    if !live {
                        return Err(CommandError::UnknownConnection(*connection_id));
                    }
                    added_connections.remove(connection_id);
                    removed_connections.insert(*connection_id);
                }
            }
        }
        Ok(())
    }
}

/// Error raised when a command unit fails validation or application
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// Added node already exists
    #[error("Node already exists: {0:?}")]
    DuplicateNode(NodeId),

    /// Added connection already exists
    #[error("Connection already exists: {0:?}")]
    DuplicateConnection(ConnectionId),

    /// Removed node does not exist
    #[error("Node not found: {0:?}")]
    UnknownNode(NodeId),

    /// Removed connection does not exist
    #[error("Connection not found: {0:?}")]
    UnknownConnection(ConnectionId),

    /// Added connection references a missing node
    #[error("Connection {connection:?} references missing node {node:?}")]
    UnknownEndpoint {
        /// The connection being added
        connection: ConnectionId,
        /// The missing endpoint node
        node: NodeId,
    },

    /// Node removal ordered before a connection that references it
    #[error("Connection {connection:?} would dangle: node {node:?} removed first")]
    DanglingConnection {
        /// The connection left dangling
        connection: ConnectionId,
        /// The node being removed
        node: NodeId,
    },

    /// Primitive graph mutation failed during application
    #[error(transparent)]
    Graph(#[from] GraphError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::Endpoint;
    use crate::port::Port;

    fn connected_pair() -> (Graph, NodeId, NodeId, ConnectionId) {
        let mut graph = Graph::new();
        let out = Port::output("out");
        let inp = Port::input("in");
        let out_id = out.id;
        let in_id = inp.id;
        let a = graph.add_node(Node::new("A").with_port(out));
        let b = graph.add_node(Node::new("B").with_port(inp));
        let conn = graph
            .connect(Endpoint::new(a, out_id), Endpoint::new(b, in_id))
            .unwrap();
        (graph, a, b, conn)
    }

    #[test]
    fn test_remove_in_topology_order() {
        let (mut graph, a, b, conn) = connected_pair();

        let mut unit = CommandUnit::new();
        unit.push(GraphOp::RemoveConnection(conn));
        unit.push(GraphOp::RemoveNode(a));
        unit.push(GraphOp::RemoveNode(b));
        unit.apply(&mut graph).unwrap();

        assert_eq!(graph.node_count(), 0);
        assert_eq!(graph.connection_count(), 0);
    }

    #[test]
    fn test_node_before_connection_rejected() {
        let (mut graph, a, _, conn) = connected_pair();

        let mut unit = CommandUnit::new();
        unit.push(GraphOp::RemoveNode(a));
        unit.push(GraphOp::RemoveConnection(conn));
        let err = unit.apply(&mut graph).unwrap_err();
        assert!(matches!(err, CommandError::DanglingConnection { .. }));

        // All-or-nothing: the graph is untouched.
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.connection_count(), 1);
    }

    #[test]
    fn test_invalid_op_leaves_graph_untouched() {
        let (mut graph, a, b, conn) = connected_pair();

        let mut unit = CommandUnit::new();
        unit.push(GraphOp::RemoveConnection(conn));
        unit.push(GraphOp::RemoveNode(a));
        unit.push(GraphOp::RemoveNode(b));
        unit.push(GraphOp::RemoveNode(NodeId::new()));
        let err = unit.apply(&mut graph).unwrap_err();
        assert!(matches!(err, CommandError::UnknownNode(_)));

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.connection_count(), 1);
        assert!(graph.connection(conn).is_some());
    }

    #[test]
    fn test_add_connection_requires_endpoints() {
        let mut graph = Graph::new();
        let connection = Connection::new(
            Endpoint::new(NodeId::new(), crate::port::PortId::new()),
            Endpoint::new(NodeId::new(), crate::port::PortId::new()),
        );

        let mut unit = CommandUnit::new();
        unit.push(GraphOp::AddConnection(connection));
        let err = unit.apply(&mut graph).unwrap_err();
        assert!(matches!(err, CommandError::UnknownEndpoint { .. }));
    }

    #[test]
    fn test_add_nodes_then_connection() {
        let mut graph = Graph::new();
        let out = Port::output("out");
        let inp = Port::input("in");
        let a = Node::new("A").with_port(out.clone());
        let b = Node::new("B").with_port(inp.clone());
        let connection = Connection::new(
            Endpoint::new(a.id, out.id),
            Endpoint::new(b.id, inp.id),
        );

        let mut unit = CommandUnit::new();
        unit.push(GraphOp::AddNode(a));
        unit.push(GraphOp::AddNode(b));
        unit.push(GraphOp::AddConnection(connection));
        unit.apply(&mut graph).unwrap();

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.connection_count(), 1);
    }
}
