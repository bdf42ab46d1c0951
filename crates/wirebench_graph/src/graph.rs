// SPDX-License-Identifier: MIT OR Apache-2.0
//! Graph data structure containing nodes and connections.

use crate::connection::{Connection, ConnectionId, Endpoint, Joint, JointId};
use crate::element::GraphElement;
use crate::node::{Node, NodeId};
use crate::port::{Port, PortId};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A node graph
///
/// Nodes and connections are arena-stored by identity in insertion order.
/// Joints live inline in their owning connection, so ownership is a strict
/// tree: graph → connection → joint.
///
/// Structural mutation is expected to go through [`CommandUnit`]s
/// (see [`crate::command`]); the methods here are the primitive operations
/// those units are built from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Graph {
    /// Nodes in the graph
    nodes: IndexMap<NodeId, Node>,
    /// Connections between nodes
    connections: IndexMap<ConnectionId, Connection>,
}

impl Graph {
    /// Create a new empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node to the graph
    pub fn add_node(&mut self, node: Node) -> NodeId {
        let id = node.id;
        self.nodes.insert(id, node);
        id
    }

    /// Remove a node
    ///
    /// Fails with [`GraphError::NodeInUse`] while any connection still
    /// references the node. Connections must be removed first; the command
    /// layer owns that cascade.
    pub fn remove_node(&mut self, node_id: NodeId) -> Result<Node, GraphError> {
        if !self.nodes.contains_key(&node_id) {
            return Err(GraphError::NodeNotFound(node_id));
        }
        if let Some(conn) = self.connections.values().find(|c| c.involves_node(node_id)) {
            return Err(GraphError::NodeInUse {
                node: node_id,
                connection: conn.id,
            });
        }
        // Checked above, shift_remove keeps iteration order stable
        self.nodes
            .shift_remove(&node_id)
            .ok_or(GraphError::NodeNotFound(node_id))
    }

    /// Get a node by ID
    pub fn node(&self, node_id: NodeId) -> Option<&Node> {
        self.nodes.get(&node_id)
    }

    /// Get a mutable node by ID
    pub fn node_mut(&mut self, node_id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&node_id)
    }

    /// Get all nodes
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Get all node IDs
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys().copied()
    }

    /// Get the number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Add a connection between two ports
    pub fn connect(
        &mut self,
        source: Endpoint,
        target: Endpoint,
    ) -> Result<ConnectionId, GraphError> {
        let connection = Connection::new(source, target);
        self.insert_connection(connection)
    }

    /// Insert a pre-built connection (e.g. a pasted copy)
    ///
    /// Validates both endpoints against the current graph before inserting.
    pub fn insert_connection(&mut self, connection: Connection) -> Result<ConnectionId, GraphError> {
        let source_port = self.endpoint_port(connection.source)?;
        let target_port = self.endpoint_port(connection.target)?;

        if !source_port.can_connect(target_port) {
            return Err(GraphError::IncompatiblePorts);
        }

        let id = connection.id;
        self.connections.insert(id, connection);
        Ok(id)
    }

    fn endpoint_port(&self, endpoint: Endpoint) -> Result<&Port, GraphError> {
        let node = self
            .nodes
            .get(&endpoint.node)
            .ok_or(GraphError::NodeNotFound(endpoint.node))?;
        node.port(endpoint.port)
            .ok_or(GraphError::PortNotFound(endpoint.port))
    }

    /// Remove a connection and its joints
    pub fn remove_connection(&mut self, connection_id: ConnectionId) -> Option<Connection> {
        self.connections.shift_remove(&connection_id)
    }

    /// Get a connection by ID
    pub fn connection(&self, connection_id: ConnectionId) -> Option<&Connection> {
        self.connections.get(&connection_id)
    }

    /// Get all connections
    pub fn connections(&self) -> impl Iterator<Item = &Connection> {
        self.connections.values()
    }

    /// Get connections involving a node
    pub fn connections_for_node(&self, node_id: NodeId) -> impl Iterator<Item = &Connection> {
        self.connections
            .values()
            .filter(move |c| c.involves_node(node_id))
    }

    /// Get the number of connections
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Find a joint and its owning connection
    pub fn joint(&self, joint_id: JointId) -> Option<(&Connection, &Joint)> {
        self.connections
            .values()
            .find_map(|c| c.joint(joint_id).map(|j| (c, j)))
    }

    /// Check whether an element currently exists in the graph
    pub fn contains(&self, element: GraphElement) -> bool {
        match element {
            GraphElement::Node(id) => self.nodes.contains_key(&id),
            GraphElement::Connection(id) => self.connections.contains_key(&id),
            GraphElement::Joint(id) => self.joint(id).is_some(),
        }
    }
}

/// Error for primitive graph mutations
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// Node not found
    #[error("Node not found: {0:?}")]
    NodeNotFound(NodeId),

    /// Port not found
    #[error("Port not found: {0:?}")]
    PortNotFound(PortId),

    /// Ports have the same direction
    #[error("Incompatible port directions")]
    IncompatiblePorts,

    /// Node still referenced by a connection
    #[error("Node {node:?} still referenced by connection {connection:?}")]
    NodeInUse {
        /// Node being removed
        node: NodeId,
        /// Connection still attached to it
        connection: ConnectionId,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::Port;

    fn two_connected_nodes() -> (Graph, NodeId, NodeId, ConnectionId) {
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
    fn test_connect_validates_endpoints() {
        let mut graph = Graph::new();
        let port = Port::output("out");
        let node = Node::new("A").with_port(port.clone());
        let node_id = graph.add_node(node);

        let err = graph
            .connect(
                Endpoint::new(node_id, port.id),
                Endpoint::new(NodeId::new(), port.id),
            )
            .unwrap_err();
        assert!(matches!(err, GraphError::NodeNotFound(_)));
    }

    #[test]
    fn test_connect_rejects_same_direction() {
        let mut graph = Graph::new();
        let p1 = Port::output("a");
        let p2 = Port::output("b");
        let n1 = graph.add_node(Node::new("A").with_port(p1.clone()));
        let n2 = graph.add_node(Node::new("B").with_port(p2.clone()));

        let err = graph
            .connect(Endpoint::new(n1, p1.id), Endpoint::new(n2, p2.id))
            .unwrap_err();
        assert!(matches!(err, GraphError::IncompatiblePorts));
    }

    #[test]
    fn test_remove_node_refuses_while_connected() {
        let (mut graph, a, _, conn) = two_connected_nodes();
        let err = graph.remove_node(a).unwrap_err();
        assert!(matches!(err, GraphError::NodeInUse { .. }));

        graph.remove_connection(conn).unwrap();
        graph.remove_node(a).unwrap();
        assert_eq!(graph.node_count(), 1);
    }

    #[test]
    fn test_contains_all_variants() {
        let (mut graph, a, _, conn_id) = two_connected_nodes();
        assert!(graph.contains(GraphElement::Node(a)));
        assert!(graph.contains(GraphElement::Connection(conn_id)));
        assert!(!graph.contains(GraphElement::Joint(JointId::new())));

        // Joints are found through their owning connection, and disappear
        // with it.
        let joint = Joint::new(5.0, 5.0);
        let joint_id = joint.id;
        let conn = graph.remove_connection(conn_id).unwrap().with_joint(joint);
        graph.insert_connection(conn).unwrap();
        assert!(graph.contains(GraphElement::Joint(joint_id)));

        graph.remove_connection(conn_id).unwrap();
        assert!(!graph.contains(GraphElement::Joint(joint_id)));
    }
}
