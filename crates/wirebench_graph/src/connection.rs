// SPDX-License-Identifier: MIT OR Apache-2.0
//! Connection (edge) and joint definitions for the graph.

use crate::node::NodeId;
use crate::port::PortId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConnectionId(pub Uuid);

impl ConnectionId {
    /// Create a new random connection ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

/// Unique identifier for a joint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JointId(pub Uuid);

impl JointId {
    /// Create a new random joint ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for JointId {
    fn default() -> Self {
        Self::new()
    }
}

/// A bend point on a connection
///
/// Joints are owned by exactly one connection and stored inline in it. They
/// have no independent lifecycle: removing the connection removes its joints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Joint {
    /// Unique joint ID
    pub id: JointId,
    /// Position in the graph UI
    pub position: [f32; 2],
}

impl Joint {
    /// Create a new joint at the given position
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            id: JointId::new(),
            position: [x, y],
        }
    }
}

/// A (node, port) pair referenced by a connection end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    /// Node the endpoint attaches to
    pub node: NodeId,
    /// Port on that node
    pub port: PortId,
}

impl Endpoint {
    /// Create a new endpoint
    pub fn new(node: NodeId, port: PortId) -> Self {
        Self { node, port }
    }
}

/// A connection between two node ports
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Connection {
    /// Unique connection ID
    pub id: ConnectionId,
    /// Source endpoint
    pub source: Endpoint,
    /// Target endpoint
    pub target: Endpoint,
    /// Bend points, ordered from source to target
    pub joints: Vec<Joint>,
}

impl Connection {
    /// Create a new connection without joints
    pub fn new(source: Endpoint, target: Endpoint) -> Self {
        Self {
            id: ConnectionId::new(),
            source,
            target,
            joints: Vec::new(),
        }
    }

    /// Add a joint
    pub fn with_joint(mut self, joint: Joint) -> Self {
        self.joints.push(joint);
        self
    }

    /// Check if this connection involves a specific node
    pub fn involves_node(&self, node_id: NodeId) -> bool {
        self.source.node == node_id || self.target.node == node_id
    }

    /// Get a joint by ID
    pub fn joint(&self, joint_id: JointId) -> Option<&Joint> {
        self.joints.iter().find(|j| j.id == joint_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::PortId;

    #[test]
    fn test_involves_node() {
        let a = NodeId::new();
        let b = NodeId::new();
        let conn = Connection::new(
            Endpoint::new(a, PortId::new()),
            Endpoint::new(b, PortId::new()),
        );
        assert!(conn.involves_node(a));
        assert!(conn.involves_node(b));
        assert!(!conn.involves_node(NodeId::new()));
    }

    #[test]
    fn test_joint_lookup() {
        let joint = Joint::new(1.0, 2.0);
        let joint_id = joint.id;
        let conn = Connection::new(
            Endpoint::new(NodeId::new(), PortId::new()),
            Endpoint::new(NodeId::new(), PortId::new()),
        )
        .with_joint(joint);
        assert_eq!(conn.joint(joint_id).map(|j| j.position), Some([1.0, 2.0]));
        assert!(conn.joint(JointId::new()).is_none());
    }
}
