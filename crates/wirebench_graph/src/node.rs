// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node definitions for the graph model.

use crate::port::{Port, PortId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub Uuid);

impl NodeId {
    /// Create a new random node ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

/// A node instance in the graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Unique instance ID
    pub id: NodeId,
    /// Display name
    pub name: String,
    /// Position in the graph UI
    pub position: [f32; 2],
    /// Size in the graph UI
    pub size: [f32; 2],
    /// Connection ports
    pub ports: Vec<Port>,
}

impl Node {
    /// Create a new node with the given name and no ports
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: NodeId::new(),
            name: name.into(),
            position: [0.0, 0.0],
            size: [120.0, 60.0],
            ports: Vec::new(),
        }
    }

    /// Set the position
    pub fn with_position(mut self, x: f32, y: f32) -> Self {
        self.position = [x, y];
        self
    }

    /// Set the size
    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.size = [width, height];
        self
    }

    /// Add a port
    pub fn with_port(mut self, port: Port) -> Self {
        self.ports.push(port);
        self
    }

    /// Get a port by ID
    pub fn port(&self, port_id: PortId) -> Option<&Port> {
        self.ports.iter().find(|p| p.id == port_id)
    }

    /// Get all ports
    pub fn ports(&self) -> impl Iterator<Item = &Port> {
        self.ports.iter()
    }

    /// Axis-aligned bounds of this node as (min, max) corners
    pub fn bounds(&self) -> ([f32; 2], [f32; 2]) {
        (
            self.position,
            [
                self.position[0] + self.size[0],
                self.position[1] + self.size[1],
            ],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_port_lookup() {
        let port = Port::input("in");
        let port_id = port.id;
        let node = Node::new("Add").with_port(port).with_port(Port::output("out"));
        assert_eq!(node.port(port_id).map(|p| p.name.as_str()), Some("in"));
        assert!(node.port(PortId::new()).is_none());
    }

    #[test]
    fn test_node_bounds() {
        let node = Node::new("A").with_position(10.0, 20.0).with_size(100.0, 50.0);
        assert_eq!(node.bounds(), ([10.0, 20.0], [110.0, 70.0]));
    }
}
