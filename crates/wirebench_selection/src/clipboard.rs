// SPDX-License-Identifier: MIT OR Apache-2.0
//! Clipboard buffer for cut/copy/paste.

use serde::{Deserialize, Serialize};
use wirebench_graph::{Connection, Graph, Node, NodeId};

/// A detached sub-graph snapshot held between cut/copy and paste
///
/// Holds copies of the captured nodes and only the connections whose both
/// endpoints lie inside the captured node set. The snapshot is immutable
/// until the next capture replaces it; pasting reads it non-destructively,
/// so the same buffer can be pasted any number of times.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Clipboard {
    nodes: Vec<Node>,
    connections: Vec<Connection>,
}

impl Clipboard {
    /// Create an empty clipboard
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot the given nodes and their internal connections
    ///
    /// Connections with only one endpoint inside `node_ids` are dropped; a
    /// captured connection must be able to re-resolve both endpoints on
    /// paste.
    pub fn capture(graph: &Graph, node_ids: impl IntoIterator<Item = NodeId>) -> Self {
        let mut nodes = Vec::new();
        for id in node_ids {
            if let Some(node) = graph.node(id) {
                nodes.push(node.clone());
            }
        }

        let captured = |id: NodeId| nodes.iter().any(|n| n.id == id);
        let connections = graph
            .connections()
            .filter(|c| captured(c.source.node) && captured(c.target.node))
            .cloned()
            .collect();

        Self { nodes, connections }
    }

    /// Captured node copies
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Captured internal connections
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// Check if the buffer holds nothing
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wirebench_graph::{Endpoint, Node, Port};

    #[test]
    fn test_capture_internal_connections_only() {
        let mut graph = Graph::new();
        let a_out = Port::output("out");
        let b_in = Port::input("in");
        let c_out = Port::output("out");
        let d_in = Port::input("in");
        let (a_out_id, b_in_id, c_out_id, d_in_id) = (a_out.id, b_in.id, c_out.id, d_in.id);

        let a = graph.add_node(Node::new("A").with_port(a_out));
        let b = graph.add_node(Node::new("B").with_port(b_in));
        let c = graph.add_node(Node::new("C").with_port(c_out));
        let d = graph.add_node(Node::new("D").with_port(d_in));
        let ab = graph
            .connect(Endpoint::new(a, a_out_id), Endpoint::new(b, b_in_id))
            .unwrap();
        graph
            .connect(Endpoint::new(c, c_out_id), Endpoint::new(d, d_in_id))
            .unwrap();

        // A and B are connected to each other; C's connection leaves the
        // captured set through D and must be dropped.
        let clipboard = Clipboard::capture(&graph, [a, b, c]);
        assert_eq!(clipboard.nodes().len(), 3);
        assert_eq!(clipboard.connections().len(), 1);
        assert_eq!(clipboard.connections()[0].id, ab);
    }

    #[test]
    fn test_capture_skips_missing_nodes() {
        let graph = Graph::new();
        let clipboard = Clipboard::capture(&graph, [NodeId::new()]);
        assert!(clipboard.is_empty());
    }
}
