// SPDX-License-Identifier: MIT OR Apache-2.0
//! Polymorphic element handles.

use crate::connection::{ConnectionId, JointId};
use crate::node::NodeId;
use serde::{Deserialize, Serialize};

/// A handle to any selectable graph element
///
/// This is the identity the selection API is polymorphic over. Handles are
/// stable and cheap to copy; they say nothing about whether the element
/// still exists in a [`Graph`](crate::Graph).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GraphElement {
    /// A node
    Node(NodeId),
    /// A connection
    Connection(ConnectionId),
    /// A joint on a connection
    Joint(JointId),
}

impl From<NodeId> for GraphElement {
    fn from(id: NodeId) -> Self {
        Self::Node(id)
    }
}

impl From<ConnectionId> for GraphElement {
    fn from(id: ConnectionId) -> Self {
        Self::Connection(id)
    }
}

impl From<JointId> for GraphElement {
    fn from(id: JointId) -> Self {
        Self::Joint(id)
    }
}
