// SPDX-License-Identifier: MIT OR Apache-2.0
//! Graph model for the Wirebench editor.
//!
//! This crate holds the structural data model the editor operates on:
//! - Nodes with typed ports
//! - Connections between ports, owning their bend-point joints inline
//! - An arena [`Graph`] keyed by stable `uuid` identities
//! - [`CommandUnit`]: atomic, appendable batches of structural mutations
//!
//! Interaction layers (selection, clipboard, rendering) never mutate the
//! graph field-by-field; they build command units and apply them as a
//! whole, which is what keeps undo/redo and topology consistency tractable.

pub mod command;
pub mod connection;
pub mod element;
pub mod graph;
pub mod node;
pub mod port;

pub use command::{CommandError, CommandUnit, GraphOp};
pub use connection::{Connection, ConnectionId, Endpoint, Joint, JointId};
pub use element::GraphElement;
pub use graph::{Graph, GraphError};
pub use node::{Node, NodeId};
pub use port::{Port, PortDirection, PortId};
