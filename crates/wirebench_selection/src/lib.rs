// SPDX-License-Identifier: MIT OR Apache-2.0
//! Selection and clipboard core for the Wirebench editor.
//!
//! This crate is the layer between UI interaction and the graph model: it
//! tracks which nodes, connections and joints are selected, and turns
//! cut/copy/paste/delete gestures into topology-safe, atomic
//! [`CommandUnit`](wirebench_graph::CommandUnit)s.
//!
//! ## Architecture
//!
//! - [`SelectionSet`] — three insertion-ordered, duplicate-free sets with
//!   a unified view and change notifications
//! - [`Clipboard`] — detached snapshot of the copied sub-graph (internal
//!   connections only)
//! - [`builder`] — delete/paste builders producing pending change-sets the
//!   caller may extend before committing
//! - [`SelectionManager`] — the facade the editor calls
//!
//! Everything is synchronous and single-threaded; the graph is passed into
//! each call and only mutated through committed command units.

pub mod builder;
pub mod clipboard;
pub mod error;
pub mod manager;
pub mod properties;
pub mod selection;

pub use builder::{PendingDelete, PendingPaste};
pub use clipboard::Clipboard;
pub use error::SelectionError;
pub use manager::SelectionManager;
pub use properties::{BoxSelectMode, EditorProperties, Rect};
pub use selection::{SelectionEvent, SelectionSet};
