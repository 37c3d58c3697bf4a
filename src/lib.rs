//! # Slint Diagram Gestures
//!
//! The selection and manipulation engine behind a class-diagram editor: it
//! turns pointer and keyboard gestures on a 2-D canvas into selection changes,
//! rubber-band (marquee) selection, drag/resize gestures and directional
//! keyboard navigation between nodes.
//!
//! ## Features
//!
//! - **Authoritative selection** - [`SelectionSet`] keeps every node's
//!   `selected` flag in lock-step with membership and notifies listeners with
//!   immutable snapshots
//! - **Marquee selection** - [`Marquee`] recomputes the covered nodes on every
//!   drag step, in any drag direction
//! - **All-or-nothing moves** - a drag step that would push any selected node
//!   past the top or left edge is rejected for the whole selection
//! - **Keyboard navigation** - arrow keys jump to the nearest node in that
//!   direction via a pluggable [`TraverseStrategy`]
//! - **Slint integration** - [`DiagramSession`] provides ready-made callbacks
//!   and a live `VecModel` of selected ids
//!
//! ## Core Types
//!
//! - [`Diagram`] / [`DiagramNode`] - the node collection in render order
//! - [`GestureController`] - the press/drag/release/click/key state machine
//! - [`GestureHandler`] - application hooks for double-clicks, menus and keys
//! - [`EngineConfig`] - grid, handle and minimum-size settings
//!
//! Coordinates use the platform convention: origin top-left, y grows downward.

pub mod config;
pub mod controller;
pub mod error;
pub mod geometry;
pub mod handler;
pub mod input;
pub mod marquee;
pub mod node;
pub mod selection;
pub mod session;
pub mod traverse;

pub use config::EngineConfig;
pub use controller::{GestureController, GestureState};
pub use error::{Error, Result};
pub use geometry::{Point, Rect};
pub use handler::{GestureHandler, NoopHandler};
pub use hit_test::{find_node_at, nodes_in_selection_box, NodeGeometry, SimpleNodeGeometry};
pub use input::{Key, KeyModifiers, PointerModifiers};
pub use marquee::Marquee;
pub use node::{Diagram, DiagramNode, NodeId};
pub use selection::{ListenerId, SelectionListener, SelectionSet, SelectionSnapshot};
pub use session::DiagramSession;
pub use traverse::{Direction, NearestInDirection, TraverseStrategy};
