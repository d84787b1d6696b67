// SPDX-License-Identifier: MIT OR Apache-2.0
//! Interactive node graph for `Nodeweave`.
//!
//! A graph is a set of square, named nodes that can be dragged around a 2D
//! canvas and connected to each other with directed edges.
//!
//! ## Interaction
//!
//! - Press a node and drag to move it; release to drop it.
//! - Double-click a node and drag to draw a connection; release over another
//!   node to connect the two.
//!
//! ## Architecture
//!
//! - [`Node`] owns its position and outgoing edges and runs its share of the
//!   interaction state machine.
//! - [`InteractionState`] holds the single active selection of one editor.
//! - [`GraphEditor`] dispatches [`PointerEvent`]s to the nodes and draws them
//!   through a [`GraphRenderer`].
//! - [`ui::GraphCanvas`] hosts an editor inside an egui `Ui`.

pub mod node;
pub mod graph;
pub mod interaction;
pub mod input;
pub mod editor;
pub mod render;
pub mod ui;

pub use node::{Node, NodeId, NODE_SIZE};
pub use graph::{Graph, GraphError};
pub use interaction::{InteractionMode, InteractionState};
pub use input::{EventOutcome, PointerEvent};
pub use editor::GraphEditor;
pub use render::{connection_curve, CubicBezier, GraphRenderer, PainterRenderer};
pub use ui::{CanvasInput, GraphCanvas};
