// SPDX-License-Identifier: MIT OR Apache-2.0
//! Editor-wide interaction state shared by every node of one graph.

use crate::node::NodeId;
use egui::{Pos2, Vec2};

/// What the pointer gesture in progress is doing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionMode {
    /// No active selection
    #[default]
    Idle,
    /// A node was pressed and drags move it
    Selected(NodeId),
    /// A node was double-clicked and drags paint a new connection from it
    Connecting(NodeId),
}

/// Selection and connect-mode state for one graph editor
///
/// Each editor owns its own instance and hands it to the nodes while
/// dispatching an event, so independent graphs never share a selection.
#[derive(Debug, Clone, Default)]
pub struct InteractionState {
    mode: InteractionMode,
    /// Last known pointer position (canvas space)
    pointer: Pos2,
}

impl InteractionState {
    /// Create an idle state
    pub fn new() -> Self {
        Self::default()
    }

    /// Current mode
    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    /// Whether no node is selected
    pub fn is_idle(&self) -> bool {
        self.mode == InteractionMode::Idle
    }

    /// The node targeted by the gesture in progress, if any
    pub fn active_selection(&self) -> Option<NodeId> {
        match self.mode {
            InteractionMode::Idle => None,
            InteractionMode::Selected(id) | InteractionMode::Connecting(id) => Some(id),
        }
    }

    /// Whether the active selection is in connect mode
    pub fn is_connecting(&self) -> bool {
        matches!(self.mode, InteractionMode::Connecting(_))
    }

    /// Source node of the connection being drawn, if any
    pub fn connecting_from(&self) -> Option<NodeId> {
        match self.mode {
            InteractionMode::Connecting(id) => Some(id),
            _ => None,
        }
    }

    /// Make `node` the active selection, optionally in connect mode
    pub fn select(&mut self, node: NodeId, connect: bool) {
        self.mode = if connect {
            InteractionMode::Connecting(node)
        } else {
            InteractionMode::Selected(node)
        };
        tracing::debug!("Interaction mode -> {:?}", self.mode);
    }

    /// Drop the active selection (and with it connect mode)
    pub fn clear(&mut self) {
        if self.mode != InteractionMode::Idle {
            tracing::debug!("Interaction mode -> Idle (was {:?})", self.mode);
        }
        self.mode = InteractionMode::Idle;
    }

    /// Last known pointer position
    pub fn pointer(&self) -> Pos2 {
        self.pointer
    }

    /// Record the pointer position reported by the host
    pub fn set_pointer(&mut self, pointer: Pos2) {
        self.pointer = pointer;
    }

    pub(crate) fn move_pointer(&mut self, delta: Vec2) {
        self.pointer += delta;
    }
}
