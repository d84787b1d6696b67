// SPDX-License-Identifier: MIT OR Apache-2.0
//! Pointer events delivered to the graph and the result of handling them.

use crate::node::NodeId;
use egui::{Pos2, Vec2};

/// A raw pointer event in canvas space
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Primary button pressed
    Down {
        /// Press position
        position: Pos2,
        /// 1 for a single click, 2 for a double click, and so on
        click_count: u32,
    },
    /// Pointer moved while the primary button is held
    Drag {
        /// Movement since the previous pointer position
        delta: Vec2,
    },
    /// Primary button released
    Up {
        /// Release position
        position: Pos2,
    },
    /// Redraw request
    Repaint,
}

impl PointerEvent {
    /// Position carried by the event, if it has one
    pub fn position(&self) -> Option<Pos2> {
        match self {
            Self::Down { position, .. } | Self::Up { position } => Some(*position),
            Self::Drag { .. } | Self::Repaint => None,
        }
    }
}

/// What a node did with an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    /// The node did not react; keep offering the event
    Ignored,
    /// The node handled the event
    Consumed,
    /// The node handled the event and asks for an edge to be created
    Connect {
        /// Node the connect gesture started on
        source: NodeId,
        /// Node the gesture was released over
        target: NodeId,
    },
}

impl EventOutcome {
    /// Whether the event must not reach anyone else
    pub fn is_consumed(&self) -> bool {
        !matches!(self, Self::Ignored)
    }
}
