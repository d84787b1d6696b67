// SPDX-License-Identifier: MIT OR Apache-2.0
//! Shared panel type definitions.

/// Panel types that can be docked in the editor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelType {
    /// Node graph canvas
    Graph,
    /// Graph overview and property inspector
    Inspector,
}

impl PanelType {
    /// Get the display name for this panel type
    pub fn name(&self) -> &'static str {
        match self {
            Self::Graph => "Graph",
            Self::Inspector => "Inspector",
        }
    }

    /// Get the icon for this panel type
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Graph => "\u{1f500}",     // branch
            Self::Inspector => "\u{2699}", // cog
        }
    }
}
