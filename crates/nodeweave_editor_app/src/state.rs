// SPDX-License-Identifier: MIT OR Apache-2.0
//! Editor state shared by the panels.

use crate::config::{BodySettings, EditorConfig};
use nodeweave_graph::GraphEditor;

/// A spring-mounted body whose altitude oscillates around zero
#[derive(Debug, Clone, PartialEq)]
pub struct SimulatedBody {
    /// Stable owner id for property tracking
    pub id: u64,
    /// Display name
    pub name: String,
    /// Current altitude
    pub altitude: f32,
    /// Current vertical speed
    pub speed: f32,
    /// Spring stiffness
    pub stiffness: f32,
}

impl SimulatedBody {
    /// Create a body at rest at its configured altitude
    pub fn from_settings(settings: &BodySettings) -> Self {
        Self {
            id: settings.id,
            name: settings.name.clone(),
            altitude: settings.altitude,
            speed: 0.0,
            stiffness: settings.stiffness,
        }
    }

    /// Advance the simulation by `dt` seconds (semi-implicit Euler)
    pub fn step(&mut self, dt: f32) {
        self.speed -= self.stiffness * self.altitude * dt;
        self.altitude += self.speed * dt;
    }
}

/// Global editor state
pub struct EditorState {
    /// The node graph and its interaction state
    pub graph_editor: GraphEditor,
    /// Simulated bodies shown in the inspector
    pub bodies: Vec<SimulatedBody>,
    /// Whether the simulation is running
    pub simulating: bool,
    /// Whether the graph has been edited on the canvas
    pub dirty: bool,
}

impl EditorState {
    /// Build the initial state from the configuration
    pub fn from_config(config: &EditorConfig) -> Self {
        Self {
            graph_editor: GraphEditor::new(config.scene.build_graph()),
            bodies: config.bodies.iter().map(SimulatedBody::from_settings).collect(),
            simulating: false,
            dirty: false,
        }
    }

    /// Advance every body while the simulation runs
    pub fn update(&mut self, dt: f32) {
        if !self.simulating {
            return;
        }
        for body in &mut self.bodies {
            body.step(dt);
        }
    }

    /// Mark the graph as modified
    pub fn mark_dirty(&mut self) {
        if !self.dirty {
            tracing::debug!("Graph '{}' modified", self.graph_editor.graph.name);
        }
        self.dirty = true;
    }

    /// Start or stop the simulation
    pub fn set_simulating(&mut self, simulating: bool) {
        if self.simulating != simulating {
            tracing::info!("Simulation {}", if simulating { "started" } else { "stopped" });
        }
        self.simulating = simulating;
    }
}
