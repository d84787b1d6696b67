// SPDX-License-Identifier: MIT OR Apache-2.0
//! Inspector panel - graph overview and simulated body properties.

use super::property_drawer::{draw_tracked_f32, PropertyKey, PropertyTracker};
use crate::state::EditorState;
use nodeweave_graph::{InteractionMode, Node};

/// The inspector panel
pub struct InspectorPanel {
    /// Value history of tracked properties
    tracker: PropertyTracker,
}

impl InspectorPanel {
    /// Create a new inspector panel
    pub fn new() -> Self {
        Self {
            tracker: PropertyTracker::new(),
        }
    }

    /// Render the inspector panel
    pub fn ui(&mut self, ui: &mut egui::Ui, state: &mut EditorState) {
        egui::ScrollArea::vertical().show(ui, |ui| {
            self.graph_section(ui, state);
            ui.separator();
            self.bodies_section(ui, state);
        });
    }

    fn graph_section(&self, ui: &mut egui::Ui, state: &EditorState) {
        let editor = &state.graph_editor;

        let marker = if state.dirty { " *" } else { "" };
        egui::CollapsingHeader::new(format!("Graph: {}{marker}", editor.graph.name))
            .id_salt("graph_section")
            .default_open(true)
            .show(ui, |ui| {
                let mode = match editor.interaction.mode() {
                    InteractionMode::Idle => "Idle",
                    InteractionMode::Selected(_) => "Moving",
                    InteractionMode::Connecting(_) => "Connecting",
                };
                ui.label(format!("Mode: {mode}"));

                egui::Grid::new("graph_nodes").striped(true).show(ui, |ui| {
                    for node in editor.graph.nodes() {
                        let active = editor.interaction.active_selection() == Some(node.id());
                        let name = egui::RichText::new(node.name());
                        ui.label(if active { name.strong() } else { name });

                        let pos = node.position();
                        ui.label(format!("({:.0}, {:.0})", pos.x, pos.y));

                        let targets: Vec<&str> = node
                            .targets()
                            .iter()
                            .filter_map(|id| editor.graph.node(*id))
                            .map(Node::name)
                            .collect();
                        if targets.is_empty() {
                            ui.weak("-");
                        } else {
                            ui.label(format!("-> {}", targets.join(", ")));
                        }
                        ui.end_row();
                    }
                });
            });
    }

    fn bodies_section(&mut self, ui: &mut egui::Ui, state: &mut EditorState) {
        let live = state.simulating;

        if live && !self.tracker.is_empty() {
            ui.weak(format!("Tracking {} properties", self.tracker.len()));
        }

        for body in &mut state.bodies {
            egui::CollapsingHeader::new(format!("{} #{}", body.name, body.id))
                .default_open(true)
                .show(ui, |ui| {
                    let altitude = PropertyKey::new(body.id, "altitude");
                    let speed = PropertyKey::new(body.id, "speed");
                    let stiffness = PropertyKey::new(body.id, "stiffness");

                    let tracker = &mut self.tracker;
                    draw_tracked_f32(ui, tracker, &altitude, &mut body.altitude, "Altitude", live);
                    draw_tracked_f32(ui, tracker, &speed, &mut body.speed, "Speed", live);
                    let edited = draw_tracked_f32(
                        ui,
                        tracker,
                        &stiffness,
                        &mut body.stiffness,
                        "Stiffness",
                        live,
                    );
                    if edited.is_changed() {
                        tracing::debug!("{} stiffness set to {}", body.name, body.stiffness);
                    }
                });
        }

        if !live {
            ui.weak("Start the simulation to track values.");
        }
    }
}

impl Default for InspectorPanel {
    fn default() -> Self {
        Self::new()
    }
}
