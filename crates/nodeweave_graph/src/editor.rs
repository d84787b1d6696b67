// SPDX-License-Identifier: MIT OR Apache-2.0
//! Event dispatch and drawing for a whole graph.

use crate::graph::Graph;
use crate::input::{EventOutcome, PointerEvent};
use crate::interaction::InteractionState;
use crate::render::{GraphRenderer, EDGE_COLOR};

/// A graph together with the interaction state driving it
#[derive(Debug, Clone, Default)]
pub struct GraphEditor {
    /// The edited graph
    pub graph: Graph,
    /// Selection and connect-mode state
    pub interaction: InteractionState,
}

impl GraphEditor {
    /// Create an editor for `graph`, starting idle
    pub fn new(graph: Graph) -> Self {
        Self {
            graph,
            interaction: InteractionState::new(),
        }
    }

    /// Deliver one pointer event to the graph.
    ///
    /// Every node gets a chance to react, in insertion order, until one of
    /// them consumes the event. Returns whether the event was consumed; a
    /// consumed event must not reach the host's default handling.
    pub fn handle_event(&mut self, event: PointerEvent) -> bool {
        match event {
            PointerEvent::Down { position, .. } | PointerEvent::Up { position } => {
                self.interaction.set_pointer(position);
            }
            PointerEvent::Drag { delta } => self.interaction.move_pointer(delta),
            PointerEvent::Repaint => return false,
        }

        let mut outcome = EventOutcome::Ignored;
        for node in self.graph.nodes_mut() {
            outcome = node.handle_pointer_event(&event, &mut self.interaction);
            if outcome.is_consumed() {
                break;
            }
        }

        if let EventOutcome::Connect { source, target } = outcome {
            if let Err(e) = self.graph.connect(source, target) {
                tracing::warn!("Failed to connect nodes: {e}");
            }
        }

        // A connect gesture released over empty canvas (or over its own
        // source) ends without an edge.
        if !outcome.is_consumed()
            && matches!(event, PointerEvent::Up { .. })
            && self.interaction.is_connecting()
        {
            tracing::debug!("Connection released without a target");
            self.interaction.clear();
            return true;
        }

        outcome.is_consumed()
    }

    /// Draw every edge, then every node on top.
    pub fn render(&self, renderer: &mut dyn GraphRenderer) {
        for (from, to) in self.graph.edges() {
            if let (Some(from), Some(to)) = (self.graph.node(from), self.graph.node(to)) {
                renderer.draw_connection(from.position(), to.position(), EDGE_COLOR);
            }
        }

        for node in self.graph.nodes() {
            node.render(renderer, &self.interaction);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::InteractionMode;
    use crate::node::NodeId;
    use crate::render::tests::{DrawCall, RecordingRenderer};
    use egui::{Pos2, Vec2};

    fn two_node_editor() -> (GraphEditor, NodeId, NodeId) {
        let mut graph = Graph::new("Test");
        let a = graph.add_node("A", Pos2::new(0.0, 0.0));
        let b = graph.add_node("B", Pos2::new(200.0, 0.0));
        (GraphEditor::new(graph), a, b)
    }

    fn down(x: f32, y: f32, click_count: u32) -> PointerEvent {
        PointerEvent::Down {
            position: Pos2::new(x, y),
            click_count,
        }
    }

    fn up(x: f32, y: f32) -> PointerEvent {
        PointerEvent::Up {
            position: Pos2::new(x, y),
        }
    }

    #[test]
    fn test_double_click_then_release_on_other_node_connects() {
        let (mut editor, a, b) = two_node_editor();

        assert!(editor.handle_event(down(0.0, 0.0, 2)));
        assert_eq!(editor.interaction.mode(), InteractionMode::Connecting(a));

        assert!(editor.handle_event(PointerEvent::Drag {
            delta: Vec2::new(150.0, 5.0)
        }));
        assert_eq!(editor.graph.node(a).unwrap().position(), Pos2::ZERO);

        assert!(editor.handle_event(up(205.0, 5.0)));
        assert!(editor.interaction.is_idle());
        assert_eq!(editor.graph.node(a).unwrap().targets(), &[b]);
        assert!(editor.graph.node(b).unwrap().targets().is_empty());
    }

    #[test]
    fn test_drag_moves_selected_node_by_delta() {
        let (mut editor, a, b) = two_node_editor();
        editor.graph.connect(a, b).unwrap();

        assert!(editor.handle_event(down(0.0, 0.0, 1)));
        assert!(editor.handle_event(PointerEvent::Drag {
            delta: Vec2::new(12.5, -7.0)
        }));
        assert!(editor.handle_event(up(12.5, -7.0)));

        assert_eq!(editor.graph.node(a).unwrap().position(), Pos2::new(12.5, -7.0));
        assert_eq!(editor.graph.edges().collect::<Vec<_>>(), vec![(a, b)]);
        assert!(editor.interaction.is_idle());
    }

    #[test]
    fn test_release_while_idle_is_not_consumed() {
        let (mut editor, _, _) = two_node_editor();

        assert!(!editor.handle_event(up(0.0, 0.0)));
        assert!(editor.interaction.is_idle());
        assert_eq!(editor.graph.edge_count(), 0);
    }

    #[test]
    fn test_press_on_empty_canvas_is_not_consumed() {
        let (mut editor, _, _) = two_node_editor();

        assert!(!editor.handle_event(down(100.0, 100.0, 1)));
        assert!(editor.interaction.is_idle());
    }

    #[test]
    fn test_connect_release_on_empty_canvas_reverts_to_idle() {
        let (mut editor, _, _) = two_node_editor();

        editor.handle_event(down(0.0, 0.0, 2));
        assert!(editor.handle_event(up(100.0, 300.0)));

        assert!(editor.interaction.is_idle());
        assert_eq!(editor.graph.edge_count(), 0);
    }

    #[test]
    fn test_connect_release_on_source_creates_no_self_edge() {
        let (mut editor, a, _) = two_node_editor();

        editor.handle_event(down(0.0, 0.0, 2));
        assert!(editor.handle_event(up(3.0, 3.0)));

        assert!(editor.interaction.is_idle());
        assert!(!editor.graph.node(a).unwrap().is_connected_to(a));
    }

    #[test]
    fn test_repeated_connect_gesture_keeps_single_edge() {
        let (mut editor, a, b) = two_node_editor();

        for _ in 0..2 {
            editor.handle_event(down(0.0, 0.0, 2));
            editor.handle_event(up(200.0, 0.0));
        }

        assert_eq!(editor.graph.edges().collect::<Vec<_>>(), vec![(a, b)]);
    }

    #[test]
    fn test_repaint_is_never_consumed() {
        let (mut editor, _, _) = two_node_editor();
        editor.handle_event(down(0.0, 0.0, 1));

        assert!(!editor.handle_event(PointerEvent::Repaint));
    }

    #[test]
    fn test_independent_editors_do_not_share_selection() {
        let (mut first, _, _) = two_node_editor();
        let (second, _, _) = two_node_editor();

        first.handle_event(down(0.0, 0.0, 1));
        assert!(!first.interaction.is_idle());
        assert!(second.interaction.is_idle());
    }

    #[test]
    fn test_render_draws_edges_below_nodes_and_pending_line() {
        let (mut editor, a, b) = two_node_editor();
        editor.graph.connect(a, b).unwrap();

        editor.handle_event(down(200.0, 0.0, 2));
        editor.handle_event(PointerEvent::Drag {
            delta: Vec2::new(0.0, 60.0),
        });

        let mut renderer = RecordingRenderer::default();
        editor.render(&mut renderer);

        let a_bounds = editor.graph.node(a).unwrap().bounds();
        let b_bounds = editor.graph.node(b).unwrap().bounds();
        assert_eq!(
            renderer.calls,
            vec![
                DrawCall::Connection {
                    from: Pos2::new(0.0, 0.0),
                    to: Pos2::new(200.0, 0.0),
                    color: EDGE_COLOR,
                },
                DrawCall::Box {
                    bounds: a_bounds,
                    label: "A".to_string(),
                },
                DrawCall::Box {
                    bounds: b_bounds,
                    label: "B".to_string(),
                },
                DrawCall::Connection {
                    from: Pos2::new(200.0, 0.0),
                    to: Pos2::new(200.0, 60.0),
                    color: crate::render::PENDING_CONNECTION_COLOR,
                },
            ]
        );
    }
}
