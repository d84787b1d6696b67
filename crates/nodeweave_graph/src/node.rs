// SPDX-License-Identifier: MIT OR Apache-2.0
//! Graph nodes and their per-node interaction handling.

use crate::input::{EventOutcome, PointerEvent};
use crate::interaction::{InteractionMode, InteractionState};
use crate::render::{GraphRenderer, PENDING_CONNECTION_COLOR};
use egui::{Pos2, Rect, Vec2};
use uuid::Uuid;

/// Edge length of the square every node occupies
pub const NODE_SIZE: f32 = 50.0;

/// Unique identifier for a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub Uuid);

impl NodeId {
    /// Create a new random node ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

/// A node in the graph
///
/// The node's bounds are always derived from its center position, so moving
/// a node can never leave a stale hit area behind.
#[derive(Debug, Clone)]
pub struct Node {
    id: NodeId,
    name: String,
    position: Pos2,
    targets: Vec<NodeId>,
}

impl Node {
    /// Create a node centered on `position` with no outgoing edges
    pub fn new(name: impl Into<String>, position: Pos2) -> Self {
        Self {
            id: NodeId::new(),
            name: name.into(),
            position,
            targets: Vec::new(),
        }
    }

    /// Unique instance ID
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Display label
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Center of the node
    pub fn position(&self) -> Pos2 {
        self.position
    }

    /// Move the node so it is centered on `position`
    pub fn set_position(&mut self, position: Pos2) {
        self.position = position;
    }

    /// Move the node by `delta`
    pub fn translate(&mut self, delta: Vec2) {
        self.set_position(self.position + delta);
    }

    /// Square hit area centered on the node position
    pub fn bounds(&self) -> Rect {
        Rect::from_center_size(self.position, Vec2::splat(NODE_SIZE))
    }

    /// Whether `point` lies inside the node bounds (edges included)
    pub fn contains_point(&self, point: Pos2) -> bool {
        self.bounds().contains(point)
    }

    /// Nodes this node connects to, in connection order
    pub fn targets(&self) -> &[NodeId] {
        &self.targets
    }

    /// Whether an edge to `target` exists
    pub fn is_connected_to(&self, target: NodeId) -> bool {
        self.targets.contains(&target)
    }

    /// Add an edge to `target`.
    ///
    /// Returns `false` if the edge already existed. Cycles and self-edges are
    /// not checked here.
    pub fn connect_to(&mut self, target: NodeId) -> bool {
        if self.is_connected_to(target) {
            return false;
        }

        self.targets.push(target);
        true
    }

    /// Run one pointer event through this node's part of the interaction
    /// state machine.
    ///
    /// Presses are hit-tested against this node's bounds. Drags only affect
    /// the active selection. A release either ends this node's own drag, or
    /// completes a connect gesture started on another node when it lands
    /// inside these bounds.
    pub fn handle_pointer_event(
        &mut self,
        event: &PointerEvent,
        state: &mut InteractionState,
    ) -> EventOutcome {
        match *event {
            PointerEvent::Down { position, click_count } => {
                if !self.contains_point(position) {
                    return EventOutcome::Ignored;
                }

                state.select(self.id, click_count == 2);
                EventOutcome::Consumed
            }

            PointerEvent::Drag { delta } => match state.mode() {
                InteractionMode::Selected(id) if id == self.id => {
                    self.translate(delta);
                    EventOutcome::Consumed
                }
                // The drag paints the pending connection instead of moving
                InteractionMode::Connecting(id) if id == self.id => EventOutcome::Consumed,
                _ => EventOutcome::Ignored,
            },

            PointerEvent::Up { position } => match state.mode() {
                InteractionMode::Selected(id) if id == self.id => {
                    state.clear();
                    EventOutcome::Consumed
                }
                InteractionMode::Connecting(source)
                    if source != self.id && self.contains_point(position) =>
                {
                    state.clear();
                    EventOutcome::Connect {
                        source,
                        target: self.id,
                    }
                }
                _ => EventOutcome::Ignored,
            },

            PointerEvent::Repaint => EventOutcome::Ignored,
        }
    }

    /// Draw the node box, plus the pending connection if this node is the
    /// source of an in-progress connect gesture.
    pub fn render(&self, renderer: &mut dyn GraphRenderer, state: &InteractionState) {
        renderer.draw_box(self.bounds(), &self.name);

        if state.connecting_from() == Some(self.id) {
            renderer.draw_connection(self.position, state.pointer(), PENDING_CONNECTION_COLOR);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::tests::{DrawCall, RecordingRenderer};

    fn press(x: f32, y: f32, click_count: u32) -> PointerEvent {
        PointerEvent::Down {
            position: Pos2::new(x, y),
            click_count,
        }
    }

    #[test]
    fn test_bounds_follow_position() {
        let mut node = Node::new("A", Pos2::new(0.0, 0.0));
        node.set_position(Pos2::new(120.0, -40.0));

        let bounds = node.bounds();
        assert_eq!(bounds.center(), Pos2::new(120.0, -40.0));
        assert_eq!(bounds.size(), Vec2::splat(NODE_SIZE));
        assert!(node.contains_point(Pos2::new(120.0, -40.0)));
        assert!(node.contains_point(Pos2::new(145.0, -15.0)));
        assert!(!node.contains_point(Pos2::new(145.1, -40.0)));
    }

    #[test]
    fn test_connect_to_is_idempotent() {
        let mut a = Node::new("A", Pos2::ZERO);
        let b = Node::new("B", Pos2::new(100.0, 0.0));

        assert!(a.connect_to(b.id()));
        assert!(!a.connect_to(b.id()));
        assert_eq!(a.targets(), &[b.id()]);
    }

    #[test]
    fn test_single_click_selects() {
        let mut node = Node::new("A", Pos2::new(10.0, 10.0));
        let mut state = InteractionState::new();

        let outcome = node.handle_pointer_event(&press(10.0, 10.0, 1), &mut state);
        assert_eq!(outcome, EventOutcome::Consumed);
        assert_eq!(state.mode(), InteractionMode::Selected(node.id()));
    }

    #[test]
    fn test_double_click_enters_connect_mode() {
        let mut node = Node::new("A", Pos2::new(10.0, 10.0));
        let mut state = InteractionState::new();

        node.handle_pointer_event(&press(12.0, 8.0, 2), &mut state);
        assert_eq!(state.mode(), InteractionMode::Connecting(node.id()));
    }

    #[test]
    fn test_press_outside_is_ignored() {
        let mut node = Node::new("A", Pos2::new(10.0, 10.0));
        let mut state = InteractionState::new();

        let outcome = node.handle_pointer_event(&press(200.0, 200.0, 1), &mut state);
        assert_eq!(outcome, EventOutcome::Ignored);
        assert!(state.is_idle());
    }

    #[test]
    fn test_drag_moves_only_selected_node() {
        let mut a = Node::new("A", Pos2::new(0.0, 0.0));
        let mut b = Node::new("B", Pos2::new(100.0, 0.0));
        let mut state = InteractionState::new();
        state.select(a.id(), false);

        let drag = PointerEvent::Drag {
            delta: Vec2::new(5.0, -3.0),
        };
        assert_eq!(a.handle_pointer_event(&drag, &mut state), EventOutcome::Consumed);
        assert_eq!(b.handle_pointer_event(&drag, &mut state), EventOutcome::Ignored);

        assert_eq!(a.position(), Pos2::new(5.0, -3.0));
        assert_eq!(b.position(), Pos2::new(100.0, 0.0));
    }

    #[test]
    fn test_drag_in_connect_mode_does_not_move() {
        let mut a = Node::new("A", Pos2::new(0.0, 0.0));
        let mut state = InteractionState::new();
        state.select(a.id(), true);

        let drag = PointerEvent::Drag {
            delta: Vec2::new(30.0, 30.0),
        };
        assert_eq!(a.handle_pointer_event(&drag, &mut state), EventOutcome::Consumed);
        assert_eq!(a.position(), Pos2::ZERO);
    }

    #[test]
    fn test_release_over_other_node_requests_connection() {
        let a = Node::new("A", Pos2::new(0.0, 0.0));
        let mut b = Node::new("B", Pos2::new(100.0, 0.0));
        let mut state = InteractionState::new();
        state.select(a.id(), true);

        let release = PointerEvent::Up {
            position: Pos2::new(100.0, 10.0),
        };
        let outcome = b.handle_pointer_event(&release, &mut state);

        assert_eq!(
            outcome,
            EventOutcome::Connect {
                source: a.id(),
                target: b.id()
            }
        );
        assert!(state.is_idle());
    }

    #[test]
    fn test_release_while_idle_is_ignored() {
        let mut node = Node::new("A", Pos2::ZERO);
        let mut state = InteractionState::new();

        let release = PointerEvent::Up { position: Pos2::ZERO };
        assert_eq!(node.handle_pointer_event(&release, &mut state), EventOutcome::Ignored);
        assert!(state.is_idle());
    }

    #[test]
    fn test_render_draws_pending_connection_for_source() {
        let node = Node::new("A", Pos2::new(10.0, 20.0));
        let mut state = InteractionState::new();
        state.select(node.id(), true);
        state.set_pointer(Pos2::new(200.0, 80.0));

        let mut renderer = RecordingRenderer::default();
        node.render(&mut renderer, &state);

        assert_eq!(
            renderer.calls,
            vec![
                DrawCall::Box {
                    bounds: node.bounds(),
                    label: "A".to_string()
                },
                DrawCall::Connection {
                    from: Pos2::new(10.0, 20.0),
                    to: Pos2::new(200.0, 80.0),
                    color: PENDING_CONNECTION_COLOR,
                },
            ]
        );
    }
}
