// SPDX-License-Identifier: MIT OR Apache-2.0
//! egui canvas hosting a [`GraphEditor`].
//!
//! Raw egui pointer events are turned into [`PointerEvent`]s in canvas
//! space, fed through the editor, and the graph is painted with a
//! [`PainterRenderer`].

use crate::editor::GraphEditor;
use crate::input::PointerEvent;
use crate::interaction::InteractionMode;
use crate::render::PainterRenderer;
use egui::{Color32, Pos2, Rect, Stroke};

/// Longest gap between two presses that still counts as a double click (seconds)
pub const DOUBLE_CLICK_DELAY: f64 = 0.3;
/// Farthest two presses may be apart to count as a double click (points)
pub const DOUBLE_CLICK_DISTANCE: f32 = 6.0;

/// Grid parameters
const GRID_SPACING: f32 = 20.0;

/// Translates egui's raw event stream into graph pointer events
#[derive(Debug, Clone)]
pub struct CanvasInput {
    /// Longest gap between presses of a multi-click (seconds)
    pub double_click_delay: f64,
    /// Farthest distance between presses of a multi-click (points)
    pub double_click_distance: f32,
    /// Whether a press that started on the canvas is still held
    primary_down: bool,
    /// Last pointer position seen (screen space)
    last_pointer: Option<Pos2>,
    /// Time, position and click count of the last press
    last_press: Option<(f64, Pos2, u32)>,
}

impl CanvasInput {
    /// Create a translator with the given multi-click thresholds
    pub fn new(double_click_delay: f64, double_click_distance: f32) -> Self {
        Self {
            double_click_delay,
            double_click_distance,
            primary_down: false,
            last_pointer: None,
            last_press: None,
        }
    }

    /// Translate one frame's events.
    ///
    /// Presses only count when they land inside `canvas` and `owns_press`
    /// accepts their position; drags and the release of a press that started
    /// on the canvas are reported wherever the pointer is.
    pub fn translate(
        &mut self,
        events: &[egui::Event],
        time: f64,
        canvas: Rect,
        owns_press: impl Fn(Pos2) -> bool,
    ) -> Vec<PointerEvent> {
        let origin = canvas.min.to_vec2();
        let mut out = Vec::new();

        for event in events {
            match event {
                egui::Event::PointerMoved(pos) => {
                    if self.primary_down {
                        if let Some(last) = self.last_pointer {
                            let delta = *pos - last;
                            if delta != egui::Vec2::ZERO {
                                out.push(PointerEvent::Drag { delta });
                            }
                        }
                    }
                    self.last_pointer = Some(*pos);
                }
                egui::Event::PointerButton {
                    pos,
                    button: egui::PointerButton::Primary,
                    pressed: true,
                    ..
                } => {
                    self.last_pointer = Some(*pos);
                    if !canvas.contains(*pos) || !owns_press(*pos) {
                        continue;
                    }

                    let click_count = self.click_count(time, *pos);
                    self.last_press = Some((time, *pos, click_count));
                    self.primary_down = true;
                    out.push(PointerEvent::Down {
                        position: *pos - origin,
                        click_count,
                    });
                }
                egui::Event::PointerButton {
                    pos,
                    button: egui::PointerButton::Primary,
                    pressed: false,
                    ..
                } => {
                    self.last_pointer = Some(*pos);
                    if self.primary_down {
                        self.primary_down = false;
                        out.push(PointerEvent::Up {
                            position: *pos - origin,
                        });
                    }
                }
                _ => {}
            }
        }

        out
    }

    fn click_count(&self, time: f64, pos: Pos2) -> u32 {
        match self.last_press {
            Some((last_time, last_pos, count))
                if time - last_time <= self.double_click_delay
                    && last_pos.distance(pos) <= self.double_click_distance =>
            {
                count + 1
            }
            _ => 1,
        }
    }
}

impl Default for CanvasInput {
    fn default() -> Self {
        Self::new(DOUBLE_CLICK_DELAY, DOUBLE_CLICK_DISTANCE)
    }
}

/// Canvas widget state for one graph editor
#[derive(Debug, Clone)]
pub struct GraphCanvas {
    /// Input translation state
    pub input: CanvasInput,
    /// Show grid
    pub show_grid: bool,
}

impl GraphCanvas {
    /// Create a canvas with default input thresholds
    pub fn new() -> Self {
        Self::with_input(CanvasInput::default())
    }

    /// Create a canvas with custom input thresholds
    pub fn with_input(input: CanvasInput) -> Self {
        Self {
            input,
            show_grid: true,
        }
    }

    /// Handle this frame's input and paint the graph.
    ///
    /// Presses covered by another layer (menus, popups, windows) are left to
    /// that layer. Returns whether the graph consumed any pointer event this
    /// frame.
    pub fn ui(&mut self, ui: &mut egui::Ui, editor: &mut GraphEditor) -> bool {
        let rect = ui.available_rect_before_wrap();
        let response = ui.allocate_rect(rect, egui::Sense::click_and_drag());
        let painter = ui.painter_at(rect);
        let origin = rect.min.to_vec2();

        let (events, time, latest_pos) =
            ui.input(|i| (i.events.clone(), i.time, i.pointer.latest_pos()));

        let ctx = ui.ctx().clone();
        let layer = ui.layer_id();
        let owns_press = |pos: Pos2| !matches!(ctx.layer_id_at(pos), Some(top) if top != layer);

        let mut consumed = false;
        for event in self.input.translate(&events, time, rect, owns_press) {
            consumed |= editor.handle_event(event);
        }

        if let Some(pos) = latest_pos {
            editor.interaction.set_pointer(pos - origin);
        }

        painter.rect_filled(rect, 0.0, Color32::from_rgb(30, 30, 32));
        if self.show_grid {
            draw_grid(&painter, rect);
        }

        editor.render(&mut PainterRenderer::new(&painter, origin));
        draw_status_bar(&painter, rect, editor);

        if editor.interaction.is_connecting() {
            ui.ctx().request_repaint();
        }
        if response.hovered() && editor.graph.node_at(editor.interaction.pointer()).is_some() {
            ui.ctx().set_cursor_icon(egui::CursorIcon::Grab);
        }

        consumed
    }
}

impl Default for GraphCanvas {
    fn default() -> Self {
        Self::new()
    }
}

fn draw_grid(painter: &egui::Painter, rect: Rect) {
    let stroke = Stroke::new(1.0, Color32::from_rgba_unmultiplied(60, 60, 60, 100));

    let mut x = rect.left();
    while x < rect.right() {
        painter.line_segment([Pos2::new(x, rect.top()), Pos2::new(x, rect.bottom())], stroke);
        x += GRID_SPACING;
    }

    let mut y = rect.top();
    while y < rect.bottom() {
        painter.line_segment([Pos2::new(rect.left(), y), Pos2::new(rect.right(), y)], stroke);
        y += GRID_SPACING;
    }
}

fn draw_status_bar(painter: &egui::Painter, rect: Rect, editor: &GraphEditor) {
    let mode = match editor.interaction.mode() {
        InteractionMode::Idle => "Idle".to_string(),
        InteractionMode::Selected(id) => match editor.graph.node(id) {
            Some(node) => format!("Moving '{}'", node.name()),
            None => "Moving".to_string(),
        },
        InteractionMode::Connecting(id) => match editor.graph.node(id) {
            Some(node) => format!("Connecting from '{}'", node.name()),
            None => "Connecting".to_string(),
        },
    };

    painter.text(
        Pos2::new(rect.left() + 8.0, rect.bottom() - 8.0),
        egui::Align2::LEFT_BOTTOM,
        format!(
            "Nodes: {} | Edges: {} | {}",
            editor.graph.node_count(),
            editor.graph.edge_count(),
            mode
        ),
        egui::FontId::proportional(11.0),
        Color32::from_gray(160),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeId;
    use egui::{Modifiers, PointerButton, Vec2};

    fn canvas() -> Rect {
        Rect::from_min_size(Pos2::new(100.0, 50.0), Vec2::new(400.0, 300.0))
    }

    fn button(x: f32, y: f32, pressed: bool) -> egui::Event {
        egui::Event::PointerButton {
            pos: Pos2::new(x, y),
            button: PointerButton::Primary,
            pressed,
            modifiers: Modifiers::NONE,
        }
    }

    #[test]
    fn test_press_drag_release_in_canvas_space() {
        let mut input = CanvasInput::default();
        let events = vec![
            egui::Event::PointerMoved(Pos2::new(150.0, 100.0)),
            button(150.0, 100.0, true),
            egui::Event::PointerMoved(Pos2::new(160.0, 95.0)),
            button(160.0, 95.0, false),
        ];

        let out = input.translate(&events, 1.0, canvas(), |_| true);
        assert_eq!(
            out,
            vec![
                PointerEvent::Down {
                    position: Pos2::new(50.0, 50.0),
                    click_count: 1
                },
                PointerEvent::Drag {
                    delta: Vec2::new(10.0, -5.0)
                },
                PointerEvent::Up {
                    position: Pos2::new(60.0, 45.0)
                },
            ]
        );
    }

    #[test]
    fn test_quick_second_press_is_double_click() {
        let mut input = CanvasInput::default();

        let first = [button(150.0, 100.0, true), button(150.0, 100.0, false)];
        input.translate(&first, 1.0, canvas(), |_| true);
        let out = input.translate(&[button(151.0, 101.0, true)], 1.2, canvas(), |_| true);

        assert_eq!(
            out,
            vec![PointerEvent::Down {
                position: Pos2::new(51.0, 51.0),
                click_count: 2
            }]
        );
    }

    #[test]
    fn test_slow_second_press_is_single_click() {
        let mut input = CanvasInput::default();

        let first = [button(150.0, 100.0, true), button(150.0, 100.0, false)];
        input.translate(&first, 1.0, canvas(), |_| true);
        let out = input.translate(&[button(150.0, 100.0, true)], 2.0, canvas(), |_| true);

        assert!(matches!(out.as_slice(), [PointerEvent::Down { click_count: 1, .. }]));
    }

    #[test]
    fn test_press_outside_canvas_is_dropped() {
        let mut input = CanvasInput::default();
        let events = vec![
            button(10.0, 10.0, true),
            egui::Event::PointerMoved(Pos2::new(20.0, 20.0)),
            button(20.0, 20.0, false),
        ];

        assert!(input.translate(&events, 1.0, canvas(), |_| true).is_empty());
    }

    #[test]
    fn test_press_owned_by_another_layer_is_dropped() {
        let mut input = CanvasInput::default();
        let events = vec![
            button(150.0, 100.0, true),
            egui::Event::PointerMoved(Pos2::new(160.0, 100.0)),
            button(160.0, 100.0, false),
        ];

        assert!(input.translate(&events, 1.0, canvas(), |_| false).is_empty());
    }

    #[test]
    fn test_hover_without_press_is_not_a_drag() {
        let mut input = CanvasInput::default();
        let events = vec![
            egui::Event::PointerMoved(Pos2::new(150.0, 100.0)),
            egui::Event::PointerMoved(Pos2::new(180.0, 120.0)),
        ];

        assert!(input.translate(&events, 1.0, canvas(), |_| true).is_empty());
    }

    /// Drives a [`GraphCanvas`] inside a headless egui context
    struct Harness {
        ctx: egui::Context,
        canvas: GraphCanvas,
        editor: GraphEditor,
        origin: Vec2,
        overlay: Option<Rect>,
        time: f64,
    }

    impl Harness {
        fn new(editor: GraphEditor) -> Self {
            let ctx = egui::Context::default();
            ctx.options_mut(|o| o.max_passes = std::num::NonZeroUsize::MIN);

            let mut harness = Self {
                ctx,
                canvas: GraphCanvas::new(),
                editor,
                origin: Vec2::ZERO,
                overlay: None,
                time: 0.0,
            };
            harness.frame(Vec::new());
            harness
        }

        fn frame(&mut self, events: Vec<egui::Event>) -> bool {
            self.time += 0.05;
            let input = egui::RawInput {
                screen_rect: Some(Rect::from_min_size(Pos2::ZERO, Vec2::new(800.0, 600.0))),
                time: Some(self.time),
                events,
                ..Default::default()
            };

            let mut consumed = false;
            let mut origin = self.origin;
            let (canvas, editor, overlay) = (&mut self.canvas, &mut self.editor, self.overlay);
            let _ = self.ctx.run(input, |ctx| {
                egui::CentralPanel::default().show(ctx, |ui| {
                    origin = ui.available_rect_before_wrap().min.to_vec2();
                    consumed = canvas.ui(ui, editor);
                });
                if let Some(rect) = overlay {
                    egui::Area::new(egui::Id::new("overlay"))
                        .order(egui::Order::Foreground)
                        .fixed_pos(rect.min)
                        .show(ctx, |ui| {
                            ui.allocate_space(rect.size());
                        });
                }
            });

            self.origin = origin;
            consumed
        }

        fn pointer(&mut self, at: Pos2, pressed: Option<bool>) -> bool {
            let pos = at + self.origin;
            let mut events = vec![egui::Event::PointerMoved(pos)];
            if let Some(pressed) = pressed {
                events.push(button(pos.x, pos.y, pressed));
            }
            self.frame(events)
        }

        fn press(&mut self, at: Pos2) -> bool {
            self.pointer(at, Some(true))
        }

        fn move_to(&mut self, at: Pos2) -> bool {
            self.pointer(at, None)
        }

        fn release(&mut self, at: Pos2) -> bool {
            self.pointer(at, Some(false))
        }
    }

    fn two_nodes() -> (GraphEditor, NodeId, NodeId) {
        let mut graph = crate::Graph::new("Test");
        let a = graph.add_node("A", Pos2::new(100.0, 100.0));
        let b = graph.add_node("B", Pos2::new(300.0, 100.0));
        (GraphEditor::new(graph), a, b)
    }

    #[test]
    fn test_canvas_drag_moves_node() {
        let (editor, a, _) = two_nodes();
        let mut harness = Harness::new(editor);

        assert!(harness.press(Pos2::new(100.0, 100.0)));
        assert_eq!(harness.editor.interaction.mode(), InteractionMode::Selected(a));

        assert!(harness.move_to(Pos2::new(130.0, 110.0)));
        assert!(harness.release(Pos2::new(130.0, 110.0)));

        assert!(harness.editor.interaction.is_idle());
        let node = harness.editor.graph.node(a).unwrap();
        assert_eq!(node.position(), Pos2::new(130.0, 110.0));
    }

    #[test]
    fn test_canvas_double_click_drag_connects() {
        let (editor, a, b) = two_nodes();
        let mut harness = Harness::new(editor);

        harness.press(Pos2::new(100.0, 100.0));
        harness.release(Pos2::new(100.0, 100.0));
        assert!(harness.press(Pos2::new(100.0, 100.0)));
        assert_eq!(harness.editor.interaction.mode(), InteractionMode::Connecting(a));

        // Connecting never moves the source; the pending line follows the pointer
        assert!(harness.move_to(Pos2::new(300.0, 100.0)));
        assert_eq!(harness.editor.interaction.pointer(), Pos2::new(300.0, 100.0));
        let source = harness.editor.graph.node(a).unwrap();
        assert_eq!(source.position(), Pos2::new(100.0, 100.0));

        assert!(harness.release(Pos2::new(300.0, 100.0)));
        assert!(harness.editor.interaction.is_idle());
        assert!(harness.editor.graph.node(a).unwrap().is_connected_to(b));
        assert_eq!(harness.editor.graph.edge_count(), 1);
    }

    #[test]
    fn test_press_under_foreground_layer_is_ignored() {
        let (editor, _, b) = two_nodes();
        let mut harness = Harness::new(editor);

        let covered = Rect::from_min_size(Pos2::new(60.0, 60.0), Vec2::splat(100.0));
        harness.overlay = Some(covered.translate(harness.origin));
        harness.frame(Vec::new());
        harness.move_to(Pos2::new(110.0, 110.0));
        assert_eq!(
            harness.ctx.layer_id_at(Pos2::new(110.0, 110.0) + harness.origin).map(|l| l.order),
            Some(egui::Order::Foreground)
        );

        assert!(!harness.press(Pos2::new(110.0, 110.0)));
        assert!(harness.editor.interaction.is_idle());
        assert!(!harness.release(Pos2::new(110.0, 110.0)));

        // Uncovered nodes still take presses
        assert!(harness.press(Pos2::new(300.0, 100.0)));
        assert_eq!(harness.editor.interaction.mode(), InteractionMode::Selected(b));
    }
}
