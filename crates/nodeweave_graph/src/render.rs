// SPDX-License-Identifier: MIT OR Apache-2.0
//! Drawing seam between the graph and the host's painting primitives.

use crate::node::NODE_SIZE;
use egui::epaint::CubicBezierShape;
use egui::{Align2, Color32, FontId, Painter, Pos2, Rect, Stroke, Vec2};

/// Horizontal distance of the bezier control points from the node centers
pub const CONNECTION_TANGENT: f32 = 50.0;
/// Stroke width of connections
pub const CONNECTION_WIDTH: f32 = 2.0;
/// Color of the connection being dragged out of a node
pub const PENDING_CONNECTION_COLOR: Color32 = Color32::RED;
/// Color of established edges
pub const EDGE_COLOR: Color32 = Color32::WHITE;

const NODE_ROUNDING: f32 = 4.0;
const NODE_FILL: Color32 = Color32::from_rgb(45, 45, 48);
const NODE_OUTLINE: Color32 = Color32::from_rgb(110, 110, 120);

/// Painting primitives the graph needs from its host
pub trait GraphRenderer {
    /// Draw a node box with its label
    fn draw_box(&mut self, bounds: Rect, label: &str);

    /// Draw a connection curve between two node centers
    fn draw_connection(&mut self, from: Pos2, to: Pos2, color: Color32);
}

/// The four points of a cubic bezier
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    /// Curve start
    pub start: Pos2,
    /// Control point pulling away from the start
    pub start_tangent: Pos2,
    /// Control point pulling into the end
    pub end_tangent: Pos2,
    /// Curve end
    pub end: Pos2,
}

impl CubicBezier {
    /// Points in the order epaint expects
    pub fn points(&self) -> [Pos2; 4] {
        [self.start, self.start_tangent, self.end_tangent, self.end]
    }

    /// Shift every point by `offset`
    pub fn translate(self, offset: Vec2) -> Self {
        Self {
            start: self.start + offset,
            start_tangent: self.start_tangent + offset,
            end_tangent: self.end_tangent + offset,
            end: self.end + offset,
        }
    }
}

/// Curve for a connection between two node centers.
///
/// The curve leaves from the side of the source box facing the target and
/// enters the target from the opposite side. When the target is to the left
/// everything is mirrored, so right-to-left connections don't loop back on
/// themselves.
pub fn connection_curve(from: Pos2, to: Pos2) -> CubicBezier {
    let direction = if from.x > to.x { -1.0 } else { 1.0 };
    let half = NODE_SIZE * 0.5;

    CubicBezier {
        start: Pos2::new(from.x + direction * half, from.y),
        start_tangent: Pos2::new(from.x + direction * CONNECTION_TANGENT, from.y),
        end_tangent: Pos2::new(to.x - direction * CONNECTION_TANGENT, to.y),
        end: Pos2::new(to.x - direction * half, to.y),
    }
}

/// [`GraphRenderer`] backed by an egui painter
///
/// Graph coordinates are canvas-local; `origin` is where the canvas origin
/// sits on screen.
pub struct PainterRenderer<'a> {
    painter: &'a Painter,
    origin: Vec2,
}

impl<'a> PainterRenderer<'a> {
    /// Create a renderer drawing through `painter`
    pub fn new(painter: &'a Painter, origin: Vec2) -> Self {
        Self { painter, origin }
    }
}

impl GraphRenderer for PainterRenderer<'_> {
    fn draw_box(&mut self, bounds: Rect, label: &str) {
        let rect = bounds.translate(self.origin);
        self.painter.rect_filled(rect, NODE_ROUNDING, NODE_FILL);
        self.painter
            .rect_stroke(rect, NODE_ROUNDING, Stroke::new(1.0, NODE_OUTLINE));
        self.painter.text(
            rect.center(),
            Align2::CENTER_CENTER,
            label,
            FontId::proportional(12.0),
            Color32::WHITE,
        );
    }

    fn draw_connection(&mut self, from: Pos2, to: Pos2, color: Color32) {
        let curve = connection_curve(from, to).translate(self.origin);
        self.painter.add(CubicBezierShape::from_points_stroke(
            curve.points(),
            false,
            Color32::TRANSPARENT,
            Stroke::new(CONNECTION_WIDTH, color),
        ));
    }
}
