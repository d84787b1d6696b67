// SPDX-License-Identifier: MIT OR Apache-2.0
//! Scalar property drawing with optional live value history.
//!
//! A tracked property keeps its last [`MAX_SAMPLES`] values and draws them
//! as a small curve next to the numeric field. Trackers are keyed by the
//! owning object's id plus the property name, so the same field of two
//! objects is tracked independently.

use egui::{Color32, Pos2, Rect, Shape, Stroke, Ui, Vec2};
use indexmap::IndexMap;
use std::collections::VecDeque;
use std::time::Instant;

/// Number of samples kept per tracked property
pub const MAX_SAMPLES: usize = 100;

const FIELD_WIDTH: f32 = 50.0;
const CURVE_WIDTH_FRACTION: f32 = 0.47;
const CURVE_COLOR: Color32 = Color32::YELLOW;

/// Result of drawing a property - indicates if the value was changed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawResult {
    /// Value was not modified
    Unchanged,
    /// Value was modified, needs to be applied
    Changed,
}

impl DrawResult {
    /// Whether the value was modified
    pub fn is_changed(&self) -> bool {
        matches!(self, DrawResult::Changed)
    }
}

/// Identity of a tracked property: owner id plus property name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PropertyKey {
    /// Stable id of the object owning the property
    pub owner_id: u64,
    /// Property name
    pub name: String,
}

impl PropertyKey {
    /// Create a key
    pub fn new(owner_id: u64, name: impl Into<String>) -> Self {
        Self {
            owner_id,
            name: name.into(),
        }
    }
}

/// One recorded value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Seconds since tracking started
    pub time: f32,
    /// Recorded value
    pub value: f32,
}

/// Bounded history of one scalar property
#[derive(Debug, Clone)]
pub struct TrackedFloat {
    samples: VecDeque<Sample>,
    /// Smallest value ever recorded, evicted samples included
    min: f32,
    /// Largest value ever recorded, evicted samples included
    max: f32,
    start: Instant,
}

impl TrackedFloat {
    /// Start an empty history at `start`
    pub fn new(start: Instant) -> Self {
        Self {
            samples: VecDeque::with_capacity(MAX_SAMPLES + 1),
            min: f32::INFINITY,
            max: f32::NEG_INFINITY,
            start,
        }
    }

    /// Append `value` as sampled at `now`, evicting the oldest sample once
    /// the history is full
    pub fn record(&mut self, value: f32, now: Instant) {
        let time = now.saturating_duration_since(self.start).as_secs_f32();

        self.min = self.min.min(value);
        self.max = self.max.max(value);

        self.samples.push_back(Sample { time, value });
        if self.samples.len() > MAX_SAMPLES {
            self.samples.pop_front();
        }
    }

    /// Recorded samples, oldest first
    pub fn samples(&self) -> impl Iterator<Item = &Sample> {
        self.samples.iter()
    }

    /// Number of retained samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether nothing has been recorded yet
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Smallest value recorded so far
    pub fn min(&self) -> Option<f32> {
        (!self.is_empty()).then_some(self.min)
    }

    /// Largest value recorded so far
    pub fn max(&self) -> Option<f32> {
        (!self.is_empty()).then_some(self.max)
    }

    /// Display range: oldest to newest sample time on x, min to max on y
    pub fn range(&self) -> Option<Rect> {
        let first = self.samples.front()?;
        let last = self.samples.back()?;
        Some(Rect::from_min_max(
            Pos2::new(first.time, self.min),
            Pos2::new(last.time, self.max),
        ))
    }
}

/// All currently tracked properties
#[derive(Debug, Default)]
pub struct PropertyTracker {
    trackers: IndexMap<PropertyKey, TrackedFloat>,
}

impl PropertyTracker {
    /// Create a tracker with nothing tracked
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking `key` with `value` as its first sample. Returns `false`
    /// if it was already tracked.
    pub fn add(&mut self, key: PropertyKey, value: f32, now: Instant) -> bool {
        if self.trackers.contains_key(&key) {
            return false;
        }

        tracing::debug!("Tracking property {}#{}", key.name, key.owner_id);
        let mut history = TrackedFloat::new(now);
        history.record(value, now);
        self.trackers.insert(key, history);
        true
    }

    /// Stop tracking `key`. Returns `false` if it was not tracked.
    pub fn remove(&mut self, key: &PropertyKey) -> bool {
        let removed = self.trackers.shift_remove(key).is_some();
        if removed {
            tracing::debug!("Stopped tracking property {}#{}", key.name, key.owner_id);
        }
        removed
    }

    /// Whether `key` is tracked
    pub fn is_tracked(&self, key: &PropertyKey) -> bool {
        self.trackers.contains_key(key)
    }

    /// History of `key`, if tracked
    pub fn get(&self, key: &PropertyKey) -> Option<&TrackedFloat> {
        self.trackers.get(key)
    }

    /// Record a value for `key`. Returns `false` if `key` is not tracked.
    pub fn record(&mut self, key: &PropertyKey, value: f32, now: Instant) -> bool {
        match self.trackers.get_mut(key) {
            Some(tracker) => {
                tracker.record(value, now);
                true
            }
            None => false,
        }
    }

    /// Number of tracked properties
    pub fn len(&self) -> usize {
        self.trackers.len()
    }

    /// Whether nothing is tracked
    pub fn is_empty(&self) -> bool {
        self.trackers.is_empty()
    }
}

/// Draw a f32 field that can be tracked.
///
/// When `live` is false the field is drawn plainly and tracking controls are
/// hidden. Otherwise a toggle next to the field starts or stops tracking, and
/// a tracked field shows its history curve and records its value once per
/// frame it is drawn.
pub fn draw_tracked_f32(
    ui: &mut Ui,
    tracker: &mut PropertyTracker,
    key: &PropertyKey,
    value: &mut f32,
    label: &str,
    live: bool,
) -> DrawResult {
    let mut result = DrawResult::Unchanged;

    if !live {
        ui.horizontal(|ui| {
            ui.label(label);
            if ui.add(egui::DragValue::new(value).speed(0.1)).changed() {
                result = DrawResult::Changed;
            }
        });
        return result;
    }

    let tracked = tracker.is_tracked(key);

    ui.horizontal(|ui| {
        ui.label(label);

        let mut drag = egui::DragValue::new(value).speed(0.1);
        if tracked {
            drag = drag.max_decimals(2);
        }
        let row_height = ui.spacing().interact_size.y;
        let response = ui.add_sized([FIELD_WIDTH, row_height], drag);
        if response.changed() {
            result = DrawResult::Changed;
        }

        if tracked {
            if let Some(history) = tracker.get(key) {
                let width = ui.available_width() * CURVE_WIDTH_FRACTION;
                draw_history(ui, history, width);
            }
            tracker.record(key, *value, Instant::now());
        }

        let mut toggle = tracked;
        let hint = if tracked { "Stop tracking" } else { "Track value" };
        if ui.checkbox(&mut toggle, "").on_hover_text(hint).changed() {
            if toggle {
                tracker.add(key.clone(), *value, Instant::now());
            } else {
                tracker.remove(key);
            }
        }
    });

    result
}

/// Plot a history into a strip `width` wide
fn draw_history(ui: &mut Ui, history: &TrackedFloat, width: f32) {
    let height = ui.spacing().interact_size.y;
    let (rect, response) = ui.allocate_exact_size(Vec2::new(width, height), egui::Sense::hover());
    let painter = ui.painter_at(rect);

    painter.rect_filled(rect, 2.0, Color32::from_gray(25));

    let points = curve_points(history, rect);
    if points.len() >= 2 {
        painter.add(Shape::line(points, Stroke::new(1.5, CURVE_COLOR)));
    }

    if let (Some(min), Some(max)) = (history.min(), history.max()) {
        response.on_hover_text(format!(
            "min {min:.2} / max {max:.2} ({} samples)",
            history.len()
        ));
    }
}

/// Map samples into `rect`, time left to right and larger values higher up
fn curve_points(history: &TrackedFloat, rect: Rect) -> Vec<Pos2> {
    let Some(range) = history.range() else {
        return Vec::new();
    };

    // A flat or single-sample history still gets a visible line
    let span = Vec2::new(range.width().max(f32::EPSILON), range.height().max(f32::EPSILON));

    history
        .samples()
        .map(|s| {
            let x = (s.time - range.min.x) / span.x;
            let y = (s.value - range.min.y) / span.y;
            Pos2::new(
                rect.left() + x * rect.width(),
                rect.bottom() - y * rect.height(),
            )
        })
        .collect()
}
