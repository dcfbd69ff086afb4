//! Rotary knob over a normalized value.
//!
//! - Vertical drag adjusts the value, up increases
//! - Shift for fine control
//! - Double-click resets to the default
//! - Compact mode (no label) draws only the dial and shows the value on hover

use egui::{Align2, Color32, FontId, Pos2, Response, Sense, Stroke, Ui, Widget, pos2, vec2};
use std::f32::consts::PI;

/// Start of the 270° sweep, bottom-left.
const START_ANGLE: f32 = PI * 0.75;
/// End of the sweep, bottom-right.
const END_ANGLE: f32 = PI * 2.25;
/// Height below the dial reserved for label and value text.
const TEXT_BAND: f32 = 35.0;
/// Fine-control multiplier while Shift is held.
const FINE_FACTOR: f32 = 0.1;

/// Rotary knob editing a value in `[0, 1]`.
pub struct Knob<'a> {
    value: &'a mut f32,
    default: f32,
    label: Option<&'a str>,
    tooltip: Option<&'a str>,
    format_value: Option<Box<dyn Fn(f32) -> String + 'a>>,
    diameter: f32,
    sensitivity: f32,
    track: Color32,
    fill: Color32,
}

impl<'a> Knob<'a> {
    /// Compact knob for `value`.
    pub fn new(value: &'a mut f32) -> Self {
        Self {
            value,
            default: 0.5,
            label: None,
            tooltip: None,
            format_value: None,
            diameter: 60.0,
            sensitivity: 0.004,
            track: Color32::from_rgb(50, 50, 60),
            fill: Color32::from_rgb(100, 180, 255),
        }
    }

    /// Set the normalized reset value.
    pub fn default(mut self, default: f32) -> Self {
        self.default = default.clamp(0.0, 1.0);
        self
    }

    /// Draw `label` and the value text below the dial.
    pub fn label(mut self, label: &'a str) -> Self {
        self.label = Some(label);
        self
    }

    /// Hover text shown above the value.
    pub fn tooltip(mut self, tooltip: &'a str) -> Self {
        self.tooltip = Some(tooltip);
        self
    }

    /// Set the value formatter; it receives the normalized value.
    pub fn format(mut self, formatter: impl Fn(f32) -> String + 'a) -> Self {
        self.format_value = Some(Box::new(formatter));
        self
    }

    /// Set dial diameter in pixels.
    pub fn diameter(mut self, diameter: f32) -> Self {
        self.diameter = diameter.max(8.0);
        self
    }

    /// Set sensitivity (value change per pixel dragged).
    pub fn sensitivity(mut self, sensitivity: f32) -> Self {
        self.sensitivity = sensitivity;
        self
    }

    /// Track and value-arc colors.
    pub fn colors(mut self, track: Color32, fill: Color32) -> Self {
        self.track = track;
        self.fill = fill;
        self
    }

    fn value_text(&self) -> String {
        match &self.format_value {
            Some(formatter) => formatter(*self.value),
            None => format!("{:.2}", *self.value),
        }
    }
}

/// Value after a vertical drag of `delta_y` pixels.
pub(crate) fn dragged_value(value: f32, delta_y: f32, sensitivity: f32, fine: bool) -> f32 {
    let sensitivity = if fine { sensitivity * FINE_FACTOR } else { sensitivity };
    (value - delta_y * sensitivity).clamp(0.0, 1.0)
}

impl Widget for Knob<'_> {
    fn ui(self, ui: &mut Ui) -> Response {
        let text_band = if self.label.is_some() { TEXT_BAND } else { 0.0 };
        let size = vec2(self.diameter, self.diameter + text_band);
        let (rect, mut response) = ui.allocate_exact_size(size, Sense::click_and_drag());

        let center = pos2(rect.center().x, rect.top() + self.diameter / 2.0);
        let radius = self.diameter / 2.0 - 2.0;

        let mut changed = false;

        if response.double_clicked() {
            *self.value = self.default;
            changed = true;
        } else if response.dragged() {
            let fine = ui.input(|i| i.modifiers.shift);
            let next = dragged_value(*self.value, response.drag_delta().y, self.sensitivity, fine);
            changed = next != *self.value;
            *self.value = next;
        }

        let is_active = response.dragged() || response.has_focus();

        if ui.is_rect_visible(rect) {
            let painter = ui.painter();
            let arc_width = (self.diameter * 0.1).clamp(2.0, 6.0);
            let arc_radius = radius - arc_width / 2.0;
            let value_angle = START_ANGLE + *self.value * (END_ANGLE - START_ANGLE);

            draw_arc(painter, center, arc_radius, START_ANGLE, END_ANGLE, self.track, arc_width);

            let fill = if is_active { self.fill } else { self.fill.gamma_multiply(0.85) };
            if *self.value > 0.001 {
                draw_arc(painter, center, arc_radius, START_ANGLE, value_angle, fill, arc_width);
            }

            let body = if is_active {
                Color32::from_rgb(65, 65, 78)
            } else {
                Color32::from_rgb(55, 55, 68)
            };
            let body_radius = radius - arc_width - 2.0;
            painter.circle_filled(center, body_radius.max(1.0), body);

            let pointer_end = pos2(
                center.x + value_angle.cos() * body_radius * 0.8,
                center.y + value_angle.sin() * body_radius * 0.8,
            );
            painter.line_segment([center, pointer_end], Stroke::new(2.0, fill));

            if let Some(label) = self.label {
                painter.text(
                    pos2(rect.center().x, rect.top() + self.diameter + 4.0),
                    Align2::CENTER_TOP,
                    label,
                    FontId::proportional(12.0),
                    Color32::from_rgb(180, 180, 190),
                );
                painter.text(
                    pos2(rect.center().x, rect.top() + self.diameter + 18.0),
                    Align2::CENTER_TOP,
                    self.value_text(),
                    FontId::proportional(11.0),
                    Color32::from_rgb(150, 150, 160),
                );
            }
        }

        if changed {
            response.mark_changed();
        }

        if self.label.is_none() || self.tooltip.is_some() {
            let text = match self.tooltip {
                Some(tip) => format!("{tip}\n{}", self.value_text()),
                None => self.value_text(),
            };
            response = response.on_hover_text(text);
        }

        response
    }
}

/// Draw an arc using line segments.
fn draw_arc(
    painter: &egui::Painter,
    center: Pos2,
    radius: f32,
    start_angle: f32,
    end_angle: f32,
    color: Color32,
    stroke_width: f32,
) {
    let segments = 32;
    let sweep = end_angle - start_angle;

    let points: Vec<Pos2> = (0..=segments)
        .map(|i| {
            let angle = start_angle + sweep * i as f32 / segments as f32;
            pos2(center.x + angle.cos() * radius, center.y + angle.sin() * radius)
        })
        .collect();

    painter.add(egui::Shape::line(points, Stroke::new(stroke_width, color)));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_clamped() {
        let mut value = 0.5;
        let knob = Knob::new(&mut value).default(1.5);
        assert_eq!(knob.default, 1.0);
    }

    #[test]
    fn drag_up_increases() {
        assert!((dragged_value(0.5, -25.0, 0.004, false) - 0.6).abs() < 1e-6);
        assert!((dragged_value(0.5, 25.0, 0.004, false) - 0.4).abs() < 1e-6);
    }

    #[test]
    fn fine_drag_is_slower() {
        assert!((dragged_value(0.5, -25.0, 0.004, true) - 0.51).abs() < 1e-6);
    }

    #[test]
    fn drag_clamps_to_unit_range() {
        assert_eq!(dragged_value(0.9, -1000.0, 0.004, false), 1.0);
        assert_eq!(dragged_value(0.1, 1000.0, 0.004, false), 0.0);
    }

    #[test]
    fn value_text_uses_formatter() {
        let mut value = 0.25;
        let knob = Knob::new(&mut value).format(|v| format!("{:.0}%", v * 100.0));
        assert_eq!(knob.value_text(), "25%");
    }
}
