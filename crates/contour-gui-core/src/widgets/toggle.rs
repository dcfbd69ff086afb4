//! Loop toggle for the envelope graph corner.

use crate::{EnvelopeBridge, SlotIndex};
use egui::{Color32, Response, Sense, Stroke, Ui, Widget, vec2};

/// Hover text of the loop toggle.
pub const LOOP_TOOLTIP: &str = "Loops the envelopes attack\n and decay sections";

/// Small square toggle for the loop flag.
pub struct LoopToggle<'a> {
    looping: &'a mut bool,
    size: f32,
    on: Color32,
    off: Color32,
}

impl<'a> LoopToggle<'a> {
    /// Toggle bound to `looping`.
    pub fn new(looping: &'a mut bool) -> Self {
        Self {
            looping,
            size: 20.0,
            on: Color32::from_rgb(80, 200, 80),
            off: Color32::from_rgb(80, 80, 90),
        }
    }

    /// Set the side length.
    pub fn size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    /// Indicator colors when looping and when not.
    pub fn colors(mut self, on: Color32, off: Color32) -> Self {
        self.on = on;
        self.off = off;
        self
    }
}

impl Widget for LoopToggle<'_> {
    fn ui(self, ui: &mut Ui) -> Response {
        let (rect, mut response) = ui.allocate_exact_size(vec2(self.size, self.size), Sense::click());

        if response.clicked() {
            *self.looping = !*self.looping;
            response.mark_changed();
        }

        if ui.is_rect_visible(rect) {
            let painter = ui.painter();
            let inner = rect.shrink(3.0);

            painter.rect_stroke(
                inner,
                3.0,
                Stroke::new(1.5, self.off),
                egui::StrokeKind::Inside,
            );
            if *self.looping {
                painter.rect_filled(inner.shrink(3.0), 2.0, self.on);
            }

            if response.hovered() {
                painter.rect_stroke(
                    rect.shrink(1.0),
                    4.0,
                    Stroke::new(1.0, Color32::from_rgb(100, 180, 255).gamma_multiply(0.5)),
                    egui::StrokeKind::Outside,
                );
            }
        }

        response.on_hover_text(LOOP_TOOLTIP)
    }
}

/// Loop toggle bound to the loop flag of `slot`.
pub fn bridged_loop_toggle(
    ui: &mut Ui,
    bridge: &dyn EnvelopeBridge,
    slot: SlotIndex,
    size: f32,
    colors: (Color32, Color32),
) -> Response {
    let mut looping = bridge.is_looping(slot);
    let response = ui.add(LoopToggle::new(&mut looping).size(size).colors(colors.0, colors.1));
    if response.changed() {
        tracing::debug!(slot = %slot, looping, "envelope loop toggled");
        bridge.set_looping(slot, looping);
    }
    response
}
