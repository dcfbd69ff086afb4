//! One complete envelope editor: graph, stage knobs and loop toggle.

use contour_core::{ControlLayout, GraphStyle, Rect, Size};
use egui::{Align2, FontId, Response, RichText, Ui, Vec2, vec2};

use crate::widgets::{EnvelopeGraph, GraphDrag, bridged_loop_toggle, stage_knob};
use crate::{EnvelopeBridge, SlotIndex, Theme};

/// Editor for one envelope slot.
///
/// Owns the graph's drag state between frames; parameter values stay in the
/// bridge.
#[derive(Debug, Clone)]
pub struct EnvelopePanel {
    slot: SlotIndex,
    title: String,
    drag: GraphDrag,
    interactive: bool,
}

impl EnvelopePanel {
    /// Panel for `slot` with a heading.
    pub fn new(slot: SlotIndex, title: impl Into<String>) -> Self {
        Self {
            slot,
            title: title.into(),
            drag: GraphDrag::default(),
            interactive: true,
        }
    }

    /// Slot this panel edits.
    pub fn slot(&self) -> SlotIndex {
        self.slot
    }

    /// Heading text.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Graph drag state.
    pub fn drag(&self) -> &GraphDrag {
        &self.drag
    }

    /// Enable or disable handle dragging on the graph.
    pub fn set_interactive(&mut self, interactive: bool) {
        self.interactive = interactive;
    }

    /// Draw the heading and a `size` editor below it.
    ///
    /// The returned response is marked changed when the graph or any knob
    /// wrote a value.
    pub fn show(
        &mut self,
        ui: &mut Ui,
        bridge: &dyn EnvelopeBridge,
        style: &GraphStyle,
        theme: &Theme,
        size: Vec2,
    ) -> Response {
        ui.vertical(|ui| {
            ui.label(RichText::new(&self.title).size(13.0).color(theme.text_secondary));

            let rect = egui::Rect::from_min_size(ui.cursor().min, size);
            let layout = ControlLayout::compute(Size::new(size.x, size.y));
            let to_screen =
                |r: Rect| egui::Rect::from_min_size(rect.min + vec2(r.x, r.y), vec2(r.width, r.height));

            let mut response = ui.put(
                rect,
                EnvelopeGraph::new(bridge, self.slot, &mut self.drag, style, theme)
                    .interactive(self.interactive)
                    .size(size),
            );

            for control in &layout.slots {
                ui.painter().text(
                    to_screen(control.label).center(),
                    Align2::CENTER_CENTER,
                    control.stage.descriptor().short_name,
                    FontId::proportional(12.0),
                    theme.text_secondary,
                );

                let knob_rect = to_screen(control.knob);
                let knob = ui.put(knob_rect, |ui: &mut Ui| {
                    stage_knob(
                        ui,
                        bridge,
                        self.slot,
                        control.stage,
                        knob_rect.width(),
                        (theme.knob_track, theme.knob_fill),
                    )
                });
                response |= knob;
            }

            let toggle_rect = to_screen(layout.loop_toggle);
            let toggle = ui.put(toggle_rect, |ui: &mut Ui| {
                bridged_loop_toggle(
                    ui,
                    bridge,
                    self.slot,
                    toggle_rect.width(),
                    (theme.loop_on, theme.loop_off),
                )
            });
            response |= toggle;

            response
        })
        .inner
    }
}
