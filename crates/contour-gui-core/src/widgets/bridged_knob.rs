//! Bridge-aware stage knobs with gesture protocol.
//!
//! [`stage_knob`] connects a rotary [`Knob`] to one stage of an
//! [`EnvelopeBridge`] slot. The knob works in normalized space; the stage's
//! descriptor maps it to seconds or level, so the visual midpoint of a
//! skewed time range sits at its mid value rather than the arithmetic mean.

use super::Knob;
use crate::{EnvelopeBridge, SlotIndex};
use contour_core::Stage;
use egui::{Color32, Response, Ui};

/// Apply the gesture protocol to a widget response.
///
/// A double-click emits a complete `begin_set → set(default) → end_set`
/// sequence. Regular drags emit `begin_set` on drag start, a write on each
/// change, and `end_set` on drag stop. Values are normalized.
pub fn gesture_wrap(
    response: &Response,
    bridge: &dyn EnvelopeBridge,
    slot: SlotIndex,
    stage: Stage,
    normalized: f32,
    default: f32,
) {
    if response.double_clicked() {
        bridge.begin_set(slot, stage);
        bridge.set_normalized(slot, stage, default);
        bridge.end_set(slot, stage);
    } else {
        if response.drag_started() {
            bridge.begin_set(slot, stage);
        }
        if response.changed() {
            bridge.set_normalized(slot, stage, normalized);
        }
        if response.drag_stopped() {
            bridge.end_set(slot, stage);
        }
    }
}

/// Compact knob of `diameter` bound to `stage` of `slot`.
///
/// Hovering shows the stage tooltip and the current value, e.g. `"1.000 s"`.
/// Double-click resets to the stage default.
pub fn stage_knob(
    ui: &mut Ui,
    bridge: &dyn EnvelopeBridge,
    slot: SlotIndex,
    stage: Stage,
    diameter: f32,
    colors: (Color32, Color32),
) -> Response {
    let desc = stage.descriptor();
    let mut normalized = bridge.get_normalized(slot, stage);
    let default = desc.normalize(desc.default);

    let response = ui.add(
        Knob::new(&mut normalized)
            .default(default)
            .diameter(diameter)
            .tooltip(stage.tooltip())
            .colors(colors.0, colors.1)
            .format(move |n| bridge.display_text(slot, stage, n)),
    );

    gesture_wrap(&response, bridge, slot, stage, normalized, default);
    response
}
