//! Placement of the stage controls under the graph.
//!
//! The bottom 30% of the widget holds four equal columns, one per stage, each
//! with a short label on top and a square knob centred below it. The loop
//! toggle sits in the top-right corner of the graph.

use crate::envelope::Stage;
use crate::geometry::{GRAPH_HEIGHT_RATIO, Rect, SECTIONS, Size};

/// Height of the stage labels above the knobs.
pub const LABEL_HEIGHT: f32 = 15.0;

/// Knob size as a fraction of the smaller of column width and row height.
pub const KNOB_FILL: f32 = 0.8;

/// Side length of the loop toggle.
pub const LOOP_TOGGLE_SIZE: f32 = 20.0;

/// Label and knob rectangles for one stage column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlSlot {
    /// Stage this column controls.
    pub stage: Stage,
    /// Label area, full column width.
    pub label: Rect,
    /// Square knob area, horizontally centred in the column.
    pub knob: Rect,
}

/// Rectangles for every control of one envelope widget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlLayout {
    /// Columns in stage order.
    pub slots: [ControlSlot; 4],
    /// Loop toggle in the top-right corner of the graph.
    pub loop_toggle: Rect,
}

impl ControlLayout {
    /// Lay out the controls for a widget of `bounds`.
    pub fn compute(bounds: Size) -> Self {
        let bounds = bounds.sanitized();
        let controls_y = bounds.height * GRAPH_HEIGHT_RATIO;
        let controls_height = bounds.height - controls_y;
        let column = bounds.width / SECTIONS;
        let knob = libm::fminf(column, controls_height) * KNOB_FILL;
        let inset = (column - knob) * 0.5;

        let slots = Stage::ALL.map(|stage| {
            let x = column * stage.index() as f32;
            ControlSlot {
                stage,
                label: Rect::new(x, controls_y, column, LABEL_HEIGHT),
                knob: Rect::new(x + inset, controls_y + LABEL_HEIGHT, knob, knob),
            }
        });

        Self {
            slots,
            loop_toggle: Rect::new(
                bounds.width - LOOP_TOGGLE_SIZE,
                0.0,
                LOOP_TOGGLE_SIZE,
                LOOP_TOGGLE_SIZE,
            ),
        }
    }

    /// Column for `stage`.
    pub fn slot(&self, stage: Stage) -> &ControlSlot {
        &self.slots[stage.index()]
    }
}
