//! Envelope editor widgets.
//!
//! - [`EnvelopeGraph`]: Interactive ADSR graph with draggable handles
//! - [`Knob`]: Rotary control with drag, fine control, and double-click reset
//! - [`stage_knob`]: Bridge-aware knob for one envelope stage
//! - [`gesture_wrap`]: Gesture protocol helper for custom widget layouts
//! - [`LoopToggle`]: Small loop flag toggle

mod bridged_knob;
mod envelope_graph;
mod knob;
mod toggle;

pub use bridged_knob::{gesture_wrap, stage_knob};
pub use envelope_graph::{EnvelopeGraph, FrameOutcome, GraphDrag, PointerFrame};
pub use knob::Knob;
pub use toggle::{LOOP_TOOLTIP, LoopToggle, bridged_loop_toggle};
