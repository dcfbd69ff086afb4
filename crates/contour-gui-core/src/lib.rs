//! egui front end for contour envelopes.
//!
//! This crate renders the toolkit-free graph model from `contour-core` with
//! egui and wires it to parameter storage through the [`EnvelopeBridge`]
//! trait. The standalone editor (`contour-gui`) and any plugin host share it.
//!
//! # Modules
//!
//! - [`param_bridge`]: Envelope bridge trait with gesture protocol
//! - [`surface`]: egui painter implementation of the graph drawing surface
//! - [`theme`]: Colors and egui theme application
//! - [`widgets`]: Graph, knobs and toggle
//! - [`panel`]: Graph plus stage knobs laid out as one editor

pub mod panel;
pub mod param_bridge;
pub mod surface;
pub mod theme;
pub mod widgets;

pub use panel::EnvelopePanel;
pub use param_bridge::{BridgeAccess, EnvelopeBridge, SlotIndex};
pub use surface::EguiSurface;
pub use theme::Theme;
pub use widgets::{EnvelopeGraph, GraphDrag, Knob, LoopToggle};
