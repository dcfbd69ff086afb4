//! Contour Core - envelope graph model for ADSR editors
//!
//! This crate holds everything about the interactive envelope graph that does
//! not depend on a GUI toolkit: the parameter model, the geometry that places
//! the curve and its handles, the path the curve is drawn with, and the drag
//! state machine that turns pointer motion back into parameter values.
//!
//! # Core Abstractions
//!
//! ## Parameters
//!
//! - [`ParamDescriptor`] - Range, skew and display format of one parameter
//! - [`Stage`] - Attack, decay, sustain or release, with its descriptor
//! - [`EnvelopeAccess`] - Read/write seam to the host's parameter store
//! - [`EnvelopeParams`] - Four normalized values as a plain struct
//!
//! ## Graph
//!
//! - [`GraphGeometry`] - Handle positions from values and widget bounds
//! - [`EnvelopePath`] - The closed curve outline, replayed into a [`PathSink`]
//! - [`render_graph`] - Paints the graph onto any [`Surface`]
//! - [`ControlLayout`] - Knob and label placement under the graph
//!
//! ## Interaction
//!
//! - [`DragState`] - Held handle and junction axis, advanced by [`DragEvent`]s
//! - [`Transition`] - Next state, parameter edit, redraw flag, gesture edges
//!
//! # no_std Support
//!
//! Disable the default `std` feature to build without the standard library.
//! An allocator is still required for display text and flattened paths.
//!
//! ```toml
//! [dependencies]
//! contour-core = { version = "0.1", default-features = false }
//! ```
//!
//! The optional `tracing` feature logs handle grabs, axis commits and edits.
//!
//! # Example
//!
//! ```rust
//! use contour_core::{DragEvent, DragState, EnvelopeParams, GraphGeometry, Point, PointerEvent, Size};
//!
//! let mut params = EnvelopeParams::splat(0.5);
//! let bounds = Size::new(400.0, 200.0);
//!
//! // Junction sits at (100, 70); a vertical pull commits to sustain.
//! let mut drag = DragState::default();
//! drag.apply(DragEvent::Down(Point::new(100.0, 70.0)), &mut params, bounds, 10.0);
//! let pull = PointerEvent::new(Point::new(100.0, 35.0), Point::new(100.0, 70.0));
//! drag.apply(DragEvent::Drag(pull), &mut params, bounds, 10.0);
//!
//! assert_eq!(params.sustain, 0.75);
//! assert_eq!(params.decay, 0.5);
//! assert_eq!(GraphGeometry::compute(&params, bounds).y_sustain, 35.0);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod drag;
pub mod envelope;
pub mod geometry;
pub mod layout;
pub mod param_info;
pub mod path;
pub mod render;

// Re-export main types at crate root
pub use drag::{
    DecayAxis, DragEvent, DragHandle, DragState, Gesture, PointerEvent, Transition, hit_test,
};
pub use envelope::{EnvelopeAccess, EnvelopeParams, ParamEdit, Stage, loop_param_id};
pub use geometry::{GRAPH_HEIGHT_RATIO, GraphGeometry, Point, Rect, SECTIONS, Size};
pub use layout::{ControlLayout, ControlSlot, LABEL_HEIGHT, LOOP_TOGGLE_SIZE};
pub use param_info::{ParamDescriptor, ParamScale, ParamUnit, clamp_unit};
pub use path::{EnvelopePath, PathCommand, PathSink, quad_point};
pub use render::{GraphStyle, Ink, RenderOptions, Surface, readout_rect, render_graph};
