//! contour - standalone ADSR envelope editor
//!
//! An egui application showing one editor per envelope, each a draggable
//! graph above a row of stage knobs, backed by an atomic parameter store.

pub mod app;
pub mod atomic_bridge;

pub use app::ContourApp;
pub use atomic_bridge::{AtomicEnvelopeBridge, ParamChange};
