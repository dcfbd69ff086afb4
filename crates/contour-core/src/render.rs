//! Painting the envelope graph onto a [`Surface`].
//!
//! [`render_graph`] reads the live parameter values, computes the geometry
//! and draws, in order: background, curve fill, curve stroke, handles and,
//! while a handle is held, the value readout. It never writes parameters.

use crate::drag::{DragHandle, DragState};
use crate::envelope::EnvelopeAccess;
use crate::geometry::{GraphGeometry, Point, Rect, Size};
use crate::path::EnvelopePath;

/// Semantic colour roles. Surfaces map them to concrete colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ink {
    /// Graph background.
    Background,
    /// Translucent area under the curve.
    CurveFill,
    /// Solid curve outline.
    CurveStroke,
    /// Handle markers.
    Handle,
    /// Readout text.
    Readout,
}

/// Drawing target for the graph.
pub trait Surface {
    /// Fill an axis-aligned rectangle.
    fn fill_rect(&mut self, rect: Rect, ink: Ink);

    /// Fill the closed envelope outline.
    fn fill_path(&mut self, path: &EnvelopePath, ink: Ink);

    /// Stroke the envelope outline with a line of `width` pixels.
    fn stroke_path(&mut self, path: &EnvelopePath, ink: Ink, width: f32);

    /// Fill a circle.
    fn fill_circle(&mut self, center: Point, radius: f32, ink: Ink);

    /// Draw `text` centred in `rect`.
    fn text(&mut self, rect: Rect, text: &str, ink: Ink, font_size: f32);

    /// Restrict subsequent drawing to `clip`, or lift the restriction with `None`.
    fn set_clip(&mut self, clip: Option<Rect>);
}

/// Sizes used when drawing and hit testing the graph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GraphStyle {
    /// Grab tolerance around each handle, pixels.
    pub hit_radius: f32,
    /// Radius of the drawn handle markers.
    pub handle_radius: f32,
    /// Outline width.
    pub stroke_width: f32,
    /// Readout font size in points.
    pub readout_font_size: f32,
    /// Readout box size.
    pub readout_size: Size,
    /// Distance from the handle to the readout box centre.
    pub readout_offset: f32,
    /// A junction closer than this to the top edge puts its readout below.
    pub readout_flip_threshold: f32,
    /// Straight pieces per curve for surfaces that flatten.
    pub curve_segments: usize,
}

impl Default for GraphStyle {
    fn default() -> Self {
        Self {
            hit_radius: 10.0,
            handle_radius: 3.0,
            stroke_width: 2.0,
            readout_font_size: 14.0,
            readout_size: Size::new(60.0, 20.0),
            readout_offset: 20.0,
            readout_flip_threshold: 30.0,
            curve_segments: 24,
        }
    }
}

/// Where the readout for the held handle goes.
///
/// Below the attack peak, above the release end. The junction readout sits
/// above unless the junction is within `readout_flip_threshold` of the top of
/// the graph, then below.
pub fn readout_rect(geometry: &GraphGeometry, state: &DragState, style: &GraphStyle) -> Option<Rect> {
    let handle = state.handle_position(geometry)?;
    let below = Point::new(handle.x, handle.y + style.readout_offset);
    let above = Point::new(handle.x, handle.y - style.readout_offset);
    let center = match state.handle() {
        DragHandle::None => return None,
        DragHandle::AttackPeak => below,
        DragHandle::DecayEnd => {
            if handle.y - geometry.area.y < style.readout_flip_threshold {
                below
            } else {
                above
            }
        }
        DragHandle::ReleaseEnd => above,
    };
    Some(Rect::from_center(center, style.readout_size.width, style.readout_size.height))
}

/// What to draw on top of the curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Draw the three handle markers.
    pub handles: bool,
    /// Draw the readout for the held handle.
    pub readout: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            handles: true,
            readout: true,
        }
    }
}

impl RenderOptions {
    /// Curve only, for display-only graphs.
    pub const DISPLAY_ONLY: Self = Self {
        handles: false,
        readout: false,
    };
}

/// Paint the graph for the values behind `access` into `surface`.
pub fn render_graph(
    surface: &mut impl Surface,
    access: &impl EnvelopeAccess,
    bounds: Size,
    state: &DragState,
    style: &GraphStyle,
    options: RenderOptions,
) {
    let params = access.snapshot();
    let geometry = GraphGeometry::compute(&params, bounds);

    surface.set_clip(Some(geometry.area));
    surface.fill_rect(geometry.area, Ink::Background);

    let path = EnvelopePath::build(&geometry);
    surface.fill_path(&path, Ink::CurveFill);
    surface.stroke_path(&path, Ink::CurveStroke, style.stroke_width);

    if options.handles {
        for handle in geometry.handles() {
            surface.fill_circle(handle, style.handle_radius, Ink::Handle);
        }
    }
    surface.set_clip(None);

    if !options.readout {
        return;
    }
    if let (Some(stage), Some(rect)) = (state.readout_stage(), readout_rect(&geometry, state, style)) {
        let text = access.display_text(stage, params.get(stage));
        surface.text(rect, &text, Ink::Readout, style.readout_font_size);
    }
}
