//! Envelope graph geometry.
//!
//! [`GraphGeometry::compute`] maps four normalized stage values and the widget
//! bounds onto the handle positions of the envelope curve. It is a pure
//! function: nothing is cached, and every caller (render, hit test, each drag
//! step) recomputes from live values.
//!
//! # Layout
//!
//! ```text
//!  y_peak ─┬───●A
//!          │  ╱  ╲
//! y_sustain│ ╱    ●D────────────╮
//!          │╱                    ╲
//!  y_base ─┴──────────────────────●R
//!          │ a·s │ d·s │    s    │ r·s │
//!       x_start x_attack x_decay x_sustain x_release
//! ```
//!
//! `s` is the section width (a quarter of the widget width). The sustain
//! plateau always spans one full section; its *height* carries the sustain
//! value. The graph occupies the top 70% of the widget, the bottom 30% is
//! reserved for the control row (see [`crate::layout`]).

use crate::envelope::EnvelopeParams;
use crate::param_info::clamp_unit;

/// Fraction of the widget height used by the graph.
pub const GRAPH_HEIGHT_RATIO: f32 = 0.7;

/// Number of equal horizontal sections the width is divided into.
pub const SECTIONS: f32 = 4.0;

/// A point in local widget coordinates (origin top-left, y down).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// Horizontal position in pixels.
    pub x: f32,
    /// Vertical position in pixels, growing downwards.
    pub y: f32,
}

impl Point {
    /// Create a point.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Squared euclidean distance to `other`.
    #[inline]
    pub fn distance_sq(self, other: Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance(self, other: Point) -> f32 {
        libm::sqrtf(self.distance_sq(other))
    }
}

/// Widget bounds in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
}

impl Size {
    /// Create a size.
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Copy with negative or non-finite extents replaced by zero.
    pub fn sanitized(self) -> Self {
        Self {
            width: non_negative(self.width),
            height: non_negative(self.height),
        }
    }
}

/// Axis-aligned rectangle in local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
}

impl Rect {
    /// Create a rectangle from its top-left corner and extent.
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle of size `width × height` centred on `center`.
    pub fn from_center(center: Point, width: f32, height: f32) -> Self {
        Self::new(center.x - width * 0.5, center.y - height * 0.5, width, height)
    }

    /// Right edge.
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Centre point.
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// Whether `point` lies inside (edges inclusive).
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x <= self.right() && point.y >= self.y && point.y <= self.bottom()
    }
}

/// Handle positions and boundaries of one envelope graph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GraphGeometry {
    /// Region the curve is drawn and clipped to: full width, top 70% of height.
    pub area: Rect,
    /// Height of the graph area.
    pub graph_height: f32,
    /// Width of one section (a quarter of the widget width).
    pub section: f32,
    /// Left edge of the curve.
    pub x_start: f32,
    /// X of the attack peak.
    pub x_attack: f32,
    /// X where decay meets the sustain plateau.
    pub x_decay: f32,
    /// X where the sustain plateau ends and release begins.
    pub x_sustain: f32,
    /// X where release reaches the baseline.
    pub x_release: f32,
    /// Baseline (zero amplitude).
    pub y_base: f32,
    /// Full amplitude.
    pub y_peak: f32,
    /// Sustain level.
    pub y_sustain: f32,
}

impl GraphGeometry {
    /// Compute the geometry for `params` inside `bounds`.
    ///
    /// Parameter values are clamped to `[0, 1]` (NaN reads as 0) and
    /// negative or non-finite bounds read as zero, so the ordering
    /// `x_start <= x_attack <= x_decay <= x_sustain <= x_release` and
    /// `y_peak <= y_sustain <= y_base` always holds.
    ///
    /// ```rust
    /// use contour_core::{EnvelopeParams, GraphGeometry, Size};
    ///
    /// let g = GraphGeometry::compute(&EnvelopeParams::splat(0.5), Size::new(400.0, 200.0));
    /// assert_eq!(g.section, 100.0);
    /// assert_eq!((g.x_attack, g.x_decay, g.x_sustain, g.x_release), (50.0, 100.0, 200.0, 250.0));
    /// assert_eq!(g.y_sustain, 70.0);
    /// ```
    pub fn compute(params: &EnvelopeParams, bounds: Size) -> Self {
        let params = params.clamped();
        let bounds = bounds.sanitized();

        let graph_height = bounds.height * GRAPH_HEIGHT_RATIO;
        let section = bounds.width / SECTIONS;

        let x_start = 0.0;
        let x_attack = x_start + params.attack * section;
        let x_decay = x_attack + params.decay * section;
        let x_sustain = x_decay + section;
        let x_release = x_sustain + params.release * section;

        let y_base = graph_height;
        let y_peak = 0.0;
        let y_sustain = graph_height - params.sustain * graph_height;

        Self {
            area: Rect::new(0.0, 0.0, bounds.width, graph_height),
            graph_height,
            section,
            x_start,
            x_attack,
            x_decay,
            x_sustain,
            x_release,
            y_base,
            y_peak,
            y_sustain,
        }
    }

    /// Whether the bounds are too small for any inverse mapping.
    pub fn is_degenerate(&self) -> bool {
        !(self.section > 0.0 && self.graph_height > 0.0)
    }

    /// Attack peak handle.
    pub fn attack_peak(&self) -> Point {
        Point::new(self.x_attack, self.y_peak)
    }

    /// Decay/sustain junction handle.
    pub fn decay_end(&self) -> Point {
        Point::new(self.x_decay, self.y_sustain)
    }

    /// Release end handle.
    pub fn release_end(&self) -> Point {
        Point::new(self.x_release, self.y_base)
    }

    /// The three handles in hit-test priority order.
    pub fn handles(&self) -> [Point; 3] {
        [self.attack_peak(), self.decay_end(), self.release_end()]
    }

    /// Normalized attack for a pointer at `x`.
    pub fn attack_from_x(&self, x: f32) -> Option<f32> {
        self.horizontal(x, self.x_start)
    }

    /// Normalized decay for a pointer at `x`, measured from the live attack peak.
    pub fn decay_from_x(&self, x: f32) -> Option<f32> {
        self.horizontal(x, self.x_attack)
    }

    /// Normalized sustain for a pointer at `y`.
    pub fn sustain_from_y(&self, y: f32) -> Option<f32> {
        if self.is_degenerate() {
            return None;
        }
        Some(clamp_unit((self.graph_height - y) / self.graph_height))
    }

    /// Normalized release for a pointer at `x`, measured from the live plateau end.
    pub fn release_from_x(&self, x: f32) -> Option<f32> {
        self.horizontal(x, self.x_sustain)
    }

    fn horizontal(&self, x: f32, origin: f32) -> Option<f32> {
        if self.is_degenerate() {
            return None;
        }
        Some(clamp_unit((x - origin) / self.section))
    }
}

fn non_negative(v: f32) -> f32 {
    if v.is_finite() && v > 0.0 { v } else { 0.0 }
}
