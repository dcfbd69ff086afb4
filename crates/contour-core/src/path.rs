//! Envelope outline as a sequence of path commands.
//!
//! The outline is built once per paint from a [`GraphGeometry`] and replayed
//! into any [`PathSink`]. Surfaces without native quadratic curves can use
//! [`EnvelopePath::flatten`] instead.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use crate::geometry::{GraphGeometry, Point};

/// Receiver of path-building commands.
pub trait PathSink {
    /// Start a new sub-path at `to`.
    fn move_to(&mut self, to: Point);
    /// Straight segment to `to`.
    fn line_to(&mut self, to: Point);
    /// Quadratic Bézier segment to `to` with control point `control`.
    fn quad_to(&mut self, control: Point, to: Point);
    /// Close the current sub-path back to its start.
    fn close(&mut self);
}

/// One path-building command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    /// See [`PathSink::move_to`].
    MoveTo(Point),
    /// See [`PathSink::line_to`].
    LineTo(Point),
    /// See [`PathSink::quad_to`].
    QuadTo {
        /// Control point.
        control: Point,
        /// End point.
        to: Point,
    },
    /// See [`PathSink::close`].
    Close,
}

/// Closed envelope outline.
///
/// Construction:
///
/// 1. move to `(x_start, y_base)`
/// 2. quad to `(x_attack, y_peak)`, control `(x_start, y_peak)`
/// 3. quad to `(x_decay, y_sustain)`, control `(x_attack, y_sustain)`
/// 4. line to `(x_sustain, y_sustain)`
/// 5. quad to `(x_release, y_base)`, control `(x_sustain, y_base)`
/// 6. line to `(x_start, y_base)`
/// 7. close
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvelopePath {
    commands: [PathCommand; 7],
}

impl EnvelopePath {
    /// Build the outline for `geometry`.
    pub fn build(geometry: &GraphGeometry) -> Self {
        let g = geometry;
        let start = Point::new(g.x_start, g.y_base);
        Self {
            commands: [
                PathCommand::MoveTo(start),
                PathCommand::QuadTo {
                    control: Point::new(g.x_start, g.y_peak),
                    to: Point::new(g.x_attack, g.y_peak),
                },
                PathCommand::QuadTo {
                    control: Point::new(g.x_attack, g.y_sustain),
                    to: Point::new(g.x_decay, g.y_sustain),
                },
                PathCommand::LineTo(Point::new(g.x_sustain, g.y_sustain)),
                PathCommand::QuadTo {
                    control: Point::new(g.x_sustain, g.y_base),
                    to: Point::new(g.x_release, g.y_base),
                },
                PathCommand::LineTo(start),
                PathCommand::Close,
            ],
        }
    }

    /// The commands in drawing order.
    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    /// Replay the outline into `sink`.
    pub fn emit(&self, sink: &mut impl PathSink) {
        for command in &self.commands {
            match *command {
                PathCommand::MoveTo(to) => sink.move_to(to),
                PathCommand::LineTo(to) => sink.line_to(to),
                PathCommand::QuadTo { control, to } => sink.quad_to(control, to),
                PathCommand::Close => sink.close(),
            }
        }
    }

    /// Polyline approximation with `segments` straight pieces per curve.
    ///
    /// The closing baseline segment is included; the final point equals the
    /// first. `segments` of zero is treated as one.
    pub fn flatten(&self, segments: usize) -> Vec<Point> {
        let mut out = Flattener {
            points: Vec::with_capacity(3 * segments.max(1) + 4),
            segments: segments.max(1),
            start: Point::default(),
        };
        self.emit(&mut out);
        out.points
    }

    /// The upper outline from the curve start to the release end.
    ///
    /// The outline is x-monotone, so the region under it down to the
    /// baseline is exactly the closed envelope shape.
    pub fn upper_outline(&self, segments: usize) -> Vec<Point> {
        let mut points = self.flatten(segments);
        // Drop the baseline return and the closing point.
        points.truncate(points.len().saturating_sub(1));
        points
    }
}

/// Point at parameter `t` on the quadratic Bézier `from → control → to`.
#[inline]
pub fn quad_point(from: Point, control: Point, to: Point, t: f32) -> Point {
    let u = 1.0 - t;
    Point::new(
        u * u * from.x + 2.0 * u * t * control.x + t * t * to.x,
        u * u * from.y + 2.0 * u * t * control.y + t * t * to.y,
    )
}

struct Flattener {
    points: Vec<Point>,
    segments: usize,
    start: Point,
}

impl Flattener {
    fn last(&self) -> Point {
        self.points.last().copied().unwrap_or(self.start)
    }
}

impl PathSink for Flattener {
    fn move_to(&mut self, to: Point) {
        self.start = to;
        self.points.push(to);
    }

    fn line_to(&mut self, to: Point) {
        self.points.push(to);
    }

    fn quad_to(&mut self, control: Point, to: Point) {
        let from = self.last();
        for i in 1..=self.segments {
            let t = i as f32 / self.segments as f32;
            self.points.push(quad_point(from, control, to, t));
        }
    }

    fn close(&mut self) {
        if self.last() != self.start {
            self.points.push(self.start);
        }
    }
}
