//! [`Surface`] implementation over an egui [`Painter`].
//!
//! The graph renderer works in widget-local coordinates with the origin at the
//! top-left corner. [`EguiSurface`] offsets everything by the widget rect's
//! top-left and maps [`Ink`] to theme colors.
//!
//! egui only fills convex polygons, so the area under the curve is built as a
//! triangle mesh: one vertical strip per outline segment, down to the baseline.

use contour_core::{EnvelopePath, Ink, Point, Rect, Surface};
use egui::{Align2, Color32, FontId, Mesh, Painter, Pos2, Shape, Stroke, pos2, vec2};

use crate::Theme;

/// Paints graph primitives into an egui painter.
pub struct EguiSurface<'a> {
    base: Painter,
    painter: Painter,
    origin: Pos2,
    theme: &'a Theme,
    segments: usize,
}

impl<'a> EguiSurface<'a> {
    /// Surface covering `rect`, drawing with `painter`.
    ///
    /// `segments` is the number of straight pieces per curve when the
    /// envelope outline is flattened.
    pub fn new(painter: &Painter, rect: egui::Rect, theme: &'a Theme, segments: usize) -> Self {
        Self {
            base: painter.clone(),
            painter: painter.clone(),
            origin: rect.min,
            theme,
            segments,
        }
    }

    /// Local point to screen position.
    pub fn to_screen(&self, point: Point) -> Pos2 {
        self.origin + vec2(point.x, point.y)
    }

    /// Local rectangle to screen rectangle.
    pub fn to_screen_rect(&self, rect: Rect) -> egui::Rect {
        egui::Rect::from_min_size(
            self.to_screen(Point::new(rect.x, rect.y)),
            vec2(rect.width, rect.height),
        )
    }
}

impl Surface for EguiSurface<'_> {
    fn fill_rect(&mut self, rect: Rect, ink: Ink) {
        self.painter
            .rect_filled(self.to_screen_rect(rect), 0.0, self.theme.ink(ink));
    }

    fn fill_path(&mut self, path: &EnvelopePath, ink: Ink) {
        let outline: Vec<Pos2> = path
            .upper_outline(self.segments)
            .into_iter()
            .map(|p| self.to_screen(p))
            .collect();
        let Some(first) = outline.first() else {
            return;
        };
        let baseline = first.y;
        self.painter
            .add(Shape::mesh(strip_mesh(&outline, baseline, self.theme.ink(ink))));
    }

    fn stroke_path(&mut self, path: &EnvelopePath, ink: Ink, width: f32) {
        let points: Vec<Pos2> = path
            .flatten(self.segments)
            .into_iter()
            .map(|p| self.to_screen(p))
            .collect();
        self.painter
            .add(Shape::line(points, Stroke::new(width, self.theme.ink(ink))));
    }

    fn fill_circle(&mut self, center: Point, radius: f32, ink: Ink) {
        self.painter
            .circle_filled(self.to_screen(center), radius, self.theme.ink(ink));
    }

    fn text(&mut self, rect: Rect, text: &str, ink: Ink, font_size: f32) {
        let rect = self.to_screen_rect(rect);
        self.painter.text(
            rect.center(),
            Align2::CENTER_CENTER,
            text,
            FontId::proportional(font_size),
            self.theme.ink(ink),
        );
    }

    fn set_clip(&mut self, clip: Option<Rect>) {
        self.painter = match clip {
            Some(rect) => self.base.with_clip_rect(self.to_screen_rect(rect)),
            None => self.base.clone(),
        };
    }
}

/// Mesh covering the region between an x-monotone `outline` and `baseline`.
///
/// Two triangles per outline segment. Fewer than two points give an empty mesh.
pub fn strip_mesh(outline: &[Pos2], baseline: f32, color: Color32) -> Mesh {
    let mut mesh = Mesh::default();
    for pair in outline.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let idx = mesh.vertices.len() as u32;
        mesh.colored_vertex(a, color);
        mesh.colored_vertex(b, color);
        mesh.colored_vertex(pos2(b.x, baseline), color);
        mesh.colored_vertex(pos2(a.x, baseline), color);
        mesh.add_triangle(idx, idx + 1, idx + 2);
        mesh.add_triangle(idx, idx + 2, idx + 3);
    }
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use contour_core::{DragState, EnvelopeParams, GraphStyle, RenderOptions, Size, render_graph};

    #[test]
    fn strip_mesh_has_two_triangles_per_segment() {
        let outline = [pos2(0.0, 100.0), pos2(10.0, 0.0), pos2(20.0, 50.0)];
        let mesh = strip_mesh(&outline, 100.0, Color32::WHITE);
        assert_eq!(mesh.vertices.len(), 8);
        assert_eq!(mesh.indices.len(), 12);
        assert!(mesh.vertices.iter().all(|v| v.pos.y <= 100.0));
    }

    #[test]
    fn strip_mesh_of_single_point_is_empty() {
        let mesh = strip_mesh(&[pos2(0.0, 0.0)], 10.0, Color32::WHITE);
        assert!(mesh.is_empty());
    }

    #[test]
    fn local_coordinates_are_offset_by_rect() {
        let ctx = egui::Context::default();
        let painter = Painter::new(
            ctx,
            egui::LayerId::background(),
            egui::Rect::from_min_size(Pos2::ZERO, vec2(800.0, 600.0)),
        );
        let theme = Theme::default();
        let rect = egui::Rect::from_min_size(pos2(30.0, 40.0), vec2(400.0, 200.0));
        let surface = EguiSurface::new(&painter, rect, &theme, 8);

        assert_eq!(surface.to_screen(Point::new(50.0, 0.0)), pos2(80.0, 40.0));
        assert_eq!(
            surface.to_screen_rect(Rect::new(0.0, 0.0, 400.0, 140.0)),
            egui::Rect::from_min_size(pos2(30.0, 40.0), vec2(400.0, 140.0))
        );
    }

    #[test]
    fn rendering_emits_shapes() {
        let ctx = egui::Context::default();
        let theme = Theme::default();
        let output = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                let rect = egui::Rect::from_min_size(ui.min_rect().min, vec2(400.0, 200.0));
                let mut surface = EguiSurface::new(ui.painter(), rect, &theme, 8);
                render_graph(
                    &mut surface,
                    &EnvelopeParams::splat(0.5),
                    Size::new(400.0, 200.0),
                    &DragState::IDLE,
                    &GraphStyle::default(),
                    RenderOptions::default(),
                );
            });
        });
        // background, fill, stroke, three handles
        assert!(output.shapes.len() >= 6);
    }
}
