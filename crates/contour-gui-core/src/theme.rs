//! Colors for the envelope editor and their egui style.

use contour_core::Ink;
use egui::{Color32, CornerRadius, Stroke, Visuals, style::WidgetVisuals};

/// Theme colors for the GUI.
pub struct Theme {
    /// Window background behind the panels.
    pub background: Color32,
    /// Panel background.
    pub panel_bg: Color32,
    /// Accent for hovered and active widgets.
    pub accent: Color32,
    /// Primary text color.
    pub text_primary: Color32,
    /// Labels and status text.
    pub text_secondary: Color32,
    /// Knob background track.
    pub knob_track: Color32,
    /// Knob value arc.
    pub knob_fill: Color32,
    /// Graph background.
    pub graph_bg: Color32,
    /// Area under the envelope curve, translucent.
    pub curve_fill: Color32,
    /// Envelope outline.
    pub curve_stroke: Color32,
    /// Handle markers.
    pub handle: Color32,
    /// Drag readout text.
    pub readout: Color32,
    /// Loop toggle while looping.
    pub loop_on: Color32,
    /// Loop toggle outline.
    pub loop_off: Color32,
}

impl Default for Theme {
    fn default() -> Self {
        let amber = Color32::from_rgb(240, 170, 70);
        Self {
            background: Color32::from_rgb(22, 22, 27),
            panel_bg: Color32::from_rgb(32, 32, 39),
            accent: amber,
            text_primary: Color32::from_rgb(228, 226, 222),
            text_secondary: Color32::from_rgb(150, 148, 145),
            knob_track: Color32::from_rgb(52, 50, 58),
            knob_fill: amber,
            graph_bg: Color32::from_rgb(17, 17, 21),
            curve_fill: Color32::from_rgba_unmultiplied(240, 170, 70, 56),
            curve_stroke: amber,
            handle: Color32::from_rgb(250, 245, 235),
            readout: Color32::from_rgb(228, 226, 222),
            loop_on: Color32::from_rgb(110, 200, 120),
            loop_off: Color32::from_rgb(86, 84, 92),
        }
    }
}

impl Theme {
    /// Apply the theme to an egui context.
    pub fn apply(&self, ctx: &egui::Context) {
        let mut visuals = Visuals::dark();
        visuals.window_fill = self.panel_bg;
        visuals.panel_fill = self.panel_bg;
        visuals.extreme_bg_color = self.background;
        visuals.override_text_color = Some(self.text_primary);
        visuals.selection.bg_fill = self.accent.gamma_multiply(0.3);
        visuals.selection.stroke = Stroke::new(1.0, self.accent);

        let widgets = &mut visuals.widgets;
        restyle(&mut widgets.noninteractive, self.panel_bg, Stroke::new(1.0, self.text_secondary));
        restyle(&mut widgets.inactive, Color32::from_rgb(44, 43, 52), Stroke::new(1.0, self.text_primary));
        restyle(&mut widgets.hovered, Color32::from_rgb(56, 54, 64), Stroke::new(1.5, self.accent));
        restyle(&mut widgets.active, Color32::from_rgb(66, 63, 74), Stroke::new(2.0, self.accent));

        ctx.style_mut(|style| {
            style.visuals = visuals;
            style.spacing.item_spacing = egui::vec2(8.0, 6.0);
            style.spacing.window_margin = egui::Margin::same(10);
        });
    }

    /// Concrete color for a graph ink.
    pub fn ink(&self, ink: Ink) -> Color32 {
        match ink {
            Ink::Background => self.graph_bg,
            Ink::CurveFill => self.curve_fill,
            Ink::CurveStroke => self.curve_stroke,
            Ink::Handle => self.handle,
            Ink::Readout => self.readout,
        }
    }
}

fn restyle(widget: &mut WidgetVisuals, fill: Color32, fg: Stroke) {
    widget.bg_fill = fill;
    widget.weak_bg_fill = fill;
    widget.fg_stroke = fg;
    widget.corner_radius = CornerRadius::same(4);
}
