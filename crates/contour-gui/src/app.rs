//! Main application state and UI layout.

use crate::atomic_bridge::{AtomicEnvelopeBridge, ParamChange};
use contour_config::EditorSettings;
use contour_core::GraphStyle;
use contour_gui_core::{EnvelopeBridge, EnvelopePanel, SlotIndex, Theme};
use egui::{CentralPanel, Context, Layout, RichText, TopBottomPanel, Vec2, vec2};
use parking_lot::Mutex;
use std::sync::Arc;

/// Envelope panels per row.
const COLUMNS: usize = 2;

/// Panel height as a fraction of its width.
const ASPECT: f32 = 0.5;

/// Main application state.
pub struct ContourApp {
    /// Parameter store shared with any audio consumer.
    bridge: Arc<AtomicEnvelopeBridge>,
    panels: Vec<EnvelopePanel>,
    theme: Theme,
    style: GraphStyle,
    /// Most recent write, filled by the bridge listener.
    last_change: Arc<Mutex<Option<ParamChange>>>,
    locked: bool,
}

impl ContourApp {
    /// Create the application for the envelopes named in `settings`.
    pub fn new(cc: &eframe::CreationContext<'_>, settings: &EditorSettings) -> Self {
        let theme = Theme::default();
        theme.apply(&cc.egui_ctx);
        Self::with_context(&cc.egui_ctx, settings, theme)
    }

    fn with_context(ctx: &Context, settings: &EditorSettings, theme: Theme) -> Self {
        let names = &settings.envelopes.names;
        let bridge = Arc::new(AtomicEnvelopeBridge::new(names.len()));

        let last_change = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&last_change);
        let repaint = ctx.clone();
        bridge.add_listener(move |change: &ParamChange| {
            tracing::debug!(id = %change.id, value = %change.display, "parameter changed");
            *sink.lock() = Some(change.clone());
            repaint.request_repaint();
        });

        let panels = names
            .iter()
            .enumerate()
            .map(|(i, name)| EnvelopePanel::new(SlotIndex(i), name.as_str()))
            .collect();

        tracing::info!(envelopes = names.len(), "editor ready");

        Self {
            bridge,
            panels,
            theme,
            style: settings.to_graph_style(),
            last_change,
            locked: false,
        }
    }

    /// The parameter store.
    pub fn bridge(&self) -> &Arc<AtomicEnvelopeBridge> {
        &self.bridge
    }

    /// Size of each envelope editor for `available` width.
    fn panel_size(&self, available: f32, spacing: f32) -> Vec2 {
        let columns = self.panels.len().clamp(1, COLUMNS) as f32;
        let width = ((available - spacing * (columns - 1.0)) / columns).max(120.0);
        vec2(width, width * ASPECT)
    }

    fn status_bar(&mut self, ctx: &Context) {
        TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let text = match self.last_change.lock().as_ref() {
                    Some(change) => format!("{} = {}", change.id, change.display),
                    None => "Drag a handle or turn a knob".to_owned(),
                };
                ui.label(RichText::new(text).color(self.theme.text_secondary));

                ui.with_layout(Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Reset").clicked() {
                        tracing::info!("resetting all envelopes");
                        for slot in 0..self.bridge.slot_count() {
                            self.bridge.reset(SlotIndex(slot));
                        }
                    }
                    if ui.checkbox(&mut self.locked, "Lock graphs").changed() {
                        for panel in &mut self.panels {
                            panel.set_interactive(!self.locked);
                        }
                    }
                });
            });
        });
    }
}

impl eframe::App for ContourApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.status_bar(ctx);

        CentralPanel::default().show(ctx, |ui| {
            let spacing = ui.spacing().item_spacing.x * 2.0;
            let size = self.panel_size(ui.available_width(), spacing);
            let bridge: &dyn EnvelopeBridge = &*self.bridge;

            egui::ScrollArea::vertical().show(ui, |ui| {
                for row in self.panels.chunks_mut(COLUMNS) {
                    ui.horizontal(|ui| {
                        ui.spacing_mut().item_spacing.x = spacing;
                        for panel in row {
                            panel.show(ui, bridge, &self.style, &self.theme, size);
                        }
                    });
                    ui.add_space(8.0);
                }
            });
        });
    }
}
