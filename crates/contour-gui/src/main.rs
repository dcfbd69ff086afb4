//! contour - standalone ADSR envelope editor.

use clap::Parser;
use contour_config::load_or_default;
use contour_gui::ContourApp;
use eframe::egui;
use std::path::PathBuf;

/// Interactive ADSR envelope editor.
#[derive(Parser, Debug)]
#[command(name = "contour-gui")]
#[command(about = "Interactive ADSR envelope editor")]
#[command(version)]
struct Args {
    /// Settings file (defaults to the user config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of envelope editors to show (1-4)
    #[arg(long)]
    envelopes: Option<usize>,

    /// Window width in pixels
    #[arg(long)]
    width: Option<f32>,

    /// Window height in pixels
    #[arg(long)]
    height: Option<f32>,
}

fn main() -> eframe::Result<()> {
    use tracing_subscriber::EnvFilter;

    // Initialize tracing subscriber; bridge legacy log:: calls from eframe/egui
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();
    tracing_log::LogTracer::init().ok();

    let args = Args::parse();

    tracing::info!("Starting contour");

    let mut settings = load_or_default(args.config.as_deref());
    if let Some(count) = args.envelopes {
        settings = settings.with_envelope_count(count);
    }
    if let Some(width) = args.width {
        settings.window.width = width;
    }
    if let Some(height) = args.height {
        settings.window.height = height;
    }
    if let Err(e) = settings.validate() {
        tracing::warn!(error = %e, "invalid command line overrides, using defaults");
        settings = contour_config::EditorSettings::default();
    }

    tracing::info!(
        width = settings.window.width,
        height = settings.window.height,
        envelopes = settings.envelopes.names.len(),
        "window config"
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([settings.window.width, settings.window.height])
            .with_min_inner_size([320.0, 240.0])
            .with_title("contour"),
        ..Default::default()
    };

    eframe::run_native(
        "contour",
        options,
        Box::new(move |cc| Ok(Box::new(ContourApp::new(cc, &settings)))),
    )
}
