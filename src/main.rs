use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use eframe::egui;

use slides::{SlideSource, Slider, SlidesConfig};

mod app;

use app::SlidesApp;

/// Swipeable slideshow viewer.
#[derive(Parser, Debug)]
#[command(name = "slides", version, about, long_about = None)]
struct Args {
    /// Slideshow config (TOML). A demo deck is shown when omitted.
    config: Option<PathBuf>,

    /// Initial pane width in logical pixels; overrides `ui-width`.
    #[arg(long)]
    width: Option<f32>,

    /// Treat the host as having no touch screen.
    #[arg(long)]
    no_touch: bool,
}

fn demo_config() -> SlidesConfig {
    SlidesConfig::new(vec![
        SlideSource::text("Swipe or use the arrows"),
        SlideSource::text("Drag past the edges to feel the resistance"),
        SlideSource::text("Vertical drags are left alone"),
        SlideSource::text("Last slide. Next wraps only from code"),
    ])
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let (mut config, base_dir) = match &args.config {
        Some(path) => {
            let config = SlidesConfig::load(path)
                .with_context(|| format!("loading slideshow {}", path.display()))?;
            let base = path.parent().map(PathBuf::from).unwrap_or_default();
            (config, base)
        }
        None => (demo_config(), PathBuf::new()),
    };
    if let Some(width) = args.width {
        config = config.with_option("ui-width", f64::from(width));
    }
    if args.no_touch {
        config = config.with_option("ui-touch", false);
    }

    let slider = Slider::new(config).context("invalid slideshow configuration")?;
    let width = slider.ui().strip().pane_width.max(320.0);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([width, width * 0.625 + 48.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Slides",
        options,
        Box::new(move |cc| Ok(Box::new(SlidesApp::new(cc, slider, &base_dir)))),
    )
    .map_err(|e| anyhow::anyhow!("viewer failed: {}", e))
}
