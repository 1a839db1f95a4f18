//! `SlidesApp` — the egui viewer state.
//!
//! Methods are split across sibling modules:
//!
//! - `input`   — egui events to slider inputs
//! - `toolbar` — prev/next buttons, position dots, last event
//! - `content` — strip painting and per-frame slider driving

pub mod content;
pub mod input;
pub mod toolbar;

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use eframe::egui;

use slides::content::{decode_local, ImageLoader, ImageLocation};
use slides::{SlideSource, Slider};

use input::GestureInput;

// ─── Application state ───────────────────────────────────────────────────────

pub struct SlidesApp {
    pub slider: Slider,
    pub images: ImageLoader,
    pub textures: HashMap<String, egui::TextureHandle>,
    /// Image key per pane; `None` for text slides
    pub pane_images: Vec<Option<String>>,
    pub gestures: GestureInput,
    /// Most recent slider event, for the toolbar
    pub last_event: Rc<RefCell<String>>,
}

// ─── Construction ────────────────────────────────────────────────────────────

impl SlidesApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, mut slider: Slider, base_dir: &Path) -> Self {
        let mut images = ImageLoader::new();
        let mut pane_images = Vec::with_capacity(slider.num_slides());
        let mut local: Vec<(String, PathBuf)> = Vec::new();

        for pane in slider.ui().panes() {
            let key = match &pane.source {
                SlideSource::Image { image, .. } => match ImageLocation::parse(image).relative_to(base_dir) {
                    ImageLocation::Remote(url) => {
                        images.request(&url);
                        Some(url.to_string())
                    }
                    ImageLocation::Local(path) => {
                        let key = path.display().to_string();
                        local.push((key.clone(), path));
                        Some(key)
                    }
                },
                SlideSource::Text { .. } => None,
            };
            pane_images.push(key);
        }

        let paths: Vec<PathBuf> = local.iter().map(|(_, path)| path.clone()).collect();
        for ((key, _), data) in local.into_iter().zip(decode_local(&paths)) {
            images.insert(key, data);
        }

        let last_event = Rc::new(RefCell::new(String::from("ready")));
        register_event_log(&mut slider, &last_event);

        Self {
            slider,
            images,
            textures: HashMap::new(),
            pane_images,
            gestures: GestureInput::default(),
            last_event,
        }
    }

    /// Upload freshly decoded images as textures.
    fn upload_textures(&mut self, ctx: &egui::Context) {
        self.images.poll();
        for key in self.pane_images.iter().flatten() {
            if self.textures.contains_key(key) {
                continue;
            }
            if let Some(data) = self.images.get(key) {
                let image = egui::ColorImage::from_rgba_unmultiplied(
                    [data.width as usize, data.height as usize],
                    &data.rgba,
                );
                let tex = ctx.load_texture(format!("slide_{}", key), image, egui::TextureOptions::LINEAR);
                self.textures.insert(key.clone(), tex);
            }
        }
    }
}

// ─── Event log ───────────────────────────────────────────────────────────────

fn register_event_log(slider: &mut Slider, last_event: &Rc<RefCell<String>>) {
    let sink = Rc::clone(last_event);
    slider.on_change(move |e| {
        log::debug!("change -> {} (forward: {})", e.index, e.is_forward);
        *sink.borrow_mut() = format!("change to {}", e.index + 1);
        true
    });
    let sink = Rc::clone(last_event);
    slider.on_transition_start(move |e| {
        log::debug!("transitionStart {} -> {}", e.current, e.next);
        *sink.borrow_mut() = format!("moving {} -> {}", e.current + 1, e.next + 1);
    });
    let sink = Rc::clone(last_event);
    slider.on_transition_complete(move |e| {
        log::info!("Showing slide {} (from {})", e.current, e.previous);
        *sink.borrow_mut() = format!("showing {}", e.current + 1);
    });
}

// ─── eframe::App ─────────────────────────────────────────────────────────────

impl eframe::App for SlidesApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.upload_textures(ctx);
        if self.images.pending_count() > 0 {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }

        egui::TopBottomPanel::bottom("controls").show(ctx, |ui| {
            self.draw_toolbar(ui);
        });

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                self.draw_content(ui);
            });
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.slider.dispose();
    }
}
