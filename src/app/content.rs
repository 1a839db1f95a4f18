//! Strip painting for `SlidesApp`.
//!
//! Drives the slider once per frame (resize, input, transition polling)
//! and paints every visible pane at the strip offset.

use eframe::egui;

use slides::config::SlideSource;
use slides::ui::Pane;
use slides::UiInput;

use super::SlidesApp;

const PANE_COLORS: [egui::Color32; 4] = [
    egui::Color32::from_rgb(38, 70, 83),
    egui::Color32::from_rgb(42, 157, 143),
    egui::Color32::from_rgb(231, 111, 81),
    egui::Color32::from_rgb(69, 60, 103),
];

impl SlidesApp {
    pub fn draw_content(&mut self, ui: &mut egui::Ui) {
        let rect = ui.available_rect_before_wrap();
        ui.allocate_rect(rect, egui::Sense::click_and_drag());

        if (rect.width() - self.slider.ui().strip().pane_width).abs() > 0.5 {
            self.slider.dispatch(UiInput::Resize { width: rect.width() });
        }

        let options = self.slider.ui().options();
        let events = ui.input(|i| i.events.clone());
        for input in self.gestures.translate(&events, rect, options.mouse_drag) {
            self.slider.dispatch(input);
        }
        self.slider.poll_transition();

        let strip = self.slider.ui().strip();
        let duration = if strip.animate {
            options.animation_ms as f32 / 1000.0
        } else {
            0.0
        };
        let offset = ui
            .ctx()
            .animate_value_with_time(egui::Id::new("slides_strip"), strip.offset, duration);

        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 0.0, egui::Color32::from_gray(20));

        for (index, pane) in self.slider.ui().panes().iter().enumerate() {
            let pane_rect = egui::Rect::from_min_size(
                egui::pos2(rect.min.x + offset + pane.width * index as f32, rect.min.y),
                egui::vec2(pane.width, rect.height()),
            );
            if !pane_rect.intersects(rect) {
                continue;
            }
            self.paint_pane(&painter, pane_rect, index, pane);
        }
    }

    fn paint_pane(&self, painter: &egui::Painter, rect: egui::Rect, index: usize, pane: &Pane) {
        painter.rect_filled(rect.shrink(2.0), 6.0, PANE_COLORS[index % PANE_COLORS.len()]);

        let key = self.pane_images.get(index).and_then(|k| k.as_deref());
        match (&pane.source, key) {
            (SlideSource::Image { .. }, Some(key)) => {
                if let (Some(tex), Some(data)) = (self.textures.get(key), self.images.get(key)) {
                    let img_rect = fit(rect.shrink(8.0), data.width as f32, data.height as f32);
                    painter.image(
                        tex.id(),
                        img_rect,
                        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                        egui::Color32::WHITE,
                    );
                } else {
                    let label = if self.images.is_failed(key) {
                        "image unavailable"
                    } else {
                        "loading..."
                    };
                    painter.text(
                        rect.center(),
                        egui::Align2::CENTER_CENTER,
                        label,
                        egui::FontId::proportional(20.0),
                        egui::Color32::LIGHT_GRAY,
                    );
                }
            }
            (SlideSource::Text { text, .. }, _) | (SlideSource::Image { image: text, .. }, None) => {
                painter.text(
                    rect.center(),
                    egui::Align2::CENTER_CENTER,
                    text,
                    egui::FontId::proportional(30.0),
                    egui::Color32::WHITE,
                );
            }
        }

        if let Some(caption) = pane.source.caption() {
            painter.text(
                egui::pos2(rect.center().x, rect.max.y - 24.0),
                egui::Align2::CENTER_CENTER,
                caption,
                egui::FontId::proportional(16.0),
                egui::Color32::from_gray(230),
            );
        }
    }
}

/// Largest rect with the image's aspect ratio centred inside `outer`.
fn fit(outer: egui::Rect, width: f32, height: f32) -> egui::Rect {
    if width <= 0.0 || height <= 0.0 {
        return outer;
    }
    let scale = (outer.width() / width).min(outer.height() / height);
    egui::Rect::from_center_size(outer.center(), egui::vec2(width * scale, height * scale))
}
