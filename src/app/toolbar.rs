//! Bottom control bar for `SlidesApp`.
//!
//! Previous/next buttons, one dot per slide, and the latest slider event.

use eframe::egui;

use slides::UiInput;

use super::SlidesApp;

impl SlidesApp {
    pub fn draw_toolbar(&mut self, ui: &mut egui::Ui) {
        let strip = self.slider.ui().strip();
        let current = self.slider.current_slide();
        let count = self.slider.num_slides();

        ui.horizontal(|ui| {
            ui.add_space(4.0);

            if ui
                .add_enabled(
                    !strip.is_first,
                    egui::Button::new("\u{25C0} prev").min_size(egui::vec2(64.0, 28.0)),
                )
                .clicked()
            {
                self.slider.dispatch(UiInput::PrevButton);
            }

            // Position dots; clicking one jumps straight there
            for index in 0..count {
                let dot = if index == current { "\u{25CF}" } else { "\u{25CB}" };
                if ui.add(egui::Button::new(dot).frame(false)).clicked() {
                    self.slider.slide_to(index, index > current);
                }
            }

            if ui
                .add_enabled(
                    !strip.is_last,
                    egui::Button::new("next \u{25B6}").min_size(egui::vec2(64.0, 28.0)),
                )
                .clicked()
            {
                self.slider.dispatch(UiInput::NextButton);
            }

            ui.separator();
            ui.label(format!("{} / {}", current + 1, count));

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.colored_label(egui::Color32::GRAY, self.last_event.borrow().as_str());
            });
        });
    }
}
