//! Translation of egui input events into slider inputs.
//!
//! Touch events map one to one. With mouse-drag emulation on, a primary
//! button press inside the strip starts a drag and the following pointer
//! moves and release continue it. egui also synthesizes pointer events for
//! touches, so emulation is suspended while a real touch is down.

use eframe::egui;

use slides::{TouchPhase, UiInput};

#[derive(Debug, Default)]
pub struct GestureInput {
    pointer_down: bool,
    touch_down: bool,
}

impl GestureInput {
    /// Convert this frame's events. Coordinates become relative to `rect`.
    pub fn translate(&mut self, events: &[egui::Event], rect: egui::Rect, mouse_drag: bool) -> Vec<UiInput> {
        let mut out = Vec::new();
        let local = |pos: egui::Pos2| (pos.x - rect.min.x, pos.y - rect.min.y);

        for event in events {
            match event {
                egui::Event::Touch { phase, pos, .. } => {
                    let phase = match phase {
                        egui::TouchPhase::Start => {
                            if !rect.contains(*pos) {
                                continue;
                            }
                            self.touch_down = true;
                            TouchPhase::Start
                        }
                        egui::TouchPhase::Move if self.touch_down => TouchPhase::Move,
                        egui::TouchPhase::End if self.touch_down => {
                            self.touch_down = false;
                            TouchPhase::End
                        }
                        egui::TouchPhase::Cancel if self.touch_down => {
                            self.touch_down = false;
                            TouchPhase::Cancel
                        }
                        _ => continue,
                    };
                    let (x, y) = local(*pos);
                    out.push(UiInput::touch(phase, x, y));
                }
                egui::Event::PointerButton {
                    pos,
                    button: egui::PointerButton::Primary,
                    pressed,
                    ..
                } if mouse_drag && !self.touch_down => {
                    let (x, y) = local(*pos);
                    if *pressed && rect.contains(*pos) {
                        self.pointer_down = true;
                        out.push(UiInput::drag(TouchPhase::Start, x, y));
                    } else if !*pressed && self.pointer_down {
                        self.pointer_down = false;
                        out.push(UiInput::drag(TouchPhase::End, x, y));
                    }
                }
                egui::Event::PointerMoved(pos) if self.pointer_down && !self.touch_down => {
                    let (x, y) = local(*pos);
                    out.push(UiInput::drag(TouchPhase::Move, x, y));
                }
                egui::Event::PointerGone if self.pointer_down => {
                    self.pointer_down = false;
                    out.push(UiInput::drag(TouchPhase::Cancel, 0.0, 0.0));
                }
                egui::Event::Key {
                    key: egui::Key::ArrowRight,
                    pressed: true,
                    ..
                } => out.push(UiInput::NextButton),
                egui::Event::Key {
                    key: egui::Key::ArrowLeft,
                    pressed: true,
                    ..
                } => out.push(UiInput::PrevButton),
                _ => {}
            }
        }
        out
    }
}
