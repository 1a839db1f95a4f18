//! Default strategy: a horizontal strip of equally wide panes.
//!
//! ```text
//! ┌──────────────────────────────┐
//! │ [prev]                [next] │  ← buttons (never wrap)
//! │ ┌──────┬──────┬──────┬─────  │
//! │ │ pane │ pane │ pane │ ...   │  ← strip, translated by -width * index
//! │ └──────┴──────┴──────┴─────  │
//! └──────────────────────────────┘
//! ```
//!
//! The strategy does not draw anything itself. It keeps the [`Strip`]
//! render model up to date and the host paints it, animating toward the
//! offset when [`Strip::animate`] is set.

use crate::config::{SlideSource, UiOptions};
use crate::error::{Result, SlidesError};
use crate::transition::Transition;

use super::touch::{Classification, ElasticBounds, SwipeDecision, SwipeGesture, SwipePhase, TouchPoint};
use super::{Navigation, SlidePosition, SlidesUi, TouchPhase, UiInput, UiResponse};

pub const DEFAULT_WIDTH: f32 = 800.0;
pub const DEFAULT_ANIMATION_MS: u64 = 300;

/// Options understood by [`DefaultSlidesUi`], read from the `ui-` keys.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DefaultUiOptions {
    /// Initial pane width in logical pixels
    pub width: f32,
    /// Whether the host supports touch input. Decided once by the host.
    pub touch: bool,
    /// Feed mouse drags through the touch gesture
    pub mouse_drag: bool,
    /// Duration the host animates strip moves over
    pub animation_ms: u64,
}

impl Default for DefaultUiOptions {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            touch: true,
            mouse_drag: true,
            animation_ms: DEFAULT_ANIMATION_MS,
        }
    }
}

impl DefaultUiOptions {
    pub fn from_ui_options(options: &UiOptions) -> Result<Self> {
        let defaults = Self::default();
        let width = options.get_f32("width")?.unwrap_or(defaults.width);
        if !width.is_finite() || width < 0.0 {
            return Err(SlidesError::OptionOutOfRange {
                key: "width".to_string(),
                message: format!("{} is not a usable pane width", width),
            });
        }
        Ok(Self {
            width,
            touch: options.get_bool("touch")?.unwrap_or(defaults.touch),
            mouse_drag: options.get_bool("mouse-drag")?.unwrap_or(defaults.mouse_drag),
            animation_ms: options.get_u64("animation-ms")?.unwrap_or(defaults.animation_ms),
        })
    }
}

/// One slide container
#[derive(Debug, Clone, PartialEq)]
pub struct Pane {
    pub source: SlideSource,
    pub width: f32,
}

/// Render model of the strip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Strip {
    /// Horizontal translation in logical pixels
    pub offset: f32,
    /// Whether the host should animate toward `offset`
    pub animate: bool,
    pub pane_width: f32,
    pub pane_count: usize,
    /// Boundary markers
    pub is_first: bool,
    pub is_last: bool,
}

impl Strip {
    /// Total width of all panes side by side.
    pub fn width(&self) -> f32 {
        self.pane_width * self.pane_count as f32
    }

    /// CSS-style transform string for the current offset.
    pub fn translate_x(&self) -> String {
        format!("translateX({}px)", self.offset)
    }
}

/// Input listeners currently attached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Listeners {
    pub touch_start: bool,
    /// Pointer press starting an emulated touch
    pub mouse_down: bool,
    /// Classifies the first move after touch-start
    pub touch_move_init: bool,
    pub touch_move: bool,
    pub touch_end: bool,
    pub touch_cancel: bool,
    pub buttons: bool,
    pub resize: bool,
}

#[derive(Debug)]
pub struct DefaultSlidesUi {
    panes: Vec<Pane>,
    strip: Strip,
    options: DefaultUiOptions,
    gesture: SwipeGesture,
    disposed: bool,
}

impl DefaultSlidesUi {
    pub fn new(options: DefaultUiOptions, slides: &[SlideSource]) -> Self {
        let panes: Vec<Pane> = slides
            .iter()
            .map(|source| Pane {
                source: source.clone(),
                width: options.width,
            })
            .collect();
        let strip = Strip {
            offset: 0.0,
            animate: false,
            pane_width: options.width,
            pane_count: panes.len(),
            is_first: true,
            is_last: panes.len() <= 1,
        };
        log::debug!(
            "DefaultSlidesUi: {} panes, width {}px, touch {}",
            panes.len(),
            options.width,
            options.touch
        );
        Self {
            panes,
            strip,
            options,
            gesture: SwipeGesture::new(),
            disposed: false,
        }
    }

    pub fn from_options(options: &UiOptions, slides: &[SlideSource]) -> Result<Self> {
        Ok(Self::new(DefaultUiOptions::from_ui_options(options)?, slides))
    }

    pub fn panes(&self) -> &[Pane] {
        &self.panes
    }

    pub fn strip(&self) -> Strip {
        self.strip
    }

    pub fn options(&self) -> DefaultUiOptions {
        self.options
    }

    pub fn gesture_phase(&self) -> SwipePhase {
        self.gesture.phase()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn listeners(&self) -> Listeners {
        if self.disposed {
            return Listeners::default();
        }
        let phase = self.gesture.phase();
        let swiping = phase == SwipePhase::Swiping;
        Listeners {
            touch_start: self.options.touch,
            mouse_down: self.options.mouse_drag,
            touch_move_init: phase == SwipePhase::Classifying,
            touch_move: swiping,
            touch_end: swiping,
            touch_cancel: swiping,
            buttons: true,
            resize: true,
        }
    }

    fn set_offset(&mut self, offset: f32, animate: bool) {
        self.strip.offset = offset;
        self.strip.animate = animate;
    }

    fn mark_boundaries(&mut self, position: SlidePosition) {
        self.strip.is_first = position.is_first();
        self.strip.is_last = position.is_last();
    }

    fn resize(&mut self, width: f32, position: SlidePosition) {
        if !width.is_finite() || width < 0.0 {
            log::warn!("Ignoring resize to unusable width {}", width);
            return;
        }
        self.strip.pane_width = width;
        for pane in &mut self.panes {
            pane.width = width;
        }
        self.mark_boundaries(position);
        let offset = -width * position.current as f32;
        self.set_offset(offset, false);
        self.gesture.rebase(offset, ElasticBounds::for_position(width, position));
    }

    fn snap_back(&mut self) {
        let offset = self.gesture.initial_offset();
        self.set_offset(offset, true);
    }

    /// One step of the swipe protocol. `can_start` tells whether the input
    /// source has its start listener attached.
    fn handle_touch(
        &mut self,
        phase: TouchPhase,
        point: TouchPoint,
        position: SlidePosition,
        can_start: bool,
    ) -> UiResponse {
        let listeners = self.listeners();
        match phase {
            TouchPhase::Start if can_start => {
                let bounds = ElasticBounds::for_position(self.strip.pane_width, position);
                self.gesture.start(point, self.strip.offset, bounds);
                UiResponse::ignored()
            }
            TouchPhase::Move if listeners.touch_move_init => match self.gesture.classify(point) {
                Some(Classification::Horizontal) => UiResponse::consumed(),
                _ => UiResponse::ignored(),
            },
            TouchPhase::Move if listeners.touch_move => match self.gesture.drag(point) {
                Some(offset) => {
                    self.set_offset(offset, false);
                    UiResponse::consumed()
                }
                None => UiResponse::ignored(),
            },
            TouchPhase::End if listeners.touch_end => {
                let origin = self.gesture.origin();
                match self.gesture.release(point, position) {
                    Some(SwipeDecision::Prev) => UiResponse::navigate(Navigation::Prev),
                    Some(SwipeDecision::Next) => UiResponse::navigate(Navigation::Next),
                    Some(SwipeDecision::SnapBack) => {
                        self.snap_back();
                        if point.x != origin.x {
                            UiResponse::consumed()
                        } else {
                            UiResponse::ignored()
                        }
                    }
                    None => UiResponse::ignored(),
                }
            }
            TouchPhase::Cancel if listeners.touch_cancel => {
                if self.gesture.cancel().is_some() {
                    self.snap_back();
                }
                UiResponse::ignored()
            }
            TouchPhase::End | TouchPhase::Cancel => {
                // A tap or an abandoned vertical drag ends here.
                if self.gesture.phase() == SwipePhase::Classifying {
                    self.gesture.cancel();
                }
                UiResponse::ignored()
            }
            _ => UiResponse::ignored(),
        }
    }
}

impl SlidesUi for DefaultSlidesUi {
    fn num_slides(&self) -> usize {
        self.panes.len()
    }

    fn transition(&mut self, from: usize, to: usize, is_forward: bool, position: SlidePosition) -> Transition {
        self.mark_boundaries(position);
        let offset = -self.strip.pane_width * to as f32;
        self.set_offset(offset, true);
        log::debug!(
            "Strip {} -> {} ({}): {}",
            from,
            to,
            if is_forward { "forward" } else { "backward" },
            self.strip.translate_x()
        );
        Transition::resolved()
    }

    fn handle_input(&mut self, input: &UiInput, position: SlidePosition) -> UiResponse {
        if self.disposed {
            return UiResponse::ignored();
        }
        match *input {
            UiInput::Touch { phase, point } => {
                let can_start = self.listeners().touch_start;
                self.handle_touch(phase, point, position, can_start)
            }
            UiInput::Drag { phase, point } => {
                let can_start = self.listeners().mouse_down;
                self.handle_touch(phase, point, position, can_start)
            }
            UiInput::NextButton if !position.is_last() => UiResponse::navigate(Navigation::Next),
            UiInput::PrevButton if !position.is_first() => UiResponse::navigate(Navigation::Prev),
            UiInput::NextButton | UiInput::PrevButton => UiResponse::ignored(),
            UiInput::Resize { width } => {
                self.resize(width, position);
                UiResponse::ignored()
            }
        }
    }

    fn navigation_declined(&mut self, position: SlidePosition) {
        self.mark_boundaries(position);
        self.set_offset(-self.strip.pane_width * position.current as f32, true);
    }

    fn dispose(&mut self) {
        self.gesture.cancel();
        self.disposed = true;
        log::debug!("DefaultSlidesUi disposed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deck(n: usize) -> Vec<SlideSource> {
        (0..n).map(|i| SlideSource::text(format!("slide {}", i))).collect()
    }

    fn ui(n: usize, width: f32) -> DefaultSlidesUi {
        DefaultSlidesUi::new(
            DefaultUiOptions {
                width,
                ..DefaultUiOptions::default()
            },
            &deck(n),
        )
    }

    fn at(current: usize, count: usize) -> SlidePosition {
        SlidePosition { current, count }
    }

    #[test]
    fn initial_markers() {
        let single = ui(1, 400.0);
        assert!(single.strip().is_first && single.strip().is_last);
        let many = ui(3, 400.0);
        assert!(many.strip().is_first && !many.strip().is_last);
        assert_eq!(many.strip().width(), 1200.0);
    }

    #[test]
    fn transition_translates_strip() {
        let mut ui = ui(4, 400.0);
        let t = ui.transition(0, 2, true, at(2, 4));
        assert!(t.is_fulfilled());
        let strip = ui.strip();
        assert_eq!(strip.offset, -800.0);
        assert!(strip.animate);
        assert!(!strip.is_first && !strip.is_last);
        assert_eq!(strip.translate_x(), "translateX(-800px)");

        ui.transition(2, 3, true, at(3, 4));
        assert!(ui.strip().is_last);
    }

    #[test]
    fn buttons_never_wrap() {
        let mut ui = ui(3, 400.0);
        assert_eq!(ui.handle_input(&UiInput::PrevButton, at(0, 3)).navigation, None);
        assert_eq!(
            ui.handle_input(&UiInput::NextButton, at(0, 3)).navigation,
            Some(Navigation::Next)
        );
        assert_eq!(ui.handle_input(&UiInput::NextButton, at(2, 3)).navigation, None);
        assert_eq!(
            ui.handle_input(&UiInput::PrevButton, at(2, 3)).navigation,
            Some(Navigation::Prev)
        );
    }

    #[test]
    fn resize_reapplies_offset_without_animation() {
        let mut ui = ui(4, 400.0);
        ui.transition(0, 2, true, at(2, 4));
        ui.handle_input(&UiInput::Resize { width: 500.0 }, at(2, 4));
        let strip = ui.strip();
        assert_eq!(strip.offset, -1000.0);
        assert!(!strip.animate);
        assert!(ui.panes().iter().all(|p| p.width == 500.0));
    }

    #[test]
    fn vertical_drag_attaches_nothing() {
        let mut ui = ui(4, 400.0);
        ui.handle_input(&UiInput::touch(TouchPhase::Start, 100.0, 100.0), at(0, 4));
        assert!(ui.listeners().touch_move_init);

        let r = ui.handle_input(&UiInput::touch(TouchPhase::Move, 95.0, 50.0), at(0, 4));
        assert!(!r.prevent_default);
        let l = ui.listeners();
        assert!(!l.touch_move_init && !l.touch_move && !l.touch_end && !l.touch_cancel);

        let r = ui.handle_input(&UiInput::touch(TouchPhase::End, 0.0, 50.0), at(0, 4));
        assert_eq!(r.navigation, None);
        assert_eq!(ui.strip().offset, 0.0);
    }

    #[test]
    fn horizontal_swipe_requests_next() {
        let mut ui = ui(4, 400.0);
        ui.handle_input(&UiInput::touch(TouchPhase::Start, 100.0, 200.0), at(0, 4));
        let r = ui.handle_input(&UiInput::touch(TouchPhase::Move, 40.0, 195.0), at(0, 4));
        assert!(r.prevent_default);
        // classification does not move the strip
        assert_eq!(ui.strip().offset, 0.0);
        let l = ui.listeners();
        assert!(l.touch_move && l.touch_end && l.touch_cancel && !l.touch_move_init);

        ui.handle_input(&UiInput::touch(TouchPhase::Move, 10.0, 195.0), at(0, 4));
        let strip = ui.strip();
        assert!(strip.offset < 0.0 && strip.offset > -440.0);
        assert!(!strip.animate);

        let r = ui.handle_input(&UiInput::touch(TouchPhase::End, 10.0, 195.0), at(0, 4));
        assert_eq!(r.navigation, Some(Navigation::Next));
        assert!(!ui.listeners().touch_end);
    }

    #[test]
    fn cancel_snaps_back() {
        let mut ui = ui(4, 400.0);
        ui.transition(0, 1, true, at(1, 4));
        ui.handle_input(&UiInput::touch(TouchPhase::Start, 200.0, 0.0), at(1, 4));
        ui.handle_input(&UiInput::touch(TouchPhase::Move, 250.0, 0.0), at(1, 4));
        ui.handle_input(&UiInput::touch(TouchPhase::Move, 300.0, 0.0), at(1, 4));
        assert!(ui.strip().offset > -400.0);

        let r = ui.handle_input(&UiInput::touch(TouchPhase::Cancel, 300.0, 0.0), at(1, 4));
        assert_eq!(r.navigation, None);
        assert_eq!(ui.strip().offset, -400.0);
        assert!(!ui.listeners().touch_cancel);
    }

    #[test]
    fn touch_disabled_ignores_gestures() {
        let mut ui = DefaultSlidesUi::new(
            DefaultUiOptions {
                touch: false,
                ..DefaultUiOptions::default()
            },
            &deck(3),
        );
        assert!(!ui.listeners().touch_start);
        ui.handle_input(&UiInput::touch(TouchPhase::Start, 100.0, 0.0), at(0, 3));
        assert_eq!(ui.gesture_phase(), SwipePhase::Idle);
    }

    #[test]
    fn mouse_drag_works_without_touch() {
        let mut ui = DefaultSlidesUi::new(
            DefaultUiOptions {
                width: 400.0,
                touch: false,
                mouse_drag: true,
                ..DefaultUiOptions::default()
            },
            &deck(3),
        );
        let l = ui.listeners();
        assert!(!l.touch_start && l.mouse_down);

        ui.handle_input(&UiInput::drag(TouchPhase::Start, 300.0, 100.0), at(0, 3));
        ui.handle_input(&UiInput::drag(TouchPhase::Move, 250.0, 100.0), at(0, 3));
        ui.handle_input(&UiInput::drag(TouchPhase::Move, 100.0, 100.0), at(0, 3));
        let r = ui.handle_input(&UiInput::drag(TouchPhase::End, 100.0, 100.0), at(0, 3));
        assert_eq!(r.navigation, Some(Navigation::Next));
    }

    #[test]
    fn mouse_drag_can_be_disabled_alone() {
        let mut ui = DefaultSlidesUi::new(
            DefaultUiOptions {
                mouse_drag: false,
                ..DefaultUiOptions::default()
            },
            &deck(3),
        );
        ui.handle_input(&UiInput::drag(TouchPhase::Start, 100.0, 0.0), at(0, 3));
        assert_eq!(ui.gesture_phase(), SwipePhase::Idle);
        ui.handle_input(&UiInput::touch(TouchPhase::Start, 100.0, 0.0), at(0, 3));
        assert_eq!(ui.gesture_phase(), SwipePhase::Classifying);
    }

    #[test]
    fn resize_mid_swipe_moves_snap_back_target() {
        let mut ui = ui(4, 400.0);
        ui.transition(0, 1, true, at(1, 4));
        ui.handle_input(&UiInput::touch(TouchPhase::Start, 200.0, 0.0), at(1, 4));
        ui.handle_input(&UiInput::touch(TouchPhase::Move, 250.0, 0.0), at(1, 4));
        ui.handle_input(&UiInput::Resize { width: 500.0 }, at(1, 4));
        assert_eq!(ui.gesture_phase(), SwipePhase::Swiping);

        ui.handle_input(&UiInput::touch(TouchPhase::Move, 300.0, 0.0), at(1, 4));
        assert!(ui.strip().offset > -500.0);
        ui.handle_input(&UiInput::touch(TouchPhase::Cancel, 300.0, 0.0), at(1, 4));
        assert_eq!(ui.strip().offset, -500.0);
    }

    #[test]
    fn dispose_detaches_everything() {
        let mut ui = ui(3, 400.0);
        ui.dispose();
        assert_eq!(ui.listeners(), Listeners::default());
        let r = ui.handle_input(&UiInput::NextButton, at(0, 3));
        assert_eq!(r, UiResponse::ignored());
    }

    #[test]
    fn options_from_prefixed_config() {
        let config = crate::config::SlidesConfig::new(deck(2))
            .with_option("ui-width", 320)
            .with_option("ui-touch", false)
            .with_option("ui-animation-ms", 150);
        let opts = DefaultUiOptions::from_ui_options(&config.ui_options()).unwrap();
        assert_eq!(opts.width, 320.0);
        assert!(!opts.touch);
        assert!(opts.mouse_drag);
        assert_eq!(opts.animation_ms, 150);
    }

    #[test]
    fn negative_width_is_rejected() {
        let config = crate::config::SlidesConfig::new(deck(2)).with_option("ui-width", -1.0);
        assert!(matches!(
            DefaultUiOptions::from_ui_options(&config.ui_options()),
            Err(SlidesError::OptionOutOfRange { .. })
        ));
    }
}
