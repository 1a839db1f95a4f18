//! Slide-index state machine.
//!
//! `Slider` holds the current index and validates every navigation request
//! before handing the visual work to its strategy. The logical index is
//! updated as soon as a navigation is accepted; the visual transition
//! follows and may be superseded by a newer navigation at any time. Only the
//! newest transition ever reports `transitionComplete`.

use crate::config::{SlideSource, SlidesConfig, UiOptions};
use crate::error::{Result, SlidesError};
use crate::events::{ChangeEvent, Events, ListenerId, TransitionComplete, TransitionStart};
use crate::transition::{InFlight, Transition};
use crate::ui::{DefaultSlidesUi, Navigation, SlidePosition, SlidesUi, UiInput, UiRegistry, UiResponse};

pub struct Slider<U: SlidesUi = DefaultSlidesUi> {
    current: usize,
    config: SlidesConfig,
    ui: U,
    events: Events,
    transition: Option<InFlight>,
    disposed: bool,
}

impl Slider<DefaultSlidesUi> {
    /// Build a slider with the default strip strategy.
    pub fn new(config: SlidesConfig) -> Result<Self> {
        Self::with_ui(config, DefaultSlidesUi::from_options)
    }
}

impl Slider<Box<dyn SlidesUi>> {
    /// Build a slider with the strategy `config.ui` names in `registry`.
    pub fn from_registry(config: SlidesConfig, registry: &UiRegistry) -> Result<Self> {
        let name = config.ui.clone();
        Self::with_ui(config, |options, slides| registry.build(&name, options, slides))
    }
}

impl<U: SlidesUi> Slider<U> {
    /// Build a slider whose strategy is produced by `build` from the
    /// stripped `ui-` options and the slide list.
    pub fn with_ui<F>(config: SlidesConfig, build: F) -> Result<Self>
    where
        F: FnOnce(&UiOptions, &[SlideSource]) -> Result<U>,
    {
        config.validate()?;
        let ui = build(&config.ui_options(), &config.slides)?;
        if ui.num_slides() == 0 {
            return Err(SlidesError::NoSlides);
        }
        log::info!("Slider ready: {} slides, ui \"{}\"", ui.num_slides(), config.ui);
        Ok(Self {
            current: 0,
            config,
            ui,
            events: Events::new(),
            transition: None,
            disposed: false,
        })
    }

    pub fn config(&self) -> &SlidesConfig {
        &self.config
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    pub fn ui_mut(&mut self) -> &mut U {
        &mut self.ui
    }

    pub fn events_mut(&mut self) -> &mut Events {
        &mut self.events
    }

    pub fn on_change(&mut self, listener: impl FnMut(&ChangeEvent) -> bool + 'static) -> ListenerId {
        self.events.on_change(listener)
    }

    pub fn on_transition_start(&mut self, listener: impl FnMut(&TransitionStart) + 'static) -> ListenerId {
        self.events.on_transition_start(listener)
    }

    pub fn on_transition_complete(
        &mut self,
        listener: impl FnMut(&TransitionComplete) + 'static,
    ) -> ListenerId {
        self.events.on_transition_complete(listener)
    }

    pub fn off(&mut self, id: ListenerId) -> bool {
        self.events.off(id)
    }

    pub fn current_slide(&self) -> usize {
        self.current
    }

    pub fn num_slides(&self) -> usize {
        self.ui.num_slides()
    }

    pub fn is_first_slide(&self) -> bool {
        self.current == 0
    }

    pub fn is_last_slide(&self) -> bool {
        self.current + 1 == self.num_slides()
    }

    pub fn position(&self) -> SlidePosition {
        SlidePosition {
            current: self.current,
            count: self.num_slides(),
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Whether a visual transition is still pending.
    pub fn transition_in_flight(&self) -> bool {
        self.transition.is_some()
    }

    /// Advance one slide, wrapping from the last slide to the first.
    pub fn next(&mut self) -> bool {
        let target = if self.is_last_slide() { 0 } else { self.current + 1 };
        self.slide_to(target, true)
    }

    /// Go back one slide, wrapping from the first slide to the last.
    pub fn prev(&mut self) -> bool {
        let target = if self.is_first_slide() {
            self.num_slides().saturating_sub(1)
        } else {
            self.current - 1
        };
        self.slide_to(target, false)
    }

    /// Navigate to `index`.
    ///
    /// Redundant and out-of-range targets are ignored, and any `change`
    /// listener may veto. Returns whether the navigation was committed.
    pub fn slide_to(&mut self, index: usize, is_forward: bool) -> bool {
        if self.disposed || index == self.current || index >= self.num_slides() {
            return false;
        }
        if !self.events.emit_change(&ChangeEvent { index, is_forward }) {
            log::debug!("Navigation to slide {} vetoed", index);
            return false;
        }
        let previous = self.current;
        self.events.emit_transition_start(&TransitionStart {
            current: previous,
            next: index,
        });
        self.current = index;

        if let Some(stale) = self.transition.take() {
            if stale.handle.cancel() {
                log::debug!("Cancelled transition from slide {}", stale.previous);
            }
        }
        let position = self.position();
        let handle = self.ui.transition(previous, index, is_forward, position);
        self.transition = Some(InFlight { handle, previous });
        log::debug!("Slide {} -> {}", previous, index);
        self.poll_transition();
        true
    }

    /// Emit `transitionComplete` if the newest transition has finished.
    ///
    /// Hosts with strategies that settle transitions later call this once
    /// per frame. Returns `true` if a completion was emitted.
    pub fn poll_transition(&mut self) -> bool {
        let Some(in_flight) = self.transition.as_ref() else {
            return false;
        };
        if in_flight.handle.is_cancelled() {
            self.transition = None;
            return false;
        }
        if !in_flight.handle.is_fulfilled() {
            return false;
        }
        let previous = in_flight.previous;
        self.transition = None;
        self.events.emit_transition_complete(&TransitionComplete {
            previous,
            current: self.current,
        });
        true
    }

    /// The pending transition handle, if any.
    pub fn pending_transition(&self) -> Option<&Transition> {
        self.transition.as_ref().map(|t| &t.handle)
    }

    /// Route one input to the strategy and apply the navigation it asks for.
    pub fn dispatch(&mut self, input: UiInput) -> UiResponse {
        if self.disposed {
            return UiResponse::ignored();
        }
        let position = self.position();
        let response = self.ui.handle_input(&input, position);
        if let Some(navigation) = response.navigation {
            let committed = match navigation {
                Navigation::Next => self.next(),
                Navigation::Prev => self.prev(),
            };
            if !committed {
                let position = self.position();
                self.ui.navigation_declined(position);
            }
        }
        response
    }

    /// Detach every listener and stop reacting to navigation and input.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        if let Some(in_flight) = self.transition.take() {
            in_flight.handle.cancel();
        }
        self.events.clear();
        self.ui.dispose();
        self.disposed = true;
        log::info!("Slider disposed at slide {}", self.current);
    }
}

impl<U: SlidesUi> std::fmt::Debug for Slider<U> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Slider")
            .field("current", &self.current)
            .field("num_slides", &self.num_slides())
            .field("transition_in_flight", &self.transition.is_some())
            .field("disposed", &self.disposed)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::TouchPhase;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Clone, PartialEq)]
    enum Seen {
        Change(usize, bool),
        Start(usize, usize),
        Complete(usize, usize),
    }

    fn config(n: usize) -> SlidesConfig {
        SlidesConfig::new((0..n).map(|i| SlideSource::text(format!("{}", i))).collect())
            .with_option("ui-width", 400)
    }

    fn record<U: SlidesUi>(slider: &mut Slider<U>) -> Rc<RefCell<Vec<Seen>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let l = Rc::clone(&log);
        slider.on_change(move |e| {
            l.borrow_mut().push(Seen::Change(e.index, e.is_forward));
            true
        });
        let l = Rc::clone(&log);
        slider.on_transition_start(move |e| l.borrow_mut().push(Seen::Start(e.current, e.next)));
        let l = Rc::clone(&log);
        slider.on_transition_complete(move |e| l.borrow_mut().push(Seen::Complete(e.previous, e.current)));
        log
    }

    /// Strategy whose transitions stay pending until the test settles them.
    struct ManualUi {
        count: usize,
        started: Vec<Transition>,
    }

    impl SlidesUi for ManualUi {
        fn num_slides(&self) -> usize {
            self.count
        }

        fn transition(&mut self, _from: usize, _to: usize, _fwd: bool, _pos: SlidePosition) -> Transition {
            let t = Transition::pending();
            self.started.push(t.clone());
            t
        }
    }

    fn manual(n: usize) -> Slider<ManualUi> {
        Slider::with_ui(config(n), |_, slides| {
            Ok(ManualUi {
                count: slides.len(),
                started: Vec::new(),
            })
        })
        .unwrap()
    }

    #[test]
    fn slide_to_emits_in_order() {
        let mut slider = Slider::new(config(4)).unwrap();
        let log = record(&mut slider);
        assert!(slider.slide_to(2, true));
        assert_eq!(slider.current_slide(), 2);
        assert_eq!(
            *log.borrow(),
            vec![Seen::Change(2, true), Seen::Start(0, 2), Seen::Complete(0, 2)]
        );
        assert!(!slider.transition_in_flight());
    }

    #[test]
    fn every_valid_index_sets_boundaries() {
        let mut slider = Slider::new(config(5)).unwrap();
        for index in [4, 0, 3, 1, 2] {
            slider.slide_to(index, true);
            assert_eq!(slider.current_slide(), index);
            assert_eq!(slider.is_first_slide(), index == 0);
            assert_eq!(slider.is_last_slide(), index == 4);
        }
    }

    #[test]
    fn out_of_range_and_redundant_are_silent() {
        let mut slider = Slider::new(config(3)).unwrap();
        let log = record(&mut slider);
        assert!(!slider.slide_to(3, true));
        assert!(!slider.slide_to(usize::MAX, false));
        assert!(!slider.slide_to(0, true));
        assert_eq!(slider.current_slide(), 0);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn wrap_around_scenario() {
        let mut slider = Slider::new(config(4)).unwrap();
        let log = record(&mut slider);
        slider.prev();
        assert_eq!(slider.current_slide(), 3);
        slider.next();
        assert_eq!(slider.current_slide(), 0);
        let changes: Vec<Seen> = log
            .borrow()
            .iter()
            .filter(|s| matches!(s, Seen::Change(..)))
            .cloned()
            .collect();
        assert_eq!(changes, vec![Seen::Change(3, false), Seen::Change(0, true)]);
    }

    #[test]
    fn veto_blocks_everything() {
        let mut slider = Slider::new(config(4)).unwrap();
        let log = record(&mut slider);
        slider.on_change(|e| e.index != 2);
        assert!(!slider.slide_to(2, true));
        assert_eq!(slider.current_slide(), 0);
        assert_eq!(*log.borrow(), vec![Seen::Change(2, true)]);

        assert!(slider.slide_to(1, true));
        assert_eq!(slider.current_slide(), 1);
    }

    #[test]
    fn superseded_transition_never_completes() {
        let mut slider = manual(4);
        let log = record(&mut slider);
        slider.slide_to(1, true);
        assert!(slider.transition_in_flight());
        slider.slide_to(3, true);
        assert_eq!(slider.current_slide(), 3);

        let first = slider.ui().started[0].clone();
        let second = slider.ui().started[1].clone();
        assert!(first.is_cancelled());
        assert!(!first.complete());
        assert!(!slider.poll_transition());

        assert!(second.complete());
        assert!(slider.poll_transition());
        let completes: Vec<Seen> = log
            .borrow()
            .iter()
            .filter(|s| matches!(s, Seen::Complete(..)))
            .cloned()
            .collect();
        assert_eq!(completes, vec![Seen::Complete(1, 3)]);
        assert!(!slider.poll_transition());
    }

    #[test]
    fn externally_cancelled_transition_is_dropped() {
        let mut slider = manual(3);
        let log = record(&mut slider);
        slider.slide_to(2, true);
        slider.ui().started[0].cancel();
        assert!(!slider.poll_transition());
        assert!(!slider.transition_in_flight());
        assert!(!log.borrow().iter().any(|s| matches!(s, Seen::Complete(..))));
    }

    #[test]
    fn swipe_scenario_advances() {
        let mut slider = Slider::new(config(4)).unwrap();
        slider.dispatch(UiInput::touch(TouchPhase::Start, 100.0, 200.0));
        let r = slider.dispatch(UiInput::touch(TouchPhase::Move, 40.0, 195.0));
        assert!(r.prevent_default);
        slider.dispatch(UiInput::touch(TouchPhase::Move, 10.0, 195.0));
        let dragged = slider.ui().strip().offset;
        let rel: f32 = 90.0 / 440.0;
        assert_eq!(dragged, (-440.0 * (1.0 - (1.0 - rel).powi(3))).round());

        let r = slider.dispatch(UiInput::touch(TouchPhase::End, 10.0, 195.0));
        assert_eq!(r.navigation, Some(Navigation::Next));
        assert_eq!(slider.current_slide(), 1);
        assert_eq!(slider.ui().strip().offset, -400.0);
    }

    #[test]
    fn vertical_swipe_scenario_does_nothing() {
        let mut slider = Slider::new(config(4)).unwrap();
        let log = record(&mut slider);
        slider.dispatch(UiInput::touch(TouchPhase::Start, 100.0, 100.0));
        slider.dispatch(UiInput::touch(TouchPhase::Move, 95.0, 50.0));
        let listeners = slider.ui().listeners();
        assert!(!listeners.touch_move && !listeners.touch_end);
        slider.dispatch(UiInput::touch(TouchPhase::Move, 0.0, 40.0));
        slider.dispatch(UiInput::touch(TouchPhase::End, 0.0, 40.0));
        assert_eq!(slider.current_slide(), 0);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn vetoed_swipe_snaps_strip_back() {
        let mut slider = Slider::new(config(4)).unwrap();
        slider.on_change(|_| false);
        slider.dispatch(UiInput::touch(TouchPhase::Start, 300.0, 0.0));
        slider.dispatch(UiInput::touch(TouchPhase::Move, 250.0, 0.0));
        slider.dispatch(UiInput::touch(TouchPhase::Move, 100.0, 0.0));
        assert!(slider.ui().strip().offset < 0.0);
        slider.dispatch(UiInput::touch(TouchPhase::End, 100.0, 0.0));
        assert_eq!(slider.current_slide(), 0);
        assert_eq!(slider.ui().strip().offset, 0.0);
    }

    #[test]
    fn buttons_route_through_slider() {
        let mut slider = Slider::new(config(2)).unwrap();
        slider.dispatch(UiInput::NextButton);
        assert_eq!(slider.current_slide(), 1);
        slider.dispatch(UiInput::NextButton);
        assert_eq!(slider.current_slide(), 1);
        slider.dispatch(UiInput::PrevButton);
        assert_eq!(slider.current_slide(), 0);
    }

    #[test]
    fn resize_fires_no_events() {
        let mut slider = Slider::new(config(3)).unwrap();
        slider.slide_to(1, true);
        let log = record(&mut slider);
        slider.dispatch(UiInput::Resize { width: 640.0 });
        assert_eq!(slider.ui().strip().offset, -640.0);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn dispose_stops_everything() {
        let mut slider = manual(3);
        let log = record(&mut slider);
        slider.slide_to(1, true);
        let pending = slider.ui().started[0].clone();
        slider.dispose();
        assert!(pending.is_cancelled());
        assert!(!slider.next());
        assert_eq!(slider.current_slide(), 1);
        assert_eq!(slider.dispatch(UiInput::NextButton), UiResponse::ignored());
        assert!(slider.events_mut().is_empty());
        assert_eq!(log.borrow().len(), 2);
    }

    #[test]
    fn single_slide_wraps_to_itself() {
        let mut slider = Slider::new(config(1)).unwrap();
        assert!(slider.is_first_slide() && slider.is_last_slide());
        assert!(!slider.next());
        assert!(!slider.prev());
    }

    #[test]
    fn registry_slider_uses_named_strategy() {
        let registry = UiRegistry::default();
        let mut slider = Slider::from_registry(config(3), &registry).unwrap();
        assert_eq!(slider.num_slides(), 3);
        slider.next();
        assert_eq!(slider.current_slide(), 1);

        let mut bad = config(3);
        bad.ui = "cube".to_string();
        assert!(matches!(
            Slider::from_registry(bad, &registry).err(),
            Some(SlidesError::UnknownUi(_))
        ));
    }

    #[test]
    fn empty_deck_is_rejected() {
        assert!(matches!(
            Slider::new(SlidesConfig::new(Vec::new())).err(),
            Some(SlidesError::NoSlides)
        ));
    }

    #[test]
    fn strategy_without_panes_is_rejected() {
        let built = Slider::with_ui(config(2), |_, _| {
            Ok(ManualUi {
                count: 0,
                started: Vec::new(),
            })
        });
        assert!(matches!(built.err(), Some(SlidesError::NoSlides)));

        let mut registry = UiRegistry::empty();
        registry.register("blank", |_, _| {
            Ok(Box::new(ManualUi {
                count: 0,
                started: Vec::new(),
            }) as Box<dyn SlidesUi>)
        });
        let mut named = config(2);
        named.ui = "blank".to_string();
        assert!(matches!(
            Slider::from_registry(named, &registry).err(),
            Some(SlidesError::NoSlides)
        ));
    }
}
