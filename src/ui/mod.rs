//! UI strategies.
//!
//! The slider owns exactly one strategy and talks to it only through
//! [`SlidesUi`]. A strategy renders the panes, reports how many there are,
//! runs the visual transition, and turns raw input into navigation
//! requests that the slider then validates and applies.

pub mod default;
pub mod touch;

use std::collections::BTreeMap;

use crate::config::{SlideSource, UiOptions, DEFAULT_UI};
use crate::error::{Result, SlidesError};
use crate::transition::Transition;

pub use default::{DefaultSlidesUi, DefaultUiOptions, Listeners, Pane, Strip};
pub use touch::TouchPoint;

/// Snapshot of the slider's position handed to the strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlidePosition {
    pub current: usize,
    pub count: usize,
}

impl SlidePosition {
    pub fn is_first(&self) -> bool {
        self.current == 0
    }

    pub fn is_last(&self) -> bool {
        self.current + 1 >= self.count
    }
}

/// Navigation a strategy asks the slider to perform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Next,
    Prev,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    Start,
    Move,
    End,
    Cancel,
}

/// Raw input routed through the slider to its strategy
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UiInput {
    Touch { phase: TouchPhase, point: TouchPoint },
    /// Pointer drag standing in for a touch
    Drag { phase: TouchPhase, point: TouchPoint },
    NextButton,
    PrevButton,
    /// Container width changed
    Resize { width: f32 },
}

impl UiInput {
    pub fn touch(phase: TouchPhase, x: f32, y: f32) -> Self {
        Self::Touch {
            phase,
            point: TouchPoint::new(x, y),
        }
    }

    pub fn drag(phase: TouchPhase, x: f32, y: f32) -> Self {
        Self::Drag {
            phase,
            point: TouchPoint::new(x, y),
        }
    }
}

/// What a strategy did with one input
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UiResponse {
    pub navigation: Option<Navigation>,
    /// The input was consumed; the host should suppress its default handling
    /// (scrolling, text selection).
    pub prevent_default: bool,
}

impl UiResponse {
    pub fn ignored() -> Self {
        Self::default()
    }

    pub fn navigate(navigation: Navigation) -> Self {
        Self {
            navigation: Some(navigation),
            prevent_default: true,
        }
    }

    pub fn consumed() -> Self {
        Self {
            navigation: None,
            prevent_default: true,
        }
    }
}

/// Rendering and gesture strategy driven by a [`crate::Slider`].
pub trait SlidesUi {
    /// Fixed number of panes.
    fn num_slides(&self) -> usize;

    /// Start the visual change from `from` to `to`. `position` already
    /// reflects the new index.
    fn transition(&mut self, from: usize, to: usize, is_forward: bool, position: SlidePosition) -> Transition;

    fn handle_input(&mut self, _input: &UiInput, _position: SlidePosition) -> UiResponse {
        UiResponse::ignored()
    }

    /// A navigation requested through `handle_input` did not happen.
    fn navigation_declined(&mut self, _position: SlidePosition) {}

    /// Detach every input listener. Later input must be ignored.
    fn dispose(&mut self) {}
}

impl<U: SlidesUi + ?Sized> SlidesUi for Box<U> {
    fn num_slides(&self) -> usize {
        (**self).num_slides()
    }

    fn transition(&mut self, from: usize, to: usize, is_forward: bool, position: SlidePosition) -> Transition {
        (**self).transition(from, to, is_forward, position)
    }

    fn handle_input(&mut self, input: &UiInput, position: SlidePosition) -> UiResponse {
        (**self).handle_input(input, position)
    }

    fn navigation_declined(&mut self, position: SlidePosition) {
        (**self).navigation_declined(position)
    }

    fn dispose(&mut self) {
        (**self).dispose()
    }
}

/// Builds a boxed strategy from its options and the slide list.
pub type UiConstructor = fn(&UiOptions, &[SlideSource]) -> Result<Box<dyn SlidesUi>>;

/// Strategy constructors by name.
pub struct UiRegistry {
    constructors: BTreeMap<String, UiConstructor>,
}

impl UiRegistry {
    /// A registry without any strategy.
    pub fn empty() -> Self {
        Self {
            constructors: BTreeMap::new(),
        }
    }

    pub fn register(&mut self, name: impl Into<String>, constructor: UiConstructor) -> &mut Self {
        self.constructors.insert(name.into(), constructor);
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.constructors.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.constructors.keys().map(String::as_str)
    }

    pub fn build(&self, name: &str, options: &UiOptions, slides: &[SlideSource]) -> Result<Box<dyn SlidesUi>> {
        let constructor = self
            .constructors
            .get(name)
            .ok_or_else(|| SlidesError::UnknownUi(name.to_string()))?;
        constructor(options, slides)
    }
}

impl Default for UiRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(DEFAULT_UI, build_default);
        registry
    }
}

fn build_default(options: &UiOptions, slides: &[SlideSource]) -> Result<Box<dyn SlidesUi>> {
    Ok(Box::new(DefaultSlidesUi::from_options(options, slides)?))
}
