pub mod config;
pub mod error;
pub mod events;
pub mod slider;
pub mod transition;
pub mod ui;

// Slide image decoding for hosts that render picture decks
pub mod content;

pub use config::{SlideSource, SlidesConfig, UiOptions};
pub use error::{Result, SlidesError};
pub use events::{ChangeEvent, Events, ListenerId, TransitionComplete, TransitionStart};
pub use slider::Slider;
pub use transition::{Transition, TransitionState};
pub use ui::{DefaultSlidesUi, Navigation, SlidePosition, SlidesUi, TouchPhase, UiInput, UiRegistry, UiResponse};
