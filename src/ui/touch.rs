//! Swipe Gesture Recognition
//!
//! Turns a single-finger touch sequence into a horizontal swipe:
//! - touch-start records the origin, the strip offset, and the elastic bounds
//! - the first move classifies the drag; vertical drags are left to scrolling
//! - later moves follow the finger with cubic ease-out resistance
//! - release picks previous / next / snap-back from the drag direction

use super::SlidePosition;

/// Fraction of the pane width a drag may travel toward an edge with no slide.
pub const EDGE_RESISTANCE: f32 = 0.1;
/// Fraction of the pane width a drag may travel toward a neighbouring slide.
pub const NEIGHBOUR_RESISTANCE: f32 = 1.1;

/// Touch coordinates in logical pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    pub x: f32,
    pub y: f32,
}

impl TouchPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Maximum travel of the strip while dragging, per direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElasticBounds {
    /// Travel when dragging right, toward the previous slide
    pub max_left: f32,
    /// Travel when dragging left, toward the next slide
    pub max_right: f32,
}

impl ElasticBounds {
    pub fn for_position(pane_width: f32, position: SlidePosition) -> Self {
        let factor = |at_edge: bool| if at_edge { EDGE_RESISTANCE } else { NEIGHBOUR_RESISTANCE };
        Self {
            max_left: pane_width * factor(position.is_first()),
            max_right: pane_width * factor(position.is_last()),
        }
    }

    /// Damped strip displacement for a raw finger displacement.
    ///
    /// Negative distances drag left and are limited by `max_right`.
    pub fn resist(&self, distance: f32) -> f32 {
        if distance < 0.0 {
            -ease_out(-distance, self.max_right)
        } else {
            ease_out(distance, self.max_left)
        }
    }
}

/// `bound * (1 - (1 - min(1, d / bound))^3)`, approaching `bound` asymptotically.
pub fn ease_out(distance: f32, bound: f32) -> f32 {
    if bound <= 0.0 {
        return 0.0;
    }
    let relative = (distance / bound).min(1.0);
    bound * (1.0 - (1.0 - relative).powi(3))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipePhase {
    /// Waiting for touch-start
    Idle,
    /// Touch is down, first move not seen yet
    Classifying,
    /// Committed to a horizontal swipe
    Swiping,
}

/// Outcome of the first move after touch-start
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Horizontal,
    Vertical,
}

/// Outcome of releasing a committed swipe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDecision {
    Prev,
    Next,
    SnapBack,
}

/// Single-gesture swipe state machine.
#[derive(Debug, Clone)]
pub struct SwipeGesture {
    phase: SwipePhase,
    origin: TouchPoint,
    initial_offset: f32,
    bounds: ElasticBounds,
}

impl Default for SwipeGesture {
    fn default() -> Self {
        Self::new()
    }
}

impl SwipeGesture {
    pub fn new() -> Self {
        Self {
            phase: SwipePhase::Idle,
            origin: TouchPoint::new(0.0, 0.0),
            initial_offset: 0.0,
            bounds: ElasticBounds {
                max_left: 0.0,
                max_right: 0.0,
            },
        }
    }

    pub fn phase(&self) -> SwipePhase {
        self.phase
    }

    pub fn origin(&self) -> TouchPoint {
        self.origin
    }

    pub fn bounds(&self) -> ElasticBounds {
        self.bounds
    }

    /// Strip offset when the touch started; snap-back target.
    pub fn initial_offset(&self) -> f32 {
        self.initial_offset
    }

    /// Touch-start. Restarts any gesture in progress.
    pub fn start(&mut self, point: TouchPoint, initial_offset: f32, bounds: ElasticBounds) {
        self.origin = point;
        self.initial_offset = initial_offset;
        self.bounds = bounds;
        self.phase = SwipePhase::Classifying;
    }

    /// First move after touch-start. `None` when not classifying.
    pub fn classify(&mut self, point: TouchPoint) -> Option<Classification> {
        if self.phase != SwipePhase::Classifying {
            return None;
        }
        let horizontal = self.origin.x - point.x;
        let vertical = self.origin.y - point.y;
        if horizontal.abs() <= vertical.abs() {
            self.phase = SwipePhase::Idle;
            Some(Classification::Vertical)
        } else {
            self.phase = SwipePhase::Swiping;
            Some(Classification::Horizontal)
        }
    }

    /// Live strip offset for a move during a committed swipe.
    pub fn drag(&self, point: TouchPoint) -> Option<f32> {
        if self.phase != SwipePhase::Swiping {
            return None;
        }
        let distance = point.x - self.origin.x;
        Some((self.initial_offset + self.bounds.resist(distance)).round())
    }

    /// Re-anchor a live gesture after the pane width changed.
    pub fn rebase(&mut self, initial_offset: f32, bounds: ElasticBounds) {
        if self.phase == SwipePhase::Idle {
            return;
        }
        self.initial_offset = initial_offset;
        self.bounds = bounds;
    }

    /// Touch-end of a committed swipe.
    pub fn release(&mut self, point: TouchPoint, position: SlidePosition) -> Option<SwipeDecision> {
        if self.phase != SwipePhase::Swiping {
            return None;
        }
        self.phase = SwipePhase::Idle;
        let decision = if point.x > self.origin.x && !position.is_first() {
            SwipeDecision::Prev
        } else if point.x < self.origin.x && !position.is_last() {
            SwipeDecision::Next
        } else {
            SwipeDecision::SnapBack
        };
        Some(decision)
    }

    /// Abort the gesture. Returns the snap-back offset if a swipe was live.
    pub fn cancel(&mut self) -> Option<f32> {
        let was_swiping = self.phase == SwipePhase::Swiping;
        self.phase = SwipePhase::Idle;
        was_swiping.then_some(self.initial_offset)
    }
}
