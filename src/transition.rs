//! Cancelable transition handles.
//!
//! A strategy returns a [`Transition`] from every `transition()` call. The
//! slider and the strategy may both hold clones: the strategy settles it
//! when its visual change is done, the slider cancels it when a newer
//! navigation supersedes it. Settling is one-way; a cancelled transition
//! never becomes fulfilled.

use std::cell::Cell;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionState {
    Pending,
    Fulfilled,
    Cancelled,
}

/// Shared handle to one visual transition.
#[derive(Debug, Clone)]
pub struct Transition {
    state: Rc<Cell<TransitionState>>,
}

impl Transition {
    /// A transition still running; settle it with [`Transition::complete`].
    pub fn pending() -> Self {
        Self {
            state: Rc::new(Cell::new(TransitionState::Pending)),
        }
    }

    /// A transition whose visual change was applied synchronously.
    pub fn resolved() -> Self {
        Self {
            state: Rc::new(Cell::new(TransitionState::Fulfilled)),
        }
    }

    pub fn state(&self) -> TransitionState {
        self.state.get()
    }

    pub fn is_pending(&self) -> bool {
        self.state() == TransitionState::Pending
    }

    pub fn is_fulfilled(&self) -> bool {
        self.state() == TransitionState::Fulfilled
    }

    pub fn is_cancelled(&self) -> bool {
        self.state() == TransitionState::Cancelled
    }

    /// Mark the transition done. Returns `false` if it was already settled.
    pub fn complete(&self) -> bool {
        self.settle(TransitionState::Fulfilled)
    }

    /// Cancel the transition. Returns `false` if it was already settled.
    pub fn cancel(&self) -> bool {
        self.settle(TransitionState::Cancelled)
    }

    fn settle(&self, to: TransitionState) -> bool {
        if self.is_pending() {
            self.state.set(to);
            true
        } else {
            false
        }
    }
}

/// The transition the slider is currently waiting on.
#[derive(Debug)]
pub(crate) struct InFlight {
    pub handle: Transition,
    pub previous: usize,
}
