//! Slider lifecycle events.
//!
//! Listeners run synchronously, in registration order, on the thread that
//! drives the slider. `change` listeners return a verdict; the verdicts are
//! combined with logical AND and a single `false` vetoes the navigation.

/// Emitted before a navigation commits. Cancelable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeEvent {
    pub index: usize,
    pub is_forward: bool,
}

/// Emitted once a navigation is accepted, before the index is updated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionStart {
    pub current: usize,
    pub next: usize,
}

/// Emitted when the visual transition of the newest navigation finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionComplete {
    pub previous: usize,
    pub current: usize,
}

/// Handle returned by the `on_*` methods, used to remove a listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type ChangeListener = Box<dyn FnMut(&ChangeEvent) -> bool>;
type StartListener = Box<dyn FnMut(&TransitionStart)>;
type CompleteListener = Box<dyn FnMut(&TransitionComplete)>;

/// Observer lists for the three slider events.
#[derive(Default)]
pub struct Events {
    next_id: u64,
    change: Vec<(ListenerId, ChangeListener)>,
    transition_start: Vec<(ListenerId, StartListener)>,
    transition_complete: Vec<(ListenerId, CompleteListener)>,
}

impl Events {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate(&mut self) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Register a `change` listener. Returning `false` vetoes the navigation.
    pub fn on_change(&mut self, listener: impl FnMut(&ChangeEvent) -> bool + 'static) -> ListenerId {
        let id = self.allocate();
        self.change.push((id, Box::new(listener)));
        id
    }

    pub fn on_transition_start(&mut self, listener: impl FnMut(&TransitionStart) + 'static) -> ListenerId {
        let id = self.allocate();
        self.transition_start.push((id, Box::new(listener)));
        id
    }

    pub fn on_transition_complete(
        &mut self,
        listener: impl FnMut(&TransitionComplete) + 'static,
    ) -> ListenerId {
        let id = self.allocate();
        self.transition_complete.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` if the id was not registered.
    pub fn off(&mut self, id: ListenerId) -> bool {
        let before = self.len();
        self.change.retain(|(lid, _)| *lid != id);
        self.transition_start.retain(|(lid, _)| *lid != id);
        self.transition_complete.retain(|(lid, _)| *lid != id);
        self.len() != before
    }

    pub fn clear(&mut self) {
        self.change.clear();
        self.transition_start.clear();
        self.transition_complete.clear();
    }

    /// Total number of registered listeners.
    pub fn len(&self) -> usize {
        self.change.len() + self.transition_start.len() + self.transition_complete.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every listener sees the event, even after an earlier veto.
    pub(crate) fn emit_change(&mut self, event: &ChangeEvent) -> bool {
        self.change
            .iter_mut()
            .fold(true, |accepted, (_, listener)| listener(event) && accepted)
    }

    pub(crate) fn emit_transition_start(&mut self, event: &TransitionStart) {
        for (_, listener) in &mut self.transition_start {
            listener(event);
        }
    }

    pub(crate) fn emit_transition_complete(&mut self, event: &TransitionComplete) {
        for (_, listener) in &mut self.transition_complete {
            listener(event);
        }
    }
}

impl std::fmt::Debug for Events {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Events")
            .field("change", &self.change.len())
            .field("transition_start", &self.transition_start.len())
            .field("transition_complete", &self.transition_complete.len())
            .finish()
    }
}
