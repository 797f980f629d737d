use std::cell::RefCell;

/// Outbound notifications of a [`crate::Timeline`], implemented by the host UI.
///
/// The timeline only keeps a `Weak` reference to its observer, so methods take `&self`;
/// implementations that record state use interior mutability.
pub trait TimelineObserver {
    /// The active segment changed, by natural advance (`animated`) or explicit seek.
    fn changed_index(&self, index: usize, animated: bool);

    /// The whole sequence completed. Fires before any loop restart.
    fn finished(&self);
}

/// A notification as recorded by [`EventLog`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ObserverEvent {
    ChangedIndex { index: usize, animated: bool },
    Finished,
}

/// Observer that appends every notification to an in-memory log.
#[derive(Debug, Default)]
pub struct EventLog {
    events: RefCell<Vec<ObserverEvent>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ObserverEvent> {
        self.events.borrow().clone()
    }

    pub fn take(&self) -> Vec<ObserverEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    pub fn finished_count(&self) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|e| matches!(e, ObserverEvent::Finished))
            .count()
    }

    pub fn changed_count(&self) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|e| matches!(e, ObserverEvent::ChangedIndex { .. }))
            .count()
    }
}

impl TimelineObserver for EventLog {
    fn changed_index(&self, index: usize, animated: bool) {
        self.events
            .borrow_mut()
            .push(ObserverEvent::ChangedIndex { index, animated });
    }

    fn finished(&self) {
        self.events.borrow_mut().push(ObserverEvent::Finished);
    }
}
