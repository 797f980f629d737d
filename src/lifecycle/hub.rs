use std::{
    cell::RefCell,
    collections::{BTreeMap, VecDeque},
    rc::{Rc, Weak},
};

/// Application lifecycle signals delivered by the host environment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleEvent {
    WillEnterForeground,
    DidEnterBackground,
    WillResignActive,
    DidBecomeActive,
}

type Mailbox = Rc<RefCell<VecDeque<LifecycleEvent>>>;

#[derive(Debug, Default)]
struct HubInner {
    next_id: u64,
    subscribers: BTreeMap<u64, Mailbox>,
}

/// Single-threaded fan-out of [`LifecycleEvent`]s to subscribers.
///
/// The host owns the hub and calls [`LifecycleHub::emit`] from its event loop. Each
/// subscriber gets its own queue, drained at its own pace; dropping the
/// [`LifecycleSubscription`] unsubscribes.
#[derive(Clone, Debug, Default)]
pub struct LifecycleHub {
    inner: Rc<RefCell<HubInner>>,
}

impl LifecycleHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self) -> LifecycleSubscription {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        let mailbox = Mailbox::default();
        inner.subscribers.insert(id, Rc::clone(&mailbox));
        tracing::trace!(id, "lifecycle subscriber added");
        LifecycleSubscription {
            id,
            mailbox,
            hub: Rc::downgrade(&self.inner),
        }
    }

    pub fn emit(&self, event: LifecycleEvent) {
        let inner = self.inner.borrow();
        tracing::debug!(?event, subscribers = inner.subscribers.len(), "lifecycle event");
        for mailbox in inner.subscribers.values() {
            mailbox.borrow_mut().push_back(event);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }
}

/// Scoped registration with a [`LifecycleHub`]. Unsubscribes on drop.
#[derive(Debug)]
pub struct LifecycleSubscription {
    id: u64,
    mailbox: Mailbox,
    hub: Weak<RefCell<HubInner>>,
}

impl LifecycleSubscription {
    /// Take every queued event, oldest first.
    pub fn drain(&self) -> Vec<LifecycleEvent> {
        self.mailbox.borrow_mut().drain(..).collect()
    }

    pub fn pending(&self) -> usize {
        self.mailbox.borrow().len()
    }

    /// Whether the hub is still alive.
    pub fn is_connected(&self) -> bool {
        self.hub.strong_count() > 0
    }
}

impl Drop for LifecycleSubscription {
    fn drop(&mut self) {
        if let Some(hub) = self.hub.upgrade() {
            hub.borrow_mut().subscribers.remove(&self.id);
            tracing::trace!(id = self.id, "lifecycle subscriber removed");
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/lifecycle/hub.rs"]
mod tests;
