use crate::{
    lifecycle::hub::{LifecycleEvent, LifecycleHub},
    render::backend::SegmentRenderer,
    timeline::machine::Timeline,
};

impl Timeline {
    /// Subscribe to `hub`. The subscription is released when the timeline is dropped.
    pub fn subscribe_lifecycle(&mut self, hub: &LifecycleHub) {
        self.lifecycle = Some(hub.subscribe());
    }

    pub fn unsubscribe_lifecycle(&mut self) {
        self.lifecycle = None;
    }

    pub fn is_subscribed(&self) -> bool {
        self.lifecycle.is_some()
    }

    /// Dispatch every lifecycle event queued on the subscription. Returns how many were
    /// handled.
    pub fn pump_lifecycle<R: SegmentRenderer + ?Sized>(&mut self, renderer: &mut R) -> usize {
        let events = self
            .lifecycle
            .as_ref()
            .map(|s| s.drain())
            .unwrap_or_default();
        for event in &events {
            self.handle_lifecycle(*event, renderer);
        }
        events.len()
    }

    /// Route one lifecycle signal to the active segment.
    ///
    /// A timeline the user paused stays frozen across foreground and become-active
    /// signals; resuming it is the user's call.
    #[tracing::instrument(skip(self, renderer))]
    pub fn handle_lifecycle<R: SegmentRenderer + ?Sized>(
        &mut self,
        event: LifecycleEvent,
        renderer: &mut R,
    ) {
        let user_paused = self.is_paused;
        let Some(segment) = self.segments.get_mut(self.current_index) else {
            tracing::debug!("no active segment");
            return;
        };
        match event {
            LifecycleEvent::DidEnterBackground => segment.enter_background(renderer),
            LifecycleEvent::WillEnterForeground => {
                segment.enter_foreground(renderer, self.pending.take());
                if user_paused {
                    segment.pause(renderer);
                }
            }
            LifecycleEvent::WillResignActive => segment.will_resign_active(renderer),
            LifecycleEvent::DidBecomeActive => {
                if user_paused {
                    tracing::debug!("paused by user; staying frozen");
                } else {
                    segment.did_become_active(renderer);
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/bridge.rs"]
mod tests;
