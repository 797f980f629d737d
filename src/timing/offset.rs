use crate::timing::clock::LayerClock;

/// Time-offset algebra that freezes and thaws a layer clock without losing elapsed time.
///
/// Layer clocks keep running on the global media clock. Setting `speed` back to 1 after a
/// pause would make an animation jump to where it would have been had it never paused, so
/// [`TimeOffsetClock::resume`] re-anchors `begin_time` by the time spent frozen instead.
pub struct TimeOffsetClock;

impl TimeOffsetClock {
    pub fn is_paused<C: LayerClock + ?Sized>(clock: &C) -> bool {
        clock.speed() == 0.0
    }

    /// Freeze `clock` at its local time for `now` (parent time).
    ///
    /// Returns `false` when the clock was already paused; the offset is never re-captured.
    pub fn pause<C: LayerClock + ?Sized>(clock: &mut C, now: f64) -> bool {
        if Self::is_paused(clock) {
            return false;
        }
        let paused_offset = clock.local_time(now);
        clock.set_speed(0.0);
        clock.set_time_offset(paused_offset);
        tracing::trace!(now, paused_offset, "layer clock paused");
        true
    }

    /// Thaw `clock` so local time continues from the frozen offset at parent time `now`.
    ///
    /// Returns `false` when the clock was not paused.
    pub fn resume<C: LayerClock + ?Sized>(clock: &mut C, now: f64) -> bool {
        if !Self::is_paused(clock) {
            return false;
        }
        let paused_offset = clock.time_offset();
        clock.set_speed(1.0);
        clock.set_time_offset(0.0);
        clock.set_begin_time(0.0);
        let since_pause = clock.local_time(now) - paused_offset;
        clock.set_begin_time(since_pause);
        tracing::trace!(now, paused_offset, since_pause, "layer clock resumed");
        true
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timing/offset.rs"]
mod tests;
