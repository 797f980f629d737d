use crate::{foundation::core::AnimationId, timing::ease::Timing};

/// Immutable copy of a fill animation attached to a segment layer.
///
/// Snapshots are plain values and never alias the renderer's live animation; re-attaching
/// one restores exactly what was captured. `begin_time` is in the layer's local time, so a
/// restored animation picks up at its true progress once the layer clock is thawed.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AnimationSnapshot {
    pub id: AnimationId,
    pub from: f64,
    pub to: f64,
    pub duration: f64,
    pub begin_time: f64,
    pub timing: Timing,
}

impl AnimationSnapshot {
    pub fn end_time(&self) -> f64 {
        self.begin_time + self.duration
    }

    /// Linear progress in `0..=1` at layer-local time `local`.
    pub fn progress_at(&self, local: f64) -> f64 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        ((local - self.begin_time) / self.duration).clamp(0.0, 1.0)
    }

    /// Interpolated fill fraction at layer-local time `local`.
    pub fn value_at(&self, local: f64) -> f64 {
        let t = self.timing.apply(self.progress_at(local));
        self.from + (self.to - self.from) * t
    }

    pub fn is_complete_at(&self, local: f64) -> bool {
        local >= self.end_time() - COMPLETION_EPSILON
    }
}

/// Slack used when comparing accumulated float clock values against an end time.
pub const COMPLETION_EPSILON: f64 = 1e-9;
