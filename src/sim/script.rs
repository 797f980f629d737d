use crate::{
    foundation::error::{StorybarError, StorybarResult},
    lifecycle::hub::LifecycleEvent,
    timeline::config::TimelineConfig,
};

/// A scripted session: a timeline configuration, the bar size, and an ordered list of
/// host actions to replay against the simulated renderer.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Script {
    pub config: TimelineConfig,
    #[serde(default = "default_width")]
    pub width: f64,
    #[serde(default = "default_height")]
    pub height: f64,
    #[serde(default)]
    pub steps: Vec<Step>,
}

fn default_width() -> f64 {
    320.0
}

fn default_height() -> f64 {
    4.0
}

/// One host action.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    Start,
    Pause,
    Resume,
    Goto {
        index: i64,
        #[serde(default = "default_notify")]
        notify: bool,
    },
    Reset,
    Tap {
        x: f64,
        y: f64,
    },
    /// Move the media clock forward by `secs`, in increments of at most `step` when given.
    ///
    /// Completions are only detected at increment boundaries and the next segment starts
    /// from there, so a single coarse advance completes at most one segment. Give `step`
    /// (a frame, say) when the report should track real progress.
    Advance {
        secs: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        step: Option<f64>,
    },
    /// Deliver a lifecycle signal through the host's hub.
    Lifecycle {
        event: LifecycleEvent,
    },
    /// Strip every animation the way the host system does on backgrounding.
    Suspend,
    /// Record the current fills and playback state.
    Sample,
}

fn default_notify() -> bool {
    true
}

impl Script {
    pub fn new(config: TimelineConfig) -> Self {
        Self {
            config,
            width: default_width(),
            height: default_height(),
            steps: Vec::new(),
        }
    }

    pub fn step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    pub fn validate(&self) -> StorybarResult<()> {
        self.config.validate()?;
        if !(self.width.is_finite() && self.width > 0.0) {
            return Err(StorybarError::validation("width must be > 0"));
        }
        if !(self.height.is_finite() && self.height > 0.0) {
            return Err(StorybarError::validation("height must be > 0"));
        }
        for (i, step) in self.steps.iter().enumerate() {
            match step {
                Step::Advance { secs, step } => {
                    advance_ticks(*secs, *step).map_err(|err| {
                        StorybarError::validation(format!("step {i}: {err}"))
                    })?;
                }
                Step::Tap { x, y } if !(x.is_finite() && y.is_finite()) => {
                    return Err(StorybarError::validation(format!(
                        "step {i}: tap coordinates must be finite"
                    )));
                }
                _ => {}
            }
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> StorybarResult<Self> {
        let script: Self = serde_json::from_str(json)?;
        script.validate()?;
        Ok(script)
    }
}

/// Upper bound on clock increments for one advance.
pub(crate) const MAX_ADVANCE_TICKS: u64 = 1_000_000;

/// Number of clock increments needed to advance by `secs` in steps of at most `step`.
pub(crate) fn advance_ticks(secs: f64, step: Option<f64>) -> StorybarResult<u64> {
    if !secs.is_finite() || secs < 0.0 {
        return Err(StorybarError::validation(format!(
            "advance secs must be a finite number >= 0, got {secs}"
        )));
    }
    let Some(step) = step else {
        return Ok(1);
    };
    if !step.is_finite() || step <= 0.0 {
        return Err(StorybarError::validation(format!(
            "advance step must be a finite number > 0, got {step}"
        )));
    }
    let ticks = (secs / step).ceil().max(1.0);
    if ticks > MAX_ADVANCE_TICKS as f64 {
        return Err(StorybarError::validation(format!(
            "advancing {secs}s in steps of {step}s needs more than {MAX_ADVANCE_TICKS} ticks"
        )));
    }
    Ok(ticks as u64)
}

#[cfg(test)]
#[path = "../../tests/unit/sim/script.rs"]
mod tests;
