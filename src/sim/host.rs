use std::rc::Rc;

use crate::{
    foundation::core::{Point, Rect},
    foundation::error::{StorybarError, StorybarResult},
    lifecycle::hub::{LifecycleEvent, LifecycleHub},
    render::sim::SimRenderer,
    sim::script::{Script, Step, advance_ticks},
    timeline::config::TimelineConfig,
    timeline::machine::{PlaybackState, Timeline},
    timeline::observer::{EventLog, ObserverEvent},
};

/// Fills and playback state at one instant of a simulated session.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FrameSample {
    pub time: f64,
    pub state: PlaybackState,
    pub current_index: usize,
    pub fills: Vec<f64>,
}

/// Everything observed while running a [`Script`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RunReport {
    pub events: Vec<ObserverEvent>,
    pub samples: Vec<FrameSample>,
    pub final_sample: FrameSample,
}

/// Minimal host application: owns a [`Timeline`], the [`SimRenderer`] it draws into,
/// the lifecycle hub it listens on, and an [`EventLog`] observer.
#[derive(Debug)]
pub struct SimHost {
    timeline: Timeline,
    renderer: SimRenderer,
    hub: LifecycleHub,
    log: Rc<EventLog>,
    samples: Vec<FrameSample>,
}

impl SimHost {
    pub fn new(config: &TimelineConfig, width: f64, height: f64) -> StorybarResult<Self> {
        let mut renderer = SimRenderer::new(Rect::new(0.0, 0.0, width, height), config.padding);
        let mut timeline = Timeline::new(config, &mut renderer)?;
        let log = Rc::new(EventLog::new());
        timeline.set_observer(&log);
        let hub = LifecycleHub::new();
        timeline.subscribe_lifecycle(&hub);
        Ok(Self {
            timeline,
            renderer,
            hub,
            log,
            samples: Vec::new(),
        })
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn renderer(&self) -> &SimRenderer {
        &self.renderer
    }

    pub fn hub(&self) -> &LifecycleHub {
        &self.hub
    }

    pub fn events(&self) -> Vec<ObserverEvent> {
        self.log.events()
    }

    /// Replay `script` from a fresh host and report what happened.
    pub fn run(script: &Script) -> StorybarResult<RunReport> {
        script.validate()?;
        let mut host = Self::new(&script.config, script.width, script.height)?;
        for step in &script.steps {
            host.apply(step)?;
        }
        Ok(host.report())
    }

    #[tracing::instrument(skip(self))]
    pub fn apply(&mut self, step: &Step) -> StorybarResult<()> {
        match *step {
            Step::Start => self.timeline.start(&mut self.renderer),
            Step::Pause => self.timeline.pause(&mut self.renderer),
            Step::Resume => self.timeline.resume_playing(&mut self.renderer),
            Step::Goto { index, notify } => self.timeline.goto(index, notify, &mut self.renderer),
            Step::Reset => self.timeline.reset(&mut self.renderer),
            Step::Tap { x, y } => {
                let layout = self
                    .renderer
                    .layout()
                    .cloned()
                    .ok_or_else(|| StorybarError::playback("tap before the bar was laid out"))?;
                let hit = self
                    .timeline
                    .tap(&layout, Point::new(x, y), &mut self.renderer);
                tracing::debug!(?hit, "tap");
            }
            Step::Advance { secs, step } => self.advance(secs, step)?,
            Step::Lifecycle { event } => self.lifecycle(event)?,
            Step::Suspend => self.suspend(),
            Step::Sample => {
                let sample = self.sample();
                self.samples.push(sample);
            }
        }
        Ok(())
    }

    /// Advance the media clock by `secs`, in increments of at most `step`, feeding natural
    /// completions back into the timeline.
    ///
    /// Without `step` the clock jumps once; see [`Step::Advance`] for what that means for
    /// completions.
    pub fn advance(&mut self, secs: f64, step: Option<f64>) -> StorybarResult<()> {
        let ticks = advance_ticks(secs, step)?;
        let increment = step.unwrap_or(secs);
        let mut elapsed = 0.0;
        for i in 1..=ticks {
            let target = if i == ticks {
                secs
            } else {
                increment * i as f64
            };
            self.tick(target - elapsed);
            elapsed = target;
        }
        Ok(())
    }

    fn tick(&mut self, dt: f64) {
        for completion in self.renderer.advance(dt) {
            self.timeline.handle_completion(completion, &mut self.renderer);
        }
    }

    /// Emit `event` on the hub and let the timeline drain its subscription.
    pub fn lifecycle(&mut self, event: LifecycleEvent) -> StorybarResult<()> {
        self.hub.emit(event);
        if self.timeline.pump_lifecycle(&mut self.renderer) == 0 {
            return Err(StorybarError::lifecycle(format!(
                "{event:?} was not delivered to the timeline"
            )));
        }
        Ok(())
    }

    pub fn suspend(&mut self) {
        for completion in self.renderer.suspend() {
            self.timeline.handle_completion(completion, &mut self.renderer);
        }
    }

    pub fn sample(&self) -> FrameSample {
        FrameSample {
            time: self.renderer.now(),
            state: self.timeline.state(),
            current_index: self.timeline.current_index(),
            fills: self.renderer.presentation_fills(),
        }
    }

    pub fn report(&self) -> RunReport {
        RunReport {
            events: self.log.events(),
            samples: self.samples.clone(),
            final_sample: self.sample(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sim/host.rs"]
mod tests;
