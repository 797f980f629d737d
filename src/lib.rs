//! Storybar drives a segmented story-progress bar: a row of segments that fill one after
//! another over a fixed duration, with pause/resume, seeking, looping, and survival across
//! app background/foreground transitions.
//!
//! The crate is renderer-agnostic:
//!
//! - Build a [`Timeline`] from a [`TimelineConfig`] against any [`SegmentRenderer`]
//! - Feed it renderer completions ([`Timeline::handle_completion`]) and lifecycle signals
//!   ([`Timeline::handle_lifecycle`] or a [`LifecycleHub`] subscription)
//! - Observe progress through a [`TimelineObserver`]
//!
//! [`SimRenderer`] and [`SimHost`] provide a deterministic virtual-clock host used by the
//! tests and the `storybar` CLI.
#![forbid(unsafe_code)]

mod foundation;

pub(crate) mod layout;
pub(crate) mod lifecycle;
pub(crate) mod render;
pub(crate) mod segment;
pub(crate) mod sim;
pub(crate) mod timeline;
pub(crate) mod timing;

pub use crate::foundation::core::{AnimationId, Fill, Point, Rect, Rgba8, SegmentHandle};
pub use crate::foundation::error::{StorybarError, StorybarResult};

pub use crate::layout::bar::BarLayout;
pub use crate::lifecycle::hub::{LifecycleEvent, LifecycleHub, LifecycleSubscription};
pub use crate::render::backend::{
    FILL_ANIMATION_KEY, FillAnimation, FillCompletion, SegmentRenderer,
};
pub use crate::render::sim::SimRenderer;
pub use crate::segment::snapshot::{AnimationSnapshot, COMPLETION_EPSILON};
pub use crate::segment::state::SegmentState;
pub use crate::sim::host::{FrameSample, RunReport, SimHost};
pub use crate::sim::script::{Script, Step};
pub use crate::timeline::config::{SegmentStyle, TimelineConfig};
pub use crate::timeline::continuation::Continuation;
pub use crate::timeline::machine::{PlaybackState, Timeline};
pub use crate::timeline::observer::{EventLog, ObserverEvent, TimelineObserver};
pub use crate::timing::clock::{LayerClock, LayerTiming};
pub use crate::timing::ease::Timing;
pub use crate::timing::offset::TimeOffsetClock;
