use crate::{
    foundation::core::Rgba8,
    foundation::error::{StorybarError, StorybarResult},
    timing::ease::Timing,
};

/// Colors of the filled (`top`) and unfilled (`bottom`) part of every segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SegmentStyle {
    pub top: Rgba8,
    pub bottom: Rgba8,
}

impl Default for SegmentStyle {
    fn default() -> Self {
        Self {
            top: Rgba8::gray(),
            bottom: Rgba8::gray().with_alpha(0.25),
        }
    }
}

/// Construction parameters for a [`crate::Timeline`].
///
/// Serialized as JSON by the CLI; every field except `segment_count` has a default.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TimelineConfig {
    pub segment_count: usize,
    #[serde(default = "default_duration_secs")]
    pub duration_secs: f64,
    #[serde(default = "default_looping")]
    pub looping: bool,
    #[serde(default = "default_padding")]
    pub padding: f64,
    #[serde(default)]
    pub style: SegmentStyle,
    #[serde(default = "default_touch_inset")]
    pub extra_vertical_touch_inset: f64,
    #[serde(default)]
    pub timing: Timing,
}

fn default_duration_secs() -> f64 {
    5.0
}

fn default_looping() -> bool {
    true
}

fn default_padding() -> f64 {
    8.0
}

fn default_touch_inset() -> f64 {
    -8.0
}

impl TimelineConfig {
    pub fn new(segment_count: usize, duration_secs: f64) -> Self {
        Self {
            segment_count,
            duration_secs,
            looping: default_looping(),
            padding: default_padding(),
            style: SegmentStyle::default(),
            extra_vertical_touch_inset: default_touch_inset(),
            timing: Timing::default(),
        }
    }

    pub fn looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    pub fn padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    pub fn style(mut self, style: SegmentStyle) -> Self {
        self.style = style;
        self
    }

    pub fn timing(mut self, timing: Timing) -> Self {
        self.timing = timing;
        self
    }

    pub fn validate(&self) -> StorybarResult<()> {
        if self.segment_count == 0 {
            return Err(StorybarError::validation("segment_count must be > 0"));
        }
        if !self.duration_secs.is_finite() || self.duration_secs <= 0.0 {
            return Err(StorybarError::validation(format!(
                "duration_secs must be a positive finite number, got {}",
                self.duration_secs
            )));
        }
        if !self.padding.is_finite() || self.padding < 0.0 {
            return Err(StorybarError::validation("padding must be >= 0"));
        }
        if !self.extra_vertical_touch_inset.is_finite() {
            return Err(StorybarError::validation(
                "extra_vertical_touch_inset must be finite",
            ));
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> StorybarResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}
