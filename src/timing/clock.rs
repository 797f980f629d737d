/// Per-layer timing primitives exposed by a renderer.
///
/// A layer clock maps its parent's time (the global media clock for segment layers) into
/// layer-local time. Animations attached to the layer are scheduled in local time, so
/// editing `speed`, `time_offset` and `begin_time` is how a running fill is frozen and
/// thawed without being restarted.
pub trait LayerClock {
    fn speed(&self) -> f64;
    fn set_speed(&mut self, speed: f64);

    fn time_offset(&self) -> f64;
    fn set_time_offset(&mut self, offset: f64);

    fn begin_time(&self) -> f64;
    fn set_begin_time(&mut self, begin: f64);

    /// Convert a time in the parent's timeline into this layer's local time.
    fn local_time(&self, parent_time: f64) -> f64 {
        (parent_time - self.begin_time()) * self.speed() + self.time_offset()
    }
}

/// Plain-data [`LayerClock`] with the default layer timing (running at speed 1).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LayerTiming {
    pub speed: f64,
    pub time_offset: f64,
    pub begin_time: f64,
}

impl Default for LayerTiming {
    fn default() -> Self {
        Self {
            speed: 1.0,
            time_offset: 0.0,
            begin_time: 0.0,
        }
    }
}

impl LayerClock for LayerTiming {
    fn speed(&self) -> f64 {
        self.speed
    }

    fn set_speed(&mut self, speed: f64) {
        self.speed = speed;
    }

    fn time_offset(&self) -> f64 {
        self.time_offset
    }

    fn set_time_offset(&mut self, offset: f64) {
        self.time_offset = offset;
    }

    fn begin_time(&self) -> f64 {
        self.begin_time
    }

    fn set_begin_time(&mut self, begin: f64) {
        self.begin_time = begin;
    }
}
