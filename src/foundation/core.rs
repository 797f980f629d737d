pub use kurbo::{Point, Rect};

/// Opaque reference to a visual segment element, issued by a renderer.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct SegmentHandle(pub usize);

/// Identity of one fill animation handed to a renderer.
///
/// Every `animate` call on a timeline mints a fresh id; completions carry it back so stale
/// callbacks from cancelled or replaced animations can be told apart from live ones.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct AnimationId(pub u64);

impl AnimationId {
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// Instantaneous fill of a segment, used when seeking or resetting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Fill {
    Empty,
    Full,
}

impl Fill {
    pub fn as_fraction(self) -> f64 {
        match self {
            Self::Empty => 0.0,
            Self::Full => 1.0,
        }
    }

    pub fn from_reached(reached: bool) -> Self {
        if reached { Self::Full } else { Self::Empty }
    }
}

/// Straight (non-premultiplied) RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn gray() -> Self {
        Self::new(128, 128, 128, 255)
    }

    pub const fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }

    /// Same color with alpha replaced by `alpha` in `0..=1`.
    pub fn with_alpha(self, alpha: f64) -> Self {
        let a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self { a, ..self }
    }
}
