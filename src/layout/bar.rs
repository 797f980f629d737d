use crate::foundation::core::{Point, Rect};

/// Horizontal layout of a segmented bar: equal-width segments separated by `padding`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BarLayout {
    pub bounds: Rect,
    pub frames: Vec<Rect>,
    pub corner_radius: f64,
}

impl BarLayout {
    pub fn compute(bounds: Rect, count: usize, padding: f64) -> Self {
        let mut frames = Vec::with_capacity(count);
        if count > 0 {
            let gaps = padding * (count.saturating_sub(1) as f64);
            let width = ((bounds.width() - gaps) / count as f64).max(0.0);
            for i in 0..count {
                let x0 = bounds.x0 + (i as f64) * (width + padding);
                frames.push(Rect::new(x0, bounds.y0, x0 + width, bounds.y1));
            }
        }
        Self {
            bounds,
            frames,
            corner_radius: bounds.height() / 2.0,
        }
    }

    /// Index of the segment whose horizontal span contains `x`.
    ///
    /// Spans are closed on both ends; with zero padding a shared edge resolves to the
    /// leftmost segment. Points inside a gap hit nothing.
    pub fn segment_at(&self, x: f64) -> Option<usize> {
        self.frames.iter().position(|f| f.x0 <= x && x <= f.x1)
    }

    /// Touch test against the bar bounds grown vertically by `-extra_vertical_inset`.
    ///
    /// A negative inset (the default is `-8`) enlarges the touchable area above and below
    /// the thin bar.
    pub fn contains(&self, point: Point, extra_vertical_inset: f64) -> bool {
        let b = self.bounds;
        let hit = Rect::new(
            b.x0,
            b.y0 + extra_vertical_inset,
            b.x1,
            b.y1 - extra_vertical_inset,
        );
        hit.x0 <= point.x && point.x < hit.x1 && hit.y0 <= point.y && point.y < hit.y1
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/bar.rs"]
mod tests;
