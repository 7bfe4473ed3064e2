use crate::bounding_box::BoundingBox;
use crate::slots::Slot;
use opencv::core::Size;

pub const DEFAULT_BORDER_THRESHOLD: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameSize {
    pub width: i32,
    pub height: i32,
}

impl FrameSize {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

impl From<Size> for FrameSize {
    fn from(size: Size) -> Self {
        Self::new(size.width, size.height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BorderThreshold {
    fraction: f64,
}

impl Default for BorderThreshold {
    fn default() -> Self {
        Self {
            fraction: DEFAULT_BORDER_THRESHOLD,
        }
    }
}

impl BorderThreshold {
    pub fn new(fraction: f64) -> anyhow::Result<Self> {
        if !(0.0..0.5).contains(&fraction) {
            anyhow::bail!("Border threshold must be in [0, 0.5), got {}", fraction);
        }
        Ok(Self { fraction })
    }

    pub fn fraction(&self) -> f64 {
        self.fraction
    }

    pub fn limits(&self, extent: i32) -> (i32, i32) {
        let near = (extent as f64 * self.fraction) as i32;
        let far = (extent as f64 * (1.0 - self.fraction)) as i32;
        (near, far)
    }

    /// `Current` followed by every border slot the box reaches into.
    ///
    /// The four border checks are independent, a corner box fires two.
    pub fn triggered_slots(&self, bbox: &BoundingBox, frame: FrameSize) -> Vec<Slot> {
        let (left, right) = self.limits(frame.width);
        let (top, bottom) = self.limits(frame.height);

        let mut slots = vec![Slot::Current];
        if bbox.x < left {
            slots.push(Slot::Left);
        }
        if bbox.right() > right {
            slots.push(Slot::Right);
        }
        if bbox.y < top {
            slots.push(Slot::Top);
        }
        if bbox.bottom() > bottom {
            slots.push(Slot::Bottom);
        }
        slots
    }
}
