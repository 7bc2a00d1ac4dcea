//! Live layout measurements
//!
//! The stride is never cached: every render asks the host again so a
//! responsive resize is picked up by the very next frame.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Measurements the host provides on demand.
pub trait Layout {
    /// Rendered width of a single slide.
    fn slide_width(&self) -> f32;
    /// Rendered width of the strip's container.
    fn container_width(&self) -> f32;
}

/// Distance between the starts of two neighbouring slides.
///
/// A slide that measures zero (not laid out yet, display: none, ...) falls
/// back to the container width so drags never divide by zero through a
/// degenerate stride.
pub fn slide_stride(layout: &impl Layout, gap: f32) -> f32 {
    let width = layout.slide_width();
    if width.is_finite() && width > 0.0 {
        width + gap
    } else {
        let container = layout.container_width();
        if container.is_finite() {
            container.max(0.0)
        } else {
            0.0
        }
    }
}

/// Layout with fixed measurements, updated by the owner on resize.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FixedLayout {
    /// Width of one slide (px).
    pub slide_width: f32,
    /// Width of the viewport around the strip (px).
    pub container_width: f32,
}

impl FixedLayout {
    /// Layout with the given measurements.
    pub const fn new(slide_width: f32, container_width: f32) -> Self {
        Self {
            slide_width,
            container_width,
        }
    }
}

impl Layout for FixedLayout {
    fn slide_width(&self) -> f32 {
        self.slide_width
    }

    fn container_width(&self) -> f32 {
        self.container_width
    }
}
