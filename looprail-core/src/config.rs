//! Configuration for a carousel instance
//!
//! Durations are kept as [`Duration`] so hosts driving the timer queue with
//! real clocks and replay tools driving it with virtual ones share one unit.

use std::time::Duration;

use crate::constants;
use crate::error::{ConfigError, Result};

/// Tuning for one carousel. [`Default`] gives the stock behavior.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarouselConfig {
    /// Period of the autoplay advance.
    pub autoplay_interval: Duration,
    /// When false the scheduler still tracks suspensions but never arms.
    pub autoplay_enabled: bool,
    /// Length of the animated transition; the wrap correction fires after it.
    pub transition_duration: Duration,
    /// Minimum release distance that commits a navigation (px).
    pub commit_distance_px: f32,
    /// Minimum release velocity that commits a navigation (px/ms).
    pub commit_velocity_px_per_ms: f32,
    /// Link press movement that turns the press into a drag (px).
    pub link_drag_threshold_px: f32,
    /// Gap added to the measured slide width to get the stride (px).
    pub slide_gap_px: f32,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            autoplay_interval: Duration::from_millis(
                constants::AUTOPLAY_INTERVAL_MS,
            ),
            autoplay_enabled: true,
            transition_duration: Duration::from_millis(
                constants::TRANSITION_DURATION_MS,
            ),
            commit_distance_px: constants::COMMIT_DISTANCE_PX,
            commit_velocity_px_per_ms: constants::COMMIT_VELOCITY_PX_PER_MS,
            link_drag_threshold_px: constants::LINK_DRAG_THRESHOLD_PX,
            slide_gap_px: constants::SLIDE_GAP_PX,
        }
    }
}

impl CarouselConfig {
    /// Check that every duration is non-zero and every threshold is usable.
    pub fn validate(&self) -> Result<()> {
        if self.autoplay_interval.is_zero() {
            return Err(ConfigError::ZeroDuration {
                field: "autoplay_interval",
            });
        }
        if self.transition_duration.is_zero() {
            return Err(ConfigError::ZeroDuration {
                field: "transition_duration",
            });
        }

        let thresholds = [
            ("commit_distance_px", self.commit_distance_px),
            ("commit_velocity_px_per_ms", self.commit_velocity_px_per_ms),
            ("link_drag_threshold_px", self.link_drag_threshold_px),
            ("slide_gap_px", self.slide_gap_px),
        ];
        for (field, value) in thresholds {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidThreshold { field, value });
            }
        }

        if self.link_drag_threshold_px >= self.commit_distance_px {
            return Err(ConfigError::LinkThresholdTooLarge {
                link: self.link_drag_threshold_px,
                commit: self.commit_distance_px,
            });
        }
        Ok(())
    }
}
