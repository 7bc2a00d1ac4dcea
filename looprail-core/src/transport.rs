//! Transport controller: positions to offsets, and the wrap correction
//!
//! Every programmatic move bumps a navigation generation. A wrap correction
//! remembers the generation that scheduled it and, when it fires, acts only
//! if that generation is still current *and* the live position is still on
//! a sentinel. Anything else means newer navigation took over and the
//! correction is dropped.

use std::time::{Duration, Instant};

use crate::layout::{Layout, slide_stride};
use crate::messages::Effect;
use crate::timers::{TimerQueue, TimerTask};
use crate::track::Track;
use crate::types::Direction;

/// Result of firing a wrap correction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrapOutcome {
    /// Scheduled by a navigation that has since been superseded.
    Stale,
    /// Still current, but the position is already inside `1..=n`.
    InRange,
    /// Position was re-seated by `shift` (`+n` from the leading clone,
    /// `-n` from the trailing one).
    Corrected {
        /// Signed change applied to the position.
        shift: isize,
    },
}

/// Moves the track and renders frames for it.
#[derive(Debug, Clone)]
pub struct Transport {
    track: Track,
    gap: f32,
    transition: Duration,
    generation: u64,
}

impl Transport {
    /// Transport over `track`, with `gap` px between slides.
    pub fn new(track: Track, gap: f32, transition: Duration) -> Self {
        Self {
            track,
            gap,
            transition,
            generation: 0,
        }
    }

    /// The underlying track.
    pub fn track(&self) -> &Track {
        &self.track
    }

    /// Current extended position.
    pub fn position(&self) -> usize {
        self.track.position()
    }

    /// Index of the visible real slide.
    pub fn logical_index(&self) -> usize {
        self.track.logical_index()
    }

    /// Generation of the most recent programmatic navigation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Stride measured from the live layout.
    pub fn stride(&self, layout: &impl Layout) -> f32 {
        slide_stride(layout, self.gap)
    }

    /// Frame for `position_override` (or the current position when `None`).
    pub fn render(
        &self,
        layout: &impl Layout,
        position_override: Option<f32>,
        animate: bool,
    ) -> Effect {
        let position =
            position_override.unwrap_or(self.track.position() as f32);
        Effect::Frame {
            offset: position * self.stride(layout),
            animate,
            active_indicator: self.track.logical_index(),
        }
    }

    /// Frame following a finger: `start_position + displacement / stride`,
    /// never animated.
    pub fn render_drag(
        &self,
        layout: &impl Layout,
        start_position: usize,
        displacement: f32,
    ) -> Effect {
        let stride = self.stride(layout);
        let fraction = if stride > 0.0 {
            displacement / stride
        } else {
            0.0
        };
        self.render(layout, Some(start_position as f32 + fraction), false)
    }

    /// Re-seat a sentinel position right now, without waiting for its wrap
    /// correction. Navigation must never start from a sentinel.
    pub fn settle(&mut self) -> Option<isize> {
        let shift = self.track.unwrap_sentinel()?;
        log::debug!(
            "Carousel settled sentinel early: position={} shift={}",
            self.track.position(),
            shift
        );
        Some(shift)
    }

    /// Animated single-slide move. Schedules the wrap correction for
    /// `now + transition`.
    pub fn step(
        &mut self,
        direction: Direction,
        layout: &impl Layout,
        timers: &mut TimerQueue,
        now: Instant,
    ) -> Effect {
        debug_assert!(
            !self.track.is_at_sentinel(),
            "navigation started from a sentinel"
        );
        self.track.step(direction);
        self.generation += 1;
        timers.schedule(
            now + self.transition,
            TimerTask::WrapCorrection {
                generation: self.generation,
            },
        );
        log::debug!(
            "Carousel step {:?}: position={} logical={} generation={}",
            direction,
            self.track.position(),
            self.track.logical_index(),
            self.generation
        );
        self.render(layout, None, true)
    }

    /// Animated jump to a real slide. Returns `None` for an out-of-range
    /// index.
    pub fn seek(&mut self, logical: usize, layout: &impl Layout) -> Option<Effect> {
        if !self.track.seek(logical) {
            return None;
        }
        self.generation += 1;
        log::debug!(
            "Carousel seek: logical={} position={} generation={}",
            logical,
            self.track.position(),
            self.generation
        );
        Some(self.render(layout, None, true))
    }

    /// Fire a wrap correction scheduled by `generation`.
    pub fn apply_wrap_correction(&mut self, generation: u64) -> WrapOutcome {
        if generation != self.generation {
            log::debug!(
                "Wrap correction for generation {} is stale (current {})",
                generation,
                self.generation
            );
            return WrapOutcome::Stale;
        }
        match self.track.unwrap_sentinel() {
            Some(shift) => {
                log::debug!(
                    "Wrap correction re-seated position to {}",
                    self.track.position()
                );
                WrapOutcome::Corrected { shift }
            }
            None => WrapOutcome::InRange,
        }
    }
}
