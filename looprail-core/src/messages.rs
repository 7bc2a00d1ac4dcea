//! Input events the host feeds in and effects it gets back

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::types::{Point, PointerKind, PointerTarget};

/// Input the host feeds into [`crate::Carousel::handle`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "type", rename_all = "snake_case")
)]
pub enum CarouselEvent {
    // Pointer stream (touch and mouse unified)
    /// A press began.
    PointerDown {
        /// Input stream that pressed.
        pointer: PointerKind,
        /// Where, in layout px.
        point: Point,
        /// What the press landed on.
        target: PointerTarget,
    },
    /// A pointer moved anywhere on the page.
    PointerMove {
        /// Input stream that moved.
        pointer: PointerKind,
        /// New coordinate.
        point: Point,
    },
    /// A press ended anywhere on the page.
    PointerUp {
        /// Input stream that released.
        pointer: PointerKind,
        /// Release coordinate.
        point: Point,
    },
    /// The pointer left the strip or the platform aborted the press.
    PointerCancel {
        /// Input stream that was cancelled.
        pointer: PointerKind,
    },

    // Slide sub-elements, addressed by extended index
    /// The platform fired a click on a slide link.
    LinkClick {
        /// Extended index of the slide.
        slide: usize,
    },
    /// The pointer entered a slide.
    HoverEnter {
        /// Extended index of the slide.
        slide: usize,
    },
    /// The pointer left a slide.
    HoverLeave {
        /// Extended index of the slide.
        slide: usize,
    },

    // Controls
    /// An indicator dot was clicked.
    IndicatorClick {
        /// Zero-based real slide index.
        index: usize,
    },
    /// Previous button.
    Previous,
    /// Next button.
    Next,

    /// Viewport size changed; the stride is re-measured on the next render.
    Resize,
}

/// Output the host applies.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "type", rename_all = "snake_case")
)]
pub enum Effect {
    /// Translate the strip left by `offset` pixels and highlight the
    /// indicator at `active_indicator`.
    Frame {
        /// Leftward translation in px.
        offset: f32,
        /// Run the slide transition instead of jumping.
        animate: bool,
        /// Real slide index to highlight.
        active_indicator: usize,
    },
    /// Let the link click through.
    FollowLink {
        /// Extended index of the clicked slide.
        slide: usize,
    },
    /// Prevent the link's default navigation and stop propagation.
    SuppressClick {
        /// Extended index of the clicked slide.
        slide: usize,
    },
    /// Autoplay started or stopped.
    AutoplayChanged {
        /// Whether a tick is now scheduled.
        running: bool,
    },
}

impl Effect {
    /// `(offset, animate, active_indicator)` when this is a frame.
    pub fn as_frame(&self) -> Option<(f32, bool, usize)> {
        match *self {
            Effect::Frame {
                offset,
                animate,
                active_indicator,
            } => Some((offset, animate, active_indicator)),
            _ => None,
        }
    }
}
