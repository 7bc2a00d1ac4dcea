//! Default tuning for the carousel engine.
//!
//! Every value here can be overridden through [`crate::CarouselConfig`];
//! these are the values the carousel ships with.

/// Interval between autoplay advances (ms).
pub const AUTOPLAY_INTERVAL_MS: u64 = 3000;

/// Length of the animated slide transition (ms). The wrap correction runs
/// exactly this long after an animated advance or retreat.
pub const TRANSITION_DURATION_MS: u64 = 500;

/// A release further than this from the press commits a navigation (px).
pub const COMMIT_DISTANCE_PX: f32 = 50.0;

/// A release faster than this commits a navigation regardless of distance
/// (px/ms).
pub const COMMIT_VELOCITY_PX_PER_MS: f32 = 0.3;

/// Movement on a slide link beyond this marks the press as a drag and
/// swallows the click that follows (px).
/// Must stay below [`COMMIT_DISTANCE_PX`].
pub const LINK_DRAG_THRESHOLD_PX: f32 = 10.0;

/// Gap between neighbouring slides (layout px).
pub const SLIDE_GAP_PX: f32 = 10.0;
