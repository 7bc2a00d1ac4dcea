//! Shared value types for the carousel engine

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A pointer coordinate in layout pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f32,
    /// Vertical coordinate.
    pub y: f32,
}

impl Point {
    /// Point at `(x, y)`.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Which input stream produced a pointer event. Touch and mouse share one
/// state machine; the kind only matters to the link guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PointerKind {
    /// Touch screen.
    Touch,
    /// Mouse or trackpad.
    Mouse,
}

/// What a pointer press landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "kind", rename_all = "snake_case")
)]
pub enum PointerTarget {
    /// Anywhere on the slide strip.
    Track,
    /// The link embedded in the slide at this extended index.
    Link {
        /// Extended index of the slide.
        slide: usize,
    },
    /// A previous/next button. These presses never reach drag handling.
    Control,
}

/// Navigation direction along the strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Direction {
    /// Towards higher positions (next slide).
    Forward,
    /// Towards lower positions (previous slide).
    Backward,
}

/// One slide as the engine sees it. Content is opaque; only the pieces that
/// change interaction behavior are modelled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Slide {
    /// Target of the link embedded in the slide, if any.
    #[cfg_attr(feature = "serde", serde(default))]
    pub link: Option<String>,
    /// Hovering this slide suspends autoplay.
    #[cfg_attr(feature = "serde", serde(default))]
    pub hover_sensitive: bool,
}

impl Slide {
    /// Slide without a link or hover behavior.
    pub fn plain() -> Self {
        Self::default()
    }

    /// Slide whose embedded link points at `href`.
    pub fn with_link(href: impl Into<String>) -> Self {
        Self {
            link: Some(href.into()),
            hover_sensitive: false,
        }
    }

    /// Make hovering this slide suspend autoplay.
    pub fn hover_sensitive(mut self) -> Self {
        self.hover_sensitive = true;
        self
    }

    /// Whether the slide embeds a link.
    pub fn has_link(&self) -> bool {
        self.link.is_some()
    }
}
