//! Interaction engine for an infinite-loop slide carousel.
//!
//! The engine is host-agnostic: a page (or any other surface) feeds it
//! [`CarouselEvent`]s stamped with a monotonic [`std::time::Instant`], drives
//! its timer queue through [`Carousel::poll`], and applies the [`Effect`]s it
//! returns. Nothing in here touches a DOM, a window or a clock on its own.
//!
//! The pieces mirror the way the carousel actually behaves:
//!
//! - [`track`] owns the slide list bracketed by boundary clones and the
//!   current position inside it.
//! - [`transport`] turns positions into offsets and schedules the silent wrap
//!   correction after an animated move lands on a clone.
//! - [`gesture`] is the pointer state machine that decides between advancing,
//!   retreating and snapping back.
//! - [`autoplay`] runs the periodic advance and tracks what is suspending it.
//! - [`link_guard`] keeps a drag that started on a slide link from following
//!   that link.

pub mod autoplay;
pub mod carousel;
pub mod config;
pub mod constants;
pub mod error;
pub mod gesture;
pub mod layout;
pub mod link_guard;
pub mod messages;
pub mod timers;
pub mod track;
pub mod transport;
pub mod types;

pub use autoplay::{AutoplayScheduler, Suspension};
pub use carousel::Carousel;
pub use config::CarouselConfig;
pub use error::ConfigError;
pub use gesture::{
    GestureSession, GestureState, GestureStep, GestureTracker, PointerEvent,
    Release,
};
pub use layout::{FixedLayout, Layout};
pub use link_guard::{ClickVerdict, LinkGuard};
pub use messages::{CarouselEvent, Effect};
pub use timers::{TimerId, TimerQueue, TimerTask};
pub use track::Track;
pub use transport::{Transport, WrapOutcome};
pub use types::{Direction, Point, PointerKind, PointerTarget, Slide};
