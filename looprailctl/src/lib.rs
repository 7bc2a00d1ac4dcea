//! Operator tooling for looprail carousels.
//!
//! [`trace`] describes a recorded interaction session, [`mod@replay`] runs one
//! through the engine on a virtual clock, and [`demo`] lets a synthetic
//! carousel autoplay on a real timer loop.
#![allow(missing_docs)]

pub mod demo;
pub mod error;
pub mod replay;
pub mod trace;

pub use error::TraceError;
pub use replay::{EffectRecord, replay, write_records};
pub use trace::{TimedEvent, Trace};
