//! Configuration loading for looprail carousels.
//!
//! Layers, later ones win: compiled defaults from
//! [`looprail_core::CarouselConfig`], an optional TOML file, then
//! `LOOPRAIL_*` environment variables (optionally seeded from a `.env`
//! file). The result is validated before it is handed out.
#![allow(missing_docs)]

pub mod loader;
pub mod models;
pub mod util;

pub use loader::{ConfigLoad, ConfigLoader, ConfigSource, error::ConfigLoadError};
pub use models::FileConfig;
pub use models::sources::EnvConfig;
