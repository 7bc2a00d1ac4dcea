//! Layered configuration loader.

pub mod error;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use looprail_core::CarouselConfig;

use crate::models::FileConfig;
use crate::models::sources::{self, EnvConfig};
use crate::util::{parse_bool, parse_duration};
use self::error::ConfigLoadError;

const DEFAULT_CONFIG_LOCATIONS: [&str; 2] =
    ["looprail.toml", "config/looprail.toml"];

/// Where a piece of the effective configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Defaults,
    File(PathBuf),
    EnvFile(PathBuf),
    Environment,
}

/// Validated configuration together with the layers that produced it.
#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: CarouselConfig,
    pub sources: Vec<ConfigSource>,
}

#[derive(Debug, Default, Clone)]
pub struct ConfigLoaderOptions {
    pub config_path: Option<PathBuf>,
    pub env_file: Option<PathBuf>,
    /// Environment to read instead of the process environment.
    pub env: Option<EnvConfig>,
}

#[derive(Debug, Default)]
pub struct ConfigLoader {
    options: ConfigLoaderOptions,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ConfigLoaderOptions) -> Self {
        Self { options }
    }

    /// Load this TOML file; a missing file is an error.
    pub fn with_config_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.config_path = Some(path.into());
        self
    }

    /// Seed unset `LOOPRAIL_*` keys from this `.env` file. A missing file is
    /// skipped.
    pub fn with_env_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.env_file = Some(path.into());
        self
    }

    pub fn with_env(mut self, env: EnvConfig) -> Self {
        self.options.env = Some(env);
        self
    }

    pub fn load(&self) -> Result<ConfigLoad, ConfigLoadError> {
        let mut sources = vec![ConfigSource::Defaults];

        let mut env = self
            .options
            .env
            .clone()
            .unwrap_or_else(EnvConfig::gather);
        if let Some(path) = &self.options.env_file
            && let Some(file_env) = read_env_file(path)?
        {
            env = env.or(file_env);
            sources.push(ConfigSource::EnvFile(path.clone()));
        }

        let mut config = CarouselConfig::default();

        if let Some(path) = self.resolve_config_path(&env)? {
            let file = read_file_config(&path)?;
            apply_file(&mut config, &file)?;
            log::debug!("Loaded carousel configuration from {}", path.display());
            sources.push(ConfigSource::File(path));
        }

        if env.has_overrides() {
            apply_env(&mut config, &env)?;
            log::debug!("Applied environment overrides: {:?}", env.keys());
            sources.push(ConfigSource::Environment);
        }

        config.validate()?;
        Ok(ConfigLoad { config, sources })
    }

    fn resolve_config_path(
        &self,
        env: &EnvConfig,
    ) -> Result<Option<PathBuf>, ConfigLoadError> {
        if let Some(explicit) = &self.options.config_path {
            if !explicit.exists() {
                return Err(ConfigLoadError::MissingConfig {
                    path: explicit.clone(),
                });
            }
            return Ok(Some(explicit.clone()));
        }

        if let Some(from_env) = env.get(sources::CONFIG_PATH) {
            let path = PathBuf::from(from_env);
            if path.exists() {
                return Ok(Some(path));
            }
            log::warn!(
                "{} points at {}, which does not exist; ignoring",
                sources::CONFIG_PATH,
                path.display()
            );
            return Ok(None);
        }

        Ok(DEFAULT_CONFIG_LOCATIONS
            .iter()
            .map(PathBuf::from)
            .find(|candidate| candidate.exists()))
    }
}

fn read_file_config(path: &Path) -> Result<FileConfig, ConfigLoadError> {
    let contents =
        fs::read_to_string(path).map_err(|err| ConfigLoadError::Io {
            path: path.to_path_buf(),
            source: err,
        })?;
    toml::from_str(&contents).map_err(|err| ConfigLoadError::Parse {
        path: path.to_path_buf(),
        source: err,
    })
}

fn read_env_file(path: &Path) -> Result<Option<EnvConfig>, ConfigLoadError> {
    let iter = match dotenvy::from_path_iter(path) {
        Ok(iter) => iter,
        Err(dotenvy::Error::Io(_)) => {
            log::debug!("No env file at {}", path.display());
            return Ok(None);
        }
        Err(err) => return Err(err.into()),
    };
    let vars = iter.collect::<Result<Vec<_>, _>>()?;
    Ok(Some(EnvConfig::from_vars(vars)))
}

fn apply_file(
    config: &mut CarouselConfig,
    file: &FileConfig,
) -> Result<(), ConfigLoadError> {
    if let Some(raw) = &file.autoplay.interval {
        config.autoplay_interval = duration("autoplay.interval", raw)?;
    }
    if let Some(enabled) = file.autoplay.enabled {
        config.autoplay_enabled = enabled;
    }
    if let Some(raw) = &file.transition.duration {
        config.transition_duration = duration("transition.duration", raw)?;
    }
    if let Some(v) = file.gesture.commit_distance_px {
        config.commit_distance_px = v;
    }
    if let Some(v) = file.gesture.commit_velocity_px_per_ms {
        config.commit_velocity_px_per_ms = v;
    }
    if let Some(v) = file.link_guard.drag_threshold_px {
        config.link_drag_threshold_px = v;
    }
    if let Some(v) = file.layout.slide_gap_px {
        config.slide_gap_px = v;
    }
    Ok(())
}

fn apply_env(
    config: &mut CarouselConfig,
    env: &EnvConfig,
) -> Result<(), ConfigLoadError> {
    if let Some(raw) = env.get(sources::AUTOPLAY_INTERVAL) {
        config.autoplay_interval = duration(sources::AUTOPLAY_INTERVAL, raw)?;
    }
    if let Some(raw) = env.get(sources::AUTOPLAY_ENABLED) {
        config.autoplay_enabled = parse_bool(raw).ok_or_else(|| {
            ConfigLoadError::InvalidBool {
                key: sources::AUTOPLAY_ENABLED.to_string(),
                value: raw.to_string(),
            }
        })?;
    }
    if let Some(raw) = env.get(sources::TRANSITION_DURATION) {
        config.transition_duration =
            duration(sources::TRANSITION_DURATION, raw)?;
    }

    let numbers: [(&str, &mut f32); 4] = [
        (sources::COMMIT_DISTANCE_PX, &mut config.commit_distance_px),
        (sources::COMMIT_VELOCITY, &mut config.commit_velocity_px_per_ms),
        (
            sources::LINK_DRAG_THRESHOLD_PX,
            &mut config.link_drag_threshold_px,
        ),
        (sources::SLIDE_GAP_PX, &mut config.slide_gap_px),
    ];
    for (key, slot) in numbers {
        if let Some(raw) = env.get(key) {
            *slot = raw.trim().parse().map_err(|_| {
                ConfigLoadError::InvalidNumber {
                    key: key.to_string(),
                    value: raw.to_string(),
                }
            })?;
        }
    }
    Ok(())
}

fn duration(key: &str, raw: &str) -> Result<Duration, ConfigLoadError> {
    parse_duration(raw).map_err(|source| ConfigLoadError::InvalidDuration {
        key: key.to_string(),
        value: raw.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_overrides_defaults() {
        let env = EnvConfig::from_vars([
            (sources::AUTOPLAY_INTERVAL, "5s"),
            (sources::COMMIT_DISTANCE_PX, "80"),
        ]);
        let mut config = CarouselConfig::default();
        apply_env(&mut config, &env).expect("valid env");
        assert_eq!(config.autoplay_interval, Duration::from_secs(5));
        assert_eq!(config.commit_distance_px, 80.0);
        assert_eq!(config.slide_gap_px, 10.0);
    }

    #[test]
    fn bad_number_names_the_key() {
        let env = EnvConfig::from_vars([(sources::SLIDE_GAP_PX, "wide")]);
        let err = apply_env(&mut CarouselConfig::default(), &env)
            .expect_err("not a number");
        match err {
            ConfigLoadError::InvalidNumber { key, value } => {
                assert_eq!(key, sources::SLIDE_GAP_PX);
                assert_eq!(value, "wide");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
