//! Raw configuration shapes before they are merged onto the defaults.

pub mod sources;

use looprail_core::CarouselConfig;
use serde::{Deserialize, Serialize};

/// Raw configuration as defined in a TOML file. Every key is optional; a
/// missing key keeps whatever the earlier layer decided.
#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields, rename_all = "snake_case")]
pub struct FileConfig {
    pub autoplay: FileAutoplayConfig,
    pub transition: FileTransitionConfig,
    pub gesture: FileGestureConfig,
    pub link_guard: FileLinkGuardConfig,
    pub layout: FileLayoutConfig,
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileAutoplayConfig {
    /// Humantime string, e.g. `"3s"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileTransitionConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileGestureConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit_distance_px: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit_velocity_px_per_ms: Option<f32>,
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileLinkGuardConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drag_threshold_px: Option<f32>,
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileLayoutConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slide_gap_px: Option<f32>,
}

impl From<&CarouselConfig> for FileConfig {
    /// Fully populated file form of an effective configuration.
    fn from(config: &CarouselConfig) -> Self {
        let duration =
            |d| Some(humantime::format_duration(d).to_string());
        Self {
            autoplay: FileAutoplayConfig {
                interval: duration(config.autoplay_interval),
                enabled: Some(config.autoplay_enabled),
            },
            transition: FileTransitionConfig {
                duration: duration(config.transition_duration),
            },
            gesture: FileGestureConfig {
                commit_distance_px: Some(config.commit_distance_px),
                commit_velocity_px_per_ms: Some(
                    config.commit_velocity_px_per_ms,
                ),
            },
            link_guard: FileLinkGuardConfig {
                drag_threshold_px: Some(config.link_drag_threshold_px),
            },
            layout: FileLayoutConfig {
                slide_gap_px: Some(config.slide_gap_px),
            },
        }
    }
}
