use std::collections::HashMap;
use std::ffi::OsString;

pub const AUTOPLAY_INTERVAL: &str = "LOOPRAIL_AUTOPLAY_INTERVAL";
pub const AUTOPLAY_ENABLED: &str = "LOOPRAIL_AUTOPLAY_ENABLED";
pub const TRANSITION_DURATION: &str = "LOOPRAIL_TRANSITION_DURATION";
pub const COMMIT_DISTANCE_PX: &str = "LOOPRAIL_COMMIT_DISTANCE_PX";
pub const COMMIT_VELOCITY: &str = "LOOPRAIL_COMMIT_VELOCITY";
pub const LINK_DRAG_THRESHOLD_PX: &str = "LOOPRAIL_LINK_DRAG_THRESHOLD_PX";
pub const SLIDE_GAP_PX: &str = "LOOPRAIL_SLIDE_GAP_PX";
/// Path of a TOML file to load when the caller did not name one.
pub const CONFIG_PATH: &str = "LOOPRAIL_CONFIG";

const KEYS: [&str; 8] = [
    AUTOPLAY_INTERVAL,
    AUTOPLAY_ENABLED,
    TRANSITION_DURATION,
    COMMIT_DISTANCE_PX,
    COMMIT_VELOCITY,
    LINK_DRAG_THRESHOLD_PX,
    SLIDE_GAP_PX,
    CONFIG_PATH,
];

/// Raw `LOOPRAIL_*` values, unparsed. Parsing happens while the layers are
/// merged so errors can name the offending key.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EnvConfig {
    vars: HashMap<&'static str, String>,
}

impl EnvConfig {
    /// Snapshot the process environment.
    pub fn gather() -> Self {
        Self::from_os_vars(std::env::vars_os())
    }

    /// Like [`EnvConfig::from_vars`], but skips entries that are not valid
    /// UTF-8 instead of failing on them.
    pub fn from_os_vars<I>(vars: I) -> Self
    where
        I: IntoIterator<Item = (OsString, OsString)>,
    {
        Self::from_vars(vars.into_iter().filter_map(|(key, value)| {
            let key = key.into_string().ok()?;
            match value.into_string() {
                Ok(value) => Some((key, value)),
                Err(_) => {
                    if KEYS.contains(&key.as_str()) {
                        log::warn!("Ignoring {key}: value is not valid UTF-8");
                    }
                    None
                }
            }
        }))
    }

    /// Keep only the recognised keys from `vars`. Blank values count as
    /// unset.
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut env_config = Self::default();
        for (key, value) in vars {
            let Some(known) = KEYS.iter().find(|k| **k == key.as_ref()) else {
                continue;
            };
            let value = value.into();
            if value.trim().is_empty() {
                continue;
            }
            env_config.vars.insert(known, value);
        }
        env_config
    }

    /// Fill keys that are still unset from `fallback`. Used to put a `.env`
    /// file underneath the real environment.
    pub fn or(mut self, fallback: EnvConfig) -> Self {
        for (key, value) in fallback.vars {
            self.vars.entry(key).or_insert(value);
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// True when at least one tuning value is set. [`CONFIG_PATH`] only
    /// selects a file and does not count.
    pub fn has_overrides(&self) -> bool {
        self.vars.keys().any(|key| *key != CONFIG_PATH)
    }

    /// Recognised keys present, sorted.
    pub fn keys(&self) -> Vec<&'static str> {
        let mut keys: Vec<_> = self.vars.keys().copied().collect();
        keys.sort_unstable();
        keys
    }
}
