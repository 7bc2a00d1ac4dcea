use std::path::PathBuf;

use looprail_core::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TraceError {
    #[error("failed to read trace {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse trace")]
    Parse(#[from] serde_json::Error),
    #[error(
        "event {index} at {at_ms}ms is earlier than the previous event at {previous_ms}ms"
    )]
    OutOfOrder {
        index: usize,
        at_ms: u64,
        previous_ms: u64,
    },
    #[error("trace has no slides")]
    NoSlides,
    #[error("carousel configuration rejected")]
    Config(#[from] ConfigError),
    #[error("failed to write effects")]
    Write(#[source] std::io::Error),
}
