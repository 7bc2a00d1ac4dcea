//! Recorded interaction traces
//!
//! A trace is plain JSON: the slides, the layout they were measured at, and
//! the input events with their offsets (ms) from mount.
//!
//! ```json
//! {
//!   "slides": [{}, {"link": "/a"}, {"hover_sensitive": true}],
//!   "layout": {"slide_width": 300.0, "container_width": 300.0},
//!   "events": [{"at_ms": 1000, "event": {"type": "next"}}],
//!   "until_ms": 4000
//! }
//! ```

use std::fs;
use std::path::Path;

use looprail_core::{CarouselEvent, FixedLayout, Slide};
use serde::{Deserialize, Serialize};

use crate::error::TraceError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimedEvent {
    pub at_ms: u64,
    pub event: CarouselEvent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    pub slides: Vec<Slide>,
    pub layout: FixedLayout,
    #[serde(default)]
    pub events: Vec<TimedEvent>,
    /// Keep the clock running to this offset after the last event. Defaults
    /// to the last event plus one transition, so a trailing wrap correction
    /// still shows up.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub until_ms: Option<u64>,
}

impl Trace {
    pub fn from_json(raw: &str) -> Result<Self, TraceError> {
        let trace: Trace = serde_json::from_str(raw)?;
        trace.check_order()?;
        Ok(trace)
    }

    pub fn from_path(path: &Path) -> Result<Self, TraceError> {
        let raw = fs::read_to_string(path).map_err(|source| TraceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    /// Offset of the last event, or 0 for an empty trace.
    pub fn last_event_ms(&self) -> u64 {
        self.events.last().map_or(0, |e| e.at_ms)
    }

    fn check_order(&self) -> Result<(), TraceError> {
        for (index, pair) in self.events.windows(2).enumerate() {
            if pair[1].at_ms < pair[0].at_ms {
                return Err(TraceError::OutOfOrder {
                    index: index + 1,
                    at_ms: pair[1].at_ms,
                    previous_ms: pair[0].at_ms,
                });
            }
        }
        Ok(())
    }
}
