//! Deterministic replay on a virtual clock

use std::io::Write;
use std::time::{Duration, Instant};

use looprail_core::{Carousel, CarouselConfig, Effect, Layout};
use serde::Serialize;

use crate::error::TraceError;
use crate::trace::Trace;

/// One effect, stamped with its offset (ms) from mount.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EffectRecord {
    pub at_ms: u64,
    pub effect: Effect,
}

/// Run `trace` through a fresh carousel.
///
/// Timers due before an event fire first, each at its own deadline, so the
/// output is the same no matter how coarse the trace's timestamps are.
pub fn replay(
    trace: &Trace,
    config: CarouselConfig,
) -> Result<Vec<EffectRecord>, TraceError> {
    let until_ms = trace.until_ms.unwrap_or_else(|| {
        trace.last_event_ms() + millis(config.transition_duration)
    });
    let mut carousel =
        Carousel::mount(trace.slides.clone(), trace.layout, config)?
            .ok_or(TraceError::NoSlides)?;

    let origin = Instant::now();
    let at = |ms: u64| origin + Duration::from_millis(ms);
    let mut records = Vec::new();
    stamp(&mut records, 0, carousel.start(origin));

    for timed in &trace.events {
        drain_until(&mut carousel, origin, at(timed.at_ms), &mut records);
        log::trace!("t+{}ms {:?}", timed.at_ms, timed.event);
        let effects = carousel.handle(timed.event.clone(), at(timed.at_ms));
        stamp(&mut records, timed.at_ms, effects);
    }
    drain_until(&mut carousel, origin, at(until_ms), &mut records);

    log::debug!(
        "Replayed {} events into {} effects; ended on slide {}",
        trace.events.len(),
        records.len(),
        carousel.logical_index()
    );
    Ok(records)
}

fn drain_until<L: Layout>(
    carousel: &mut Carousel<L>,
    origin: Instant,
    limit: Instant,
    records: &mut Vec<EffectRecord>,
) {
    while let Some(deadline) = carousel.next_deadline()
        && deadline <= limit
    {
        let at_ms = millis(deadline.duration_since(origin));
        stamp(records, at_ms, carousel.poll(deadline));
    }
}

fn stamp(records: &mut Vec<EffectRecord>, at_ms: u64, effects: Vec<Effect>) {
    records.extend(
        effects
            .into_iter()
            .map(|effect| EffectRecord { at_ms, effect }),
    );
}

fn millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

/// Write records as JSON lines.
pub fn write_records(
    records: &[EffectRecord],
    mut out: impl Write,
) -> Result<(), TraceError> {
    for record in records {
        serde_json::to_writer(&mut out, record)
            .map_err(|err| TraceError::Write(err.into()))?;
        out.write_all(b"\n").map_err(TraceError::Write)?;
    }
    out.flush().map_err(TraceError::Write)
}
