//! Live autoplay on a real timer loop
//!
//! Mounts a synthetic carousel and drives its timer queue from tokio's
//! clock: sleep until the next deadline, poll, print whatever came out.

use std::io::Write;
use std::time::Duration;

use looprail_core::{Carousel, CarouselConfig, Effect, FixedLayout, Slide};
use tokio::time::{Instant, sleep_until};

use crate::error::TraceError;
use crate::replay::{EffectRecord, write_records};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DemoOptions {
    pub slides: usize,
    pub layout: FixedLayout,
    /// Stop the loop after this long.
    pub run_for: Duration,
}

impl Default for DemoOptions {
    fn default() -> Self {
        Self {
            slides: 3,
            layout: FixedLayout::new(300.0, 300.0),
            run_for: Duration::from_secs(10),
        }
    }
}

/// Run the demo loop, writing effect records to `out` as they happen.
/// Returns the number of effects produced.
pub async fn run(
    options: DemoOptions,
    config: CarouselConfig,
    mut out: impl Write,
) -> Result<usize, TraceError> {
    let slides = vec![Slide::plain(); options.slides];
    let mut carousel = Carousel::mount(slides, options.layout, config)?
        .ok_or(TraceError::NoSlides)?;

    let origin = Instant::now();
    let end = origin + options.run_for;
    let mut emitted = 0;

    let started = carousel.start(origin.into_std());
    emitted += emit(&mut out, origin, origin, started)?;

    loop {
        let wake = carousel
            .next_deadline()
            .map(Instant::from_std)
            .map_or(end, |deadline| deadline.min(end));
        sleep_until(wake).await;

        let now = Instant::now();
        let effects = carousel.poll(now.into_std());
        emitted += emit(&mut out, origin, now, effects)?;
        if now >= end {
            break;
        }
    }

    log::info!(
        "Demo finished after {:?}: {} effects, resting on slide {}",
        options.run_for,
        emitted,
        carousel.logical_index()
    );
    Ok(emitted)
}

fn emit(
    out: &mut impl Write,
    origin: Instant,
    now: Instant,
    effects: Vec<Effect>,
) -> Result<usize, TraceError> {
    let at_ms =
        u64::try_from(now.duration_since(origin).as_millis()).unwrap_or(u64::MAX);
    let records: Vec<_> = effects
        .into_iter()
        .map(|effect| EffectRecord { at_ms, effect })
        .collect();
    write_records(&records, &mut *out)?;
    Ok(records.len())
}
