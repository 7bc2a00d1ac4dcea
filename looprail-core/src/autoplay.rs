//! Autoplay scheduler
//!
//! Autoplay runs iff nothing is suspending it. Suspensions are kept as an
//! explicit set so pause/resume pairs from different sources cannot undo
//! each other: releasing a drag while still hovering a hover-sensitive slide
//! leaves autoplay stopped until that hover ends too.

use std::collections::BTreeSet;
use std::time::{Duration, Instant};

use crate::timers::{TimerId, TimerQueue, TimerTask};

/// Something currently holding autoplay off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Suspension {
    /// A gesture session is open.
    Drag,
    /// The pointer is over the hover-sensitive slide at this extended index.
    Hover(usize),
}

/// Repeating forward advance, held off by any active [`Suspension`].
#[derive(Debug, Clone)]
pub struct AutoplayScheduler {
    enabled: bool,
    interval: Duration,
    suspensions: BTreeSet<Suspension>,
    timer: Option<TimerId>,
}

impl AutoplayScheduler {
    /// Idle scheduler; call [`AutoplayScheduler::start`] to arm it.
    pub fn new(interval: Duration, enabled: bool) -> Self {
        Self {
            enabled,
            interval,
            suspensions: BTreeSet::new(),
            timer: None,
        }
    }

    /// Whether a tick is scheduled.
    pub fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    /// Whether any source is holding autoplay off.
    pub fn is_suspended(&self) -> bool {
        !self.suspensions.is_empty()
    }

    /// Active suspension sources, in order.
    pub fn suspensions(&self) -> impl Iterator<Item = &Suspension> {
        self.suspensions.iter()
    }

    /// Arm the repeating timer. Idempotent; does nothing while disabled or
    /// suspended. Returns true if the timer was installed by this call.
    pub fn start(&mut self, timers: &mut TimerQueue, now: Instant) -> bool {
        if !self.enabled || self.timer.is_some() || self.is_suspended() {
            return false;
        }
        self.timer =
            Some(timers.schedule(now + self.interval, TimerTask::AutoplayTick));
        log::debug!("Autoplay started (interval {:?})", self.interval);
        true
    }

    /// Disarm the timer. Idempotent. Returns true if a timer was removed.
    pub fn stop(&mut self, timers: &mut TimerQueue) -> bool {
        match self.timer.take() {
            Some(id) => {
                timers.cancel(id);
                log::debug!("Autoplay stopped");
                true
            }
            None => false,
        }
    }

    /// Add a suspension source. Returns true if this stopped autoplay.
    pub fn suspend(
        &mut self,
        source: Suspension,
        timers: &mut TimerQueue,
    ) -> bool {
        if !self.suspensions.insert(source) {
            return false;
        }
        log::debug!("Autoplay suspended by {:?}", source);
        self.stop(timers)
    }

    /// Clear a suspension source. Autoplay restarts (with a fresh interval)
    /// only once the set is empty. Returns true if this restarted it.
    pub fn resume(
        &mut self,
        source: Suspension,
        timers: &mut TimerQueue,
        now: Instant,
    ) -> bool {
        if !self.suspensions.remove(&source) {
            return false;
        }
        log::debug!(
            "Autoplay suspension {:?} cleared ({} remaining)",
            source,
            self.suspensions.len()
        );
        self.start(timers, now)
    }

    /// Handle a fired autoplay timer. Returns true if the tick belongs to
    /// the installed timer, in which case the next tick is already scheduled
    /// and the caller should advance.
    pub fn on_tick(
        &mut self,
        id: TimerId,
        due: Instant,
        now: Instant,
        timers: &mut TimerQueue,
    ) -> bool {
        if self.timer != Some(id) {
            log::debug!("Ignoring orphaned autoplay tick");
            return false;
        }
        // Missed periods are skipped, not replayed.
        let mut next = due + self.interval;
        while next <= now {
            next += self.interval;
        }
        self.timer = Some(timers.schedule(next, TimerTask::AutoplayTick));
        true
    }
}
