//! Cooperative timer queue
//!
//! The engine never sleeps. Deferred work is recorded here with a deadline
//! and fired when the host calls [`crate::Carousel::poll`]. Entries fire in
//! deadline order; entries sharing a deadline fire in scheduling order.

use std::collections::{BTreeMap, HashMap};
use std::time::Instant;

/// Handle to a scheduled entry, used to cancel it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// Deferred work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerTask {
    /// One autoplay period elapsed.
    AutoplayTick,
    /// Re-seat a sentinel position once the animated move into it is done.
    /// Carries the navigation generation that scheduled it.
    WrapCorrection {
        /// Generation of the navigation that scheduled it.
        generation: u64,
    },
}

/// Deadline-ordered queue of [`TimerTask`]s.
#[derive(Debug, Default)]
pub struct TimerQueue {
    next_id: u64,
    by_deadline: BTreeMap<(Instant, TimerId), TimerTask>,
    deadlines: HashMap<TimerId, Instant>,
}

impl TimerQueue {
    /// Empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `task` for `due`.
    pub fn schedule(&mut self, due: Instant, task: TimerTask) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.by_deadline.insert((due, id), task);
        self.deadlines.insert(id, due);
        id
    }

    /// Remove an entry. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        match self.deadlines.remove(&id) {
            Some(due) => self.by_deadline.remove(&(due, id)).is_some(),
            None => false,
        }
    }

    /// Earliest pending deadline.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.by_deadline.keys().next().map(|(due, _)| *due)
    }

    /// Pop the earliest entry due at or before `now`.
    pub fn pop_due(
        &mut self,
        now: Instant,
    ) -> Option<(TimerId, Instant, TimerTask)> {
        let (&(due, id), _) = self.by_deadline.iter().next()?;
        if due > now {
            return None;
        }
        let task = self.by_deadline.remove(&(due, id))?;
        self.deadlines.remove(&id);
        Some((id, due, task))
    }

    /// Number of pending entries.
    pub fn len(&self) -> usize {
        self.by_deadline.len()
    }

    /// Whether nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.by_deadline.is_empty()
    }

    /// Number of pending wrap corrections.
    pub fn pending_wrap_corrections(&self) -> usize {
        self.by_deadline
            .values()
            .filter(|task| matches!(task, TimerTask::WrapCorrection { .. }))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn fires_in_deadline_then_schedule_order() {
        let t0 = Instant::now();
        let mut q = TimerQueue::new();
        q.schedule(t0 + Duration::from_millis(500), TimerTask::AutoplayTick);
        let a = q.schedule(
            t0 + Duration::from_millis(100),
            TimerTask::WrapCorrection { generation: 1 },
        );
        let b = q.schedule(
            t0 + Duration::from_millis(100),
            TimerTask::WrapCorrection { generation: 2 },
        );

        assert_eq!(q.next_deadline(), Some(t0 + Duration::from_millis(100)));
        assert!(q.pop_due(t0).is_none());

        let now = t0 + Duration::from_millis(600);
        assert_eq!(q.pop_due(now).map(|(id, _, _)| id), Some(a));
        assert_eq!(q.pop_due(now).map(|(id, _, _)| id), Some(b));
        assert_eq!(
            q.pop_due(now).map(|(_, _, task)| task),
            Some(TimerTask::AutoplayTick)
        );
        assert!(q.is_empty());
    }

    #[test]
    fn cancel_is_idempotent() {
        let t0 = Instant::now();
        let mut q = TimerQueue::new();
        let id = q.schedule(t0, TimerTask::AutoplayTick);
        assert!(q.cancel(id));
        assert!(!q.cancel(id));
        assert!(q.pop_due(t0).is_none());
        assert_eq!(q.next_deadline(), None);
    }
}
