//! Deterministic timer queue.
//!
//! Time is a virtual offset from the queue's creation. The owner advances it
//! explicitly, either from a wall clock or from a test. Timers due at the same
//! instant fire in registration order; a repeating timer keeps its original
//! registration rank when it re-arms, so a ticker registered before a deadline
//! still fires first when both land on the same instant.

use crate::app::TimerId;
use std::collections::BTreeMap;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Entry {
    due: Duration,
    rank: u64,
    period: Option<Duration>,
}

/// Scheduled callbacks keyed by [`TimerId`].
#[derive(Debug, Default, Clone)]
pub struct TimerQueue {
    now: Duration,
    next_rank: u64,
    entries: BTreeMap<TimerId, Entry>,
}

impl TimerQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    #[must_use]
    pub const fn now(&self) -> Duration {
        self.now
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: TimerId) -> bool {
        self.entries.contains_key(&id)
    }

    /// Schedules `id` to fire `after` from now, re-arming every `after` if `repeat`.
    ///
    /// Scheduling an id that is already queued replaces it.
    pub fn schedule(&mut self, id: TimerId, after: Duration, repeat: bool) {
        self.next_rank += 1;
        let entry = Entry {
            due: self.now + after,
            rank: self.next_rank,
            period: repeat.then_some(after).filter(|p| !p.is_zero()),
        };
        tracing::trace!(timer = id.0, due_ms = entry.due.as_millis(), repeat, "timer scheduled");
        self.entries.insert(id, entry);
    }

    /// Removes `id`. Returns whether it was queued.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let removed = self.entries.remove(&id).is_some();
        tracing::trace!(timer = id.0, removed, "timer cancelled");
        removed
    }

    /// Time at which the next timer is due.
    #[must_use]
    pub fn next_due(&self) -> Option<Duration> {
        self.entries.values().map(|e| e.due).min()
    }

    /// Pops the earliest timer due at or before `until` and moves time to it.
    ///
    /// Repeating timers are re-armed before returning. Returns `None` when
    /// nothing is due; time is left unchanged in that case.
    pub fn pop_due(&mut self, until: Duration) -> Option<TimerId> {
        let (id, entry) = self
            .entries
            .iter()
            .filter(|(_, e)| e.due <= until)
            .min_by_key(|(_, e)| (e.due, e.rank))
            .map(|(id, e)| (*id, *e))?;

        self.now = self.now.max(entry.due);
        match entry.period {
            Some(period) => {
                self.entries.insert(id, Entry { due: entry.due + period, ..entry });
            }
            None => {
                self.entries.remove(&id);
            }
        }
        Some(id)
    }

    /// Moves time forward to `until` once nothing more is due before it.
    pub fn settle(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }
}
