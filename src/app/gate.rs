//! Apply-link gating state machine.
//!
//! Every posting detail mount owns one [`ApplyGate`]. The gate starts `Idle`;
//! a user request moves it to `Pending` and registers three timers: a progress
//! ticker, a status-phrase ticker and a one-shot deadline. When the deadline
//! fires the gate enters `Ready`, which is terminal for that mount.
//!
//! The gate never talks to a clock. It hands out [`TimerRequest`]s for the
//! runtime to schedule and reacts to [`TimerId`]s the runtime reports back.
//! Ids it does not own are ignored, so a timer that outlives its mount can never
//! touch a fresh gate.

use std::time::Duration;

/// Delay between the apply request and the link becoming available.
pub const APPLY_DELAY: Duration = Duration::from_secs(10);

/// Interval of the progress ticker.
pub const PROGRESS_INTERVAL: Duration = Duration::from_secs(1);

/// Percentage points added per progress tick.
pub const PROGRESS_STEP: u8 = 10;

pub const PROGRESS_MAX: u8 = 100;

/// Interval of the status-phrase ticker.
pub const PHRASE_INTERVAL: Duration = Duration::from_millis(2500);

/// Status phrases shown while pending, in rotation order.
pub const STATUS_PHRASES: [&str; 4] = [
    "Connecting to job portal...",
    "Verifying application link...",
    "Preparing your redirect...",
    "Almost ready...",
];

/// Handle to one scheduled callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

/// Monotonic [`TimerId`] allocator.
///
/// One allocator serves the whole application so ids stay unique across mounts.
#[derive(Debug, Default, Clone)]
pub struct TimerIds {
    next: u64,
}

impl TimerIds {
    pub fn allocate(&mut self) -> TimerId {
        self.next += 1;
        TimerId(self.next)
    }
}

/// A timer the gate asks the runtime to schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerRequest {
    pub id: TimerId,
    pub after: Duration,
    pub repeat: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GateState {
    #[default]
    Idle,
    Pending,
    Ready,
}

/// Outcome of delivering a timer to the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateTick {
    /// The id is not one of this gate's live timers.
    Ignored,

    /// Progress advanced to the contained percentage.
    Progressed(u8),

    /// Status phrase rotated to the contained index.
    Rotated(usize),

    /// The deadline elapsed. The listed tickers must be cancelled.
    Ready { cancel: Vec<TimerId> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct GateTimers {
    progress: TimerId,
    phrase: TimerId,
    deadline: TimerId,
}

impl GateTimers {
    const fn all(self) -> [TimerId; 3] {
        [self.progress, self.phrase, self.deadline]
    }
}

/// Per-mount apply gate.
///
/// # Examples
///
/// ```
/// use hirebox::app::gate::{ApplyGate, GateState, GateTick, TimerIds};
///
/// let mut ids = TimerIds::default();
/// let mut gate = ApplyGate::new();
/// let timers = gate.request(&mut ids);
/// assert_eq!(gate.state(), GateState::Pending);
/// assert_eq!(gate.progress(), 0);
///
/// // Deadline is registered last.
/// let deadline = timers[2].id;
/// assert!(matches!(gate.on_timer(deadline), GateTick::Ready { .. }));
/// assert_eq!(gate.progress(), 100);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ApplyGate {
    state: GateState,
    progress: u8,
    phrase_index: usize,
    timers: Option<GateTimers>,
}

impl ApplyGate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn state(&self) -> GateState {
        self.state
    }

    /// Completion percentage, 0 through 100.
    #[must_use]
    pub const fn progress(&self) -> u8 {
        self.progress
    }

    /// Current status phrase.
    #[must_use]
    pub const fn status(&self) -> &'static str {
        STATUS_PHRASES[self.phrase_index % STATUS_PHRASES.len()]
    }

    #[must_use]
    pub const fn is_ready(&self) -> bool {
        matches!(self.state, GateState::Ready)
    }

    /// Timers that are still scheduled on behalf of this gate.
    #[must_use]
    pub fn live_timers(&self) -> Vec<TimerId> {
        self.timers.map(|t| t.all().to_vec()).unwrap_or_default()
    }

    /// Starts the delay.
    ///
    /// Only `Idle` gates react; the returned requests are, in order, the
    /// progress ticker, the phrase ticker and the deadline. From any other
    /// state nothing is returned.
    pub fn request(&mut self, ids: &mut TimerIds) -> Vec<TimerRequest> {
        if self.state != GateState::Idle {
            tracing::debug!(state = ?self.state, "apply already requested");
            return vec![];
        }

        let timers = GateTimers {
            progress: ids.allocate(),
            phrase: ids.allocate(),
            deadline: ids.allocate(),
        };
        self.state = GateState::Pending;
        self.progress = 0;
        self.phrase_index = 0;
        self.timers = Some(timers);

        tracing::debug!(?timers, "apply gate pending");

        vec![
            TimerRequest { id: timers.progress, after: PROGRESS_INTERVAL, repeat: true },
            TimerRequest { id: timers.phrase, after: PHRASE_INTERVAL, repeat: true },
            TimerRequest { id: timers.deadline, after: APPLY_DELAY, repeat: false },
        ]
    }

    /// Applies a fired timer.
    pub fn on_timer(&mut self, id: TimerId) -> GateTick {
        let Some(timers) = self.timers else {
            return GateTick::Ignored;
        };

        if id == timers.progress {
            self.progress = self.progress.saturating_add(PROGRESS_STEP).min(PROGRESS_MAX);
            GateTick::Progressed(self.progress)
        } else if id == timers.phrase {
            self.phrase_index = (self.phrase_index + 1) % STATUS_PHRASES.len();
            GateTick::Rotated(self.phrase_index)
        } else if id == timers.deadline {
            self.progress = PROGRESS_MAX;
            self.state = GateState::Ready;
            self.timers = None;
            tracing::debug!("apply gate ready");
            GateTick::Ready { cancel: vec![timers.progress, timers.phrase] }
        } else {
            GateTick::Ignored
        }
    }

    /// Releases every live timer. Returns the ids to cancel.
    ///
    /// After teardown the gate ignores all timer ids.
    pub fn teardown(&mut self) -> Vec<TimerId> {
        let live = self.live_timers();
        self.timers = None;
        live
    }
}
