use std::fmt;
use std::time::{Duration, Instant};

// ---------------------------------------------------------------------------
// RefreshInterval – the user-selectable refresh periods
// ---------------------------------------------------------------------------

/// How often the current image is reloaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RefreshInterval {
    OneMinute,
    TwoMinutes,
    #[default]
    FiveMinutes,
    TenMinutes,
}

impl RefreshInterval {
    /// Dropdown order.
    pub const ALL: [RefreshInterval; 4] = [
        RefreshInterval::OneMinute,
        RefreshInterval::TwoMinutes,
        RefreshInterval::FiveMinutes,
        RefreshInterval::TenMinutes,
    ];

    pub fn minutes(self) -> u64 {
        match self {
            RefreshInterval::OneMinute => 1,
            RefreshInterval::TwoMinutes => 2,
            RefreshInterval::FiveMinutes => 5,
            RefreshInterval::TenMinutes => 10,
        }
    }

    /// Parse a minute count; only the four offered values are accepted.
    pub fn from_minutes(minutes: u64) -> Option<Self> {
        Self::ALL.into_iter().find(|i| i.minutes() == minutes)
    }

    pub fn duration(self) -> Duration {
        Duration::from_millis(self.minutes() * 60_000)
    }
}

impl fmt::Display for RefreshInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.minutes() {
            1 => write!(f, "1 minute"),
            n => write!(f, "{n} minutes"),
        }
    }
}

// ---------------------------------------------------------------------------
// RefreshScheduler – self-renewing one-shot deadline
// ---------------------------------------------------------------------------

/// Holds the single pending refresh deadline.
///
/// This is a chain of one-shot timers, not a fixed-rate clock: each time the
/// deadline passes, the next one is counted from the moment it was observed,
/// using whichever interval is selected at that moment. Manual refreshes do
/// not touch it.
#[derive(Debug, Clone)]
pub struct RefreshScheduler {
    due: Instant,
}

impl RefreshScheduler {
    /// Arm the first deadline.
    pub fn start(now: Instant, interval: RefreshInterval) -> Self {
        Self {
            due: now + interval.duration(),
        }
    }

    /// Replace the pending deadline with `now + interval`.
    pub fn schedule_next(&mut self, now: Instant, interval: RefreshInterval) -> Instant {
        self.due = now + interval.duration();
        self.due
    }

    /// Returns `true` when the deadline has passed, after re-arming it with
    /// `current`. The caller then reloads the selected image.
    pub fn poll(&mut self, now: Instant, current: RefreshInterval) -> bool {
        if now < self.due {
            return false;
        }
        let next = self.schedule_next(now, current);
        log::debug!(
            "Scheduled refresh fired; next in {current} ({:?} from now)",
            next - now
        );
        true
    }

    /// Time left until the pending deadline (zero when overdue).
    pub fn remaining(&self, now: Instant) -> Duration {
        self.due.saturating_duration_since(now)
    }

    #[cfg(test)]
    pub fn due_at(&self) -> Instant {
        self.due
    }
}
