use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// How often a live label recomputes itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cadence {
    EverySecond,
    EveryMinute,
    EveryHour,
}

impl Cadence {
    /// Refresh cadence for a label `age_seconds` old. `None` once the label
    /// has switched to an absolute date and no longer changes.
    pub fn for_age(age_seconds: u64) -> Option<Cadence> {
        match age_seconds {
            0..=61 => Some(Cadence::EverySecond),
            62..=3660 => Some(Cadence::EveryMinute),
            3661..=90_000 => Some(Cadence::EveryHour),
            _ => None,
        }
    }

    pub fn seconds(self) -> u64 {
        match self {
            Cadence::EverySecond => 1,
            Cadence::EveryMinute => 60,
            Cadence::EveryHour => 3600,
        }
    }

    pub fn period(self) -> Duration {
        Duration::from_secs(self.seconds())
    }
}

impl fmt::Display for Cadence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.seconds())
    }
}

/// Opaque handle for an interval started on a [`TimerDriver`](super::TimerDriver).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub(crate) u64);

/// Handle returned by `add_watcher`, used to unregister.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WatcherId(pub(crate) u64);

/// Whether a label currently has an interval running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    Idle,
    Scheduled { cadence: Cadence, timer: TimerId },
}

impl TimerState {
    pub fn cadence(&self) -> Option<Cadence> {
        match self {
            TimerState::Idle => None,
            TimerState::Scheduled { cadence, .. } => Some(*cadence),
        }
    }
}

/// What has to happen to the interval after a recompute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerTransition {
    /// Cadence unchanged: leave the running interval (or lack of one) alone.
    Keep,
    /// Stop the running interval and schedule nothing.
    Cancel,
    /// Nothing running yet: start an interval.
    Start(Cadence),
    /// Stop the running interval and start one at a new cadence.
    Restart(Cadence),
}

/// Decide the timer transition from the current and required cadence.
pub fn plan_transition(current: Option<Cadence>, required: Option<Cadence>) -> TimerTransition {
    match (current, required) {
        (current, required) if current == required => TimerTransition::Keep,
        (Some(_), None) => TimerTransition::Cancel,
        (None, Some(cadence)) => TimerTransition::Start(cadence),
        (Some(_), Some(cadence)) => TimerTransition::Restart(cadence),
        (None, None) => TimerTransition::Keep,
    }
}
