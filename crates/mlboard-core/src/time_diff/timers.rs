use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use tracing::debug;

use crate::time_diff::clock::{Clock, ManualClock};
use crate::time_diff::types::TimerId;

/// Host event-loop timers, as seen by a live label.
///
/// Implementations must not invoke a tick from inside `start_interval` or
/// `cancel`; ticks are only delivered from the host loop.
pub trait TimerDriver {
    /// Call `tick` every `period` until cancelled.
    fn start_interval(&self, period: Duration, tick: Box<dyn FnMut()>) -> TimerId;

    /// Stop an interval. Unknown or already cancelled ids are ignored.
    fn cancel(&self, timer: TimerId);
}

const MIN_PERIOD: Duration = Duration::from_millis(1);
const MAX_PERIOD: Duration = Duration::from_secs(366 * 86_400);

struct Interval {
    due: DateTime<Utc>,
    period: TimeDelta,
    /// Taken out while the tick runs.
    tick: Option<Box<dyn FnMut()>>,
}

/// Single-threaded interval queue driven by a [`Clock`].
///
/// Ticks run from [`fire_due`](Self::fire_due), [`advance`](Self::advance) or
/// [`run_blocking`](Self::run_blocking), never re-entrantly, so a tick may
/// freely start or cancel intervals (including its own).
pub struct TimerQueue {
    clock: Rc<dyn Clock>,
    intervals: RefCell<BTreeMap<TimerId, Interval>>,
    next_id: Cell<u64>,
}

impl TimerQueue {
    pub fn new(clock: Rc<dyn Clock>) -> Self {
        Self {
            clock,
            intervals: RefCell::new(BTreeMap::new()),
            next_id: Cell::new(1),
        }
    }

    /// Number of live intervals.
    pub fn len(&self) -> usize {
        self.intervals.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.borrow().is_empty()
    }

    /// Earliest deadline among live intervals.
    pub fn next_due(&self) -> Option<DateTime<Utc>> {
        self.intervals.borrow().values().map(|i| i.due).min()
    }

    /// Run every interval whose deadline has passed, earliest first, once.
    ///
    /// Overdue intervals are not replayed: the next deadline is pushed at
    /// least one period past now. Returns the number of ticks run.
    pub fn fire_due(&self) -> usize {
        let now = self.clock.now();
        let mut due: Vec<(DateTime<Utc>, TimerId)> = self
            .intervals
            .borrow()
            .iter()
            .filter(|(_, interval)| interval.due <= now)
            .map(|(id, interval)| (interval.due, *id))
            .collect();
        due.sort();

        let mut fired = 0;
        for (_, id) in due {
            let tick = {
                let mut intervals = self.intervals.borrow_mut();
                // An earlier tick in this round may have cancelled it.
                let Some(interval) = intervals.get_mut(&id) else {
                    continue;
                };
                let mut next = after(interval.due, interval.period);
                if next <= now {
                    next = after(now, interval.period);
                }
                interval.due = next;
                interval.tick.take()
            };
            let Some(mut tick) = tick else {
                continue;
            };

            tick();
            fired += 1;

            if let Some(interval) = self.intervals.borrow_mut().get_mut(&id) {
                interval.tick = Some(tick);
            }
        }
        fired
    }

    /// Move virtual time forward by `by`, stopping at each deadline on the
    /// way so every tick observes its own "now".
    ///
    /// `clock` must be the clock this queue was built with.
    pub fn advance(&self, clock: &ManualClock, by: TimeDelta) -> usize {
        let target = clock.now() + by;
        let mut fired = 0;
        while let Some(due) = self.next_due().filter(|due| *due <= target) {
            if due > clock.now() {
                clock.set(due);
            }
            fired += self.fire_due();
        }
        clock.set(target);
        fired
    }

    /// Sleep on the current thread between deadlines, firing ticks, until
    /// `should_stop` returns true or no interval is left.
    pub fn run_blocking(&self, mut should_stop: impl FnMut() -> bool) -> usize {
        let mut fired = 0;
        while !should_stop() {
            let Some(due) = self.next_due() else {
                break;
            };
            let wait = due
                .signed_duration_since(self.clock.now())
                .to_std()
                .unwrap_or(Duration::ZERO);
            if !wait.is_zero() {
                std::thread::sleep(wait);
            }
            fired += self.fire_due();
        }
        fired
    }
}

impl TimerDriver for TimerQueue {
    fn start_interval(&self, period: Duration, tick: Box<dyn FnMut()>) -> TimerId {
        let id = TimerId(self.next_id.get());
        self.next_id.set(id.0 + 1);

        let period = period.clamp(MIN_PERIOD, MAX_PERIOD);
        let period = TimeDelta::from_std(period).unwrap_or_else(|_| TimeDelta::seconds(1));
        let due = after(self.clock.now(), period);
        self.intervals.borrow_mut().insert(
            id,
            Interval {
                due,
                period,
                tick: Some(tick),
            },
        );

        debug!(
            event = "core.timers.interval_started",
            timer_id = id.0,
            period_ms = period.num_milliseconds(),
        );
        id
    }

    fn cancel(&self, timer: TimerId) {
        if self.intervals.borrow_mut().remove(&timer).is_some() {
            debug!(event = "core.timers.interval_cancelled", timer_id = timer.0);
        }
    }
}

fn after(at: DateTime<Utc>, period: TimeDelta) -> DateTime<Utc> {
    at.checked_add_signed(period)
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}
