//! Self-refreshing "time ago" labels.
//!
//! A [`LiveLabel`] owns one target timestamp. Every recompute derives the
//! label text and age from a single reading of the clock, picks a refresh
//! cadence proportional to the age, swaps its interval when the cadence
//! changes, and then notifies watchers in registration order.

use std::cell::RefCell;
use std::rc::Rc;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::datetime::timestamp_to_datetime;
use crate::time_diff::clock::Clock;
use crate::time_diff::text::{age_seconds, label_text};
use crate::time_diff::timers::TimerDriver;
use crate::time_diff::types::{
    Cadence, TimerState, TimerTransition, WatcherId, plan_transition,
};

type Watcher = Rc<dyn Fn(&str, u64)>;

struct LabelState {
    target: Option<DateTime<Utc>>,
    text: String,
    age_seconds: u64,
    timer: TimerState,
    destroyed: bool,
    watchers: Vec<(WatcherId, Watcher)>,
    next_watcher_id: u64,
}

struct Shared {
    clock: Rc<dyn Clock>,
    timers: Rc<dyn TimerDriver>,
    date_format: Option<String>,
    state: RefCell<LabelState>,
}

impl Shared {
    fn recompute(self: &Rc<Self>) {
        let now = self.clock.now();

        let (text, age, watchers) = {
            let mut state = self.state.borrow_mut();
            if state.destroyed {
                return;
            }
            let Some(target) = state.target else {
                return;
            };

            let age = age_seconds(target, now);
            state.text = label_text(target, age, self.date_format.as_deref());
            state.age_seconds = age;
            self.reschedule(&mut state, Cadence::for_age(age));

            let watchers: Vec<Watcher> = state.watchers.iter().map(|(_, w)| w.clone()).collect();
            (state.text.clone(), age, watchers)
        };

        for watcher in watchers {
            // A watcher may destroy the label; nobody hears from it after that.
            if self.state.borrow().destroyed {
                break;
            }
            watcher(&text, age);
        }
    }

    fn reschedule(self: &Rc<Self>, state: &mut LabelState, required: Option<Cadence>) {
        let previous = state.timer.cadence();
        match plan_transition(previous, required) {
            TimerTransition::Keep => return,
            TimerTransition::Cancel => self.cancel_timer(state),
            TimerTransition::Start(cadence) | TimerTransition::Restart(cadence) => {
                self.cancel_timer(state);
                let timer = self.timers.start_interval(cadence.period(), self.tick());
                state.timer = TimerState::Scheduled { cadence, timer };
            }
        }

        debug!(
            event = "core.time_diff.cadence_changed",
            from = previous.map(Cadence::seconds),
            to = required.map(Cadence::seconds),
            age_seconds = state.age_seconds,
        );
    }

    fn cancel_timer(&self, state: &mut LabelState) {
        if let TimerState::Scheduled { timer, .. } = state.timer {
            self.timers.cancel(timer);
        }
        state.timer = TimerState::Idle;
    }

    fn tick(self: &Rc<Self>) -> Box<dyn FnMut()> {
        let shared = Rc::downgrade(self);
        Box::new(move || {
            if let Some(shared) = shared.upgrade() {
                shared.recompute();
            }
        })
    }
}

/// A label like "5 minutes ago" that keeps itself current.
///
/// Recomputes happen on [`set_timestamp`](Self::set_timestamp) and on the
/// label's own interval: every second while under about a minute old, every
/// minute up to about an hour, every hour up to about a day, and never after
/// that (the text is then an absolute date).
///
/// Dropping the label destroys it.
pub struct LiveLabel {
    shared: Rc<Shared>,
}

impl LiveLabel {
    pub fn new(clock: Rc<dyn Clock>, timers: Rc<dyn TimerDriver>) -> Self {
        Self::with_date_format(clock, timers, None)
    }

    /// Like [`new`](Self::new), with a chrono format string for labels a day
    /// or more old.
    pub fn with_date_format(
        clock: Rc<dyn Clock>,
        timers: Rc<dyn TimerDriver>,
        date_format: Option<String>,
    ) -> Self {
        Self {
            shared: Rc::new(Shared {
                clock,
                timers,
                date_format,
                state: RefCell::new(LabelState {
                    target: None,
                    text: String::new(),
                    age_seconds: 0,
                    timer: TimerState::Idle,
                    destroyed: false,
                    watchers: Vec::new(),
                    next_watcher_id: 1,
                }),
            }),
        }
    }

    /// Point the label at `epoch_seconds` and recompute immediately.
    ///
    /// Non-finite or unrepresentable timestamps are ignored.
    pub fn set_timestamp(&self, epoch_seconds: f64) {
        match timestamp_to_datetime(epoch_seconds) {
            Some(target) => self.set_target(target),
            None => warn!(
                event = "core.time_diff.timestamp_invalid",
                epoch_seconds = epoch_seconds,
                "Ignoring timestamp outside the representable range"
            ),
        }
    }

    /// Point the label at `target` and recompute immediately.
    pub fn set_target(&self, target: DateTime<Utc>) {
        {
            let mut state = self.shared.state.borrow_mut();
            if state.destroyed {
                debug!(event = "core.time_diff.set_after_destroy_ignored");
                return;
            }
            state.target = Some(target);
        }
        self.shared.recompute();
    }

    /// Recompute now, outside the regular cadence. No-op without a target.
    pub fn recompute(&self) {
        self.shared.recompute();
    }

    /// Register a callback receiving `(text, age_seconds)` on every
    /// recompute. It is not called right away.
    ///
    /// Watchers run synchronously and must not add or remove watchers on the
    /// same label.
    pub fn add_watcher<F>(&self, watcher: F) -> WatcherId
    where
        F: Fn(&str, u64) + 'static,
    {
        let mut state = self.shared.state.borrow_mut();
        let id = WatcherId(state.next_watcher_id);
        state.next_watcher_id += 1;
        state.watchers.push((id, Rc::new(watcher)));
        id
    }

    pub fn remove_watcher(&self, id: WatcherId) -> bool {
        let mut state = self.shared.state.borrow_mut();
        let before = state.watchers.len();
        state.watchers.retain(|(watcher_id, _)| *watcher_id != id);
        state.watchers.len() != before
    }

    /// Stop refreshing for good. Safe to call repeatedly and before any
    /// timestamp was set. Ticks already queued become no-ops.
    pub fn destroy(&self) {
        let mut state = self.shared.state.borrow_mut();
        if state.destroyed {
            return;
        }
        state.destroyed = true;
        self.shared.cancel_timer(&mut state);
        state.watchers.clear();

        debug!(
            event = "core.time_diff.destroyed",
            had_target = state.target.is_some(),
        );
    }

    pub fn text(&self) -> String {
        self.shared.state.borrow().text.clone()
    }

    pub fn age_seconds(&self) -> u64 {
        self.shared.state.borrow().age_seconds
    }

    pub fn target(&self) -> Option<DateTime<Utc>> {
        self.shared.state.borrow().target
    }

    pub fn cadence(&self) -> Option<Cadence> {
        self.shared.state.borrow().timer.cadence()
    }

    pub fn has_pending_timer(&self) -> bool {
        matches!(
            self.shared.state.borrow().timer,
            TimerState::Scheduled { .. }
        )
    }

    pub fn is_destroyed(&self) -> bool {
        self.shared.state.borrow().destroyed
    }
}

impl Drop for LiveLabel {
    fn drop(&mut self) {
        self.destroy();
    }
}
