pub mod clock;
pub mod engine;
pub mod text;
pub mod timers;
pub mod types;

// Re-export commonly used types
pub use clock::{Clock, ManualClock, SystemClock};
pub use engine::LiveLabel;
pub use text::{age_seconds, label_text, relative_text};
pub use timers::{TimerDriver, TimerQueue};
pub use types::{Cadence, TimerId, TimerState, TimerTransition, WatcherId, plan_transition};
