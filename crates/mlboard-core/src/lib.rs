//! mlboard-core: Core library for the experiment dashboard
//!
//! Helpers every dashboard view leans on when showing long-running
//! experiments. It has no rendering, fetching or storage of its own.
//!
//! # Main Entry Points
//!
//! - [`time_diff`] - Self-refreshing "5 minutes ago" labels
//! - [`status`] - Extended status (silent-death detection) and badge colors
//! - [`duration`] - Compact elapsed/remaining time text
//! - [`structural`] - Structural equality to skip redundant re-renders
//! - [`settings`] - Typed dashboard preferences over a key-value store
//! - [`bus`] - Reload, loading-flag and error notifications
//! - [`config`] - Configuration management

pub mod bus;
pub mod config;
pub mod datetime;
pub mod duration;
pub mod errors;
pub mod events;
pub mod logging;
pub mod results;
pub mod settings;
pub mod status;
pub mod structural;
pub mod time_diff;

// Re-export commonly used types at crate root for convenience
pub use bus::{DashboardBus, ErrorNotice, SubscriptionId};
pub use config::MlboardConfig;
pub use datetime::{format_date_time, timestamp_to_datetime};
pub use duration::format_duration;
pub use results::ResultFilter;
pub use settings::{DashboardSettings, KeyValueStore, MemoryStore};
pub use status::{
    ExtendedStatus, JobRecord, JobStatus, StatusThresholds, classify_color,
    derive_extended_status, status_to_badge_class,
};
pub use structural::{ChangeGate, deep_equal};
pub use time_diff::{Cadence, Clock, LiveLabel, ManualClock, SystemClock, TimerQueue};

// Re-export logging initialization
pub use logging::init_logging;
