pub mod operations;
pub mod types;

// Re-export commonly used types
pub use operations::{
    classify_color, derive_extended_status, derive_extended_status_with, status_to_badge_class,
};
pub use types::{ExtendedStatus, JobRecord, JobStatus, StatusSummary, StatusThresholds};
