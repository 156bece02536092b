use crate::status::types::{ExtendedStatus, JobRecord, JobStatus, StatusThresholds};

/// Refine a raw status with the heartbeat age, using the default thresholds.
///
/// A running job silent for over an hour is `LOST`, over five minutes
/// `MAYBE_LOST`. A completed job with a non-zero exit code is `FAILED`.
/// Anything else passes through unchanged.
pub fn derive_extended_status(
    status: &JobStatus,
    exit_code: Option<i64>,
    age_seconds: u64,
) -> ExtendedStatus {
    derive_extended_status_with(&StatusThresholds::default(), status, exit_code, age_seconds)
}

/// Refine a raw status with the heartbeat age against explicit thresholds.
pub fn derive_extended_status_with(
    thresholds: &StatusThresholds,
    status: &JobStatus,
    exit_code: Option<i64>,
    age_seconds: u64,
) -> ExtendedStatus {
    match status {
        JobStatus::Running if age_seconds > thresholds.lost_after_secs => ExtendedStatus::Lost,
        JobStatus::Running if age_seconds > thresholds.maybe_lost_after_secs => {
            ExtendedStatus::MaybeLost
        }
        JobStatus::Completed if exit_code.is_some_and(|code| code != 0) => {
            ExtendedStatus::Reported(JobStatus::Failed)
        }
        other => ExtendedStatus::Reported(other.clone()),
    }
}

/// Map an extended status to a badge color class.
///
/// `fallback_class` is used for everything that is not running, suspect or
/// failed, e.g. `"success"` for finished jobs.
pub fn classify_color<'a>(status: &ExtendedStatus, fallback_class: &'a str) -> &'a str {
    match status {
        ExtendedStatus::Reported(JobStatus::Running) => "primary",
        ExtendedStatus::MaybeLost => "warning",
        ExtendedStatus::Reported(JobStatus::Failed) | ExtendedStatus::Lost => "danger",
        _ => fallback_class,
    }
}

/// Badge class for a record whose heartbeat is `age_seconds` old.
pub fn status_to_badge_class<'a>(
    record: &JobRecord,
    age_seconds: u64,
    complete_class: &'a str,
) -> &'a str {
    let status = derive_extended_status(&record.status, record.exit_code, age_seconds);
    classify_color(&status, complete_class)
}

impl JobRecord {
    pub fn extended_status(&self, age_seconds: u64) -> ExtendedStatus {
        derive_extended_status(&self.status, self.exit_code, age_seconds)
    }

    pub fn extended_status_with(
        &self,
        thresholds: &StatusThresholds,
        age_seconds: u64,
    ) -> ExtendedStatus {
        derive_extended_status_with(thresholds, &self.status, self.exit_code, age_seconds)
    }
}
