use std::fmt;

use serde::{Deserialize, Serialize};

/// Raw status as reported by the experiment backend.
///
/// Unknown values are kept verbatim so that newer backends still render.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum JobStatus {
    Running,
    Completed,
    Failed,
    Other(String),
}

impl JobStatus {
    pub fn as_str(&self) -> &str {
        match self {
            JobStatus::Running => "RUNNING",
            JobStatus::Completed => "COMPLETED",
            JobStatus::Failed => "FAILED",
            JobStatus::Other(raw) => raw,
        }
    }
}

impl From<&str> for JobStatus {
    fn from(raw: &str) -> Self {
        match raw {
            "RUNNING" => JobStatus::Running,
            "COMPLETED" => JobStatus::Completed,
            "FAILED" => JobStatus::Failed,
            other => JobStatus::Other(other.to_string()),
        }
    }
}

impl From<String> for JobStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "RUNNING" | "COMPLETED" | "FAILED" => JobStatus::from(raw.as_str()),
            _ => JobStatus::Other(raw),
        }
    }
}

impl From<JobStatus> for String {
    fn from(status: JobStatus) -> Self {
        match status {
            JobStatus::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status refined with heartbeat age and exit code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub enum ExtendedStatus {
    /// The backend status, passed through (or `FAILED` for a non-zero exit).
    Reported(JobStatus),
    /// Running, but no heartbeat for a while.
    MaybeLost,
    /// Running, but silent long enough to be presumed dead.
    Lost,
}

impl ExtendedStatus {
    pub fn as_str(&self) -> &str {
        match self {
            ExtendedStatus::Reported(status) => status.as_str(),
            ExtendedStatus::MaybeLost => "MAYBE_LOST",
            ExtendedStatus::Lost => "LOST",
        }
    }

    /// Text shown on the dashboard badge.
    pub fn label(&self) -> &str {
        match self {
            ExtendedStatus::MaybeLost => "Maybe LOST",
            other => other.as_str(),
        }
    }
}

impl From<ExtendedStatus> for String {
    fn from(status: ExtendedStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for ExtendedStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The part of an experiment document the classifier looks at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    pub status: JobStatus,
    #[serde(default)]
    pub exit_code: Option<i64>,
}

impl JobRecord {
    pub fn new(status: impl Into<JobStatus>, exit_code: Option<i64>) -> Self {
        Self {
            status: status.into(),
            exit_code,
        }
    }
}

/// Heartbeat ages (in seconds) after which a running job is suspect.
///
/// Both comparisons are strict: a job exactly `lost_after_secs` old is still
/// only maybe lost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusThresholds {
    pub maybe_lost_after_secs: u64,
    pub lost_after_secs: u64,
}

impl Default for StatusThresholds {
    fn default() -> Self {
        Self {
            maybe_lost_after_secs: 300,
            lost_after_secs: 3600,
        }
    }
}

/// Per-page counts of extended statuses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatusSummary {
    pub total_count: usize,
    pub running_count: usize,
    pub maybe_lost_count: usize,
    pub lost_count: usize,
    pub failed_count: usize,
    pub completed_count: usize,
    pub other_count: usize,
}

impl StatusSummary {
    pub fn from_statuses<'a, I>(statuses: I) -> Self
    where
        I: IntoIterator<Item = &'a ExtendedStatus>,
    {
        let mut summary = Self::default();
        for status in statuses {
            summary.total_count += 1;
            match status {
                ExtendedStatus::Reported(JobStatus::Running) => summary.running_count += 1,
                ExtendedStatus::MaybeLost => summary.maybe_lost_count += 1,
                ExtendedStatus::Lost => summary.lost_count += 1,
                ExtendedStatus::Reported(JobStatus::Failed) => summary.failed_count += 1,
                ExtendedStatus::Reported(JobStatus::Completed) => summary.completed_count += 1,
                ExtendedStatus::Reported(JobStatus::Other(_)) => summary.other_count += 1,
            }
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_status_serde_uses_backend_tokens() {
        let record: JobRecord =
            serde_json::from_str(r#"{"status": "RUNNING", "exit_code": null}"#).unwrap();
        assert_eq!(record.status, JobStatus::Running);
        assert_eq!(record.exit_code, None);

        let record: JobRecord = serde_json::from_str(r#"{"status": "QUEUED"}"#).unwrap();
        assert_eq!(record.status, JobStatus::Other("QUEUED".to_string()));

        let json = serde_json::to_string(&JobRecord::new("COMPLETED", Some(1))).unwrap();
        assert_eq!(json, r#"{"status":"COMPLETED","exit_code":1}"#);
    }

    #[test]
    fn test_extended_status_tokens_and_labels() {
        assert_eq!(ExtendedStatus::MaybeLost.to_string(), "MAYBE_LOST");
        assert_eq!(ExtendedStatus::MaybeLost.label(), "Maybe LOST");
        assert_eq!(ExtendedStatus::Lost.label(), "LOST");
        assert_eq!(
            ExtendedStatus::Reported(JobStatus::Other("QUEUED".to_string())).to_string(),
            "QUEUED"
        );
        assert_eq!(
            serde_json::to_string(&ExtendedStatus::Lost).unwrap(),
            r#""LOST""#
        );
    }

    #[test]
    fn test_summary_counts_each_bucket() {
        let statuses = vec![
            ExtendedStatus::Reported(JobStatus::Running),
            ExtendedStatus::Reported(JobStatus::Running),
            ExtendedStatus::MaybeLost,
            ExtendedStatus::Lost,
            ExtendedStatus::Reported(JobStatus::Failed),
            ExtendedStatus::Reported(JobStatus::Completed),
            ExtendedStatus::Reported(JobStatus::Other("QUEUED".to_string())),
        ];
        let summary = StatusSummary::from_statuses(&statuses);
        assert_eq!(summary.total_count, 7);
        assert_eq!(summary.running_count, 2);
        assert_eq!(summary.maybe_lost_count, 1);
        assert_eq!(summary.lost_count, 1);
        assert_eq!(summary.failed_count, 1);
        assert_eq!(summary.completed_count, 1);
        assert_eq!(summary.other_count, 1);
    }
}
