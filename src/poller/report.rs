use std::fmt;

use chrono::{DateTime, Utc};

use super::state::Stage;
use crate::error::PollError;
use crate::notify::Delivery;

/// How a single cycle ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// A new status message was handed to the notifier.
    Notified { message: String, delivery: Delivery },
    /// The latest status renders to the message already sent.
    Unchanged,
    /// The API reported no homeworks since `from_date`.
    NoUpdates,
    /// A stage failed. `alert` is `None` when a repeated alert was suppressed.
    Failed {
        error: PollError,
        alert: Option<Delivery>,
    },
}

impl CycleOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, CycleOutcome::Failed { .. })
    }
}

impl fmt::Display for CycleOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CycleOutcome::Notified {
                delivery: Delivery::Delivered,
                ..
            } => write!(f, "notified"),
            CycleOutcome::Notified {
                delivery: Delivery::Failed,
                ..
            } => write!(f, "notification failed"),
            CycleOutcome::Unchanged => write!(f, "unchanged"),
            CycleOutcome::NoUpdates => write!(f, "no updates"),
            CycleOutcome::Failed { error, .. } => write!(f, "failed ({})", error.kind()),
        }
    }
}

/// Summary of one cycle, produced by the scheduler.
#[derive(Debug, Clone)]
pub struct CycleReport {
    /// `from_date` the request was issued with.
    pub from_date: i64,
    pub stages: Vec<Stage>,
    pub outcome: CycleOutcome,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl CycleReport {
    pub fn duration_ms(&self) -> i64 {
        (self.finished_at - self.started_at).num_milliseconds()
    }

    /// The stage the cycle stopped in.
    pub fn last_stage(&self) -> Option<Stage> {
        self.stages.last().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_display() {
        assert_eq!(CycleOutcome::Unchanged.to_string(), "unchanged");
        assert_eq!(CycleOutcome::NoUpdates.to_string(), "no updates");
        assert_eq!(
            CycleOutcome::Notified {
                message: "m".into(),
                delivery: Delivery::Failed
            }
            .to_string(),
            "notification failed"
        );
        assert_eq!(
            CycleOutcome::Failed {
                error: PollError::UnexpectedStatusCode { code: 500 },
                alert: Some(Delivery::Delivered),
            }
            .to_string(),
            "failed (remote)"
        );
    }

    #[test]
    fn report_duration_and_last_stage() {
        let started_at = Utc::now();
        let report = CycleReport {
            from_date: 0,
            stages: vec![Stage::Fetching, Stage::Validating],
            outcome: CycleOutcome::Failed {
                error: PollError::InvalidResponseShape,
                alert: None,
            },
            started_at,
            finished_at: started_at + chrono::Duration::milliseconds(250),
        };
        assert_eq!(report.duration_ms(), 250);
        assert_eq!(report.last_stage(), Some(Stage::Validating));
        assert!(report.outcome.is_failure());
    }
}
