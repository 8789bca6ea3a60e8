use std::future::Future;
use std::time::Duration;

use chrono::Utc;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use crate::config::BotConfig;
use crate::error::{FailureKind, PollError};
use crate::notify::{MessageChannel, Notifier};
use crate::poller::{CycleOutcome, CycleReport, Detection, PollState, Stage};
use crate::practicum::{StatusSource, parse_status, validate_response};

/// Loop behaviour knobs, taken from [`BotConfig`].
#[derive(Debug, Clone)]
pub struct PollSettings {
    pub retry_period: Duration,
    pub advance_from_date: bool,
    pub suppress_repeated_errors: bool,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self::from(&BotConfig::default())
    }
}

impl From<&BotConfig> for PollSettings {
    fn from(config: &BotConfig) -> Self {
        Self {
            retry_period: config.retry_period(),
            advance_from_date: config.advance_from_date,
            suppress_repeated_errors: config.suppress_repeated_errors,
        }
    }
}

/// Text of the alert sent when a cycle fails.
pub fn failure_alert(error: &PollError) -> String {
    format!("Сбой в работе программы: {error}.")
}

/// Drives the fetch → validate → interpret → detect → notify cycle.
pub struct Scheduler<S, C> {
    source: S,
    notifier: Notifier<C>,
    settings: PollSettings,
}

impl<S: StatusSource, C: MessageChannel> Scheduler<S, C> {
    pub fn new(source: S, notifier: Notifier<C>, settings: PollSettings) -> Self {
        Self {
            source,
            notifier,
            settings,
        }
    }

    /// Runs cycles separated by the fixed retry period until `shutdown`
    /// resolves. Shutdown is honoured while sleeping and mid-cycle; in the
    /// latter case the in-flight request is dropped.
    pub async fn run<F>(&self, state: &mut PollState, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        info!(
            from_date = state.from_date,
            retry_period_secs = self.settings.retry_period.as_secs(),
            "Polling started"
        );

        loop {
            tokio::select! {
                report = self.run_cycle(state) => {
                    info!(
                        outcome = %report.outcome,
                        duration_ms = report.duration_ms(),
                        "Cycle finished"
                    );
                }
                () = &mut shutdown => {
                    info!("Shutdown requested during poll cycle");
                    return;
                }
            }

            debug!(stage = %Stage::Sleeping, secs = self.settings.retry_period.as_secs(), "Sleeping");
            tokio::select! {
                () = sleep(self.settings.retry_period) => {}
                () = &mut shutdown => {
                    info!("Shutdown requested");
                    return;
                }
            }
        }
    }

    /// Runs exactly one cycle. Never fails: stage errors are alerted and
    /// reported as [`CycleOutcome::Failed`].
    pub async fn run_cycle(&self, state: &mut PollState) -> CycleReport {
        let started_at = Utc::now();
        let from_date = state.from_date;
        let mut stages = Vec::new();

        let outcome = match self.poll(state, &mut stages).await {
            // An empty homework list leaves the state untouched.
            Ok(CycleOutcome::NoUpdates) => CycleOutcome::NoUpdates,
            Ok(outcome) => {
                if state.record_success() {
                    info!("Polling recovered after previous failure");
                }
                outcome
            }
            Err(error) => self.report_failure(state, error).await,
        };

        CycleReport {
            from_date,
            stages,
            outcome,
            started_at,
            finished_at: Utc::now(),
        }
    }

    async fn poll(
        &self,
        state: &mut PollState,
        stages: &mut Vec<Stage>,
    ) -> Result<CycleOutcome, PollError> {
        stages.push(Stage::Fetching);
        let raw = self.source.fetch(state.from_date).await?;

        stages.push(Stage::Validating);
        let response = validate_response(raw)?;

        stages.push(Stage::Interpreting);
        let message = response.latest().map(parse_status).transpose()?;

        stages.push(Stage::Detecting);
        let outcome = match state.detect(message) {
            Detection::Notify(message) => {
                stages.push(Stage::Notifying);
                let delivery = self.notifier.deliver(&message).await;
                info!(?delivery, "Homework status changed");
                state.record_delivery(message.clone());
                CycleOutcome::Notified { message, delivery }
            }
            Detection::Unchanged => {
                debug!("Homework status unchanged");
                CycleOutcome::Unchanged
            }
            Detection::Absent => {
                debug!("No new homework statuses in the API response");
                return Ok(CycleOutcome::NoUpdates);
            }
        };

        if self.settings.advance_from_date
            && let Some(current_date) = response.current_date
        {
            state.advance_to(current_date);
        }

        Ok(outcome)
    }

    async fn report_failure(&self, state: &mut PollState, error: PollError) -> CycleOutcome {
        let alert = failure_alert(&error);
        match error.kind() {
            FailureKind::Remote => warn!(kind = %error.kind(), error = %error, "Poll cycle failed"),
            FailureKind::Contract => error!(kind = %error.kind(), error = %error, "Poll cycle failed"),
        }

        let repeated = state.record_failure(&alert);
        let alert = if repeated && self.settings.suppress_repeated_errors {
            debug!("Same failure as previous cycle, alert suppressed");
            None
        } else {
            Some(self.notifier.deliver(&alert).await)
        };

        CycleOutcome::Failed { error, alert }
    }
}
