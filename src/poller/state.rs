use std::fmt;

/// Stages of one poll cycle.
///
/// Each cycle flows through: FETCHING → VALIDATING → INTERPRETING → DETECTING
/// → (NOTIFYING) → SLEEPING. A failure at any stage jumps straight to SLEEPING
/// after the alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Fetching,
    Validating,
    Interpreting,
    Detecting,
    Notifying,
    Sleeping,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Fetching => write!(f, "FETCHING"),
            Stage::Validating => write!(f, "VALIDATING"),
            Stage::Interpreting => write!(f, "INTERPRETING"),
            Stage::Detecting => write!(f, "DETECTING"),
            Stage::Notifying => write!(f, "NOTIFYING"),
            Stage::Sleeping => write!(f, "SLEEPING"),
        }
    }
}

/// What the change detector decided for the current cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Detection {
    /// A message exists and differs from the last delivered one.
    Notify(String),
    /// Same text as the last delivered message.
    Unchanged,
    /// The API reported no homeworks since `from_date`.
    Absent,
}

/// Everything the poll loop remembers between cycles. Lives in memory only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollState {
    /// Lower bound (Unix seconds) passed to the API as `from_date`.
    pub from_date: i64,
    /// Text of the last status message a delivery was attempted for.
    pub last_delivered: Option<String>,
    /// Alert text of the last failed cycle, cleared by a successful one.
    pub last_error: Option<String>,
}

impl PollState {
    pub fn new(from_date: i64) -> Self {
        Self {
            from_date: from_date.max(0),
            last_delivered: None,
            last_error: None,
        }
    }

    /// Compares by exact text, so two homeworks rendering the same message
    /// are treated as unchanged.
    pub fn detect(&self, message: Option<String>) -> Detection {
        match message {
            None => Detection::Absent,
            Some(m) if self.last_delivered.as_deref() == Some(m.as_str()) => Detection::Unchanged,
            Some(m) => Detection::Notify(m),
        }
    }

    /// Called once a delivery has been attempted, whatever its result.
    pub fn record_delivery(&mut self, message: String) {
        self.last_delivered = Some(message);
    }

    /// Stores the alert text. Returns `true` if it repeats the previous failure.
    pub fn record_failure(&mut self, alert: &str) -> bool {
        let repeated = self.last_error.as_deref() == Some(alert);
        self.last_error = Some(alert.to_string());
        repeated
    }

    /// Clears the last failure. Returns `true` if there was one.
    pub fn record_success(&mut self) -> bool {
        self.last_error.take().is_some()
    }

    /// Moves `from_date` forward. Never moves it back.
    pub fn advance_to(&mut self, current_date: i64) {
        if current_date > self.from_date {
            self.from_date = current_date;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_state_is_empty() {
        let state = PollState::new(1_700_000_000);
        assert_eq!(state.from_date, 1_700_000_000);
        assert!(state.last_delivered.is_none());
        assert!(state.last_error.is_none());
    }

    #[test]
    fn negative_from_date_is_clamped() {
        assert_eq!(PollState::new(-5).from_date, 0);
    }

    #[test]
    fn detect_new_message() {
        let state = PollState::new(0);
        assert_eq!(
            state.detect(Some("a".into())),
            Detection::Notify("a".into())
        );
    }

    #[test]
    fn detect_suppresses_same_text() {
        let mut state = PollState::new(0);
        state.record_delivery("a".into());
        assert_eq!(state.detect(Some("a".into())), Detection::Unchanged);
        assert_eq!(state.detect(Some("b".into())), Detection::Notify("b".into()));
    }

    #[test]
    fn detect_absent_message() {
        let mut state = PollState::new(0);
        state.record_delivery("a".into());
        assert_eq!(state.detect(None), Detection::Absent);
    }

    #[test]
    fn failure_bookkeeping() {
        let mut state = PollState::new(0);
        assert!(!state.record_failure("boom"));
        assert!(state.record_failure("boom"));
        assert!(!state.record_failure("bang"));
        assert!(state.record_success());
        assert!(!state.record_success());
        assert!(state.last_error.is_none());
    }

    #[test]
    fn advance_is_monotonic() {
        let mut state = PollState::new(100);
        state.advance_to(50);
        assert_eq!(state.from_date, 100);
        state.advance_to(200);
        assert_eq!(state.from_date, 200);
    }

    #[test]
    fn stage_display() {
        assert_eq!(Stage::Fetching.to_string(), "FETCHING");
        assert_eq!(Stage::Interpreting.to_string(), "INTERPRETING");
        assert_eq!(Stage::Notifying.to_string(), "NOTIFYING");
        assert_eq!(Stage::Sleeping.to_string(), "SLEEPING");
    }
}
