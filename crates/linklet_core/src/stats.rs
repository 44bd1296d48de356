use crate::link::{LinkStats, StatsOutcome};
use crate::validate::is_short_code;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StatsStatus {
    #[default]
    Idle,
    Loading,
    Loaded(LinkStats),
    NotFound,
    Failed(String),
}

/// State of the per-link detail view.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatsState {
    code: Option<String>,
    status: StatsStatus,
}

impl StatsState {
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    pub fn status(&self) -> &StatsStatus {
        &self.status
    }

    /// Switches the view to `code`; false for a code no link can have.
    pub(crate) fn request(&mut self, code: &str) -> bool {
        if !is_short_code(code) {
            return false;
        }
        self.code = Some(code.to_string());
        self.status = StatsStatus::Loading;
        true
    }

    /// Applies a lookup result; results for another code are dropped.
    pub(crate) fn apply(&mut self, code: &str, outcome: StatsOutcome) -> bool {
        if self.code.as_deref() != Some(code) {
            return false;
        }
        self.status = match outcome {
            StatsOutcome::Found(stats) => StatsStatus::Loaded(stats),
            StatsOutcome::NotFound => StatsStatus::NotFound,
            StatsOutcome::Failed(message) => StatsStatus::Failed(message),
        };
        true
    }
}
