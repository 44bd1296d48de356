use crate::link::{CreateLinkResult, HealthReport, Link, StatsOutcome, SubmissionId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the long URL field.
    UrlChanged(String),
    /// User edited the optional custom code field.
    CustomCodeChanged(String),
    /// User submitted the creation form.
    SubmitClicked,
    /// Service answered a creation request.
    CreateFinished {
        submission: SubmissionId,
        result: CreateLinkResult,
    },
    /// User chose to adopt the link offered by a duplicate-URL conflict.
    UseExistingClicked,
    /// A view wants the link list; served from cache unless stale.
    LinksRequested,
    /// User asked for a fresh copy of the list.
    RefreshClicked,
    /// Service answered a list request.
    LinksLoaded {
        generation: u64,
        result: Result<Vec<Link>, String>,
    },
    DeleteClicked(String),
    /// Service answered a delete; an already-absent code counts as deleted.
    DeleteFinished {
        code: String,
        result: Result<(), String>,
    },
    /// Detail view opened for a code.
    StatsRequested(String),
    StatsLoaded {
        code: String,
        outcome: StatsOutcome,
    },
    HealthRequested,
    HealthChecked(Result<HealthReport, String>),
    NoticeDismissed,
    /// Re-render request that changes nothing, e.g. a blank input line.
    NoOp,
}
