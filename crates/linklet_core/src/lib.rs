//! Linklet core: pure link-creation state machine, list cache and view models.
mod cache;
mod effect;
mod form;
mod link;
mod msg;
mod state;
mod stats;
mod update;
mod validate;
mod view_model;

pub use cache::LinkCache;
pub use effect::Effect;
pub use form::{Failure, FormPhase, FormState, GENERIC_CREATE_FAILURE, INVALID_INPUT_FALLBACK};
pub use link::{
    CreateLinkRequest, CreateLinkResult, CreatedLink, HealthReport, Link, LinkStats, LinkSummary,
    StatsOutcome, SubmissionId,
};
pub use msg::Msg;
pub use state::{AppState, HealthState, Notice, NoticeLevel};
pub use stats::{StatsState, StatsStatus};
pub use update::update;
pub use validate::{validate_custom_code, validate_url, CodeError, MAX_CUSTOM_CODE_LEN};
pub use view_model::{
    short_url_for, truncate_url, AppViewModel, FormView, LinkListView, LinkRowView, StatsView,
    URL_DISPLAY_LIMIT,
};
