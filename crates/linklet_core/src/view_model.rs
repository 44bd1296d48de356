use chrono::{DateTime, Utc};

use crate::form::FormPhase;
use crate::link::LinkSummary;
use crate::state::{HealthState, Notice};
use crate::stats::StatsStatus;
use crate::validate::{CodeError, MAX_CUSTOM_CODE_LEN};
use crate::AppState;

/// Original URLs longer than this are shortened for list display.
pub const URL_DISPLAY_LIMIT: usize = 50;
const PREVIEW_PLACEHOLDER_CODE: &str = "docs";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub form: FormView,
    pub links: LinkListView,
    pub stats: StatsView,
    pub health: HealthState,
    pub notice: Option<Notice>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormView {
    pub url: String,
    pub custom_code: String,
    pub phase: FormPhase,
    pub submitting: bool,
    pub submit_enabled: bool,
    /// Live check of the custom code, refreshed on every keystroke.
    pub code_error: Option<CodeError>,
    pub code_length: usize,
    pub code_limit: usize,
    pub preview_short_url: String,
    pub created_short_url: Option<String>,
    pub error_message: Option<String>,
    pub existing_link: Option<LinkSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LinkListView {
    pub rows: Vec<LinkRowView>,
    pub loading: bool,
    pub stale: bool,
    pub error: Option<String>,
    pub generation: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRowView {
    pub id: String,
    pub short_code: String,
    pub short_url: String,
    pub original_url: String,
    pub display_url: String,
    pub total_clicks: u64,
    pub last_clicked: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub deleting: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatsView {
    pub code: Option<String>,
    pub short_url: Option<String>,
    pub status: StatsStatus,
}

impl AppViewModel {
    pub(crate) fn build(state: &AppState) -> Self {
        let base = state.short_link_base();
        let form = state.form();
        let (error_message, existing_link) = match form.phase() {
            FormPhase::Failed(failure) => (Some(failure.message().to_string()), None),
            FormPhase::DuplicateFound(existing) => (None, Some(existing.clone())),
            _ => (form.code_error().map(|err| err.message().to_string()), None),
        };
        let preview_code = match form.custom_code() {
            "" => PREVIEW_PLACEHOLDER_CODE,
            code => code,
        };

        let cache = state.links();
        let rows = cache
            .links()
            .iter()
            .map(|link| LinkRowView {
                id: link.id.clone(),
                short_code: link.short_code.clone(),
                short_url: short_url_for(base, &link.short_code),
                original_url: link.original_url.clone(),
                display_url: truncate_url(&link.original_url, URL_DISPLAY_LIMIT),
                total_clicks: link.total_clicks,
                last_clicked: link.last_clicked,
                created_at: link.created_at,
                deleting: cache.is_deleting(&link.short_code),
            })
            .collect();

        let stats = state.stats();

        Self {
            form: FormView {
                url: form.url().to_string(),
                custom_code: form.custom_code().to_string(),
                phase: form.phase().clone(),
                submitting: form.is_submitting(),
                submit_enabled: form.can_submit(),
                code_error: form.code_error(),
                code_length: form.custom_code().chars().count(),
                code_limit: MAX_CUSTOM_CODE_LEN,
                preview_short_url: short_url_for(base, preview_code),
                created_short_url: form.created_short_url().map(ToOwned::to_owned),
                error_message,
                existing_link,
            },
            links: LinkListView {
                rows,
                loading: cache.is_loading(),
                stale: cache.is_stale(),
                error: cache.last_error().map(ToOwned::to_owned),
                generation: cache.generation(),
            },
            stats: StatsView {
                code: stats.code().map(ToOwned::to_owned),
                short_url: stats.code().map(|code| short_url_for(base, code)),
                status: stats.status().clone(),
            },
            health: state.health.clone(),
            notice: state.notice.clone(),
        }
    }
}

/// Display URL of `code` under the redirect-serving root.
pub fn short_url_for(base: &str, code: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), code)
}

/// Cuts `url` to `max_chars` characters and marks the cut with `...`.
pub fn truncate_url(url: &str, max_chars: usize) -> String {
    match url.char_indices().nth(max_chars) {
        Some((end, _)) => format!("{}...", &url[..end]),
        None => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::{short_url_for, truncate_url};

    #[test]
    fn short_urls_join_without_double_slash() {
        assert_eq!(short_url_for("https://x/", "abc"), "https://x/abc");
        assert_eq!(short_url_for("https://x", "abc"), "https://x/abc");
    }

    #[test]
    fn truncation_keeps_short_urls() {
        assert_eq!(truncate_url("https://a.example", 50), "https://a.example");
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let url = format!("https://example.com/{}", "é".repeat(60));
        let cut = truncate_url(&url, 50);
        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), 53);
    }
}
