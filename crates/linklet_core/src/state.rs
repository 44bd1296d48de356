use crate::cache::LinkCache;
use crate::form::FormState;
use crate::link::HealthReport;
use crate::stats::StatsState;
use crate::view_model::AppViewModel;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
    Warning,
}

/// A transient message for the user, replaced by the next one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
    pub detail: Option<String>,
}

impl Notice {
    pub fn new(level: NoticeLevel, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum HealthState {
    #[default]
    Unknown,
    Checking,
    Up(HealthReport),
    Down(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    pub(crate) form: FormState,
    pub(crate) links: LinkCache,
    pub(crate) stats: StatsState,
    pub(crate) health: HealthState,
    pub(crate) notice: Option<Notice>,
    short_link_base: String,
    dirty: bool,
}

impl AppState {
    /// `short_link_base` is the redirect-serving root used to display links.
    pub fn new(short_link_base: impl Into<String>) -> Self {
        Self {
            short_link_base: short_link_base.into().trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel::build(self)
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn links(&self) -> &LinkCache {
        &self.links
    }

    pub fn stats(&self) -> &StatsState {
        &self.stats
    }

    pub fn short_link_base(&self) -> &str {
        &self.short_link_base
    }

    /// Returns whether anything visible changed since the last call.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn notify(&mut self, notice: Notice) {
        self.notice = Some(notice);
        self.mark_dirty();
    }
}
