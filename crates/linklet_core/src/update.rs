use crate::form::{Finished, SubmitAttempt};
use crate::state::{HealthState, Notice, NoticeLevel};
use crate::validate::is_short_code;
use crate::{AppState, Effect, Msg};

const CREATED_NOTICE: &str = "Link created successfully!";
const DUPLICATE_NOTICE: &str = "This URL has already been shortened";
const DELETED_NOTICE: &str = "Link deleted successfully!";
const DELETE_FAILED_NOTICE: &str = "Failed to delete link";
const LOAD_FAILED_NOTICE: &str = "Failed to load links";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::UrlChanged(value) => {
            state.form.edit_url(value);
            state.mark_dirty();
            Vec::new()
        }
        Msg::CustomCodeChanged(value) => {
            state.form.edit_custom_code(value);
            state.mark_dirty();
            Vec::new()
        }
        Msg::SubmitClicked => match state.form.submit() {
            SubmitAttempt::Started {
                submission,
                request,
            } => {
                state.mark_dirty();
                vec![Effect::CreateLink {
                    submission,
                    request,
                }]
            }
            SubmitAttempt::Invalid(failure) => {
                state.notify(Notice::new(NoticeLevel::Error, failure.message()));
                Vec::new()
            }
            SubmitAttempt::Busy => Vec::new(),
        },
        Msg::CreateFinished { submission, result } => {
            match state.form.finish(submission, result) {
                // Stale result for a submission that is no longer pending.
                None => Vec::new(),
                Some(Finished::Created) => {
                    state.notify(Notice::new(NoticeLevel::Success, CREATED_NOTICE));
                    state.links.invalidate();
                    fetch_links(state.links.refresh_if_watched())
                }
                Some(Finished::Duplicate) => {
                    state.notify(Notice::new(NoticeLevel::Warning, DUPLICATE_NOTICE));
                    Vec::new()
                }
                Some(Finished::Failed(message)) => {
                    state.notify(Notice::new(NoticeLevel::Error, message));
                    Vec::new()
                }
            }
        }
        Msg::UseExistingClicked => {
            if state.form.adopt_existing() {
                state.notice = None;
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::LinksRequested => {
            let effects = fetch_links(state.links.read());
            if !effects.is_empty() {
                state.mark_dirty();
            }
            effects
        }
        Msg::RefreshClicked => {
            let effects = fetch_links(state.links.refresh());
            state.mark_dirty();
            effects
        }
        Msg::LinksLoaded { generation, result } => {
            let outdated = generation < state.links.generation();
            let failed = result.as_ref().err().cloned();
            let follow_up = state.links.apply_loaded(generation, result);
            match failed {
                Some(detail) if !outdated => state.notify(
                    Notice::new(NoticeLevel::Error, LOAD_FAILED_NOTICE).with_detail(detail),
                ),
                _ => state.mark_dirty(),
            }
            fetch_links(follow_up)
        }
        Msg::DeleteClicked(code) => {
            if !is_short_code(&code) || !state.links.begin_delete(&code) {
                Vec::new()
            } else {
                state.mark_dirty();
                vec![Effect::DeleteLink { code }]
            }
        }
        Msg::DeleteFinished { code, result } => {
            state.links.finish_delete(&code);
            match result {
                Ok(()) => {
                    state.notify(Notice::new(NoticeLevel::Success, DELETED_NOTICE));
                    state.links.invalidate();
                    fetch_links(state.links.refresh_if_watched())
                }
                Err(detail) => {
                    state.notify(
                        Notice::new(NoticeLevel::Error, DELETE_FAILED_NOTICE).with_detail(detail),
                    );
                    Vec::new()
                }
            }
        }
        Msg::StatsRequested(code) => {
            if state.stats.request(&code) {
                state.mark_dirty();
                vec![Effect::FetchStats { code }]
            } else {
                Vec::new()
            }
        }
        Msg::StatsLoaded { code, outcome } => {
            if state.stats.apply(&code, outcome) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::HealthRequested => {
            if state.health == HealthState::Checking {
                Vec::new()
            } else {
                state.health = HealthState::Checking;
                state.mark_dirty();
                vec![Effect::CheckHealth]
            }
        }
        Msg::HealthChecked(result) => {
            state.health = match result {
                Ok(report) => HealthState::Up(report),
                Err(message) => HealthState::Down(message),
            };
            state.mark_dirty();
            Vec::new()
        }
        Msg::NoticeDismissed => {
            if state.notice.take().is_some() {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn fetch_links(generation: Option<u64>) -> Vec<Effect> {
    generation
        .map(|generation| Effect::FetchLinks { generation })
        .into_iter()
        .collect()
}
