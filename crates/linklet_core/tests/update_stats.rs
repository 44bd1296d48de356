use linklet_core::{
    update, AppState, Effect, HealthReport, HealthState, Link, Msg, StatsOutcome, StatsStatus,
};

fn stats(code: &str) -> Link {
    Link {
        id: String::new(),
        short_code: code.to_string(),
        original_url: "https://long.example/path".to_string(),
        total_clicks: 12,
        last_clicked: Some("2024-06-01T08:30:00Z".parse().expect("timestamp")),
        created_at: "2024-05-01T10:00:00Z".parse().expect("timestamp"),
    }
}

#[test]
fn stats_request_emits_fetch_and_shows_loading() {
    let (state, effects) = update(
        AppState::new("https://sho.rt"),
        Msg::StatsRequested("abc".to_string()),
    );
    assert_eq!(
        effects,
        vec![Effect::FetchStats {
            code: "abc".to_string()
        }]
    );
    let view = state.view();
    assert_eq!(view.stats.status, StatsStatus::Loading);
    assert_eq!(view.stats.short_url.as_deref(), Some("https://sho.rt/abc"));
}

#[test]
fn empty_code_is_not_fetched() {
    let (state, effects) = update(AppState::new("https://sho.rt"), Msg::StatsRequested(String::new()));
    assert!(effects.is_empty());
    assert_eq!(state.view().stats.status, StatsStatus::Idle);
}

#[test]
fn dot_segments_and_foreign_characters_are_not_fetched() {
    for code in [".", "..", "a/b", "ab?c", "%2e"] {
        let (state, effects) =
            update(AppState::new("https://sho.rt"), Msg::StatsRequested(code.to_string()));
        assert!(effects.is_empty(), "{code} was fetched");
        assert_eq!(state.view().stats.status, StatsStatus::Idle);
    }
}

#[test]
fn not_found_is_distinct_from_failure() {
    let (state, _) = update(
        AppState::new("https://sho.rt"),
        Msg::StatsRequested("doesnotexist".to_string()),
    );
    let (state, _) = update(
        state.clone(),
        Msg::StatsLoaded {
            code: "doesnotexist".to_string(),
            outcome: StatsOutcome::NotFound,
        },
    );
    assert_eq!(state.view().stats.status, StatsStatus::NotFound);

    let (state, _) = update(
        state,
        Msg::StatsLoaded {
            code: "doesnotexist".to_string(),
            outcome: StatsOutcome::Failed("network error".to_string()),
        },
    );
    assert_eq!(
        state.view().stats.status,
        StatsStatus::Failed("network error".to_string())
    );
}

#[test]
fn results_for_another_code_are_dropped() {
    let (state, _) = update(AppState::new("https://sho.rt"), Msg::StatsRequested("a".to_string()));
    let (state, _) = update(state, Msg::StatsRequested("b".to_string()));
    let (mut state, _) = update(
        state,
        Msg::StatsLoaded {
            code: "a".to_string(),
            outcome: StatsOutcome::Found(stats("a")),
        },
    );
    assert!(state.consume_dirty());
    assert_eq!(state.view().stats.status, StatsStatus::Loading);

    let (state, _) = update(
        state,
        Msg::StatsLoaded {
            code: "b".to_string(),
            outcome: StatsOutcome::Found(stats("b")),
        },
    );
    assert_eq!(state.view().stats.status, StatsStatus::Loaded(stats("b")));
}

#[test]
fn health_check_round_trip() {
    let (state, effects) = update(AppState::new("https://sho.rt"), Msg::HealthRequested);
    assert_eq!(effects, vec![Effect::CheckHealth]);
    assert_eq!(state.view().health, HealthState::Checking);

    let (state, effects) = update(state, Msg::HealthRequested);
    assert!(effects.is_empty());

    let report = HealthReport {
        ok: true,
        version: "1.2.0".to_string(),
    };
    let (state, _) = update(state, Msg::HealthChecked(Ok(report.clone())));
    assert_eq!(state.view().health, HealthState::Up(report));
}

#[test]
fn notices_can_be_dismissed() {
    let (state, _) = update(AppState::new("https://sho.rt"), Msg::SubmitClicked);
    assert!(state.view().notice.is_some());
    let (mut state, _) = update(state, Msg::NoticeDismissed);
    assert!(state.view().notice.is_none());
    assert!(state.consume_dirty());

    let (mut state, _) = update(state, Msg::NoticeDismissed);
    assert!(!state.consume_dirty());
}
