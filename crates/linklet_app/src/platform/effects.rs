use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use linklet_core::{Effect, Msg, StatsOutcome};
use linklet_engine::{ApiError, ApiFailure, ClientSettings, EngineError, EngineEvent, EngineHandle};
use linklet_logging::{linklet_error, linklet_info, linklet_warn, redact_query};

use super::app::AppEvent;

const EVENT_POLL: Duration = Duration::from_millis(100);

pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(
        settings: ClientSettings,
        event_tx: mpsc::Sender<AppEvent>,
    ) -> Result<Self, EngineError> {
        let engine = EngineHandle::new(settings)?;
        let runner = Self { engine };
        runner.spawn_event_pump(event_tx);
        Ok(runner)
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::CreateLink {
                    submission,
                    request,
                } => {
                    linklet_info!(
                        "CreateLink submission={} url={} custom_code={:?}",
                        submission,
                        redact_query(&request.original_url),
                        request.custom_code
                    );
                    self.engine.create_link(submission, request);
                }
                Effect::FetchLinks { generation } => {
                    linklet_info!("FetchLinks generation={}", generation);
                    self.engine.list_links(generation);
                }
                Effect::DeleteLink { code } => {
                    linklet_info!("DeleteLink code={}", code);
                    self.engine.delete_link(code);
                }
                Effect::FetchStats { code } => {
                    linklet_info!("FetchStats code={}", code);
                    self.engine.link_stats(code);
                }
                Effect::CheckHealth => self.engine.check_health(),
            }
        }
    }

    fn spawn_event_pump(&self, event_tx: mpsc::Sender<AppEvent>) {
        let engine = self.engine.clone();
        thread::spawn(move || loop {
            let event = match engine.recv_timeout(EVENT_POLL) {
                Ok(event) => event,
                Err(RecvTimeoutError::Timeout) => continue,
                Err(RecvTimeoutError::Disconnected) => {
                    linklet_error!("engine event channel closed; no further results");
                    break;
                }
            };
            if event_tx.send(AppEvent::Core(map_event(event))).is_err() {
                break;
            }
        });
    }
}

/// Translates an engine result into the message the core expects.
fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::LinkCreated { submission, result } => Msg::CreateFinished { submission, result },
        EngineEvent::LinksListed { generation, result } => Msg::LinksLoaded {
            generation,
            result: result.map_err(|err| describe("list links", &err)),
        },
        EngineEvent::StatsFetched { code, result } => {
            let outcome = match result {
                Ok(stats) => StatsOutcome::Found(stats),
                Err(err) if err.kind == ApiFailure::NotFound => StatsOutcome::NotFound,
                Err(err) => StatsOutcome::Failed(describe("stats", &err)),
            };
            Msg::StatsLoaded { code, outcome }
        }
        EngineEvent::LinkDeleted { code, result } => {
            let result = result.map_err(|err| describe("delete", &err));
            Msg::DeleteFinished { code, result }
        }
        EngineEvent::HealthChecked { result } => {
            Msg::HealthChecked(result.map_err(|err| describe("health", &err)))
        }
    }
}

fn describe(operation: &str, err: &ApiError) -> String {
    linklet_warn!("{} failed: {}", operation, err);
    err.to_string()
}
