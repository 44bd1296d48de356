use std::sync::mpsc::RecvTimeoutError;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use linklet_core::{CreateLinkRequest, SubmissionId};
use linklet_logging::linklet_debug;

use crate::client::{LinkApi, ReqwestLinkApi};
use crate::settings::ClientSettings;
use crate::types::{EngineError, EngineEvent};

enum EngineCommand {
    Create {
        submission: SubmissionId,
        request: CreateLinkRequest,
    },
    List {
        generation: u64,
    },
    Stats {
        code: String,
    },
    Delete {
        code: String,
    },
    Health,
}

/// Runs link service calls on a background runtime.
///
/// Calls return immediately; each result arrives later as one
/// [`EngineEvent`]. Requests are never cancelled once sent. Results that
/// arrive after the handle is dropped are discarded.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Arc<Mutex<mpsc::Receiver<EngineEvent>>>,
}

impl EngineHandle {
    pub fn new(settings: ClientSettings) -> Result<Self, EngineError> {
        let api = ReqwestLinkApi::new(settings)?;
        Self::with_api(Arc::new(api))
    }

    pub fn with_api(api: Arc<dyn LinkApi>) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::Builder::new()
            .name("linklet-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let api = api.clone();
                    let event_tx = event_tx.clone();
                    runtime.spawn(async move {
                        let event = handle_command(api.as_ref(), command).await;
                        let _ = event_tx.send(event);
                    });
                }
                linklet_debug!("engine command channel closed");
            })?;

        Ok(Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
        })
    }

    pub fn create_link(&self, submission: SubmissionId, request: CreateLinkRequest) {
        self.send(EngineCommand::Create {
            submission,
            request,
        });
    }

    pub fn list_links(&self, generation: u64) {
        self.send(EngineCommand::List { generation });
    }

    pub fn link_stats(&self, code: impl Into<String>) {
        self.send(EngineCommand::Stats { code: code.into() });
    }

    pub fn delete_link(&self, code: impl Into<String>) {
        self.send(EngineCommand::Delete { code: code.into() });
    }

    pub fn check_health(&self) {
        self.send(EngineCommand::Health);
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.try_recv().ok()
    }

    /// Waits up to `timeout` for the next event. `Disconnected` means the
    /// engine thread is gone and no further events will arrive.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<EngineEvent, RecvTimeoutError> {
        match self.event_rx.lock() {
            Ok(rx) => rx.recv_timeout(timeout),
            Err(_) => Err(RecvTimeoutError::Disconnected),
        }
    }

    fn send(&self, command: EngineCommand) {
        let _ = self.cmd_tx.send(command);
    }
}

async fn handle_command(api: &dyn LinkApi, command: EngineCommand) -> EngineEvent {
    match command {
        EngineCommand::Create {
            submission,
            request,
        } => EngineEvent::LinkCreated {
            submission,
            result: api.create_link(&request).await,
        },
        EngineCommand::List { generation } => EngineEvent::LinksListed {
            generation,
            result: api.list_links().await,
        },
        EngineCommand::Stats { code } => {
            let result = api.get_link_stats(&code).await;
            EngineEvent::StatsFetched { code, result }
        }
        EngineCommand::Delete { code } => {
            let result = api.delete_link(&code).await;
            EngineEvent::LinkDeleted { code, result }
        }
        EngineCommand::Health => EngineEvent::HealthChecked {
            result: api.check_health().await,
        },
    }
}
