//! Linklet engine: link service client and effect execution.
mod client;
mod engine;
mod settings;
mod types;

pub use client::{LinkApi, ReqwestLinkApi};
pub use engine::EngineHandle;
pub use settings::{ClientSettings, DEFAULT_API_BASE_URL};
pub use types::{ApiError, ApiFailure, EngineError, EngineEvent};
