use std::fmt;

use linklet_core::{CreateLinkResult, HealthReport, Link, LinkStats, SubmissionId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    LinkCreated {
        submission: SubmissionId,
        result: CreateLinkResult,
    },
    LinksListed {
        generation: u64,
        result: Result<Vec<Link>, ApiError>,
    },
    StatsFetched {
        code: String,
        result: Result<LinkStats, ApiError>,
    },
    LinkDeleted {
        code: String,
        result: Result<(), ApiError>,
    },
    HealthChecked {
        result: Result<HealthReport, ApiError>,
    },
}

/// A remote failure, already classified at the client boundary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct ApiError {
    pub kind: ApiFailure,
    pub message: String,
}

impl ApiError {
    pub(crate) fn new(kind: ApiFailure, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// No usable response arrived.
    pub fn is_transport(&self) -> bool {
        matches!(self.kind, ApiFailure::Timeout | ApiFailure::Network)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiFailure {
    InvalidBaseUrl,
    NotFound,
    HttpStatus(u16),
    Timeout,
    Network,
    Decode,
    TooLarge { max_bytes: u64, actual: Option<u64> },
}

impl fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiFailure::InvalidBaseUrl => write!(f, "invalid api base url"),
            ApiFailure::NotFound => write!(f, "not found"),
            ApiFailure::HttpStatus(code) => write!(f, "http status {code}"),
            ApiFailure::Timeout => write!(f, "timeout"),
            ApiFailure::Network => write!(f, "network error"),
            ApiFailure::Decode => write!(f, "malformed response"),
            ApiFailure::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("could not start engine runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error(transparent)]
    Client(#[from] ApiError),
}
