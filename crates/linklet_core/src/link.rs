use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Correlates a creation request with its result.
pub type SubmissionId = u64;

/// A stored short link as reported by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    /// Opaque storage id. The stats endpoint omits it.
    #[serde(default)]
    pub id: String,
    pub short_code: String,
    pub original_url: String,
    #[serde(default)]
    pub total_clicks: u64,
    #[serde(default)]
    pub last_clicked: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Per-code statistics share the [`Link`] shape.
pub type LinkStats = Link;

/// Minimal projection of a link, enough to offer "use existing link".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkSummary {
    pub short_code: String,
    pub short_url: String,
    pub original_url: String,
}

/// Body of a successful creation.
pub type CreatedLink = LinkSummary;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLinkRequest {
    pub original_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_code: Option<String>,
}

impl CreateLinkRequest {
    /// Builds a request from raw form input; an empty custom code means none.
    pub fn from_input(url: &str, custom_code: &str) -> Self {
        Self {
            original_url: url.trim().to_string(),
            custom_code: (!custom_code.is_empty()).then(|| custom_code.to_string()),
        }
    }
}

/// Outcome of one creation attempt. Exactly one variant per submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateLinkResult {
    Created(CreatedLink),
    ValidationFailed { reason: String },
    CodeTaken,
    DuplicateUrl { existing_link: LinkSummary },
}

/// Outcome of a per-code stats lookup; `NotFound` is an expected answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatsOutcome {
    Found(LinkStats),
    NotFound,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthReport {
    pub ok: bool,
    #[serde(default)]
    pub version: String,
}
