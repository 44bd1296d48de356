use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3001/api";

/// Transport settings for the link service client, fixed at construction.
#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// Root of the link API; `links` and `healthz` are appended to it.
    pub api_base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_response_bytes: u64,
}

impl ClientSettings {
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            ..Self::default()
        }
    }
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_response_bytes: 5 * 1024 * 1024,
        }
    }
}
