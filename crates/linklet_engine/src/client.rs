use futures_util::StreamExt;
use linklet_core::{
    CreateLinkRequest, CreateLinkResult, CreatedLink, HealthReport, Link, LinkStats, LinkSummary,
    GENERIC_CREATE_FAILURE, INVALID_INPUT_FALLBACK,
};
use linklet_logging::{linklet_debug, linklet_info, linklet_trace, linklet_warn};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;

use crate::settings::ClientSettings;
use crate::types::{ApiError, ApiFailure};

/// The remote link service, one round trip per call.
#[async_trait::async_trait]
pub trait LinkApi: Send + Sync {
    /// Never fails: every outcome is expressed as a [`CreateLinkResult`].
    async fn create_link(&self, request: &CreateLinkRequest) -> CreateLinkResult;

    async fn list_links(&self) -> Result<Vec<Link>, ApiError>;

    /// A missing code yields [`ApiFailure::NotFound`].
    async fn get_link_stats(&self, code: &str) -> Result<LinkStats, ApiError>;

    /// Deleting a code the service does not know is a success.
    async fn delete_link(&self, code: &str) -> Result<(), ApiError>;

    async fn check_health(&self) -> Result<HealthReport, ApiError>;
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    existing_link: Option<LinkSummary>,
}

#[derive(Debug, Clone)]
pub struct ReqwestLinkApi {
    client: reqwest::Client,
    base: Url,
    settings: ClientSettings,
}

impl ReqwestLinkApi {
    pub fn new(settings: ClientSettings) -> Result<Self, ApiError> {
        let base = Url::parse(&settings.api_base_url)
            .map_err(|err| ApiError::new(ApiFailure::InvalidBaseUrl, err.to_string()))?;
        if base.cannot_be_a_base() || !base.has_host() {
            return Err(ApiError::new(
                ApiFailure::InvalidBaseUrl,
                format!("{base} cannot hold a path"),
            ));
        }

        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::new(ApiFailure::Network, err.to_string()))?;

        Ok(Self {
            client,
            base,
            settings,
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        // Checked in `new`: the base always accepts path segments.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// `{base}/links/{code}`. Dot segments would be collapsed by the URL
    /// parser into another resource, so they are refused before any request.
    fn link_endpoint(&self, code: &str) -> Result<Url, ApiError> {
        if matches!(code, "" | "." | "..") {
            return Err(ApiError::new(
                ApiFailure::NotFound,
                format!("{code:?} is not a short code"),
            ));
        }
        Ok(self.endpoint(&["links", code]))
    }

    async fn read_body(&self, response: reqwest::Response) -> Result<Vec<u8>, ApiError> {
        let max_bytes = self.settings.max_response_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(too_large(max_bytes, Some(content_len)));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(too_large(max_bytes, Some(next_len)));
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(bytes)
    }

    /// GET returning JSON; 404 becomes [`ApiFailure::NotFound`].
    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        linklet_trace!("GET {}", url);
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::new(ApiFailure::NotFound, url.path().to_string()));
        }
        if !status.is_success() {
            return Err(ApiError::new(
                ApiFailure::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let body = self.read_body(response).await?;
        serde_json::from_slice(&body).map_err(|err| ApiError::new(ApiFailure::Decode, err.to_string()))
    }
}

#[async_trait::async_trait]
impl LinkApi for ReqwestLinkApi {
    async fn create_link(&self, request: &CreateLinkRequest) -> CreateLinkResult {
        let url = self.endpoint(&["links"]);
        let response = match self.client.post(url).json(request).send().await {
            Ok(response) => response,
            Err(err) => {
                linklet_warn!("create_link transport failure: {}", map_reqwest_error(err));
                return generic_failure();
            }
        };

        let status = response.status();
        let body = match self.read_body(response).await {
            Ok(body) => body,
            Err(err) => {
                linklet_warn!("create_link status={} unreadable body: {}", status, err);
                return generic_failure();
            }
        };

        let result = classify_create_response(status, &body);
        linklet_info!(
            "create_link status={} custom_code={} outcome={}",
            status.as_u16(),
            request.custom_code.is_some(),
            outcome_label(&result)
        );
        result
    }

    async fn list_links(&self) -> Result<Vec<Link>, ApiError> {
        let links: Vec<Link> = self.get_json(self.endpoint(&["links"])).await?;
        linklet_debug!("list_links count={}", links.len());
        Ok(links)
    }

    async fn get_link_stats(&self, code: &str) -> Result<LinkStats, ApiError> {
        self.get_json(self.link_endpoint(code)?).await
    }

    async fn delete_link(&self, code: &str) -> Result<(), ApiError> {
        let response = self
            .client
            .delete(self.link_endpoint(code)?)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if status.is_success() || status == StatusCode::NOT_FOUND {
            linklet_info!("delete_link code={} status={}", code, status.as_u16());
            Ok(())
        } else {
            Err(ApiError::new(
                ApiFailure::HttpStatus(status.as_u16()),
                status.to_string(),
            ))
        }
    }

    async fn check_health(&self) -> Result<HealthReport, ApiError> {
        self.get_json(self.endpoint(&["healthz"])).await
    }
}

/// Maps a creation response onto exactly one outcome.
///
/// Order matters: a 409 only counts as a duplicate URL when it carries a
/// well-formed `existingLink`; any other 409 is a custom code collision.
pub(crate) fn classify_create_response(status: StatusCode, body: &[u8]) -> CreateLinkResult {
    if status.is_success() {
        return match serde_json::from_slice::<CreatedLink>(body) {
            Ok(created) => CreateLinkResult::Created(created),
            Err(err) => {
                linklet_warn!("create_link success body did not decode: {}", err);
                generic_failure()
            }
        };
    }

    let error_body = serde_json::from_slice::<ErrorBody>(body).ok();
    match status {
        StatusCode::CONFLICT => match error_body.and_then(|b| b.existing_link) {
            Some(existing_link) => CreateLinkResult::DuplicateUrl { existing_link },
            None => CreateLinkResult::CodeTaken,
        },
        StatusCode::BAD_REQUEST => CreateLinkResult::ValidationFailed {
            reason: error_body
                .and_then(|b| b.error)
                .filter(|message| !message.trim().is_empty())
                .unwrap_or_else(|| INVALID_INPUT_FALLBACK.to_string()),
        },
        _ => generic_failure(),
    }
}

fn generic_failure() -> CreateLinkResult {
    CreateLinkResult::ValidationFailed {
        reason: GENERIC_CREATE_FAILURE.to_string(),
    }
}

fn outcome_label(result: &CreateLinkResult) -> &'static str {
    match result {
        CreateLinkResult::Created(_) => "created",
        CreateLinkResult::ValidationFailed { .. } => "validation_failed",
        CreateLinkResult::CodeTaken => "code_taken",
        CreateLinkResult::DuplicateUrl { .. } => "duplicate_url",
    }
}

fn too_large(max_bytes: u64, actual: Option<u64>) -> ApiError {
    ApiError::new(
        ApiFailure::TooLarge { max_bytes, actual },
        "response too large",
    )
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::new(ApiFailure::Timeout, err.to_string());
    }
    if err.is_decode() {
        return ApiError::new(ApiFailure::Decode, err.to_string());
    }
    ApiError::new(ApiFailure::Network, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(status: u16, body: &str) -> CreateLinkResult {
        let status = StatusCode::from_u16(status).expect("status");
        classify_create_response(status, body.as_bytes())
    }

    #[test]
    fn success_body_becomes_created() {
        let result = classify(
            201,
            r#"{"shortCode":"abc","shortUrl":"https://x/abc","originalUrl":"https://long.example/path"}"#,
        );
        assert_eq!(
            result,
            CreateLinkResult::Created(CreatedLink {
                short_code: "abc".to_string(),
                short_url: "https://x/abc".to_string(),
                original_url: "https://long.example/path".to_string(),
            })
        );
    }

    #[test]
    fn malformed_success_body_is_generic_failure() {
        assert_eq!(classify(200, "<html>"), generic_failure());
    }

    #[test]
    fn conflict_with_existing_link_is_duplicate() {
        let result = classify(
            409,
            r#"{"error":"URL already shortened","existingLink":{"shortCode":"abc","shortUrl":"https://x/abc","originalUrl":"https://long.example/path"}}"#,
        );
        assert!(matches!(
            result,
            CreateLinkResult::DuplicateUrl { existing_link } if existing_link.short_url == "https://x/abc"
        ));
    }

    #[test]
    fn conflict_without_usable_existing_link_is_code_taken() {
        assert_eq!(classify(409, r#"{"error":"taken"}"#), CreateLinkResult::CodeTaken);
        assert_eq!(
            classify(409, r#"{"error":"taken","existingLink":null}"#),
            CreateLinkResult::CodeTaken
        );
        assert_eq!(
            classify(409, r#"{"existingLink":{"shortCode":"abc"}}"#),
            CreateLinkResult::CodeTaken
        );
        assert_eq!(classify(409, "conflict"), CreateLinkResult::CodeTaken);
        assert_eq!(classify(409, ""), CreateLinkResult::CodeTaken);
    }

    #[test]
    fn bad_request_carries_server_message() {
        assert_eq!(
            classify(400, r#"{"error":"Invalid URL format"}"#),
            CreateLinkResult::ValidationFailed {
                reason: "Invalid URL format".to_string()
            }
        );
        assert_eq!(
            classify(400, "{}"),
            CreateLinkResult::ValidationFailed {
                reason: INVALID_INPUT_FALLBACK.to_string()
            }
        );
    }

    #[test]
    fn other_statuses_are_generic_even_with_message() {
        assert_eq!(classify(500, r#"{"error":"db down"}"#), generic_failure());
        assert_eq!(classify(422, r#"{"error":"nope"}"#), generic_failure());
        assert_eq!(classify(404, ""), generic_failure());
    }
}
