//! Shared HTTP plumbing for every backend route.
//!
//! Routes are joined onto a configured base URL. A successful response is
//! decoded into the route's response type; any other status becomes
//! [`BackendError::Upstream`] carrying the best detail the body offers.

use std::time::Duration;

use poliza_core::models::analysis::{RAW_EXCERPT_CHARS, truncate_chars};
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::BackendError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Route paths, relative to the base URL.
pub mod routes {
    pub const LOGIN: &str = "auth/login";
    pub const REGISTER: &str = "auth/register";
    pub const UPLOAD_PDF: &str = "internal/upload_pdf";
    pub const ANSWER_QUERY: &str = "internal/answer_query";
    pub const EDIT_POLICY: &str = "policy/edit";
    pub const GENERATE_DRAFT: &str = "policy/generate-draft";
}

#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Client for the policy backend. Cheap to clone.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
    bearer: Option<String>,
}

impl BackendClient {
    pub fn new(config: &BackendConfig) -> Result<Self, BackendError> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(BackendError::Config(format!(
                "base url must be http(s): {}",
                config.base_url
            )));
        }
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| BackendError::Config(e.to_string()))?;
        Ok(Self {
            http,
            base_url,
            bearer: None,
        })
    }

    /// Attach an access token to every subsequent request.
    pub fn with_bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer = Some(token.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, route: &str) -> String {
        format!("{}/{}", self.base_url, route.trim_start_matches('/'))
    }

    pub(crate) fn post(&self, route: &str) -> RequestBuilder {
        let request = self.http.post(self.url(route));
        match &self.bearer {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// POST a JSON body and decode the JSON response.
    pub async fn post_json<B, R>(&self, route: &str, body: &B) -> Result<R, BackendError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        debug!(route, "backend request");
        let response = self.post(route).json(body).send().await?;
        read_json(route, response).await
    }
}

/// Decode a response, mapping non-2xx statuses to [`BackendError::Upstream`].
pub(crate) async fn read_json<R: DeserializeOwned>(
    route: &str,
    response: Response,
) -> Result<R, BackendError> {
    let status = response.status();
    let text = response.text().await?;

    if !status.is_success() {
        let detail = error_detail(status, &text);
        warn!(route, status = status.as_u16(), detail = %detail, "backend request failed");
        return Err(BackendError::Upstream {
            status: status.as_u16(),
            detail,
        });
    }

    serde_json::from_str(&text).map_err(|e| {
        BackendError::ResponseShape(format!(
            "{e}. Response: {}",
            truncate_chars(&text, RAW_EXCERPT_CHARS)
        ))
    })
}

/// Pick the most useful message out of an error body: `detail`, else
/// `error` with optional `details`, else the status text.
pub fn error_detail(status: StatusCode, body: &str) -> String {
    let fallback = || {
        status
            .canonical_reason()
            .map(str::to_string)
            .unwrap_or_else(|| status.as_str().to_string())
    };

    let Ok(serde_json::Value::Object(map)) = serde_json::from_str::<serde_json::Value>(body)
    else {
        return fallback();
    };

    match map.get("detail") {
        Some(serde_json::Value::String(s)) => return s.clone(),
        Some(serde_json::Value::Null) | None => {}
        Some(other) => return other.to_string(),
    }

    let error = map.get("error").and_then(|v| v.as_str());
    let details = map.get("details").and_then(|v| match v {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Null => None,
        other => Some(other.to_string()),
    });

    match (error, details) {
        (Some(error), Some(details)) => format!("{error}: {details}"),
        (Some(error), None) => error.to_string(),
        (None, Some(details)) => details,
        (None, None) => fallback(),
    }
}
