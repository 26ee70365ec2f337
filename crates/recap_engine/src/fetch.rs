use futures_util::StreamExt;
use recap_core::{ExtractionRequest, ExtractionResult, HttpMethod};
use recap_logging::{recap_debug, recap_info};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde_json::Value;

use crate::config::{EngineConfig, HttpSettings};
use crate::{FailureKind, FetchError};

const JSON: &str = "application/json";

/// Issues extraction calls against a source-specific service.
#[async_trait::async_trait]
pub trait Extractor: Send + Sync {
    async fn extract(&self, request: &ExtractionRequest) -> Result<ExtractionResult, FetchError>;
}

/// reqwest-backed client for the extraction services and the meeting API.
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    client: reqwest::Client,
    pub(crate) settings: HttpSettings,
    pub(crate) api_base: url::Url,
}

impl ReqwestClient {
    pub fn new(config: EngineConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .connect_timeout(config.http.connect_timeout)
            .timeout(config.http.request_timeout)
            .redirect(reqwest::redirect::Policy::limited(config.http.redirect_limit))
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))?;

        Ok(Self {
            client,
            settings: config.http,
            api_base: config.api_base,
        })
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.client
    }

    /// Sends `request` and decodes a JSON body from a success response.
    pub(crate) async fn send_json(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<Value, FetchError> {
        let response = request
            .header(ACCEPT, JSON)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let max_bytes = self.settings.max_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(too_large(max_bytes, content_len));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(too_large(max_bytes, next_len));
            }
            bytes.extend_from_slice(&chunk);
        }
        recap_debug!("Received {} byte body", bytes.len());

        serde_json::from_slice(&bytes)
            .map_err(|err| FetchError::new(FailureKind::InvalidBody, err.to_string()))
    }
}

#[async_trait::async_trait]
impl Extractor for ReqwestClient {
    async fn extract(&self, request: &ExtractionRequest) -> Result<ExtractionResult, FetchError> {
        let target = request.target();
        recap_info!("Extraction {:?} {}", request.method, target);

        let builder = match request.method {
            HttpMethod::Get => self.http().get(target),
            HttpMethod::Post => {
                let body = request.json_body().ok_or_else(|| {
                    FetchError::new(FailureKind::InvalidBody, "POST request without a JSON body")
                })?;
                let body = serde_json::to_vec(body)
                    .map_err(|err| FetchError::new(FailureKind::InvalidBody, err.to_string()))?;
                self.http()
                    .post(target)
                    .header(CONTENT_TYPE, JSON)
                    .body(body)
            }
        };

        let body = self.send_json(builder).await?;
        let transcript = string_field(&body, "transcript")?;
        Ok(ExtractionResult { transcript })
    }
}

/// Pulls a string field out of a JSON object; `null` counts as missing.
pub(crate) fn string_field(body: &Value, field: &'static str) -> Result<String, FetchError> {
    body.get(field)
        .and_then(Value::as_str)
        .map(ToOwned::to_owned)
        .ok_or_else(|| FetchError::new(FailureKind::MissingField(field), body_excerpt(body)))
}

fn body_excerpt(body: &Value) -> String {
    let text = body.to_string();
    match text.char_indices().nth(120) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text,
    }
}

fn too_large(max_bytes: u64, actual: u64) -> FetchError {
    FetchError::new(
        FailureKind::TooLarge {
            max_bytes,
            actual: Some(actual),
        },
        "response too large",
    )
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_redirect() {
        return FetchError::new(FailureKind::RedirectLimitExceeded, err.to_string());
    }
    if err.is_builder() {
        return FetchError::new(FailureKind::InvalidUrl, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn string_field_rejects_null_and_non_strings() {
        let body = json!({ "transcript": null, "count": 3, "ok": "yes" });
        assert_eq!(string_field(&body, "ok").unwrap(), "yes");
        assert_eq!(
            string_field(&body, "transcript").unwrap_err().kind,
            FailureKind::MissingField("transcript")
        );
        assert_eq!(
            string_field(&body, "count").unwrap_err().kind,
            FailureKind::MissingField("count")
        );
    }

    #[test]
    fn excerpt_is_truncated() {
        let body = json!({ "text": "x".repeat(500) });
        let excerpt = body_excerpt(&body);
        assert!(excerpt.ends_with("..."));
        assert!(excerpt.len() < 200);
    }
}
