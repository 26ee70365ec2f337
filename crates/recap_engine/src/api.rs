use recap_core::AnalysisPayload;
use recap_logging::recap_info;
use url::Url;

use crate::fetch::{string_field, ReqwestClient};
use crate::{FailureKind, FetchError};

/// Meeting lookup and analysis endpoints of the chat backend.
#[async_trait::async_trait]
pub trait MeetingApi: Send + Sync {
    /// `GET /api/meeting/{thread_id}/url` → `{ "url": ... }`.
    async fn meeting_url(&self, thread_id: &str) -> Result<String, FetchError>;

    /// `GET /api/analysis?url=...` → `{ "transcript": ..., "metadata": ... }`.
    async fn analysis(&self, meeting_url: &str) -> Result<AnalysisPayload, FetchError>;
}

pub(crate) fn meeting_url_endpoint(base: &Url, thread_id: &str) -> Result<Url, FetchError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| FetchError::new(FailureKind::InvalidUrl, format!("{base} cannot be a base")))?
        .pop_if_empty()
        .extend(["api", "meeting", thread_id, "url"]);
    Ok(url)
}

pub(crate) fn analysis_endpoint(base: &Url, meeting_url: &str) -> Result<Url, FetchError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| FetchError::new(FailureKind::InvalidUrl, format!("{base} cannot be a base")))?
        .pop_if_empty()
        .extend(["api", "analysis"]);
    url.query_pairs_mut().append_pair("url", meeting_url);
    Ok(url)
}

#[async_trait::async_trait]
impl MeetingApi for ReqwestClient {
    async fn meeting_url(&self, thread_id: &str) -> Result<String, FetchError> {
        let endpoint = meeting_url_endpoint(&self.api_base, thread_id)?;
        recap_info!("Meeting URL lookup {}", endpoint);
        let body = self.send_json(self.http().get(endpoint)).await?;
        let url = string_field(&body, "url")?;
        if url.is_empty() {
            return Err(FetchError::new(FailureKind::MissingField("url"), "empty url"));
        }
        Ok(url)
    }

    async fn analysis(&self, meeting_url: &str) -> Result<AnalysisPayload, FetchError> {
        let endpoint = analysis_endpoint(&self.api_base, meeting_url)?;
        recap_info!("Meeting analysis {}", endpoint);
        let body = self.send_json(self.http().get(endpoint)).await?;
        serde_json::from_value(body)
            .map_err(|err| FetchError::new(FailureKind::InvalidBody, err.to_string()))
    }
}
