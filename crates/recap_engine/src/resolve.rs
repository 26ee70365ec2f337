use recap_core::AnalysisPayload;
use recap_logging::{recap_debug, recap_warn};

use crate::api::MeetingApi;
use crate::{FailureKind, ResolveError};

/// Resolves a conversation thread into its meeting analysis.
///
/// Two dependent lookups: thread → meeting URL, then meeting URL → transcript
/// and structured summary. Either failing fails the whole resolution.
pub async fn resolve_analysis<A>(api: &A, thread_id: &str) -> Result<AnalysisPayload, ResolveError>
where
    A: MeetingApi + ?Sized,
{
    let meeting_url = api.meeting_url(thread_id).await.map_err(|err| {
        recap_warn!("Meeting URL lookup for thread {} failed: {}", thread_id, err);
        match err.kind {
            FailureKind::MissingField(_) => ResolveError::NoMeetingUrl,
            _ => ResolveError::MeetingUrl(err),
        }
    })?;
    recap_debug!("Thread {} maps to {}", thread_id, meeting_url);

    api.analysis(&meeting_url).await.map_err(|err| {
        recap_warn!("Analysis for {} failed: {}", meeting_url, err);
        ResolveError::Analysis(err)
    })
}
