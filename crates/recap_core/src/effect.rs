use std::time::Duration;

use crate::{ExtractionRequest, RequestToken, RunId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Deliver `Msg::ValidationElapsed` for `run` after `delay`.
    ScheduleValidation { run: RunId, delay: Duration },
    /// A known source is about to be extracted.
    AnalysisStarted { run: RunId },
    /// Issue the extraction call and report `Msg::ExtractionFinished`.
    Extract { run: RunId, request: ExtractionRequest },
    /// Hand the finished transcript to the presentation layer.
    PublishTranscript { run: RunId, transcript: String },
    /// Run the two-stage thread lookup and report `Msg::ResolutionFinished`.
    ResolveAnalysis { token: RequestToken, thread_id: String },
    /// Abandon a superseded resolution.
    CancelResolution { token: RequestToken },
}
