use crate::{AnalysisPayload, ExtractionResult, RequestToken, RunId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the URL input box.
    InputChanged(String),
    /// User submitted the current input for extraction.
    UrlSubmitted,
    /// Validation pacing pause for a run has elapsed.
    ValidationElapsed { run: RunId },
    /// Engine completion for an extraction call.
    ExtractionFinished {
        run: RunId,
        result: Result<ExtractionResult, String>,
    },
    /// Chat widget switched to another (or no) conversation thread.
    ThreadChanged(Option<String>),
    /// Chat widget finished streaming an agent response turn.
    TurnCompleted,
    /// Engine completion for a thread resolution.
    ResolutionFinished {
        token: RequestToken,
        result: Result<AnalysisPayload, String>,
    },
}
