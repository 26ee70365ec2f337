use std::fmt;

use recap_core::{AnalysisPayload, ExtractionResult, RequestToken, RunId};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    ValidationElapsed {
        run: RunId,
    },
    ExtractionCompleted {
        run: RunId,
        result: Result<ExtractionResult, FetchError>,
    },
    ResolutionCompleted {
        token: RequestToken,
        result: Result<AnalysisPayload, ResolveError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    RedirectLimitExceeded,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    InvalidBody,
    MissingField(&'static str),
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::RedirectLimitExceeded => write!(f, "redirect limit exceeded"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::InvalidBody => write!(f, "response is not valid JSON"),
            FailureKind::MissingField(field) => write!(f, "response has no '{field}'"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

/// Failure of the two-stage thread resolution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("Failed to fetch meeting URL ({0})")]
    MeetingUrl(#[source] FetchError),
    #[error("No meeting URL found")]
    NoMeetingUrl,
    #[error("Failed to fetch meeting analysis ({0})")]
    Analysis(#[source] FetchError),
}
