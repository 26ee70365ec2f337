//! Meeting recap core: pure state machine for URL extraction runs and
//! thread-to-analysis resolution, plus view-model helpers.
mod analysis;
mod effect;
mod msg;
mod pipeline;
mod resolver;
mod source;
mod state;
mod steps;
mod update;
mod view_model;

pub use analysis::{
    ActionItem, AnalysisPayload, AnalysisState, ExtractionResult, Insights, MeetingData,
    MeetingMetadata,
};
pub use effect::Effect;
pub use msg::Msg;
pub use pipeline::{
    Pipeline, PipelinePhase, PipelineSettings, RunId, CHECKING_URL, DEFAULT_VALIDATION_DELAY,
    EXTRACTING, EXTRACTION_COMPLETE, EXTRACTION_FAILED, INVALID_URL_PROMPT, TRANSCRIPT_READY,
    URL_INVALID,
};
pub use resolver::{RequestToken, Resolver};
pub use source::{
    build_request, classify, ExtractionEndpoints, ExtractionRequest, HttpMethod, RequestPayload,
    SourceKind, UrlBody,
};
pub use state::AppState;
pub use steps::{PipelineStep, Role, StepError, StepLog, StepPatch, StepStatus};
pub use update::update;
pub use view_model::{placeholder, AppViewModel, GREETING, STARTER_PROMPTS};
