use std::time::Duration;

use recap_logging::{recap_debug, recap_error, recap_info, recap_warn};

use crate::source::{build_request, classify, ExtractionEndpoints, SourceKind};
use crate::steps::{PipelineStep, StepError, StepLog, StepPatch};
use crate::{Effect, ExtractionResult};

pub const CHECKING_URL: &str = "Checking URL validity...";
pub const URL_INVALID: &str = "URL Invalid";
pub const INVALID_URL_PROMPT: &str = "Please provide a valid Zoom or YouTube URL.";
pub const EXTRACTING: &str = "Extracting transcript (this may take a moment)...";
pub const EXTRACTION_COMPLETE: &str = "Extraction Complete";
pub const EXTRACTION_FAILED: &str = "Extraction Failed";
pub const TRANSCRIPT_READY: &str =
    "I've extracted the transcript. You can view it in the transcript panel.";

pub const DEFAULT_VALIDATION_DELAY: Duration = Duration::from_millis(800);

/// Identifier of one extraction run (one submission).
pub type RunId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PipelinePhase {
    #[default]
    Idle,
    Classifying,
    Validating,
    Extracting,
    Completed,
    Failed,
}

impl PipelinePhase {
    /// Whether a run is in flight and further submissions must wait.
    pub fn is_busy(self) -> bool {
        matches!(
            self,
            PipelinePhase::Classifying | PipelinePhase::Validating | PipelinePhase::Extracting
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineSettings {
    /// Pacing pause between "checking" and the validation verdict.
    pub validation_delay: Duration,
    pub endpoints: ExtractionEndpoints,
}

impl PipelineSettings {
    pub fn new(endpoints: ExtractionEndpoints) -> Self {
        Self {
            validation_delay: DEFAULT_VALIDATION_DELAY,
            endpoints,
        }
    }
}

/// Extraction pipeline: classification, validation, extraction and the
/// progress log that reports each of them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Pipeline {
    phase: PipelinePhase,
    run: RunId,
    input: Option<String>,
    kind: Option<SourceKind>,
    log: StepLog,
    transcript: Option<String>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> PipelinePhase {
        self.phase
    }

    pub fn run(&self) -> RunId {
        self.run
    }

    pub fn kind(&self) -> Option<SourceKind> {
        self.kind
    }

    pub fn log(&self) -> &StepLog {
        &self.log
    }

    pub fn transcript(&self) -> Option<&str> {
        self.transcript.as_deref()
    }

    /// Starts a run for `raw`. Blank input and submissions while a run is in
    /// flight are ignored and yield no effects.
    pub fn submit(&mut self, raw: &str, settings: &PipelineSettings) -> Option<Vec<Effect>> {
        if raw.trim().is_empty() {
            return None;
        }
        if self.phase.is_busy() {
            recap_warn!(
                "Ignoring submission while run {} is {:?}",
                self.run,
                self.phase
            );
            return None;
        }

        self.run += 1;
        self.input = Some(raw.to_string());
        checked(self.run, self.log.append_step(PipelineStep::user(raw)));
        self.transition(PipelinePhase::Classifying);

        let kind = classify(raw);
        self.kind = Some(kind);
        recap_debug!("Run {} classified as {:?}", self.run, kind);

        let checking = PipelineStep::pending(CHECKING_URL);
        checked(self.run, self.log.append_step(checking));
        self.transition(PipelinePhase::Validating);

        Some(vec![Effect::ScheduleValidation {
            run: self.run,
            delay: settings.validation_delay,
        }])
    }

    /// The validation pause for `run` has elapsed.
    pub fn validation_elapsed(
        &mut self,
        run: RunId,
        settings: &PipelineSettings,
    ) -> Option<Vec<Effect>> {
        if !self.accepts(run, PipelinePhase::Validating) {
            return None;
        }

        let input = self.input.clone().unwrap_or_default();
        let kind = self.kind.unwrap_or(SourceKind::Unknown);
        let (Some(label), Some(request)) =
            (kind.label(), build_request(&input, kind, &settings.endpoints))
        else {
            checked(self.run, self.log.update_last_step(StepPatch::fail(URL_INVALID)));
            let prompt = PipelineStep::agent(INVALID_URL_PROMPT);
            checked(self.run, self.log.append_step(prompt));
            self.transition(PipelinePhase::Failed);
            return Some(Vec::new());
        };

        let validated = StepPatch::succeed(format!("URL Validated: {label}"));
        checked(self.run, self.log.update_last_step(validated));
        checked(self.run, self.log.append_step(PipelineStep::pending(EXTRACTING)));
        self.transition(PipelinePhase::Extracting);
        recap_info!(
            "Run {} dispatching {:?} {}",
            self.run,
            request.method,
            request.endpoint
        );

        Some(vec![
            Effect::AnalysisStarted { run: self.run },
            Effect::Extract {
                run: self.run,
                request,
            },
        ])
    }

    /// The extraction call for `run` finished.
    pub fn extraction_finished(
        &mut self,
        run: RunId,
        result: Result<ExtractionResult, String>,
    ) -> Option<Vec<Effect>> {
        if !self.accepts(run, PipelinePhase::Extracting) {
            return None;
        }

        match result {
            Ok(ExtractionResult { transcript }) => {
                let complete = StepPatch::succeed(EXTRACTION_COMPLETE);
                checked(run, self.log.update_last_step(complete));
                checked(run, self.log.append_step(PipelineStep::agent(TRANSCRIPT_READY)));
                self.transcript = Some(transcript.clone());
                self.transition(PipelinePhase::Completed);
                Some(vec![Effect::PublishTranscript { run, transcript }])
            }
            Err(reason) => {
                recap_warn!("Run {} extraction failed: {}", run, reason);
                checked(run, self.log.update_last_step(StepPatch::fail(EXTRACTION_FAILED)));
                let reply = PipelineStep::agent(format!(
                    "I couldn't process that link ({reason}). Please check the link and try again."
                ));
                checked(run, self.log.append_step(reply));
                self.transition(PipelinePhase::Failed);
                Some(Vec::new())
            }
        }
    }

    fn accepts(&self, run: RunId, phase: PipelinePhase) -> bool {
        if run != self.run || self.phase != phase {
            recap_debug!(
                "Ignoring event for run {} in {:?} (current run {} in {:?})",
                run,
                phase,
                self.run,
                self.phase
            );
            return false;
        }
        true
    }

    fn transition(&mut self, next: PipelinePhase) {
        recap_debug!("Run {}: {:?} -> {:?}", self.run, self.phase, next);
        self.phase = next;
    }
}

fn checked(run: RunId, result: Result<(), StepError>) {
    if let Err(err) = result {
        recap_error!("Run {} step log rejected a change: {}", run, err);
    }
}
