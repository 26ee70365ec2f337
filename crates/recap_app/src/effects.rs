use std::sync::{mpsc, Arc};

use recap_core::{Effect, Msg};
use recap_engine::{EngineEvent, EngineHandle, EventSink, Extractor, MeetingApi};
use recap_logging::{recap_debug, recap_info};

use crate::app::LoopEvent;

/// Executes core effects: IO goes to the engine, presentation effects are
/// handed back to the caller for rendering.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new<B>(backend: Arc<B>, loop_tx: mpsc::Sender<LoopEvent>) -> Self
    where
        B: Extractor + MeetingApi + 'static,
    {
        let sink = Arc::new(MsgSink { tx: loop_tx });
        Self {
            engine: EngineHandle::new(backend, sink),
        }
    }

    pub fn enqueue(&self, effects: Vec<Effect>) -> Vec<Effect> {
        let mut presentation = Vec::new();
        for effect in effects {
            match effect {
                Effect::ScheduleValidation { run, delay } => {
                    recap_debug!("Run {} validating in {:?}", run, delay);
                    self.engine.schedule_validation(run, delay);
                }
                Effect::Extract { run, request } => {
                    recap_info!(
                        "Extract run={} method={:?} endpoint={}",
                        run,
                        request.method,
                        request.endpoint
                    );
                    self.engine.extract(run, request);
                }
                Effect::ResolveAnalysis { token, thread_id } => {
                    recap_info!("Resolve token={} thread={}", token, thread_id);
                    self.engine.resolve(token, thread_id);
                }
                Effect::CancelResolution { token } => {
                    recap_debug!("Cancel token={}", token);
                    self.engine.cancel(token);
                }
                Effect::AnalysisStarted { .. } | Effect::PublishTranscript { .. } => {
                    presentation.push(effect);
                }
            }
        }
        presentation
    }
}

struct MsgSink {
    tx: mpsc::Sender<LoopEvent>,
}

impl EventSink for MsgSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(LoopEvent::Dispatch(to_msg(event)));
    }
}

pub fn to_msg(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::ValidationElapsed { run } => Msg::ValidationElapsed { run },
        EngineEvent::ExtractionCompleted { run, result } => Msg::ExtractionFinished {
            run,
            result: result.map_err(|err| err.to_string()),
        },
        EngineEvent::ResolutionCompleted { token, result } => Msg::ResolutionFinished {
            token,
            result: result.map_err(|err| err.to_string()),
        },
    }
}
