use std::collections::HashMap;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use recap_core::{ExtractionRequest, RequestToken, RunId};
use recap_logging::recap_debug;
use tokio_util::sync::CancellationToken;

use crate::api::MeetingApi;
use crate::fetch::Extractor;
use crate::resolve::resolve_analysis;
use crate::EngineEvent;

/// Receives engine completions, typically forwarding them to the UI loop.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

enum EngineCommand {
    Validate { run: RunId, delay: Duration },
    Extract { run: RunId, request: ExtractionRequest },
    Resolve { token: RequestToken, thread_id: String },
    Cancel { token: RequestToken },
}

type InFlight = Arc<Mutex<HashMap<RequestToken, CancellationToken>>>;

/// Handle to the background IO worker. Dropping it stops the worker.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn new<B>(backend: Arc<B>, sink: Arc<dyn EventSink>) -> Self
    where
        B: Extractor + MeetingApi + 'static,
    {
        let (cmd_tx, cmd_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            let in_flight: InFlight = Arc::default();
            while let Ok(command) = cmd_rx.recv() {
                handle_command(&runtime, &backend, &sink, &in_flight, command);
            }
            recap_debug!("Engine command channel closed; worker exiting");
        });

        Self { cmd_tx }
    }

    pub fn schedule_validation(&self, run: RunId, delay: Duration) {
        let _ = self.cmd_tx.send(EngineCommand::Validate { run, delay });
    }

    pub fn extract(&self, run: RunId, request: ExtractionRequest) {
        let _ = self.cmd_tx.send(EngineCommand::Extract { run, request });
    }

    pub fn resolve(&self, token: RequestToken, thread_id: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::Resolve {
            token,
            thread_id: thread_id.into(),
        });
    }

    pub fn cancel(&self, token: RequestToken) {
        let _ = self.cmd_tx.send(EngineCommand::Cancel { token });
    }
}

fn handle_command<B>(
    runtime: &tokio::runtime::Runtime,
    backend: &Arc<B>,
    sink: &Arc<dyn EventSink>,
    in_flight: &InFlight,
    command: EngineCommand,
) where
    B: Extractor + MeetingApi + 'static,
{
    match command {
        EngineCommand::Validate { run, delay } => {
            let sink = sink.clone();
            runtime.spawn(async move {
                tokio::time::sleep(delay).await;
                sink.emit(EngineEvent::ValidationElapsed { run });
            });
        }
        EngineCommand::Extract { run, request } => {
            let backend = backend.clone();
            let sink = sink.clone();
            runtime.spawn(async move {
                let result = backend.extract(&request).await;
                sink.emit(EngineEvent::ExtractionCompleted { run, result });
            });
        }
        EngineCommand::Resolve { token, thread_id } => {
            let cancel = CancellationToken::new();
            if let Ok(mut map) = in_flight.lock() {
                map.insert(token, cancel.clone());
            }
            let backend = backend.clone();
            let sink = sink.clone();
            let in_flight = in_flight.clone();
            runtime.spawn(async move {
                tokio::select! {
                    _ = cancel.cancelled() => {
                        recap_debug!("Resolution token={} cancelled", token);
                    }
                    result = resolve_analysis(backend.as_ref(), &thread_id) => {
                        sink.emit(EngineEvent::ResolutionCompleted { token, result });
                    }
                }
                if let Ok(mut map) = in_flight.lock() {
                    map.remove(&token);
                }
            });
        }
        EngineCommand::Cancel { token } => {
            let cancel = in_flight.lock().ok().and_then(|mut map| map.remove(&token));
            if let Some(cancel) = cancel {
                cancel.cancel();
            }
        }
    }
}
