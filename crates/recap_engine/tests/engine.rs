use std::sync::{mpsc, Arc, Mutex, Once};
use std::time::Duration;

use pretty_assertions::assert_eq;
use recap_core::{
    AnalysisPayload, ExtractionRequest, ExtractionResult, HttpMethod, RequestPayload, UrlBody,
};
use recap_engine::{
    ChannelEventSink, EngineEvent, EngineHandle, Extractor, FailureKind, FetchError, MeetingApi,
};
use url::Url;

const WAIT: Duration = Duration::from_secs(5);

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(recap_logging::initialize_for_tests);
}

/// In-memory backend: thread ids map to meeting URLs, analysis latency is per URL.
#[derive(Default)]
struct FakeBackend {
    extractions: Mutex<Vec<ExtractionRequest>>,
}

#[async_trait::async_trait]
impl Extractor for FakeBackend {
    async fn extract(&self, request: &ExtractionRequest) -> Result<ExtractionResult, FetchError> {
        self.extractions.lock().unwrap().push(request.clone());
        match request.json_body() {
            Some(UrlBody { url }) if url.contains("broken") => Err(FetchError {
                kind: FailureKind::HttpStatus(500),
                message: "boom".to_string(),
            }),
            _ => Ok(ExtractionResult {
                transcript: "fake transcript".to_string(),
            }),
        }
    }
}

#[async_trait::async_trait]
impl MeetingApi for FakeBackend {
    async fn meeting_url(&self, thread_id: &str) -> Result<String, FetchError> {
        Ok(format!("https://zoom.us/rec/{thread_id}"))
    }

    async fn analysis(&self, meeting_url: &str) -> Result<AnalysisPayload, FetchError> {
        if meeting_url.ends_with("slow") {
            tokio::time::sleep(Duration::from_millis(300)).await;
        }
        Ok(AnalysisPayload {
            transcript: Some(format!("transcript of {meeting_url}")),
            metadata: None,
        })
    }
}

fn start() -> (EngineHandle, Arc<FakeBackend>, mpsc::Receiver<EngineEvent>) {
    init_logging();
    let backend = Arc::new(FakeBackend::default());
    let (tx, rx) = mpsc::channel();
    let engine = EngineHandle::new(backend.clone(), Arc::new(ChannelEventSink::new(tx)));
    (engine, backend, rx)
}

fn post(url: &str) -> ExtractionRequest {
    ExtractionRequest {
        method: HttpMethod::Post,
        endpoint: Url::parse("http://127.0.0.1:1/extract-zoom").unwrap(),
        payload: RequestPayload::Json(UrlBody {
            url: url.to_string(),
        }),
    }
}

#[test]
fn validation_pause_reports_back() {
    let (engine, _backend, rx) = start();
    engine.schedule_validation(4, Duration::from_millis(10));

    assert_eq!(
        rx.recv_timeout(WAIT).unwrap(),
        EngineEvent::ValidationElapsed { run: 4 }
    );
}

#[test]
fn extraction_result_is_forwarded() {
    let (engine, backend, rx) = start();
    engine.extract(1, post("https://zoom.us/rec/ok"));
    engine.extract(2, post("https://zoom.us/rec/broken"));

    let mut events = vec![rx.recv_timeout(WAIT).unwrap(), rx.recv_timeout(WAIT).unwrap()];
    events.sort_by_key(|event| match event {
        EngineEvent::ExtractionCompleted { run, .. } => *run,
        _ => u64::MAX,
    });

    assert_eq!(
        events[0],
        EngineEvent::ExtractionCompleted {
            run: 1,
            result: Ok(ExtractionResult {
                transcript: "fake transcript".to_string()
            }),
        }
    );
    match &events[1] {
        EngineEvent::ExtractionCompleted { run: 2, result: Err(err) } => {
            assert_eq!(err.kind, FailureKind::HttpStatus(500));
        }
        other => panic!("unexpected event {other:?}"),
    }
    assert_eq!(backend.extractions.lock().unwrap().len(), 2);
}

#[test]
fn resolution_completes_with_token() {
    let (engine, _backend, rx) = start();
    engine.resolve(7, "t_1");

    assert_eq!(
        rx.recv_timeout(WAIT).unwrap(),
        EngineEvent::ResolutionCompleted {
            token: 7,
            result: Ok(AnalysisPayload {
                transcript: Some("transcript of https://zoom.us/rec/t_1".to_string()),
                metadata: None,
            }),
        }
    );
}

#[test]
fn cancelled_resolution_never_reports() {
    let (engine, _backend, rx) = start();
    engine.resolve(1, "slow");
    engine.cancel(1);
    engine.resolve(2, "fast");

    match rx.recv_timeout(WAIT).unwrap() {
        EngineEvent::ResolutionCompleted { token, .. } => assert_eq!(token, 2),
        other => panic!("unexpected event {other:?}"),
    }
    assert!(rx.recv_timeout(Duration::from_millis(600)).is_err());
}
