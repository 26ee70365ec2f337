use std::sync::Once;

use pretty_assertions::assert_eq;
use recap_core::{
    update, AnalysisPayload, AppState, Effect, ExtractionEndpoints, MeetingData, Msg,
    PipelineSettings, RequestToken,
};
use url::Url;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(recap_logging::initialize_for_tests);
}

fn fresh_state() -> AppState {
    AppState::new(PipelineSettings::new(ExtractionEndpoints {
        video_platform: Url::parse("http://127.0.0.1:8080/extract-youtube").unwrap(),
        cloud_recording: Url::parse("http://127.0.0.1:8080/extract-zoom").unwrap(),
    }))
}

fn resolve_token(effects: &[Effect]) -> RequestToken {
    effects
        .iter()
        .find_map(|effect| match effect {
            Effect::ResolveAnalysis { token, .. } => Some(*token),
            _ => None,
        })
        .expect("resolution requested")
}

fn payload(transcript: &str, summary: &str) -> AnalysisPayload {
    AnalysisPayload {
        transcript: Some(transcript.to_string()),
        metadata: Some(MeetingData {
            summary: summary.to_string(),
            attendees: vec!["Ada".to_string()],
            ..MeetingData::default()
        }),
    }
}

fn with_thread(thread: &str) -> (AppState, RequestToken) {
    let (state, effects) = update(fresh_state(), Msg::ThreadChanged(Some(thread.to_string())));
    (state, resolve_token(&effects))
}

#[test]
fn new_thread_starts_loading_resolution() {
    init_logging();
    let (mut state, effects) = update(fresh_state(), Msg::ThreadChanged(Some("t_1".into())));

    assert_eq!(
        effects,
        vec![Effect::ResolveAnalysis {
            token: 1,
            thread_id: "t_1".to_string(),
        }]
    );
    let view = state.view();
    assert!(view.is_loading);
    assert_eq!(view.error, None);
    assert_eq!(view.thread_id.as_deref(), Some("t_1"));
    assert_eq!(view.placeholder, "Ask a question about the meeting...");
    assert!(state.consume_dirty());
}

#[test]
fn successful_resolution_publishes_transcript_and_summary() {
    init_logging();
    let (state, token) = with_thread("t_1");
    let (mut state, effects) = update(
        state,
        Msg::ResolutionFinished {
            token,
            result: Ok(payload("hello", "a short meeting")),
        },
    );

    assert!(effects.is_empty());
    let view = state.view();
    assert!(!view.is_loading);
    assert_eq!(view.transcript.as_deref(), Some("hello"));
    assert_eq!(view.summary.unwrap().summary, "a short meeting");
    assert!(state.consume_dirty());
}

#[test]
fn missing_fields_republish_as_none() {
    init_logging();
    let (state, token) = with_thread("t_1");
    let (state, _) = update(
        state,
        Msg::ResolutionFinished {
            token,
            result: Ok(AnalysisPayload::default()),
        },
    );
    let view = state.view();
    assert_eq!(view.transcript, None);
    assert_eq!(view.summary, None);
    assert_eq!(view.error, None);
}

#[test]
fn failure_keeps_previous_data() {
    init_logging();
    let (state, token) = with_thread("t_1");
    let (state, _) = update(
        state,
        Msg::ResolutionFinished {
            token,
            result: Ok(payload("kept", "kept summary")),
        },
    );

    let (state, effects) = update(state, Msg::TurnCompleted);
    let token = resolve_token(&effects);
    assert!(state.view().is_loading);
    // Previously displayed data stays visible while loading.
    assert_eq!(state.view().transcript.as_deref(), Some("kept"));

    let (state, _) = update(
        state,
        Msg::ResolutionFinished {
            token,
            result: Err("Failed to fetch meeting analysis: http status 500".to_string()),
        },
    );
    let view = state.view();
    assert!(!view.is_loading);
    assert!(!view.error.as_deref().unwrap_or_default().is_empty());
    assert_eq!(view.transcript.as_deref(), Some("kept"));
    assert_eq!(view.summary.unwrap().summary, "kept summary");
}

#[test]
fn empty_error_message_gets_generic_text() {
    init_logging();
    let (state, token) = with_thread("t_1");
    let (state, _) = update(
        state,
        Msg::ResolutionFinished {
            token,
            result: Err(String::new()),
        },
    );
    assert_eq!(
        state.view().error.as_deref(),
        Some("Failed to fetch meeting analysis.")
    );
}

#[test]
fn each_turn_triggers_one_resolution_and_cancels_the_previous() {
    init_logging();
    let (state, first) = with_thread("t_1");
    let (state, effects) = update(state, Msg::TurnCompleted);

    assert_eq!(
        effects,
        vec![
            Effect::CancelResolution { token: first },
            Effect::ResolveAnalysis {
                token: first + 1,
                thread_id: "t_1".to_string(),
            },
        ]
    );

    let (state, _) = update(
        state,
        Msg::ResolutionFinished {
            token: first + 1,
            result: Ok(payload("x", "y")),
        },
    );
    let (_, effects) = update(state, Msg::TurnCompleted);
    assert_eq!(
        effects,
        vec![Effect::ResolveAnalysis {
            token: first + 2,
            thread_id: "t_1".to_string(),
        }]
    );
}

#[test]
fn turn_without_thread_does_nothing() {
    init_logging();
    let (mut state, effects) = update(fresh_state(), Msg::TurnCompleted);
    assert!(effects.is_empty());
    assert!(!state.consume_dirty());
}

#[test]
fn stale_completion_never_overwrites_newer_result() {
    init_logging();
    let (state, slow) = with_thread("t_1");
    let (state, effects) = update(state, Msg::ThreadChanged(Some("t_2".into())));
    let fast = resolve_token(&effects);
    assert!(effects.contains(&Effect::CancelResolution { token: slow }));

    let (state, _) = update(
        state,
        Msg::ResolutionFinished {
            token: fast,
            result: Ok(payload("fresh", "fresh summary")),
        },
    );
    let (mut state, _) = update(
        state,
        Msg::ResolutionFinished {
            token: slow,
            result: Ok(payload("stale", "stale summary")),
        },
    );

    let view = state.view();
    assert_eq!(view.thread_id.as_deref(), Some("t_2"));
    assert_eq!(view.transcript.as_deref(), Some("fresh"));
    assert_eq!(view.summary.unwrap().summary, "fresh summary");
    assert!(state.consume_dirty());
    let (mut state, _) = update(
        state,
        Msg::ResolutionFinished {
            token: slow,
            result: Err("late failure".to_string()),
        },
    );
    assert!(!state.consume_dirty());
    assert_eq!(state.view().error, None);
}

#[test]
fn stale_completion_on_same_thread_is_discarded() {
    init_logging();
    let (state, older) = with_thread("t_1");
    let (state, effects) = update(state, Msg::TurnCompleted);
    let newer = resolve_token(&effects);

    let (state, _) = update(
        state,
        Msg::ResolutionFinished {
            token: older,
            result: Ok(payload("old", "old")),
        },
    );
    let view = state.view();
    assert!(view.is_loading);
    assert_eq!(view.transcript, None);

    let (state, _) = update(
        state,
        Msg::ResolutionFinished {
            token: newer,
            result: Ok(payload("new", "new")),
        },
    );
    assert_eq!(state.view().transcript.as_deref(), Some("new"));
}

#[test]
fn switching_thread_resets_state() {
    init_logging();
    let (state, token) = with_thread("t_1");
    let (state, _) = update(
        state,
        Msg::ResolutionFinished {
            token,
            result: Ok(payload("one", "one")),
        },
    );
    let (state, _) = update(state, Msg::ThreadChanged(Some("t_2".into())));
    let view = state.view();
    assert_eq!(view.transcript, None);
    assert_eq!(view.summary, None);
    assert!(view.is_loading);
}

#[test]
fn same_thread_id_is_not_a_transition() {
    init_logging();
    let (mut state, _) = with_thread("t_1");
    assert!(state.consume_dirty());
    let (mut state, effects) = update(state, Msg::ThreadChanged(Some("t_1".into())));
    assert!(effects.is_empty());
    assert!(!state.consume_dirty());
}

#[test]
fn clearing_thread_cancels_and_resets() {
    init_logging();
    let (state, token) = with_thread("t_1");
    let (state, effects) = update(state, Msg::ThreadChanged(None));

    assert_eq!(effects, vec![Effect::CancelResolution { token }]);
    let view = state.view();
    assert_eq!(view.thread_id, None);
    assert!(!view.is_loading);
    assert_eq!(view.placeholder, "Paste a meeting URL here...");

    let (state, effects) = update(state, Msg::ThreadChanged(Some(String::new())));
    assert!(effects.is_empty());
    assert_eq!(state.view().thread_id, None);
}

#[test]
fn resolving_twice_yields_same_state() {
    init_logging();
    let (state, token) = with_thread("t_1");
    let (state, _) = update(
        state,
        Msg::ResolutionFinished {
            token,
            result: Ok(payload("same", "same")),
        },
    );
    let first = state.view();

    let (state, effects) = update(state, Msg::TurnCompleted);
    let token = resolve_token(&effects);
    let (state, _) = update(
        state,
        Msg::ResolutionFinished {
            token,
            result: Ok(payload("same", "same")),
        },
    );
    let mut second = state.view();
    second.dirty = first.dirty;
    assert_eq!(first, second);
}

#[test]
fn in_flight_resolution_keeps_state_unsettled() {
    init_logging();
    let (state, token) = with_thread("t_1");
    assert!(!state.is_settled());

    let (state, _) = update(
        state,
        Msg::ResolutionFinished {
            token,
            result: Err("boom".to_string()),
        },
    );
    assert!(state.is_settled());

    let (state, _) = update(state, Msg::TurnCompleted);
    assert!(!state.is_settled());
    let (state, _) = update(state, Msg::ThreadChanged(None));
    assert!(state.is_settled());
}
