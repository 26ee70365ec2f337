use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputChanged(text) => {
            state.set_input(text);
            Vec::new()
        }
        Msg::UrlSubmitted => {
            let input = state.take_input();
            let (settings, pipeline, _) = state.parts_mut();
            match pipeline.submit(&input, settings) {
                Some(effects) => {
                    state.mark_dirty();
                    effects
                }
                None => {
                    // Keep whatever the user typed when the submission is refused.
                    state.restore_input(input);
                    Vec::new()
                }
            }
        }
        Msg::ValidationElapsed { run } => {
            let (settings, pipeline, _) = state.parts_mut();
            let outcome = pipeline.validation_elapsed(run, settings);
            applied(&mut state, outcome)
        }
        Msg::ExtractionFinished { run, result } => {
            let (_, pipeline, _) = state.parts_mut();
            let outcome = pipeline.extraction_finished(run, result);
            applied(&mut state, outcome)
        }
        Msg::ThreadChanged(thread_id) => {
            let (_, _, resolver) = state.parts_mut();
            let before = resolver.clone();
            let effects = resolver.thread_changed(thread_id);
            if *resolver != before {
                state.mark_dirty();
            }
            effects
        }
        Msg::TurnCompleted => {
            let (_, _, resolver) = state.parts_mut();
            let effects = resolver.turn_completed();
            if !effects.is_empty() {
                state.mark_dirty();
            }
            effects
        }
        Msg::ResolutionFinished { token, result } => {
            let (_, _, resolver) = state.parts_mut();
            if resolver.resolution_finished(token, result) {
                state.mark_dirty();
            }
            Vec::new()
        }
    };

    (state, effects)
}

fn applied(state: &mut AppState, outcome: Option<Vec<Effect>>) -> Vec<Effect> {
    match outcome {
        Some(effects) => {
            state.mark_dirty();
            effects
        }
        None => Vec::new(),
    }
}
