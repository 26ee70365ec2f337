use std::io::{self, BufRead, Write};
use std::sync::{mpsc, Arc};
use std::thread;

use anyhow::Context;
use recap_core::{update, AppState, Msg};
use recap_engine::ReqwestClient;
use recap_logging::{recap_debug, recap_info};

use crate::cli::Args;
use crate::effects::EffectRunner;
use crate::render::{effect_lines, help_lines, welcome_lines, Renderer};

/// Everything the main loop reacts to: stdin commands and engine completions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoopEvent {
    Dispatch(Msg),
    /// Stdin reached end of file; exit once in-flight work has reported back.
    InputClosed,
    Quit,
    Help,
}

pub fn run(args: Args) -> anyhow::Result<()> {
    let client = ReqwestClient::new(args.engine_config()).context("building HTTP client")?;
    let (loop_tx, loop_rx) = mpsc::channel::<LoopEvent>();
    let runner = EffectRunner::new(Arc::new(client), loop_tx.clone());

    let mut state = AppState::new(args.pipeline_settings());
    let mut renderer = Renderer::default();
    let mut out = io::stdout().lock();

    print_lines(&mut out, &welcome_lines())?;
    print_lines(&mut out, &renderer.render(&state.view()))?;

    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            for event in parse_command(&line) {
                if loop_tx.send(event).is_err() {
                    return;
                }
            }
        }
        let _ = loop_tx.send(LoopEvent::InputClosed);
    });

    recap_info!("Meeting recap started against {}", args.api_base);
    let mut input_closed = false;
    while let Ok(event) = loop_rx.recv() {
        match event {
            LoopEvent::Quit => break,
            LoopEvent::Help => print_lines(&mut out, &help_lines())?,
            LoopEvent::InputClosed => {
                recap_debug!("Input closed; waiting for in-flight work");
                input_closed = true;
            }
            LoopEvent::Dispatch(msg) => {
                recap_debug!("Dispatch {:?}", msg);
                let (next, effects) = update(state, msg);
                state = next;

                for effect in runner.enqueue(effects) {
                    print_lines(&mut out, &effect_lines(&effect))?;
                }
                if state.consume_dirty() {
                    print_lines(&mut out, &renderer.render(&state.view()))?;
                }
            }
        }
        if should_exit(input_closed, &state) {
            break;
        }
    }

    recap_info!("Meeting recap exiting");
    Ok(())
}

/// After end of input the loop keeps draining engine events until nothing is
/// left in flight, so piped input still sees every run resolve.
fn should_exit(input_closed: bool, state: &AppState) -> bool {
    input_closed && state.is_settled()
}

fn print_lines(out: &mut impl Write, lines: &[String]) -> io::Result<()> {
    for line in lines {
        writeln!(out, "{line}")?;
    }
    out.flush()
}

/// Maps one line of terminal input to loop events. Anything that is not a
/// `:command` is typed into the chat box verbatim and submitted.
pub fn parse_command(line: &str) -> Vec<LoopEvent> {
    let trimmed = line.trim();
    let Some(command) = trimmed.strip_prefix(':') else {
        if trimmed.is_empty() {
            return Vec::new();
        }
        return vec![
            LoopEvent::Dispatch(Msg::InputChanged(line.to_string())),
            LoopEvent::Dispatch(Msg::UrlSubmitted),
        ];
    };

    let mut parts = command.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some("quit" | "q"), _) => vec![LoopEvent::Quit],
        (Some("help" | "h"), _) => vec![LoopEvent::Help],
        (Some("thread"), id) => vec![LoopEvent::Dispatch(Msg::ThreadChanged(
            id.map(ToOwned::to_owned),
        ))],
        (Some("turn"), _) => vec![LoopEvent::Dispatch(Msg::TurnCompleted)],
        _ => vec![LoopEvent::Help],
    }
}
