use recap_core::{
    AppViewModel, Effect, MeetingData, PipelineStep, Role, StepStatus, GREETING, STARTER_PROMPTS,
};

const TRANSCRIPT_PREVIEW_CHARS: usize = 600;

/// Turns successive view snapshots into terminal lines, printing only what
/// changed since the previous snapshot.
#[derive(Debug, Default)]
pub struct Renderer {
    steps: Vec<PipelineStep>,
    prompt: Option<(bool, &'static str)>,
    thread_id: Option<String>,
    is_loading: bool,
    error: Option<String>,
    transcript: Option<String>,
    summary: Option<MeetingData>,
}

impl Renderer {
    pub fn render(&mut self, view: &AppViewModel) -> Vec<String> {
        let mut lines = Vec::new();

        for (index, step) in view.steps.iter().enumerate() {
            if self.steps.get(index) != Some(step) {
                lines.push(format_step(step));
            }
        }
        self.steps = view.steps.clone();

        let prompt = (view.input_enabled, view.placeholder);
        if self.prompt != Some(prompt) {
            self.prompt = Some(prompt);
            if view.input_enabled {
                lines.push(format!("({})", view.placeholder));
            }
        }

        if self.thread_id != view.thread_id {
            self.thread_id = view.thread_id.clone();
            lines.push(match &view.thread_id {
                Some(id) => format!("~ thread {id}"),
                None => "~ no active thread".to_string(),
            });
        }

        if view.is_loading && !self.is_loading {
            lines.push("~ loading meeting analysis...".to_string());
        }
        self.is_loading = view.is_loading;

        if view.error != self.error {
            if let Some(error) = &view.error {
                lines.push(format!("! {error}"));
            }
            self.error = view.error.clone();
        }

        if view.transcript != self.transcript {
            if let Some(transcript) = &view.transcript {
                lines.push("== Transcript ==".to_string());
                lines.push(preview(transcript));
            }
            self.transcript = view.transcript.clone();
        }

        if view.summary != self.summary {
            if let Some(summary) = &view.summary {
                lines.extend(summary_lines(summary));
            }
            self.summary = view.summary.clone();
        }

        lines
    }
}

pub fn welcome_lines() -> Vec<String> {
    let mut lines = vec![GREETING.to_string(), String::new()];
    for (label, prompt) in STARTER_PROMPTS {
        lines.push(format!("  * {label}: {prompt}"));
    }
    lines.push(String::new());
    lines.push("Supported: YouTube, Zoom Cloud Recordings. Type :help for commands.".to_string());
    lines
}

pub fn help_lines() -> Vec<String> {
    [
        "<link>          extract the transcript of a YouTube or Zoom recording",
        ":thread <id>    follow a conversation thread (fetches its analysis)",
        ":thread         stop following the current thread",
        ":turn           the agent finished a response; refresh the analysis",
        ":quit           exit",
    ]
    .iter()
    .map(|line| line.to_string())
    .collect()
}

pub fn effect_lines(effect: &Effect) -> Vec<String> {
    match effect {
        Effect::AnalysisStarted { run } => vec![format!("~ run #{run} started")],
        Effect::PublishTranscript { transcript, .. } => {
            vec!["== Extracted transcript ==".to_string(), preview(transcript)]
        }
        _ => Vec::new(),
    }
}

fn format_step(step: &PipelineStep) -> String {
    match step.role {
        Role::User => format!("you> {}", step.text),
        Role::Agent => format!("bot> {}", step.text),
        Role::System => {
            let marker = match step.status {
                Some(StepStatus::Pending) => " .. ",
                Some(StepStatus::Success) => " ok ",
                Some(StepStatus::Failure) => "fail",
                None => "    ",
            };
            format!("[{marker}] {}", step.text)
        }
    }
}

fn preview(text: &str) -> String {
    match text.char_indices().nth(TRANSCRIPT_PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}... ({} chars)", &text[..cut], text.chars().count()),
        None => text.to_string(),
    }
}

/// Plain-text rendition of the structured summary; absent sections are skipped.
pub fn summary_lines(data: &MeetingData) -> Vec<String> {
    let mut lines = vec![format!(
        "== {} ==",
        data.metadata.title.as_deref().unwrap_or("Untitled Meeting")
    )];

    let mut facts = Vec::new();
    if let Some(date) = &data.metadata.date {
        facts.push(format!("Date: {date}"));
    }
    if let Some(project) = &data.metadata.project {
        facts.push(format!("Project: {project}"));
    }
    if let Some(priority) = &data.insights.priority {
        facts.push(format!("Priority: {priority}"));
    }
    if !facts.is_empty() {
        lines.push(facts.join(" | "));
    }

    if !data.summary.is_empty() {
        lines.push("Executive Summary".to_string());
        lines.push(format!("  {}", data.summary));
    }

    if !data.action_items.is_empty() {
        lines.push(format!("Action Items ({})", data.action_items.len()));
        for item in &data.action_items {
            let mut line = format!("  - {}", item.task.as_deref().unwrap_or("(unspecified)"));
            if let Some(owner) = &item.owner {
                line.push_str(&format!(" [{owner}]"));
            }
            if let Some(due) = &item.due {
                line.push_str(&format!(" due {due}"));
            }
            lines.push(line);
        }
    }

    push_list(&mut lines, "Key Decisions", data.insights.decisions.as_deref());
    push_list(&mut lines, "Topics", data.insights.topics.as_deref());
    if let Some(notes) = &data.insights.notes {
        lines.push(format!("Notes: {notes}"));
    }

    if !data.attendees.is_empty() {
        lines.push(format!("Attendees: {}", data.attendees.join(", ")));
    }
    lines
}

fn push_list(lines: &mut Vec<String>, heading: &str, items: Option<&[String]>) {
    let Some(items) = items.filter(|items| !items.is_empty()) else {
        return;
    };
    lines.push(heading.to_string());
    lines.extend(items.iter().map(|item| format!("  * {item}")));
}
