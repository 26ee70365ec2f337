use crate::{MeetingData, PipelinePhase, PipelineStep};

pub const GREETING: &str =
    "I am your AI Meeting Secretary. Paste a Zoom or YouTube link, and I will extract the insights.";

/// Starter prompts offered before the first message: (label, prompt).
pub const STARTER_PROMPTS: [(&str, &str); 3] = [
    (
        "Analyze YouTube Video",
        "Here is a YouTube link I want to analyze: ",
    ),
    (
        "Zoom Recording",
        "I have a Zoom cloud recording to process: ",
    ),
    (
        "Extract Action Items",
        "Can you list the key action items from the last transcript?",
    ),
];

pub fn placeholder(has_thread: bool) -> &'static str {
    if has_thread {
        "Ask a question about the meeting..."
    } else {
        "Paste a meeting URL here..."
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub input: String,
    /// False while an extraction run is in flight.
    pub input_enabled: bool,
    pub placeholder: &'static str,
    pub phase: PipelinePhase,
    pub steps: Vec<PipelineStep>,
    /// Transcript of the latest successful extraction run.
    pub extracted_transcript: Option<String>,
    pub thread_id: Option<String>,
    pub transcript: Option<String>,
    pub summary: Option<MeetingData>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub dirty: bool,
}
