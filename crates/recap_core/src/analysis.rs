use serde::{Deserialize, Deserializer, Serialize};

/// Structured meeting summary produced by the external agent service.
///
/// Every field tolerates being absent or `null` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MeetingData {
    #[serde(default, deserialize_with = "null_as_default")]
    pub metadata: MeetingMetadata,
    #[serde(default, deserialize_with = "present_items")]
    pub attendees: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub summary: String,
    #[serde(default, deserialize_with = "present_items")]
    pub action_items: Vec<ActionItem>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub insights: Insights,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MeetingMetadata {
    #[serde(default, rename = "meeting_title")]
    pub title: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub project: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ActionItem {
    #[serde(default)]
    pub task: Option<String>,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub due: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Insights {
    #[serde(default, deserialize_with = "optional_items")]
    pub topics: Option<Vec<String>>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default, deserialize_with = "optional_items")]
    pub decisions: Option<Vec<String>>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Body of the meeting analysis endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AnalysisPayload {
    #[serde(default)]
    pub transcript: Option<String>,
    #[serde(default)]
    pub metadata: Option<MeetingData>,
}

/// Transcript obtained from an extraction service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionResult {
    pub transcript: String,
}

/// Per-thread analysis state exposed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AnalysisState {
    pub transcript: Option<String>,
    pub summary: Option<MeetingData>,
    pub is_loading: bool,
    pub error: Option<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Lists drop `null` elements instead of failing the whole payload.
fn optional_items<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let items = Option::<Vec<Option<T>>>::deserialize(deserializer)?;
    Ok(items.map(|items| items.into_iter().flatten().collect()))
}

fn present_items<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(optional_items(deserializer)?.unwrap_or_default())
}
