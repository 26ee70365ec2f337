//! Meeting recap engine: HTTP clients and background effect execution.
mod api;
mod config;
mod engine;
mod fetch;
mod resolve;
mod types;

pub use api::MeetingApi;
pub use config::{EngineConfig, HttpSettings};
pub use engine::{ChannelEventSink, EngineHandle, EventSink};
pub use fetch::{Extractor, ReqwestClient};
pub use resolve::resolve_analysis;
pub use types::{EngineEvent, FailureKind, FetchError, ResolveError};
