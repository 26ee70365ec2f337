use std::time::Duration;

use clap::Parser;
use log::LevelFilter;
use recap_core::{ExtractionEndpoints, PipelineSettings};
use recap_engine::{EngineConfig, HttpSettings};
use recap_logging::LogDestination;
use url::Url;

/// Paste a meeting recording link, get back its transcript and summary.
#[derive(Debug, Parser)]
#[command(name = "meeting-recap", version)]
pub struct Args {
    /// Base URL of the chat backend serving /api/meeting and /api/analysis.
    #[arg(long, env = "RECAP_API_BASE", default_value = "http://127.0.0.1:8000/")]
    pub api_base: Url,

    /// YouTube transcript extraction endpoint (GET ?url=...).
    #[arg(
        long,
        env = "RECAP_YOUTUBE_ENDPOINT",
        default_value = "http://127.0.0.1:8080/extract-youtube"
    )]
    pub youtube_endpoint: Url,

    /// Zoom cloud recording extraction endpoint (POST {"url": ...}).
    #[arg(
        long,
        env = "RECAP_ZOOM_ENDPOINT",
        default_value = "http://127.0.0.1:8080/extract-zoom"
    )]
    pub zoom_endpoint: Url,

    /// Pause between "checking" and the validation verdict, in milliseconds.
    #[arg(long, env = "RECAP_VALIDATION_DELAY_MS", default_value_t = 800)]
    pub validation_delay_ms: u64,

    /// Timeout for every outbound request, in seconds.
    #[arg(long, env = "RECAP_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    /// Where log output goes: file, terminal or both.
    #[arg(long, env = "RECAP_LOG", default_value = "file")]
    pub log: LogDestination,

    /// Log at debug level.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn log_level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        }
    }

    pub fn pipeline_settings(&self) -> PipelineSettings {
        PipelineSettings {
            validation_delay: Duration::from_millis(self.validation_delay_ms),
            endpoints: ExtractionEndpoints {
                video_platform: self.youtube_endpoint.clone(),
                cloud_recording: self.zoom_endpoint.clone(),
            },
        }
    }

    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            http: HttpSettings {
                request_timeout: Duration::from_secs(self.timeout_secs),
                ..HttpSettings::default()
            },
            api_base: self.api_base.clone(),
        }
    }
}
