use std::time::Duration;

use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub redirect_limit: usize,
    pub max_bytes: u64,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            redirect_limit: 5,
            max_bytes: 10 * 1024 * 1024,
        }
    }
}

/// Engine configuration: HTTP behaviour plus the meeting API base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub http: HttpSettings,
    /// Base of the `/api/meeting/...` and `/api/analysis` endpoints.
    pub api_base: Url,
}

impl EngineConfig {
    pub fn new(api_base: Url) -> Self {
        Self {
            http: HttpSettings::default(),
            api_base,
        }
    }
}
