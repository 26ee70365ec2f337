use recap_logging::{recap_debug, recap_warn};

use crate::{AnalysisPayload, AnalysisState, Effect};

/// Monotonically increasing identifier of a resolver invocation.
pub type RequestToken = u64;

/// Thread-to-analysis resolver: owns the [`AnalysisState`] of the active
/// conversation thread and guards it against out-of-order completions.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Resolver {
    thread_id: Option<String>,
    state: AnalysisState,
    in_flight: Option<RequestToken>,
    last_token: RequestToken,
}

impl Resolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn thread_id(&self) -> Option<&str> {
        self.thread_id.as_deref()
    }

    pub fn state(&self) -> &AnalysisState {
        &self.state
    }

    pub fn in_flight(&self) -> Option<RequestToken> {
        self.in_flight
    }

    /// Switches the active thread. A new non-empty id resets the state and
    /// starts a resolution; `None` (or an empty id) clears everything.
    pub fn thread_changed(&mut self, thread_id: Option<String>) -> Vec<Effect> {
        let thread_id = thread_id.filter(|id| !id.is_empty());
        if thread_id == self.thread_id {
            return Vec::new();
        }

        recap_debug!(
            "Thread changed from {:?} to {:?}",
            self.thread_id,
            thread_id
        );
        let mut effects = self.cancel_in_flight();
        self.thread_id = thread_id;
        self.state = AnalysisState::default();
        if self.thread_id.is_some() {
            effects.extend(self.resolve());
        }
        effects
    }

    /// An agent response turn finished; re-fetch for the active thread.
    pub fn turn_completed(&mut self) -> Vec<Effect> {
        if self.thread_id.is_none() {
            recap_debug!("Turn completed without an active thread; nothing to resolve");
            return Vec::new();
        }
        let mut effects = self.cancel_in_flight();
        effects.extend(self.resolve());
        effects
    }

    /// Applies a completion. Returns `false` when the token was superseded.
    pub fn resolution_finished(
        &mut self,
        token: RequestToken,
        result: Result<AnalysisPayload, String>,
    ) -> bool {
        if self.in_flight != Some(token) {
            recap_debug!(
                "Discarding stale resolution token={} (latest={:?})",
                token,
                self.in_flight
            );
            return false;
        }

        self.in_flight = None;
        self.state.is_loading = false;
        match result {
            Ok(payload) => {
                self.state.transcript = payload.transcript;
                self.state.summary = payload.metadata;
                self.state.error = None;
            }
            Err(message) => {
                recap_warn!("Resolution token={} failed: {}", token, message);
                self.state.error = Some(if message.is_empty() {
                    "Failed to fetch meeting analysis.".to_string()
                } else {
                    message
                });
            }
        }
        true
    }

    fn resolve(&mut self) -> Vec<Effect> {
        let Some(thread_id) = self.thread_id.clone() else {
            return Vec::new();
        };
        self.last_token += 1;
        let token = self.last_token;
        self.in_flight = Some(token);
        self.state.is_loading = true;
        self.state.error = None;
        recap_debug!("Resolving thread={} token={}", thread_id, token);
        vec![Effect::ResolveAnalysis { token, thread_id }]
    }

    fn cancel_in_flight(&mut self) -> Vec<Effect> {
        match self.in_flight.take() {
            Some(token) => {
                self.state.is_loading = false;
                vec![Effect::CancelResolution { token }]
            }
            None => Vec::new(),
        }
    }
}
