use crate::pipeline::{Pipeline, PipelineSettings};
use crate::resolver::Resolver;
use crate::view_model::{placeholder, AppViewModel};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    settings: PipelineSettings,
    input: String,
    pipeline: Pipeline,
    resolver: Resolver,
    dirty: bool,
}

impl AppState {
    pub fn new(settings: PipelineSettings) -> Self {
        Self {
            settings,
            input: String::new(),
            pipeline: Pipeline::default(),
            resolver: Resolver::default(),
            dirty: false,
        }
    }

    pub fn view(&self) -> AppViewModel {
        let analysis = self.resolver.state();
        AppViewModel {
            input: self.input.clone(),
            input_enabled: !self.pipeline.phase().is_busy(),
            placeholder: placeholder(self.resolver.thread_id().is_some()),
            phase: self.pipeline.phase(),
            steps: self.pipeline.log().steps().to_vec(),
            extracted_transcript: self.pipeline.transcript().map(ToOwned::to_owned),
            thread_id: self.resolver.thread_id().map(ToOwned::to_owned),
            transcript: analysis.transcript.clone(),
            summary: analysis.summary.clone(),
            is_loading: analysis.is_loading,
            error: analysis.error.clone(),
            dirty: self.dirty,
        }
    }

    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// True when no extraction run and no resolution is waiting on the engine.
    pub fn is_settled(&self) -> bool {
        !self.pipeline.phase().is_busy() && self.resolver.in_flight().is_none()
    }

    /// Returns whether anything observable changed since the last call.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn set_input(&mut self, input: String) {
        if self.input != input {
            self.input = input;
            self.mark_dirty();
        }
    }

    pub(crate) fn take_input(&mut self) -> String {
        std::mem::take(&mut self.input)
    }

    pub(crate) fn restore_input(&mut self, input: String) {
        self.input = input;
    }

    pub(crate) fn parts_mut(&mut self) -> (&PipelineSettings, &mut Pipeline, &mut Resolver) {
        (&self.settings, &mut self.pipeline, &mut self.resolver)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
