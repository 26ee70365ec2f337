use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    System,
    Agent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Pending,
    Success,
    Failure,
}

impl StepStatus {
    pub fn is_resolved(self) -> bool {
        !matches!(self, StepStatus::Pending)
    }
}

/// One entry of the user-visible progress log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineStep {
    pub role: Role,
    pub text: String,
    pub status: Option<StepStatus>,
}

impl PipelineStep {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
            status: None,
        }
    }

    pub fn agent(text: impl Into<String>) -> Self {
        Self {
            role: Role::Agent,
            text: text.into(),
            status: None,
        }
    }

    pub fn pending(text: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            text: text.into(),
            status: Some(StepStatus::Pending),
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == Some(StepStatus::Pending)
    }
}

/// In-place change applied to the most recent step.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StepPatch {
    pub text: Option<String>,
    pub status: Option<StepStatus>,
}

impl StepPatch {
    pub fn succeed(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            status: Some(StepStatus::Success),
        }
    }

    pub fn fail(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            status: Some(StepStatus::Failure),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StepError {
    #[error("step log is empty")]
    Empty,
    #[error("step #{index} is not a pending system step")]
    NotPending { index: usize },
    #[error("step #{index} is still pending")]
    PendingOpen { index: usize },
    #[error("only system steps carry a status")]
    StatusOnNonSystem,
}

/// Ordered progress log: append-only, except that the most recent pending
/// system step may be mutated in place.
///
/// At most one step is pending at a time and resolved steps never change.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StepLog {
    steps: Vec<PipelineStep>,
}

impl StepLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn steps(&self) -> &[PipelineStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn last(&self) -> Option<&PipelineStep> {
        self.steps.last()
    }

    /// Most recent system-role step, skipping trailing user/agent messages.
    pub fn last_system(&self) -> Option<&PipelineStep> {
        self.steps.iter().rev().find(|step| step.role == Role::System)
    }

    pub fn pending_index(&self) -> Option<usize> {
        self.steps.iter().rposition(PipelineStep::is_pending)
    }

    pub fn append_step(&mut self, step: PipelineStep) -> Result<(), StepError> {
        if step.role != Role::System && step.status.is_some() {
            return Err(StepError::StatusOnNonSystem);
        }
        if step.is_pending() {
            if let Some(index) = self.pending_index() {
                return Err(StepError::PendingOpen { index });
            }
        }
        self.steps.push(step);
        Ok(())
    }

    pub fn update_last_step(&mut self, patch: StepPatch) -> Result<(), StepError> {
        let index = self.steps.len().checked_sub(1).ok_or(StepError::Empty)?;
        let last = &mut self.steps[index];
        if last.role != Role::System || !last.is_pending() {
            return Err(StepError::NotPending { index });
        }
        if let Some(text) = patch.text {
            last.text = text;
        }
        if let Some(status) = patch.status {
            last.status = Some(status);
        }
        Ok(())
    }
}
