use crate::domain::context::ProcessContext;
use crate::types::FlowResponse;
use std::fmt;

/// Outcome signalling "this step is done, continue the flow"
///
/// Without a next step name the coordinator follows the linear order (or
/// completes the process on the last step). With a name it jumps there.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionResult {
    next_step_name: Option<String>,
}

impl ActionResult {
    /// Continue with the linear order
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Jump to the named step
    #[inline]
    pub fn jump_to(next_step_name: impl Into<String>) -> Self {
        Self {
            next_step_name: Some(next_step_name.into()),
        }
    }

    /// Explicit next step, if any
    #[inline]
    pub fn next_step_name(&self) -> Option<&str> {
        self.next_step_name.as_deref()
    }
}

/// What a step action hands back to the coordinator
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    /// Terminal response, returned to the caller unmodified
    Response(FlowResponse),

    /// Continue the flow
    Action(ActionResult),
}

impl From<ActionResult> for StepOutcome {
    fn from(result: ActionResult) -> Self {
        StepOutcome::Action(result)
    }
}

impl From<FlowResponse> for StepOutcome {
    fn from(response: FlowResponse) -> Self {
        StepOutcome::Response(response)
    }
}

impl From<crate::types::Rendered> for StepOutcome {
    fn from(rendered: crate::types::Rendered) -> Self {
        StepOutcome::Response(rendered.into())
    }
}

/// A unit of work in a process
///
/// Steps are stateless across requests; everything that has to survive a
/// request lives in the [`ProcessContext`] and its storage.
pub trait Step: Send + Sync {
    /// Produce the view (or a side effect) for a GET-like access.
    fn display_action(&self, context: &mut ProcessContext) -> StepOutcome;

    /// Handle a submission. `None` is a defect in the step and is reported as
    /// [`crate::FlowError::InvalidStepOutcome`].
    fn forward_action(&self, _context: &mut ProcessContext) -> Option<StepOutcome> {
        Some(self.complete().into())
    }

    /// Inactive steps are left out when the process is built.
    fn is_active(&self) -> bool {
        true
    }

    /// Proceed to the next step in order.
    fn complete(&self) -> ActionResult {
        ActionResult::new()
    }

    /// Proceed to the given step.
    fn proceed(&self, next_step_name: &str) -> ActionResult {
        ActionResult::jump_to(next_step_name)
    }
}

/// A step bound to its name inside one process
pub struct ProcessStep {
    name: String,
    step: Box<dyn Step>,
}

impl ProcessStep {
    /// Bind a step to a name
    pub fn new(name: impl Into<String>, step: Box<dyn Step>) -> Self {
        Self {
            name: name.into(),
            step,
        }
    }

    /// Step name, unique within its process
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// See [`Step::display_action`]
    pub fn display_action(&self, context: &mut ProcessContext) -> StepOutcome {
        self.step.display_action(context)
    }

    /// See [`Step::forward_action`]
    pub fn forward_action(&self, context: &mut ProcessContext) -> Option<StepOutcome> {
        self.step.forward_action(context)
    }

    /// See [`Step::is_active`]
    #[inline]
    pub fn is_active(&self) -> bool {
        self.step.is_active()
    }

    /// See [`Step::complete`]
    #[inline]
    pub fn complete(&self) -> ActionResult {
        self.step.complete()
    }

    /// See [`Step::proceed`]
    #[inline]
    pub fn proceed(&self, next_step_name: &str) -> ActionResult {
        self.step.proceed(next_step_name)
    }
}

impl fmt::Debug for ProcessStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProcessStep")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
