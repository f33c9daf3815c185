//! Ready-made scenarios, coordinators and contexts.

use crate::router::RecordingRouter;
use crate::steps::{ForwardScript, ScriptedStep};
use std::sync::Arc;
use stepflow_core::{
    Coordinator, FlowError, FlowSettings, MemoryFlowStorage, ProcessBuilder, ProcessContext,
    ProcessDraft, ProcessScenario, ScenarioRegistry,
};
use stepflow_session::{SessionId, SessionStore};

/// Alias of the checkout fixture
pub const CHECKOUT: &str = "checkout";

/// Completion route of the checkout fixture
pub const CHECKOUT_THANKYOU: &str = "checkout_thankyou";

/// Handles on the steps of the checkout fixture
///
/// `info` and `review` complete on submission, `payment` jumps to `review`.
#[derive(Debug, Clone)]
pub struct CheckoutSteps {
    /// First step
    pub info: ScriptedStep,
    /// Second step
    pub payment: ScriptedStep,
    /// Last step
    pub review: ScriptedStep,
}

impl CheckoutSteps {
    /// Steps with their default scripts
    pub fn new() -> Self {
        Self {
            info: ScriptedStep::new("info"),
            payment: ScriptedStep::new("payment")
                .on_forward(ForwardScript::Proceed("review".to_string())),
            review: ScriptedStep::new("review"),
        }
    }
}

impl Default for CheckoutSteps {
    fn default() -> Self {
        Self::new()
    }
}

/// The three step checkout: `info`, `payment`, `review`
#[derive(Debug, Clone)]
pub struct CheckoutScenario {
    steps: CheckoutSteps,
}

impl CheckoutScenario {
    /// Scenario over the given step handles
    pub fn new(steps: CheckoutSteps) -> Self {
        Self { steps }
    }
}

impl ProcessScenario for CheckoutScenario {
    fn build(&self, draft: &mut ProcessDraft<'_>) -> Result<(), FlowError> {
        draft
            .add("info", self.steps.info.boxed())?
            .add("payment", self.steps.payment.boxed())?
            .add("review", self.steps.review.boxed())?;
        draft.set_redirect(CHECKOUT_THANKYOU);
        Ok(())
    }
}

/// Everything a checkout test needs
pub struct CheckoutHarness {
    /// Coordinator with the checkout scenario registered
    pub coordinator: Coordinator,
    /// Router the coordinator generates URLs with
    pub router: RecordingRouter,
    /// Step handles
    pub steps: CheckoutSteps,
}

/// Coordinator with the checkout scenario registered and default settings
pub fn checkout_harness() -> CheckoutHarness {
    checkout_harness_with(FlowSettings::default())
}

/// Coordinator with the checkout scenario registered
pub fn checkout_harness_with(settings: FlowSettings) -> CheckoutHarness {
    let steps = CheckoutSteps::new();
    let router = RecordingRouter::new();

    let mut registry = ScenarioRegistry::new();
    let scenario: Arc<dyn ProcessScenario> = Arc::new(CheckoutScenario::new(steps.clone()));
    registry
        .register(CHECKOUT, scenario)
        .expect("fresh registry");

    let coordinator = Coordinator::new(Arc::new(router.clone()), ProcessBuilder::new(), registry)
        .with_settings(settings);

    CheckoutHarness {
        coordinator,
        router,
        steps,
    }
}

/// Context over fresh in-memory storage
pub fn memory_context() -> ProcessContext {
    ProcessContext::new(Box::new(MemoryFlowStorage::new()))
}

/// Context over the flows bag of a session
pub fn session_context(store: &SessionStore, session: &SessionId) -> Result<ProcessContext, FlowError> {
    Ok(ProcessContext::new(Box::new(store.flow_storage(session)?)))
}
