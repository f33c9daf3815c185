//! Scripted step implementations.

use parking_lot::Mutex;
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use stepflow_core::{FlowResponse, ProcessContext, Rendered, Step, StepOutcome};

/// What a scripted step does on submission
#[derive(Debug, Clone, PartialEq)]
pub enum ForwardScript {
    /// Continue in linear order
    Complete,
    /// Jump to the named step
    Proceed(String),
    /// Answer with a terminal response
    Respond(FlowResponse),
    /// Produce no outcome at all
    Nothing,
}

#[derive(Debug, Default)]
struct Counters {
    displays: AtomicUsize,
    forwards: AtomicUsize,
}

/// Step with a configurable submission outcome
///
/// Display renders `<view>.html` with the current progress. Clones share
/// their invocation counters, so a test can keep a handle while the builder
/// owns the step.
#[derive(Debug, Clone)]
pub struct ScriptedStep {
    view: String,
    forward: Arc<Mutex<ForwardScript>>,
    active: bool,
    counters: Arc<Counters>,
}

impl ScriptedStep {
    /// Step completing on submission
    pub fn new(view: impl Into<String>) -> Self {
        Self {
            view: view.into(),
            forward: Arc::new(Mutex::new(ForwardScript::Complete)),
            active: true,
            counters: Arc::new(Counters::default()),
        }
    }

    /// Set the submission outcome
    pub fn on_forward(self, script: ForwardScript) -> Self {
        *self.forward.lock() = script;
        self
    }

    /// Change the submission outcome of a step that is already built in
    pub fn script(&self, script: ForwardScript) {
        *self.forward.lock() = script;
    }

    /// Mark the step inactive
    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    /// Number of display invocations
    pub fn displays(&self) -> usize {
        self.counters.displays.load(Ordering::SeqCst)
    }

    /// Number of submission invocations
    pub fn forwards(&self) -> usize {
        self.counters.forwards.load(Ordering::SeqCst)
    }

    /// Boxed clone for a process draft
    pub fn boxed(&self) -> Box<dyn Step> {
        Box::new(self.clone())
    }
}

impl Step for ScriptedStep {
    fn display_action(&self, context: &mut ProcessContext) -> StepOutcome {
        self.counters.displays.fetch_add(1, Ordering::SeqCst);
        Rendered::ok(
            format!("{}.html", self.view),
            json!({
                "step": context.current_step_name(),
                "progress": context.progress(),
            }),
        )
        .into()
    }

    fn forward_action(&self, _context: &mut ProcessContext) -> Option<StepOutcome> {
        self.counters.forwards.fetch_add(1, Ordering::SeqCst);
        match &*self.forward.lock() {
            ForwardScript::Complete => Some(self.complete().into()),
            ForwardScript::Proceed(step) => Some(self.proceed(step).into()),
            ForwardScript::Respond(response) => Some(response.clone().into()),
            ForwardScript::Nothing => None,
        }
    }

    fn is_active(&self) -> bool {
        self.active
    }
}
