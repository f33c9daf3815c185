//! Session-scoped navigation state
//!
//! The context binds the process built for the current request to the
//! session storage that survives between requests. Only step names are
//! persisted; the history is stored under [`HISTORY_KEY`] in a storage domain
//! derived from the scenario alias, so closing a context wipes exactly one
//! scenario's data.

use crate::domain::process::Process;
use crate::domain::step::ProcessStep;
use crate::domain::storage::FlowStorage;
use crate::FlowError;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Storage key of the step-name history
pub const HISTORY_KEY: &str = "history";

/// Storage domain used for a scenario alias
pub fn storage_domain(scenario_alias: &str) -> String {
    format!("{:x}", md5::compute(scenario_alias.as_bytes()))
}

/// Lifecycle of a context within one request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextState {
    /// No process bound yet
    Uninitialized,

    /// Process and current step bound
    Initialized,

    /// Flow state cleared; the process stays bound
    Closed,
}

/// Navigation state for one session and one scenario
pub struct ProcessContext {
    storage: Box<dyn FlowStorage>,
    process: Option<Arc<Process>>,
    current_step: Option<usize>,
    next_step_override: Option<usize>,
    state: ContextState,
}

impl ProcessContext {
    /// Create a context over a session storage
    pub fn new(storage: Box<dyn FlowStorage>) -> Self {
        Self {
            storage,
            process: None,
            current_step: None,
            next_step_override: None,
            state: ContextState::Uninitialized,
        }
    }

    /// Bind a process and the requested step
    ///
    /// Does not look at the history; see [`ProcessContext::rewind_history`].
    pub fn initialize(&mut self, process: Arc<Process>, step_name: &str) -> Result<(), FlowError> {
        let index = process
            .step_index(step_name)
            .ok_or_else(|| FlowError::step_not_found(process.scenario_alias(), step_name))?;

        self.storage.initialize(&storage_domain(process.scenario_alias()));
        debug!(
            scenario = %process.scenario_alias(),
            step = %step_name,
            "Context initialized"
        );

        self.process = Some(process);
        self.current_step = Some(index);
        self.next_step_override = None;
        self.state = ContextState::Initialized;
        Ok(())
    }

    /// Current lifecycle state
    #[inline]
    pub fn state(&self) -> ContextState {
        self.state
    }

    /// Bound process
    pub fn process(&self) -> Result<&Process, FlowError> {
        self.process.as_deref().ok_or(FlowError::ContextNotInitialized)
    }

    /// Active step, `None` before initialization and after closing
    pub fn current_step(&self) -> Option<&ProcessStep> {
        let process = self.process.as_deref()?;
        process.step_at(self.current_step?)
    }

    /// Name of the active step
    pub fn current_step_name(&self) -> Option<&str> {
        self.current_step().map(ProcessStep::name)
    }

    /// Step preceding the active one in traversal order
    pub fn previous_step(&self) -> Option<&ProcessStep> {
        let process = self.process.as_deref()?;
        let index = self.current_step?.checked_sub(1)?;
        process.step_at(index)
    }

    /// Step the flow continues with: the explicit jump target if one was
    /// set, otherwise the next step in traversal order.
    pub fn next_step(&self) -> Option<&ProcessStep> {
        let process = self.process.as_deref()?;
        let index = match self.next_step_override {
            Some(index) => index,
            None => self.current_step? + 1,
        };
        process.step_at(index)
    }

    /// Override the next step with an explicit jump target
    pub fn set_next_step_by_name(&mut self, name: &str) -> Result<(), FlowError> {
        let process = self.process()?;
        let index = process
            .step_index(name)
            .ok_or_else(|| FlowError::step_not_found(process.scenario_alias(), name))?;
        self.next_step_override = Some(index);
        Ok(())
    }

    /// Whether the active step is the first in traversal order
    pub fn is_first_step(&self) -> bool {
        self.current_step == Some(0)
    }

    /// Whether the active step is the last in traversal order
    pub fn is_last_step(&self) -> bool {
        match (self.process.as_deref(), self.current_step) {
            (Some(process), Some(index)) => index + 1 == process.count_steps(),
            _ => false,
        }
    }

    /// Completion percentage of the active step, rounded down
    pub fn progress(&self) -> u8 {
        match (self.process.as_deref(), self.current_step) {
            (Some(process), Some(index)) if process.count_steps() > 0 => {
                ((index + 1) * 100 / process.count_steps()) as u8
            }
            _ => 0,
        }
    }

    /// Recorded step names, oldest first
    ///
    /// Names the bound process does not know (e.g. after a scenario changed
    /// between deployments) are dropped.
    pub fn step_history(&self) -> Result<Vec<String>, FlowError> {
        let process = self.process()?;
        let stored = match self.storage.get(HISTORY_KEY)? {
            Some(value) => serde_json::from_value::<Vec<String>>(value)?,
            None => return Ok(Vec::new()),
        };

        let total = stored.len();
        let history: Vec<String> = stored
            .into_iter()
            .filter(|name| process.has_step(name))
            .collect();
        if history.len() != total {
            warn!(
                scenario = %process.scenario_alias(),
                dropped = total - history.len(),
                "Dropped unknown steps from history"
            );
        }
        Ok(history)
    }

    /// Replace the recorded history
    pub fn set_step_history(&mut self, history: Vec<String>) -> Result<(), FlowError> {
        let process = self.process()?;
        if let Some(unknown) = history.iter().find(|name| !process.has_step(name)) {
            return Err(FlowError::step_not_found(process.scenario_alias(), unknown));
        }
        self.storage.set(HISTORY_KEY, Value::from(history))
    }

    /// Append a step name to the history
    pub fn add_step_to_history(&mut self, name: &str) -> Result<(), FlowError> {
        let mut history = self.step_history()?;
        history.push(name.to_string());
        self.set_step_history(history)
    }

    /// Truncate the history so the active step is its last entry
    ///
    /// Fails with [`FlowError::HistoryLookupFailed`] when the active step was
    /// never recorded; the stored history is left untouched in that case.
    pub fn rewind_history(&mut self) -> Result<(), FlowError> {
        let current = self
            .current_step_name()
            .ok_or(FlowError::ContextNotInitialized)?
            .to_string();
        let mut history = self.step_history()?;

        while let Some(top) = history.last() {
            if *top == current {
                break;
            }
            history.pop();
        }

        if history.is_empty() {
            return Err(FlowError::HistoryLookupFailed { step: current });
        }

        debug!(step = %current, history_len = history.len(), "History rewound");
        self.set_step_history(history)
    }

    /// Whether step logic may run for the active step
    ///
    /// Delegates to the process validator when there is one. Otherwise the
    /// context is valid when nothing was recorded yet or the active step is
    /// part of the history.
    pub fn is_valid(&self) -> Result<bool, FlowError> {
        let process = self.process()?;
        if let Some(validator) = process.validator() {
            return Ok(validator.is_valid(self));
        }

        let history = self.step_history()?;
        Ok(history.is_empty()
            || self
                .current_step_name()
                .map(|name| history.iter().any(|entry| entry == name))
                .unwrap_or(false))
    }

    /// Clear the flow's stored state and release the active step
    pub fn close(&mut self) -> Result<(), FlowError> {
        self.process()?;
        self.storage.clear()?;
        self.current_step = None;
        self.next_step_override = None;
        self.state = ContextState::Closed;
        debug!("Context closed");
        Ok(())
    }

    /// Storage for per-flow data kept by steps
    #[inline]
    pub fn storage(&self) -> &dyn FlowStorage {
        self.storage.as_ref()
    }

    /// Mutable storage for per-flow data kept by steps
    #[inline]
    pub fn storage_mut(&mut self) -> &mut dyn FlowStorage {
        self.storage.as_mut()
    }
}

impl fmt::Debug for ProcessContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProcessContext")
            .field("state", &self.state)
            .field(
                "scenario",
                &self.process.as_deref().map(Process::scenario_alias),
            )
            .field("current_step", &self.current_step_name())
            .field("next_step", &self.next_step().map(ProcessStep::name))
            .finish()
    }
}
