//! Mocks of the core collaborator traits.

use mockall::mock;
use stepflow_core::{
    FlowError, ProcessContext, ProcessStep, ProcessValidator, RouteParams, Step, StepOutcome,
    UrlGenerator,
};

// Generate the mock implementation for UrlGenerator
mock! {
    pub UrlGenerator {}

    impl UrlGenerator for UrlGenerator {
        fn generate(&self, route: &str, params: &RouteParams) -> Result<String, FlowError>;
    }
}

// Generate the mock implementation for ProcessValidator
mock! {
    pub ProcessValidator {}

    impl ProcessValidator for ProcessValidator {
        fn is_valid(&self, context: &ProcessContext) -> bool;
        fn response(&self, step: &ProcessStep) -> StepOutcome;
    }
}

// Generate the mock implementation for Step
mock! {
    pub Step {}

    impl Step for Step {
        fn display_action(&self, context: &mut ProcessContext) -> StepOutcome;
        fn forward_action(&self, context: &mut ProcessContext) -> Option<StepOutcome>;
        fn is_active(&self) -> bool;
    }
}
