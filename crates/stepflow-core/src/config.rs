//! Settings for the navigation core
//!
//! Defaults can be overridden from the environment (`STEPFLOW_*`) or from a
//! YAML document.

use crate::FlowError;
use serde::{Deserialize, Serialize};
use std::env;
use tracing::{info, warn};

/// Route used for step display when a process declares none
pub const DEFAULT_DISPLAY_ROUTE: &str = "stepflow_display";

/// How passthrough query parameters merge with route-owned parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterPrecedence {
    /// `stepName` and `scenarioAlias` always win over query parameters, on
    /// both the custom and the default display route
    #[default]
    RouteWins,

    /// Query parameters override everything on a custom display route, and
    /// lose to `scenarioAlias`/`stepName` on the default route
    Legacy,
}

impl std::str::FromStr for ParameterPrecedence {
    type Err = FlowError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "route_wins" => Ok(ParameterPrecedence::RouteWins),
            "legacy" => Ok(ParameterPrecedence::Legacy),
            other => Err(FlowError::Configuration(format!(
                "Unknown parameter precedence: {}",
                other
            ))),
        }
    }
}

/// Navigation settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowSettings {
    /// Route used for step display when a process declares none
    #[serde(default = "default_display_route")]
    pub default_display_route: String,

    /// Merge order for display route parameters
    #[serde(default)]
    pub parameter_precedence: ParameterPrecedence,

    /// Session key the flows bag is stored under
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Separator of nested session keys
    #[serde(default = "default_namespace_character")]
    pub namespace_character: char,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_display_route() -> String {
    DEFAULT_DISPLAY_ROUTE.to_string()
}

fn default_storage_key() -> String {
    "_stepflow_flow_bag".to_string()
}

fn default_namespace_character() -> char {
    '/'
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for FlowSettings {
    fn default() -> Self {
        Self {
            default_display_route: default_display_route(),
            parameter_precedence: ParameterPrecedence::default(),
            storage_key: default_storage_key(),
            namespace_character: default_namespace_character(),
            log_level: default_log_level(),
        }
    }
}

impl FlowSettings {
    /// Load settings from defaults and environment variables
    pub fn load() -> Self {
        let mut settings = Self::default();
        settings.apply_env(|key| env::var(key).ok());
        info!(
            display_route = %settings.default_display_route,
            precedence = ?settings.parameter_precedence,
            "Flow settings loaded"
        );
        settings
    }

    /// Parse settings from YAML; missing fields take their defaults
    pub fn from_yaml(yaml: &str) -> Result<Self, FlowError> {
        let settings: FlowSettings = serde_yaml::from_str(yaml)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check the settings for values the core cannot work with
    pub fn validate(&self) -> Result<(), FlowError> {
        if self.default_display_route.trim().is_empty() {
            return Err(FlowError::Configuration(
                "default_display_route must not be empty".to_string(),
            ));
        }
        if self.storage_key.trim().is_empty() {
            return Err(FlowError::Configuration(
                "storage_key must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Install the global tracing subscriber
    ///
    /// `RUST_LOG` takes precedence over the configured log level.
    pub fn init_tracing(&self) -> Result<(), FlowError> {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&self.log_level));

        fmt()
            .with_env_filter(filter)
            .with_target(true)
            .try_init()
            .map_err(|e| FlowError::Configuration(format!("Failed to initialize tracing: {}", e)))
    }

    fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(route) = lookup("STEPFLOW_DISPLAY_ROUTE") {
            self.default_display_route = route;
        }

        if let Some(precedence) = lookup("STEPFLOW_PARAMETER_PRECEDENCE") {
            match precedence.parse() {
                Ok(precedence) => self.parameter_precedence = precedence,
                Err(_) => warn!("Invalid STEPFLOW_PARAMETER_PRECEDENCE value: {}", precedence),
            }
        }

        if let Some(key) = lookup("STEPFLOW_STORAGE_KEY") {
            self.storage_key = key;
        }

        if let Some(separator) = lookup("STEPFLOW_NAMESPACE_CHARACTER") {
            let mut chars = separator.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => self.namespace_character = c,
                _ => warn!("Invalid STEPFLOW_NAMESPACE_CHARACTER value: {}", separator),
            }
        }

        if let Some(level) = lookup("STEPFLOW_LOG_LEVEL") {
            self.log_level = level;
        }
    }
}
