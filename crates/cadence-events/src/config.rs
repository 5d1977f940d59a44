//! Dispatch configuration.
//!
//! ```toml
//! last_error = "clear_on_success"
//! catch_panics = true
//! trace_results = false
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{DispatchError, DispatchResult};

/// How a [`LastError`](crate::LastError) slot reacts to successful invocations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LastErrorPolicy {
    /// Keep the last failure until the next failure overwrites it
    #[default]
    Sticky,
    /// Clear the slot when the most recent invocation succeeded
    ClearOnSuccess,
}

/// Configuration shared by every dispatch path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchConfig {
    /// Last-error reset behavior
    #[serde(default)]
    pub last_error: LastErrorPolicy,

    /// Trap panics raised by events and record them as failures
    #[serde(default = "default_catch_panics")]
    pub catch_panics: bool,

    /// Log the number of values each event returned (trace level)
    #[serde(default)]
    pub trace_results: bool,
}

fn default_catch_panics() -> bool {
    true
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            last_error: LastErrorPolicy::default(),
            catch_panics: default_catch_panics(),
            trace_results: false,
        }
    }
}

impl DispatchConfig {
    /// Parse a configuration from TOML. Missing fields take their defaults.
    pub fn from_toml_str(input: &str) -> DispatchResult<Self> {
        toml::from_str(input).map_err(|e| DispatchError::config(e.to_string()))
    }

    /// Set the last-error policy
    pub fn with_last_error(mut self, policy: LastErrorPolicy) -> Self {
        self.last_error = policy;
        self
    }

    /// Enable or disable panic trapping
    pub fn with_catch_panics(mut self, catch_panics: bool) -> Self {
        self.catch_panics = catch_panics;
        self
    }

    /// Enable or disable result tracing
    pub fn with_trace_results(mut self, trace_results: bool) -> Self {
        self.trace_results = trace_results;
        self
    }
}
