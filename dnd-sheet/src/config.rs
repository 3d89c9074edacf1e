//! Engine configuration.

use serde::{Deserialize, Serialize};

/// Knobs for a [`StatPipeline`](crate::pipeline::StatPipeline).
///
/// Deserializes from a partial JSON object; missing fields take their
/// defaults, so `{}` is a valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Compare granted ability score improvement points against the
    /// per-level cap and raise an advisory when it is exceeded.
    pub validate_improvements: bool,

    /// Emit each advisory as a `tracing` warning as well as returning it.
    pub log_advisories: bool,
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Turn the improvement cap check on or off.
    pub fn with_improvement_validation(mut self, enabled: bool) -> Self {
        self.validate_improvements = enabled;
        self
    }

    /// Turn advisory logging on or off.
    pub fn with_advisory_logging(mut self, enabled: bool) -> Self {
        self.log_advisories = enabled;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            validate_improvements: true,
            log_advisories: true,
        }
    }
}
