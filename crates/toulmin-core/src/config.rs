//! Engine configuration
//!
//! An explicit value object handed to the sequencer at construction.
//! There is no module-level mutable state: a process can run two
//! sequencers with different toggles side by side.

use serde::{Deserialize, Serialize};

/// Runtime configuration for the engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Master switch for the circuit breaker. False skips both strength
    /// checks (debug workflows); skipped checks are logged as bypassed.
    pub strict_mode: bool,

    /// Terminate when warrant strength is weak or irrelevant
    pub fail_on_weak_warrant: bool,

    /// Terminate when backing strength is weak or irrelevant
    pub fail_on_weak_backing: bool,

    /// Enable the consult-perspectives companion operation
    pub enable_council: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            strict_mode: true,
            fail_on_weak_warrant: true,
            fail_on_weak_backing: true,
            enable_council: true,
        }
    }
}

impl EngineConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the master circuit-breaker switch
    pub fn with_strict_mode(mut self, enabled: bool) -> Self {
        self.strict_mode = enabled;
        self
    }

    /// Toggle the warrant strength check
    pub fn with_fail_on_weak_warrant(mut self, enabled: bool) -> Self {
        self.fail_on_weak_warrant = enabled;
        self
    }

    /// Toggle the backing strength check
    pub fn with_fail_on_weak_backing(mut self, enabled: bool) -> Self {
        self.fail_on_weak_backing = enabled;
        self
    }

    /// Toggle the council companion operation
    pub fn with_council(mut self, enabled: bool) -> Self {
        self.enable_council = enabled;
        self
    }

    /// Read configuration from `TOULMIN_*` environment variables.
    ///
    /// Unset variables keep their defaults. Booleans treat `0`, `false`,
    /// `no`, and `off` (case-insensitive) as false; any other non-empty
    /// value is true.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            strict_mode: env_bool("TOULMIN_STRICT_MODE", defaults.strict_mode),
            fail_on_weak_warrant: env_bool(
                "TOULMIN_FAIL_ON_WEAK_WARRANT",
                defaults.fail_on_weak_warrant,
            ),
            fail_on_weak_backing: env_bool(
                "TOULMIN_FAIL_ON_WEAK_BACKING",
                defaults.fail_on_weak_backing,
            ),
            enable_council: env_bool("TOULMIN_ENABLE_COUNCIL", defaults.enable_council),
        }
    }
}

fn env_bool(name: &str, default: bool) -> bool {
    match std::env::var(name) {
        Ok(raw) => !matches!(raw.trim().to_lowercase().as_str(), "0" | "false" | "no" | "off"),
        Err(_) => default,
    }
}
