//! Error types for the Flatland evaluation scape.
//!
//! Three subsystems, three enums: configuration errors fail fast before
//! any episode is constructed, policy errors fail one evaluation, and
//! [`EvalError`] is the umbrella returned to the driver's caller.

use std::error::Error;
use std::fmt;

/// Errors detected while resolving an evaluation mode and layout.
///
/// All of these fire before an episode is constructed; a caller that
/// sees one has not consumed any step budget.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// The mode string did not name a known evaluation mode.
    UnknownMode {
        /// The unrecognized mode string.
        mode: String,
    },
    /// Benchmark mode requires a non-empty agent identifier.
    EmptyAgentId,
    /// A layout table violated a structural invariant.
    InvalidLayout {
        /// Description of the violated invariant.
        reason: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownMode { mode } => write!(f, "unknown evaluation mode '{mode}'"),
            Self::EmptyAgentId => write!(f, "benchmark mode requires a non-empty agent id"),
            Self::InvalidLayout { reason } => write!(f, "invalid layout: {reason}"),
        }
    }
}

impl Error for ConfigError {}

/// Errors from an agent policy while producing a control signal.
///
/// A policy failure is terminal for its own evaluation only; other
/// evaluations are unaffected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PolicyError {
    /// A required sensor slot is missing from the policy's registry.
    MissingSensor {
        /// Name of the missing slot.
        name: &'static str,
    },
    /// The named actuator is absent from the policy's registry.
    MissingActuator {
        /// Name of the missing actuator.
        name: String,
    },
    /// The actuator emitted a vector of unsupported width.
    BadActuatorArity {
        /// Number of channels the actuator emitted.
        got: usize,
    },
    /// The policy's decision function failed.
    ExecutionFailed {
        /// Human-readable description of the failure.
        reason: String,
    },
}

impl fmt::Display for PolicyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSensor { name } => write!(f, "required sensor slot '{name}' missing"),
            Self::MissingActuator { name } => write!(f, "actuator '{name}' missing"),
            Self::BadActuatorArity { got } => {
                write!(f, "actuator emitted {got} channels, expected 1 or 2")
            }
            Self::ExecutionFailed { reason } => write!(f, "policy execution failed: {reason}"),
        }
    }
}

impl Error for PolicyError {}

/// Terminal error for a single evaluation call.
///
/// There is no retry and no recovery: the caller decides how to treat
/// the failed agent (typically worst-case fitness).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalError {
    /// Mode/layout resolution failed before the episode was built.
    Config(ConfigError),
    /// The agent policy could not produce a control signal.
    Policy(PolicyError),
    /// The evaluation was cancelled before completing; no partial
    /// fitness is available.
    Cancelled,
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Policy(e) => write!(f, "policy: {e}"),
            Self::Cancelled => write!(f, "evaluation cancelled"),
        }
    }
}

impl Error for EvalError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Policy(e) => Some(e),
            Self::Cancelled => None,
        }
    }
}

impl From<ConfigError> for EvalError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<PolicyError> for EvalError {
    fn from(e: PolicyError) -> Self {
        Self::Policy(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats() {
        let e = ConfigError::UnknownMode {
            mode: "warp".into(),
        };
        assert_eq!(e.to_string(), "unknown evaluation mode 'warp'");

        let e = PolicyError::BadActuatorArity { got: 5 };
        assert_eq!(e.to_string(), "actuator emitted 5 channels, expected 1 or 2");

        assert_eq!(EvalError::Cancelled.to_string(), "evaluation cancelled");
    }

    #[test]
    fn eval_error_chains_source() {
        let e = EvalError::from(PolicyError::MissingActuator {
            name: "drive".into(),
        });
        assert!(e.source().is_some());
        assert!(EvalError::Cancelled.source().is_none());
    }
}
