//! Scheduling error types.

use thiserror::Error;

/// Errors that can occur while scheduling a deployment.
///
/// Rule errors fail the same way on every retry with the same input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchedulingError {
    #[error("rule must contain at least one service target config")]
    EmptyRule { index: usize },

    #[error("rule priority must not be negative")]
    NegativeRulePriority { index: usize, priority: i64 },

    /// Every nominated reference pointed to a config that does not exist.
    #[error("no service target config available")]
    NoServiceTargetConfigAvailable,

    /// The picker was handed an empty candidate set.
    #[error("no service target available")]
    NoServiceTargetAvailable,

    #[error("deployment not found: {0}")]
    DeploymentNotFound(String),

    #[error("service target config not found: {0}")]
    ServiceTargetConfigNotFound(String),
}

pub type SchedulingResult<T> = Result<T, SchedulingError>;
