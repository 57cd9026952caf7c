//! Error types for incentive generation and application

use std::borrow::Cow;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum ConsensusError {
    /// A state invariant that upstream code guarantees did not hold.
    /// Aborts the current block production/validation attempt.
    #[error("Invariant violation: {0}")]
    InvariantViolation(Cow<'static, str>),

    #[error("Invalid chain parameters: {0}")]
    InvalidParameters(Cow<'static, str>),

    /// The operation evaluator rejected an operation
    #[error("Operation {index} rejected: {reason}")]
    OperationRejected {
        index: usize,
        reason: Cow<'static, str>,
    },

    #[error("Serialization error: {0}")]
    Serialization(Cow<'static, str>),

    #[error("Position index inconsistency: {0}")]
    IndexConsistency(Cow<'static, str>),
}

pub type Result<T> = std::result::Result<T, ConsensusError>;
