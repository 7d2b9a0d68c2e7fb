//! Kernel error types.
//!
//! Every failure mode has a named variant. No stringly-typed errors.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum KernelError {
    #[error("cannot compute thresholds from an empty population")]
    EmptyPopulation,
}

/// Result type alias for kernel operations.
pub type KernelResult<T> = Result<T, KernelError>;
