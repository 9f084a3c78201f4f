//! Error types for the generator crate.

use thiserror::Error;

/// Errors produced by circuit generation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GenError {
    /// Register too small for the requested circuit family.
    #[error("Two-qubit-gate circuits require at least 2 qubits, got {0}")]
    UnsupportedWidth(u32),

    /// Circuit builder returned an error.
    #[error("Circuit IR error: {0}")]
    Ir(#[from] unopt_ir::IrError),
}

/// Result type for generator operations.
pub type GenResult<T> = Result<T, GenError>;
