//! Error types for the recipe crate.

use thiserror::Error;

use crate::decompose::DecompositionMethod;

/// Errors produced by the unoptimization pipeline.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RecipeError {
    /// Decomposition method string not in the closed vocabulary.
    #[error("Unknown decomposition method '{0}' (expected default | kak | basis)")]
    InvalidMethod(String),

    /// Strategy string not in the closed vocabulary.
    #[error("Unknown unoptimization strategy '{0}' (expected concatenated | random)")]
    InvalidStrategy(String),

    /// Iteration count must be non-negative.
    #[error("Iteration count must be non-negative, got {0}")]
    InvalidIterations(i64),

    /// Gate kind the chosen method cannot rewrite.
    #[error("Gate '{gate}' is not supported by the {method} decomposition method")]
    UnsupportedGate {
        /// Name of the offending gate.
        gate: String,
        /// The method that rejected it.
        method: DecompositionMethod,
    },

    /// Circuit has no unitary representation.
    #[error("Circuit contains non-unitary instruction '{0}'")]
    NonUnitary(String),

    /// Circuit builder returned an error.
    #[error("Circuit IR error: {0}")]
    Ir(#[from] unopt_ir::IrError),
}

/// Result type for recipe operations.
pub type RecipeResult<T> = Result<T, RecipeError>;
