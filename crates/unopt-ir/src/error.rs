//! Error types for the IR crate.

use crate::qubit::{ClbitId, QubitId};
use thiserror::Error;

/// Errors that can occur in IR operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// Qubit index outside the circuit register.
    #[error("Qubit {qubit} out of range for register of {num_qubits} qubits")]
    QubitOutOfRange {
        /// The offending qubit.
        qubit: QubitId,
        /// Register size of the circuit.
        num_qubits: u32,
    },

    /// Classical bit index outside the circuit register.
    #[error("Classical bit {clbit} out of range for register of {num_clbits} bits")]
    ClbitOutOfRange {
        /// The offending classical bit.
        clbit: ClbitId,
        /// Classical register size of the circuit.
        num_clbits: u32,
    },

    /// Gate requires a different number of qubits.
    #[error("Gate '{gate_name}' requires {expected} qubits, got {got}")]
    QubitCountMismatch {
        /// Name of the gate.
        gate_name: String,
        /// Expected number of qubits.
        expected: u32,
        /// Actual number of qubits provided.
        got: u32,
    },

    /// Duplicate qubit in operation.
    #[error("Duplicate qubit {qubit} in gate '{gate_name}'")]
    DuplicateQubit {
        /// The duplicate qubit.
        qubit: QubitId,
        /// Name of the gate.
        gate_name: String,
    },

    /// Measurement with mismatched operand counts.
    #[error("Measurement maps {qubits} qubits to {clbits} classical bits")]
    MeasureArityMismatch {
        /// Number of qubits being measured.
        qubits: usize,
        /// Number of classical bits receiving outcomes.
        clbits: usize,
    },

    /// Circuits over different registers cannot be composed.
    #[error("Register mismatch: expected {expected} qubits, got {got}")]
    RegisterMismatch {
        /// Qubit count of the left circuit.
        expected: u32,
        /// Qubit count of the right circuit.
        got: u32,
    },

    /// Circuit contains an instruction with no inverse.
    #[error("Cannot invert circuit containing '{0}'")]
    NotInvertible(String),
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
