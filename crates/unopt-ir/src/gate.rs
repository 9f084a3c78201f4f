//! Quantum gate types.
//!
//! The gate vocabulary is deliberately closed: the unoptimization pipeline
//! depends on every gate kind having an in-vocabulary inverse and a known
//! matrix, so dispatch is exhaustive rather than trait-based.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

/// Standard gates with known semantics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StandardGate {
    /// Identity gate.
    I,
    /// Pauli-X gate.
    X,
    /// Pauli-Y gate.
    Y,
    /// Pauli-Z gate.
    Z,
    /// Hadamard gate.
    H,
    /// S gate (sqrt(Z)).
    S,
    /// S-dagger gate.
    Sdg,
    /// T gate (fourth root of Z).
    T,
    /// T-dagger gate.
    Tdg,
    /// sqrt(X) gate.
    SX,
    /// sqrt(X)-dagger gate.
    SXdg,
    /// Rotation around X axis.
    Rx(f64),
    /// Rotation around Y axis.
    Ry(f64),
    /// Rotation around Z axis.
    Rz(f64),
    /// Phase gate.
    P(f64),
    /// Universal single-qubit gate U(θ, φ, λ).
    U(f64, f64, f64),

    /// Controlled-X (CNOT) gate.
    CX,
    /// Controlled-Y gate.
    CY,
    /// Controlled-Z gate.
    CZ,
    /// SWAP gate.
    Swap,
    /// ZZ rotation gate exp(-iθ/2 Z⊗Z).
    RZZ(f64),
}

impl StandardGate {
    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            StandardGate::I => "id",
            StandardGate::X => "x",
            StandardGate::Y => "y",
            StandardGate::Z => "z",
            StandardGate::H => "h",
            StandardGate::S => "s",
            StandardGate::Sdg => "sdg",
            StandardGate::T => "t",
            StandardGate::Tdg => "tdg",
            StandardGate::SX => "sx",
            StandardGate::SXdg => "sxdg",
            StandardGate::Rx(_) => "rx",
            StandardGate::Ry(_) => "ry",
            StandardGate::Rz(_) => "rz",
            StandardGate::P(_) => "p",
            StandardGate::U(_, _, _) => "u",
            StandardGate::CX => "cx",
            StandardGate::CY => "cy",
            StandardGate::CZ => "cz",
            StandardGate::Swap => "swap",
            StandardGate::RZZ(_) => "rzz",
        }
    }

    /// Get the number of qubits this gate operates on.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            StandardGate::I
            | StandardGate::X
            | StandardGate::Y
            | StandardGate::Z
            | StandardGate::H
            | StandardGate::S
            | StandardGate::Sdg
            | StandardGate::T
            | StandardGate::Tdg
            | StandardGate::SX
            | StandardGate::SXdg
            | StandardGate::Rx(_)
            | StandardGate::Ry(_)
            | StandardGate::Rz(_)
            | StandardGate::P(_)
            | StandardGate::U(_, _, _) => 1,

            StandardGate::CX
            | StandardGate::CY
            | StandardGate::CZ
            | StandardGate::Swap
            | StandardGate::RZZ(_) => 2,
        }
    }

    /// Get the continuous parameters of this gate.
    pub fn params(&self) -> Vec<f64> {
        match self {
            StandardGate::Rx(t)
            | StandardGate::Ry(t)
            | StandardGate::Rz(t)
            | StandardGate::P(t)
            | StandardGate::RZZ(t) => vec![*t],

            StandardGate::U(a, b, c) => vec![*a, *b, *c],

            _ => vec![],
        }
    }

    /// The inverse gate. Every standard gate inverts within the vocabulary.
    pub fn inverse(&self) -> StandardGate {
        match self {
            StandardGate::I => StandardGate::I,
            StandardGate::X => StandardGate::X,
            StandardGate::Y => StandardGate::Y,
            StandardGate::Z => StandardGate::Z,
            StandardGate::H => StandardGate::H,
            StandardGate::S => StandardGate::Sdg,
            StandardGate::Sdg => StandardGate::S,
            StandardGate::T => StandardGate::Tdg,
            StandardGate::Tdg => StandardGate::T,
            StandardGate::SX => StandardGate::SXdg,
            StandardGate::SXdg => StandardGate::SX,
            StandardGate::Rx(t) => StandardGate::Rx(-t),
            StandardGate::Ry(t) => StandardGate::Ry(-t),
            StandardGate::Rz(t) => StandardGate::Rz(-t),
            StandardGate::P(t) => StandardGate::P(-t),
            // U(θ,φ,λ)† = U(-θ,-λ,-φ)
            StandardGate::U(theta, phi, lambda) => StandardGate::U(-theta, -lambda, -phi),
            StandardGate::CX => StandardGate::CX,
            StandardGate::CY => StandardGate::CY,
            StandardGate::CZ => StandardGate::CZ,
            StandardGate::Swap => StandardGate::Swap,
            StandardGate::RZZ(t) => StandardGate::RZZ(-t),
        }
    }
}

/// A named, matrix-backed unitary outside the standard vocabulary.
///
/// The matrix is row-major `2^n × 2^n` over the local basis in which
/// `qubits[0]` is the most significant bit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomGate {
    /// The name of the gate.
    pub name: String,
    /// The number of qubits it operates on.
    pub num_qubits: u32,
    /// Unitary matrix (row-major, 2^n × 2^n).
    pub matrix: Vec<Complex64>,
}

impl CustomGate {
    /// Create a new custom gate from its unitary matrix.
    ///
    /// # Panics
    ///
    /// Panics if `matrix.len()` does not equal `(2^num_qubits)^2`.
    pub fn new(name: impl Into<String>, num_qubits: u32, matrix: Vec<Complex64>) -> Self {
        let dim = 1usize << num_qubits;
        assert_eq!(
            matrix.len(),
            dim * dim,
            "Matrix length {} does not match expected {} for {}-qubit gate",
            matrix.len(),
            dim * dim,
            num_qubits,
        );
        Self {
            name: name.into(),
            num_qubits,
            matrix,
        }
    }

    /// The conjugate transpose of this gate.
    pub fn dagger(&self) -> CustomGate {
        let dim = 1usize << self.num_qubits;
        let mut matrix = vec![Complex64::new(0.0, 0.0); dim * dim];
        for row in 0..dim {
            for col in 0..dim {
                matrix[row * dim + col] = self.matrix[col * dim + row].conj();
            }
        }
        CustomGate {
            name: format!("{}_dg", self.name),
            num_qubits: self.num_qubits,
            matrix,
        }
    }
}

/// A quantum gate, either standard or custom.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Gate {
    /// A standard gate with known semantics.
    Standard(StandardGate),
    /// A matrix-backed user-defined gate.
    Custom(CustomGate),
}

impl Gate {
    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &str {
        match self {
            Gate::Standard(g) => g.name(),
            Gate::Custom(g) => &g.name,
        }
    }

    /// Get the number of qubits.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            Gate::Standard(g) => g.num_qubits(),
            Gate::Custom(g) => g.num_qubits,
        }
    }

    /// The inverse gate.
    pub fn inverse(&self) -> Gate {
        match self {
            Gate::Standard(g) => Gate::Standard(g.inverse()),
            Gate::Custom(g) => Gate::Custom(g.dagger()),
        }
    }
}

impl From<StandardGate> for Gate {
    fn from(gate: StandardGate) -> Self {
        Gate::Standard(gate)
    }
}

impl From<CustomGate> for Gate {
    fn from(gate: CustomGate) -> Self {
        Gate::Custom(gate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_standard_gate_properties() {
        assert_eq!(StandardGate::H.num_qubits(), 1);
        assert_eq!(StandardGate::CX.num_qubits(), 2);
        assert_eq!(StandardGate::RZZ(0.5).num_qubits(), 2);

        assert!(StandardGate::H.params().is_empty());
        assert_eq!(StandardGate::Rx(PI).params(), vec![PI]);
        assert_eq!(StandardGate::U(1.0, 2.0, 3.0).params().len(), 3);
    }

    #[test]
    fn test_inverses() {
        assert_eq!(StandardGate::S.inverse(), StandardGate::Sdg);
        assert_eq!(StandardGate::Sdg.inverse(), StandardGate::S);
        assert_eq!(StandardGate::Swap.inverse(), StandardGate::Swap);
        assert_eq!(StandardGate::Rz(0.3).inverse(), StandardGate::Rz(-0.3));
        assert_eq!(
            StandardGate::U(1.0, 2.0, 3.0).inverse(),
            StandardGate::U(-1.0, -3.0, -2.0)
        );
        // Double inversion is the identity transform on the vocabulary.
        for gate in [
            StandardGate::T,
            StandardGate::SX,
            StandardGate::P(0.7),
            StandardGate::RZZ(1.1),
        ] {
            assert_eq!(gate.inverse().inverse(), gate);
        }
    }

    #[test]
    fn test_custom_gate_dagger() {
        let i = Complex64::new(0.0, 1.0);
        let zero = Complex64::new(0.0, 0.0);
        let one = Complex64::new(1.0, 0.0);
        // S gate as a custom 1-qubit matrix.
        let s = CustomGate::new("my_s", 1, vec![one, zero, zero, i]);
        let sdg = s.dagger();
        assert_eq!(sdg.name, "my_s_dg");
        assert_eq!(sdg.matrix[3], -i);
    }

    #[test]
    #[should_panic(expected = "does not match expected")]
    fn test_custom_gate_bad_matrix() {
        let _ = CustomGate::new("bad", 2, vec![Complex64::new(1.0, 0.0); 4]);
    }
}
