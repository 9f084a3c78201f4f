//! High-level circuit builder API.

use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::gate::{Gate, StandardGate};
use crate::instruction::{Instruction, InstructionKind};
use crate::qubit::{ClbitId, QubitId};

/// A quantum circuit over a fixed-size register.
///
/// A circuit is a register size plus an ordered instruction list and a
/// tracked global phase. The builder methods validate operands as they
/// are applied; once built, circuits flow by value through the pipeline:
/// every transform takes `&Circuit` and returns a newly constructed
/// circuit, never mutating its input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    /// Name of the circuit.
    name: String,
    /// Number of qubits in the register.
    num_qubits: u32,
    /// Number of classical bits in the register.
    num_clbits: u32,
    /// Global phase in radians.
    global_phase: f64,
    /// Ordered instruction list.
    instructions: Vec<Instruction>,
}

impl Circuit {
    /// Create a circuit with a given number of qubits and classical bits.
    pub fn with_size(name: impl Into<String>, num_qubits: u32, num_clbits: u32) -> Self {
        Self {
            name: name.into(),
            num_qubits,
            num_clbits,
            global_phase: 0.0,
            instructions: Vec::new(),
        }
    }

    /// Append an instruction after validating its operands.
    pub fn apply(&mut self, instruction: Instruction) -> IrResult<&mut Self> {
        for &qubit in &instruction.qubits {
            if qubit.0 >= self.num_qubits {
                return Err(IrError::QubitOutOfRange {
                    qubit,
                    num_qubits: self.num_qubits,
                });
            }
        }
        for &clbit in &instruction.clbits {
            if clbit.0 >= self.num_clbits {
                return Err(IrError::ClbitOutOfRange {
                    clbit,
                    num_clbits: self.num_clbits,
                });
            }
        }
        if let InstructionKind::Gate(gate) = &instruction.kind {
            let expected = gate.num_qubits();
            let got = u32::try_from(instruction.qubits.len()).unwrap_or(u32::MAX);
            if expected != got {
                return Err(IrError::QubitCountMismatch {
                    gate_name: gate.name().to_string(),
                    expected,
                    got,
                });
            }
            for (i, &qubit) in instruction.qubits.iter().enumerate() {
                if instruction.qubits[..i].contains(&qubit) {
                    return Err(IrError::DuplicateQubit {
                        qubit,
                        gate_name: gate.name().to_string(),
                    });
                }
            }
        }
        self.instructions.push(instruction);
        Ok(self)
    }

    // =========================================================================
    // Single-qubit gates
    // =========================================================================

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::H, qubit))
    }

    /// Apply identity gate.
    pub fn id(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::I, qubit))
    }

    /// Apply Pauli-X gate.
    pub fn x(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::X, qubit))
    }

    /// Apply Pauli-Y gate.
    pub fn y(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::Y, qubit))
    }

    /// Apply Pauli-Z gate.
    pub fn z(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::Z, qubit))
    }

    /// Apply S gate.
    pub fn s(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::S, qubit))
    }

    /// Apply S-dagger gate.
    pub fn sdg(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::Sdg, qubit))
    }

    /// Apply T gate.
    pub fn t(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::T, qubit))
    }

    /// Apply T-dagger gate.
    pub fn tdg(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::Tdg, qubit))
    }

    /// Apply sqrt(X) gate.
    pub fn sx(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::SX, qubit))
    }

    /// Apply sqrt(X)-dagger gate.
    pub fn sxdg(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::SXdg, qubit))
    }

    /// Apply Rx rotation gate.
    pub fn rx(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::Rx(theta), qubit))
    }

    /// Apply Ry rotation gate.
    pub fn ry(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::Ry(theta), qubit))
    }

    /// Apply Rz rotation gate.
    pub fn rz(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::Rz(theta), qubit))
    }

    /// Apply phase gate.
    pub fn p(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::P(theta), qubit))
    }

    /// Apply universal U gate.
    pub fn u(&mut self, theta: f64, phi: f64, lambda: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(
            StandardGate::U(theta, phi, lambda),
            qubit,
        ))
    }

    // =========================================================================
    // Two-qubit gates
    // =========================================================================

    /// Apply CNOT (CX) gate.
    pub fn cx(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::two_qubit_gate(StandardGate::CX, control, target))
    }

    /// Apply CY gate.
    pub fn cy(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::two_qubit_gate(StandardGate::CY, control, target))
    }

    /// Apply CZ gate.
    pub fn cz(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::two_qubit_gate(StandardGate::CZ, control, target))
    }

    /// Apply SWAP gate.
    pub fn swap(&mut self, q1: QubitId, q2: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::two_qubit_gate(StandardGate::Swap, q1, q2))
    }

    /// Apply RZZ (ZZ rotation) gate.
    pub fn rzz(&mut self, theta: f64, q1: QubitId, q2: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::two_qubit_gate(StandardGate::RZZ(theta), q1, q2))
    }

    // =========================================================================
    // Other operations
    // =========================================================================

    /// Apply a gate (standard or custom) to the given qubits.
    pub fn gate(
        &mut self,
        gate: impl Into<Gate>,
        qubits: impl IntoIterator<Item = QubitId>,
    ) -> IrResult<&mut Self> {
        self.apply(Instruction::gate(gate, qubits))
    }

    /// Measure a qubit to a classical bit.
    pub fn measure(&mut self, qubit: QubitId, clbit: ClbitId) -> IrResult<&mut Self> {
        self.apply(Instruction::measure(qubit, clbit))
    }

    /// Measure all qubits to corresponding classical bits.
    ///
    /// Grows the classical register if it is smaller than the quantum one.
    pub fn measure_all(&mut self) -> IrResult<&mut Self> {
        if self.num_clbits < self.num_qubits {
            self.num_clbits = self.num_qubits;
        }
        let qubits: Vec<_> = (0..self.num_qubits).map(QubitId).collect();
        let clbits: Vec<_> = (0..self.num_qubits).map(ClbitId).collect();
        let inst = Instruction::measure_all(qubits, clbits)?;
        self.apply(inst)
    }

    /// Apply a barrier to specified qubits.
    pub fn barrier(&mut self, qubits: impl IntoIterator<Item = QubitId>) -> IrResult<&mut Self> {
        self.apply(Instruction::barrier(qubits))
    }

    /// Apply a barrier to all qubits.
    pub fn barrier_all(&mut self) -> IrResult<&mut Self> {
        let qubits: Vec<_> = (0..self.num_qubits).map(QubitId).collect();
        self.apply(Instruction::barrier(qubits))
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits as usize
    }

    /// Get the number of classical bits.
    pub fn num_clbits(&self) -> usize {
        self.num_clbits as usize
    }

    /// Get the ordered instruction list.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Get the global phase in radians.
    pub fn global_phase(&self) -> f64 {
        self.global_phase
    }

    /// Set the global phase.
    pub fn set_global_phase(&mut self, phase: f64) {
        self.global_phase = phase;
    }

    /// Add to the global phase.
    pub fn add_global_phase(&mut self, phase: f64) {
        self.global_phase += phase;
    }

    /// Number of gate instructions (measurements and barriers excluded).
    pub fn gate_count(&self) -> usize {
        self.instructions.iter().filter(|i| i.is_gate()).count()
    }

    /// Number of two-qubit gate instructions.
    pub fn two_qubit_gate_count(&self) -> usize {
        self.instructions
            .iter()
            .filter(|i| i.is_gate() && i.qubits.len() == 2)
            .count()
    }

    /// Circuit depth: the longest wire-wise chain of gates and measurements.
    ///
    /// Barriers synchronize wires without contributing depth.
    pub fn depth(&self) -> usize {
        let mut qubit_front = vec![0usize; self.num_qubits as usize];
        let mut clbit_front = vec![0usize; self.num_clbits as usize];
        let mut depth = 0;
        for inst in &self.instructions {
            let level = inst
                .qubits
                .iter()
                .map(|q| qubit_front[q.0 as usize])
                .chain(inst.clbits.iter().map(|c| clbit_front[c.0 as usize]))
                .max()
                .unwrap_or(0);
            let level = if inst.is_barrier() { level } else { level + 1 };
            for q in &inst.qubits {
                qubit_front[q.0 as usize] = level;
            }
            for c in &inst.clbits {
                clbit_front[c.0 as usize] = level;
            }
            depth = depth.max(level);
        }
        depth
    }

    // =========================================================================
    // Whole-circuit operations
    // =========================================================================

    /// Concatenate another circuit over the same register.
    ///
    /// The unitary of the result is `other`'s unitary applied after this
    /// circuit's; global phases add.
    pub fn compose(&self, other: &Circuit) -> IrResult<Circuit> {
        if self.num_qubits != other.num_qubits || self.num_clbits != other.num_clbits {
            return Err(IrError::RegisterMismatch {
                expected: self.num_qubits,
                got: other.num_qubits,
            });
        }
        let mut composed = self.clone();
        composed.global_phase += other.global_phase;
        composed.instructions.extend(other.instructions.iter().cloned());
        Ok(composed)
    }

    /// The inverse circuit: reversed instruction order with inverted gates.
    ///
    /// Fails on circuits containing measurements.
    pub fn inverse(&self) -> IrResult<Circuit> {
        let mut inverted = Circuit::with_size(self.name.clone(), self.num_qubits, self.num_clbits);
        inverted.global_phase = -self.global_phase;
        for inst in self.instructions.iter().rev() {
            match &inst.kind {
                InstructionKind::Gate(gate) => {
                    inverted.apply(Instruction::gate(gate.inverse(), inst.qubits.clone()))?;
                }
                InstructionKind::Barrier => {
                    inverted.apply(inst.clone())?;
                }
                InstructionKind::Measure => {
                    return Err(IrError::NotInvertible(inst.name().to_string()));
                }
            }
        }
        Ok(inverted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_circuit_with_size() {
        let circuit = Circuit::with_size("test", 3, 2);
        assert_eq!(circuit.num_qubits(), 3);
        assert_eq!(circuit.num_clbits(), 2);
        assert_eq!(circuit.gate_count(), 0);
    }

    #[test]
    fn test_fluent_api() {
        let mut circuit = Circuit::with_size("test", 2, 2);
        circuit
            .h(QubitId(0))
            .unwrap()
            .cx(QubitId(0), QubitId(1))
            .unwrap()
            .measure(QubitId(0), ClbitId(0))
            .unwrap()
            .measure(QubitId(1), ClbitId(1))
            .unwrap();

        assert_eq!(circuit.gate_count(), 2);
        assert_eq!(circuit.two_qubit_gate_count(), 1);
        assert_eq!(circuit.depth(), 3); // H, CX, parallel measures
    }

    #[test]
    fn test_qubit_out_of_range() {
        let mut circuit = Circuit::with_size("test", 1, 0);
        let err = circuit.h(QubitId(1)).unwrap_err();
        assert!(matches!(err, IrError::QubitOutOfRange { .. }));
    }

    #[test]
    fn test_duplicate_qubit() {
        let mut circuit = Circuit::with_size("test", 2, 0);
        let err = circuit.cx(QubitId(0), QubitId(0)).unwrap_err();
        assert!(matches!(err, IrError::DuplicateQubit { .. }));
    }

    #[test]
    fn test_qubit_count_mismatch() {
        let mut circuit = Circuit::with_size("test", 2, 0);
        let err = circuit
            .apply(Instruction::gate(StandardGate::CX, [QubitId(0)]))
            .unwrap_err();
        assert!(matches!(err, IrError::QubitCountMismatch { .. }));
    }

    #[test]
    fn test_measure_all_grows_clbits() {
        let mut circuit = Circuit::with_size("test", 3, 0);
        circuit.h(QubitId(0)).unwrap().measure_all().unwrap();
        assert_eq!(circuit.num_clbits(), 3);
    }

    #[test]
    fn test_barrier_does_not_add_depth() {
        let mut circuit = Circuit::with_size("test", 2, 0);
        circuit.h(QubitId(0)).unwrap();
        circuit.barrier_all().unwrap();
        circuit.h(QubitId(1)).unwrap();
        // Barrier syncs both wires at level 1, so the second H lands at 2.
        assert_eq!(circuit.depth(), 2);
    }

    #[test]
    fn test_compose() {
        let mut a = Circuit::with_size("a", 2, 0);
        a.h(QubitId(0)).unwrap();
        a.set_global_phase(0.5);

        let mut b = Circuit::with_size("b", 2, 0);
        b.cx(QubitId(0), QubitId(1)).unwrap();
        b.set_global_phase(0.25);

        let ab = a.compose(&b).unwrap();
        assert_eq!(ab.gate_count(), 2);
        assert!((ab.global_phase() - 0.75).abs() < 1e-12);
        assert_eq!(ab.instructions()[0].name(), "h");
        assert_eq!(ab.instructions()[1].name(), "cx");

        let mismatched = Circuit::with_size("c", 3, 0);
        assert!(a.compose(&mismatched).is_err());
    }

    #[test]
    fn test_inverse_reverses_and_inverts() {
        let mut circuit = Circuit::with_size("test", 2, 0);
        circuit
            .s(QubitId(0))
            .unwrap()
            .rx(PI / 3.0, QubitId(1))
            .unwrap()
            .cx(QubitId(0), QubitId(1))
            .unwrap();

        let inv = circuit.inverse().unwrap();
        assert_eq!(inv.instructions()[0].name(), "cx");
        assert_eq!(inv.instructions()[1].name(), "rx");
        assert_eq!(inv.instructions()[2].name(), "sdg");
    }

    #[test]
    fn test_inverse_rejects_measure() {
        let mut circuit = Circuit::with_size("test", 1, 1);
        circuit.h(QubitId(0)).unwrap();
        circuit.measure(QubitId(0), ClbitId(0)).unwrap();
        assert!(matches!(
            circuit.inverse(),
            Err(IrError::NotInvertible(_))
        ));
    }

    #[test]
    fn test_json_roundtrip() {
        let mut circuit = Circuit::with_size("boundary", 2, 2);
        circuit
            .h(QubitId(0))
            .unwrap()
            .rzz(PI / 4.0, QubitId(0), QubitId(1))
            .unwrap()
            .measure_all()
            .unwrap();

        let json = serde_json::to_string(&circuit).unwrap();
        let back: Circuit = serde_json::from_str(&json).unwrap();
        assert_eq!(back, circuit);
    }
}
