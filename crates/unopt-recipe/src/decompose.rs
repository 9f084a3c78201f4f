//! Two-qubit gate decomposition passes.
//!
//! Three rewrite methods over the closed gate vocabulary:
//!
//! - `Default`: each two-qubit gate through its own textbook CX-basis
//!   expansion.
//! - `Kak`: every two-qubit gate through its canonical (Cartan/KAK) form
//!   `e^{iα}(A1⊗A2)·exp(i(a·XX + b·YY + c·ZZ))·(B1⊗B2)`, with the canonical
//!   core emitted as at most three RZZ applications conjugated by fixed
//!   local basis changes.
//! - `Basis`: full re-synthesis over the declared `{rz, ry, cx}` basis via
//!   numeric ZYZ Euler angles.
//!
//! All methods preserve the circuit unitary exactly; expansion phases are
//! folded into the output circuit's global phase.

use std::f64::consts::FRAC_PI_4;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use unopt_ir::{Circuit, Gate, Instruction, InstructionKind, QubitId, StandardGate};

use crate::error::{RecipeError, RecipeResult};
use crate::unitary::{EPSILON, Unitary2x2};

/// The fixed elementary basis used by [`DecompositionMethod::Basis`].
const BASIS_GATES: [&str; 3] = ["rz", "ry", "cx"];

/// How two-qubit gates are rewritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecompositionMethod {
    /// Per-gate textbook expansion over CX plus single-qubit gates.
    Default,
    /// Canonical two-qubit (Cartan/KAK) form with an RZZ core.
    Kak,
    /// Re-synthesis of every gate over the fixed `{rz, ry, cx}` basis.
    Basis,
}

impl fmt::Display for DecompositionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DecompositionMethod::Default => "default",
            DecompositionMethod::Kak => "kak",
            DecompositionMethod::Basis => "basis",
        };
        write!(f, "{name}")
    }
}

impl FromStr for DecompositionMethod {
    type Err = RecipeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" => Ok(DecompositionMethod::Default),
            "kak" => Ok(DecompositionMethod::Kak),
            "basis" => Ok(DecompositionMethod::Basis),
            other => Err(RecipeError::InvalidMethod(other.to_string())),
        }
    }
}

/// Rewrite every two-qubit gate of `circuit` according to `method`.
///
/// Qubit count and the order of untouched instructions are preserved, and
/// the output is unitary-equal to the input (global phase included).
/// Matrix-backed custom gates cannot be re-synthesized and fail with
/// [`RecipeError::UnsupportedGate`].
pub fn decompose(circuit: &Circuit, method: DecompositionMethod) -> RecipeResult<Circuit> {
    let mut out = transform_shell(circuit);
    for inst in circuit.instructions() {
        match &inst.kind {
            InstructionKind::Gate(Gate::Standard(gate)) => match method {
                DecompositionMethod::Default if gate.num_qubits() == 2 => {
                    let (expansion, phase) =
                        cx_basis_expansion(gate, inst.qubits[0], inst.qubits[1]);
                    for piece in expansion {
                        out.apply(piece)?;
                    }
                    out.add_global_phase(phase);
                }
                DecompositionMethod::Kak if gate.num_qubits() == 2 => {
                    let (expansion, phase) = kak_expansion(gate, inst.qubits[0], inst.qubits[1]);
                    for piece in expansion {
                        out.apply(piece)?;
                    }
                    out.add_global_phase(phase);
                }
                DecompositionMethod::Basis => {
                    basis_rewrite(gate, &inst.qubits, &mut out)?;
                }
                _ => {
                    out.apply(inst.clone())?;
                }
            },
            InstructionKind::Gate(Gate::Custom(gate)) => {
                return Err(RecipeError::UnsupportedGate {
                    gate: gate.name.clone(),
                    method,
                });
            }
            _ => {
                out.apply(inst.clone())?;
            }
        }
    }
    debug!(
        method = %method,
        gates_in = circuit.gate_count(),
        gates_out = out.gate_count(),
        "decomposed circuit"
    );
    Ok(out)
}

/// Empty circuit with the same register, name and global phase as `circuit`.
pub(crate) fn transform_shell(circuit: &Circuit) -> Circuit {
    let mut shell = Circuit::with_size(
        circuit.name().to_string(),
        circuit.num_qubits() as u32,
        circuit.num_clbits() as u32,
    );
    shell.set_global_phase(circuit.global_phase());
    shell
}

/// Textbook CX-basis expansion of a two-qubit standard gate.
///
/// Returns the replacement sequence and its global-phase correction (zero
/// for every gate in the vocabulary; the phase slot keeps the contract
/// uniform with [`kak_expansion`]). A gate already in the target set comes
/// back as itself.
pub(crate) fn cx_basis_expansion(
    gate: &StandardGate,
    q0: QubitId,
    q1: QubitId,
) -> (Vec<Instruction>, f64) {
    let insts = match gate {
        // CZ = (I⊗H) · CX · (I⊗H)
        StandardGate::CZ => vec![
            Instruction::single_qubit_gate(StandardGate::H, q1),
            Instruction::two_qubit_gate(StandardGate::CX, q0, q1),
            Instruction::single_qubit_gate(StandardGate::H, q1),
        ],
        // CY = (I⊗S) · CX · (I⊗S†)
        StandardGate::CY => vec![
            Instruction::single_qubit_gate(StandardGate::Sdg, q1),
            Instruction::two_qubit_gate(StandardGate::CX, q0, q1),
            Instruction::single_qubit_gate(StandardGate::S, q1),
        ],
        StandardGate::Swap => vec![
            Instruction::two_qubit_gate(StandardGate::CX, q0, q1),
            Instruction::two_qubit_gate(StandardGate::CX, q1, q0),
            Instruction::two_qubit_gate(StandardGate::CX, q0, q1),
        ],
        // RZZ(θ) = CX · (I⊗Rz(θ)) · CX
        StandardGate::RZZ(theta) => vec![
            Instruction::two_qubit_gate(StandardGate::CX, q0, q1),
            Instruction::single_qubit_gate(StandardGate::Rz(*theta), q1),
            Instruction::two_qubit_gate(StandardGate::CX, q0, q1),
        ],
        other => vec![Instruction::gate(other.clone(), [q0, q1])],
    };
    (insts, 0.0)
}

/// Canonical (Cartan/KAK) expansion of a two-qubit standard gate.
///
/// Emits the B-layer, the canonical core `exp(i(a·XX + b·YY + c·ZZ))` as up
/// to three RZZ applications with per-axis local conjugation, then the
/// A-layer. Returns the sequence and its exact global-phase correction.
pub(crate) fn kak_expansion(
    gate: &StandardGate,
    q0: QubitId,
    q1: QubitId,
) -> (Vec<Instruction>, f64) {
    let s = |q| Instruction::single_qubit_gate(StandardGate::S, q);
    let sdg = |q| Instruction::single_qubit_gate(StandardGate::Sdg, q);
    let h = |q| Instruction::single_qubit_gate(StandardGate::H, q);

    let (phase, b_layer, coords, a_layer) = match gate {
        // CZ = e^{-iπ/4} (S⊗S) · exp(iπ/4 Z⊗Z)
        StandardGate::CZ => (
            -FRAC_PI_4,
            vec![],
            (0.0, 0.0, FRAC_PI_4),
            vec![s(q0), s(q1)],
        ),
        // CX = e^{-iπ/4} (S ⊗ H·S) · exp(iπ/4 Z⊗Z) · (I ⊗ H)
        StandardGate::CX => (
            -FRAC_PI_4,
            vec![h(q1)],
            (0.0, 0.0, FRAC_PI_4),
            vec![s(q0), s(q1), h(q1)],
        ),
        // CY = e^{-iπ/4} (S ⊗ S·H·S) · exp(iπ/4 Z⊗Z) · (I ⊗ H·S†)
        StandardGate::CY => (
            -FRAC_PI_4,
            vec![sdg(q1), h(q1)],
            (0.0, 0.0, FRAC_PI_4),
            vec![s(q0), s(q1), h(q1), s(q1)],
        ),
        // SWAP = e^{-iπ/4} exp(iπ/4 (XX + YY + ZZ))
        StandardGate::Swap => (
            -FRAC_PI_4,
            vec![],
            (FRAC_PI_4, FRAC_PI_4, FRAC_PI_4),
            vec![],
        ),
        // RZZ(θ) = exp(-iθ/2 Z⊗Z)
        StandardGate::RZZ(theta) => (0.0, vec![], (0.0, 0.0, -theta / 2.0), vec![]),
        other => return (vec![Instruction::gate(other.clone(), [q0, q1])], 0.0),
    };

    let mut insts = b_layer;
    insts.extend(canonical_core(coords, q0, q1));
    insts.extend(a_layer);
    (insts, phase)
}

/// Emit `exp(i(a·XX + b·YY + c·ZZ))` over RZZ plus fixed local Cliffords.
///
/// The three exponentials commute, so blocks with a negligible angle are
/// simply omitted.
fn canonical_core((a, b, c): (f64, f64, f64), q0: QubitId, q1: QubitId) -> Vec<Instruction> {
    let s = |q| Instruction::single_qubit_gate(StandardGate::S, q);
    let sdg = |q| Instruction::single_qubit_gate(StandardGate::Sdg, q);
    let h = |q| Instruction::single_qubit_gate(StandardGate::H, q);
    let rzz = |t, qa, qb| Instruction::two_qubit_gate(StandardGate::RZZ(t), qa, qb);

    let mut insts = Vec::new();
    if a.abs() > EPSILON {
        // exp(ia XX) = (H⊗H) · exp(ia ZZ) · (H⊗H)
        insts.extend([h(q0), h(q1), rzz(-2.0 * a, q0, q1), h(q0), h(q1)]);
    }
    if b.abs() > EPSILON {
        // exp(ib YY) = (SH⊗SH) · exp(ib ZZ) · (SH⊗SH)†
        insts.extend([
            sdg(q0),
            sdg(q1),
            h(q0),
            h(q1),
            rzz(-2.0 * b, q0, q1),
            h(q0),
            h(q1),
            s(q0),
            s(q1),
        ]);
    }
    if c.abs() > EPSILON {
        insts.push(rzz(-2.0 * c, q0, q1));
    }
    insts
}

/// Re-synthesize one standard gate over the `{rz, ry, cx}` basis.
fn basis_rewrite(
    gate: &StandardGate,
    qubits: &[QubitId],
    out: &mut Circuit,
) -> RecipeResult<()> {
    if BASIS_GATES.contains(&gate.name()) {
        out.apply(Instruction::gate(gate.clone(), qubits.iter().copied()))?;
        return Ok(());
    }
    if gate.num_qubits() == 2 {
        let (expansion, phase) = cx_basis_expansion(gate, qubits[0], qubits[1]);
        out.add_global_phase(phase);
        for piece in expansion {
            match &piece.kind {
                InstructionKind::Gate(Gate::Standard(g))
                    if g.num_qubits() == 1 && !BASIS_GATES.contains(&g.name()) =>
                {
                    zyz_rewrite(g, piece.qubits[0], out)?;
                }
                _ => {
                    out.apply(piece)?;
                }
            }
        }
        return Ok(());
    }
    // Identity contributes nothing to the basis form.
    if matches!(gate, StandardGate::I) {
        return Ok(());
    }
    zyz_rewrite(gate, qubits[0], out)
}

/// Emit a single-qubit gate as Rz·Ry·Rz via numeric ZYZ Euler angles,
/// folding its phase into the circuit's global phase.
fn zyz_rewrite(gate: &StandardGate, qubit: QubitId, out: &mut Circuit) -> RecipeResult<()> {
    let Some(matrix) = Unitary2x2::from_standard(gate) else {
        return Err(RecipeError::UnsupportedGate {
            gate: gate.name().to_string(),
            method: DecompositionMethod::Basis,
        });
    };
    let (alpha, beta, gamma, phase) = matrix.zyz_decomposition();
    out.add_global_phase(phase);
    if gamma.abs() > EPSILON {
        out.rz(gamma, qubit)?;
    }
    if beta.abs() > EPSILON {
        out.ry(beta, qubit)?;
    }
    if alpha.abs() > EPSILON {
        out.rz(alpha, qubit)?;
    }
    Ok(())
}
