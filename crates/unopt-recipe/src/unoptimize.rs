//! Strategy-driven circuit expansion.
//!
//! Each round replaces gates with longer sequences whose composed unitary
//! equals the original gate exactly, so rounds compound without breaking the
//! global equivalence invariant. The rewrite gadgets:
//!
//! - pair gadget: `G → G · G† · G`
//! - kak gadget: `G → KakExpansion(G)`
//! - cx-basis gadget: `G → DefaultExpansion(G)`
//!
//! `Concatenated` applies the same deterministic gadget combination every
//! round; `Random` samples a gadget per gate from an explicit RNG handle, so
//! a seeded generator makes the output exactly reproducible and independent
//! generators keep parallel callers independent.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use unopt_ir::{Circuit, Gate, Instruction, InstructionKind};

use crate::decompose::{cx_basis_expansion, kak_expansion, transform_shell};
use crate::error::{RecipeError, RecipeResult};

/// How expansion rounds are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnoptimizationStrategy {
    /// Deterministic: the same structural expansion every round.
    Concatenated,
    /// Randomized: gadget and insertion choices sampled per gate.
    Random,
}

impl fmt::Display for UnoptimizationStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            UnoptimizationStrategy::Concatenated => "concatenated",
            UnoptimizationStrategy::Random => "random",
        };
        write!(f, "{name}")
    }
}

impl FromStr for UnoptimizationStrategy {
    type Err = RecipeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "concatenated" => Ok(UnoptimizationStrategy::Concatenated),
            "random" => Ok(UnoptimizationStrategy::Random),
            other => Err(RecipeError::InvalidStrategy(other.to_string())),
        }
    }
}

/// Apply `iterations` rounds of structural expansion using the thread-local
/// RNG for the `Random` strategy.
///
/// `Concatenated` never consumes randomness, so this form is fully
/// deterministic for it. For reproducible `Random` output use
/// [`unoptimize_circuit_with_rng`] with a seeded generator.
pub fn unoptimize_circuit(
    circuit: &Circuit,
    iterations: i64,
    strategy: UnoptimizationStrategy,
) -> RecipeResult<Circuit> {
    unoptimize_circuit_with_rng(circuit, iterations, strategy, rand::thread_rng())
}

/// Apply `iterations` rounds of structural expansion using the given random
/// number generator.
///
/// Seeding `rng` makes the output reproducible:
/// ```rust
/// use rand::SeedableRng;
/// use unopt_ir::{Circuit, QubitId};
/// use unopt_recipe::{UnoptimizationStrategy, unoptimize_circuit_with_rng};
///
/// let mut circuit = Circuit::with_size("demo", 2, 0);
/// circuit.cz(QubitId(0), QubitId(1)).unwrap();
///
/// let rng = rand::rngs::StdRng::seed_from_u64(42);
/// let expanded = unoptimize_circuit_with_rng(
///     &circuit, 2, UnoptimizationStrategy::Random, rng,
/// ).unwrap();
/// assert!(expanded.gate_count() > circuit.gate_count());
/// ```
pub fn unoptimize_circuit_with_rng<R: Rng>(
    circuit: &Circuit,
    iterations: i64,
    strategy: UnoptimizationStrategy,
    mut rng: R,
) -> RecipeResult<Circuit> {
    if iterations < 0 {
        return Err(RecipeError::InvalidIterations(iterations));
    }

    let mut current = circuit.clone();
    for round in 0..iterations {
        current = match strategy {
            UnoptimizationStrategy::Concatenated => concatenated_round(&current)?,
            UnoptimizationStrategy::Random => random_round(&current, &mut rng)?,
        };
        debug!(
            strategy = %strategy,
            round,
            gates = current.gate_count(),
            depth = current.depth(),
            "expansion round complete"
        );
    }
    Ok(current)
}

/// Append `G · G† · G` for the given gate instruction.
fn apply_pair_gadget(out: &mut Circuit, inst: &Instruction, gate: &Gate) -> RecipeResult<()> {
    out.apply(inst.clone())?;
    out.apply(Instruction::gate(gate.inverse(), inst.qubits.iter().copied()))?;
    out.apply(inst.clone())?;
    Ok(())
}

/// One deterministic expansion round.
///
/// Every standard two-qubit gate `G` becomes `G · G† · KakExpansion(G)`;
/// custom gates get the pair gadget; everything else passes through.
fn concatenated_round(circuit: &Circuit) -> RecipeResult<Circuit> {
    let mut out = transform_shell(circuit);
    for inst in circuit.instructions() {
        match &inst.kind {
            InstructionKind::Gate(gate @ Gate::Standard(g)) if g.num_qubits() == 2 => {
                out.apply(inst.clone())?;
                out.apply(Instruction::gate(gate.inverse(), inst.qubits.iter().copied()))?;
                let (expansion, phase) = kak_expansion(g, inst.qubits[0], inst.qubits[1]);
                for piece in expansion {
                    out.apply(piece)?;
                }
                out.add_global_phase(phase);
            }
            InstructionKind::Gate(gate @ Gate::Custom(_)) => {
                apply_pair_gadget(&mut out, inst, gate)?;
            }
            _ => {
                out.apply(inst.clone())?;
            }
        }
    }
    Ok(out)
}

/// One randomized expansion round.
///
/// Gadgets are sampled per gate in instruction order, so the RNG stream
/// fully determines the output. A re-decomposition that would return the
/// gate unchanged (e.g. the kak form of RZZ) falls back to the pair gadget,
/// so every standard two-qubit gate strictly expands every round.
fn random_round<R: Rng>(circuit: &Circuit, rng: &mut R) -> RecipeResult<Circuit> {
    let mut out = transform_shell(circuit);
    for inst in circuit.instructions() {
        match &inst.kind {
            InstructionKind::Gate(gate @ Gate::Standard(g)) if g.num_qubits() == 2 => {
                let choice = rng.gen_range(0..3u8);
                let expansion = match choice {
                    1 => Some(kak_expansion(g, inst.qubits[0], inst.qubits[1])),
                    2 => Some(cx_basis_expansion(g, inst.qubits[0], inst.qubits[1])),
                    _ => None,
                };
                match expansion {
                    Some((pieces, phase)) if pieces.len() > 1 => {
                        for piece in pieces {
                            out.apply(piece)?;
                        }
                        out.add_global_phase(phase);
                    }
                    _ => apply_pair_gadget(&mut out, inst, gate)?,
                }
            }
            InstructionKind::Gate(gate @ Gate::Standard(_)) => {
                if rng.gen_range(0..3u8) == 0 {
                    apply_pair_gadget(&mut out, inst, gate)?;
                } else {
                    out.apply(inst.clone())?;
                }
            }
            InstructionKind::Gate(gate @ Gate::Custom(_)) => {
                if rng.gen_range(0..2u8) == 0 {
                    apply_pair_gadget(&mut out, inst, gate)?;
                } else {
                    out.apply(inst.clone())?;
                }
            }
            _ => {
                out.apply(inst.clone())?;
            }
        }
    }
    Ok(out)
}
