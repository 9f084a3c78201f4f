//! Circuit families used as pipeline inputs.

use rand::Rng;
use rand::seq::SliceRandom;
use tracing::debug;

use unopt_ir::{Circuit, QubitId};

use crate::error::{GenError, GenResult};

/// Generate an n-qubit fully-connected graph state circuit.
///
/// H on every qubit, then CZ on every pair `i < j`.
pub fn fully_connected_graph_state(num_qubits: u32) -> GenResult<Circuit> {
    let mut circuit = Circuit::with_size("graph_state", num_qubits, 0);
    for q in 0..num_qubits {
        circuit.h(QubitId(q))?;
    }
    for i in 0..num_qubits {
        for j in (i + 1)..num_qubits {
            circuit.cz(QubitId(i), QubitId(j))?;
        }
    }
    debug!(num_qubits, gates = circuit.gate_count(), "generated graph state");
    Ok(circuit)
}

/// Generate a random circuit of two-qubit gates using the given RNG.
///
/// Each of the `depth` layers shuffles the register and applies a uniformly
/// chosen gate from {CX, CZ, SWAP} to ⌊n/2⌋ disjoint qubit pairs, so every
/// layer is a genuine depth layer.
///
/// Seeding `rng` makes the circuit reproducible:
/// ```rust
/// use rand::SeedableRng;
/// use unopt_gen::random_two_qubit_circuit_with_rng;
///
/// let rng = rand::rngs::StdRng::seed_from_u64(42);
/// let circuit = random_two_qubit_circuit_with_rng(4, 5, rng).unwrap();
/// assert_eq!(circuit.num_qubits(), 4);
/// ```
pub fn random_two_qubit_circuit_with_rng<R: Rng>(
    num_qubits: u32,
    depth: usize,
    mut rng: R,
) -> GenResult<Circuit> {
    if num_qubits < 2 {
        return Err(GenError::UnsupportedWidth(num_qubits));
    }

    let mut circuit = Circuit::with_size("random_two_qubit", num_qubits, 0);
    let mut order: Vec<u32> = (0..num_qubits).collect();

    for _ in 0..depth {
        order.shuffle(&mut rng);
        for pair in order.chunks_exact(2) {
            let (q1, q2) = (QubitId(pair[0]), QubitId(pair[1]));
            match rng.gen_range(0..3u8) {
                0 => circuit.cx(q1, q2)?,
                1 => circuit.cz(q1, q2)?,
                _ => circuit.swap(q1, q2)?,
            };
        }
    }
    debug!(
        num_qubits,
        depth,
        gates = circuit.gate_count(),
        "generated random two-qubit circuit"
    );
    Ok(circuit)
}

/// Generate a random circuit of two-qubit gates using the thread-local RNG.
pub fn random_two_qubit_circuit(num_qubits: u32, depth: usize) -> GenResult<Circuit> {
    random_two_qubit_circuit_with_rng(num_qubits, depth, rand::thread_rng())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_graph_state_structure() {
        let circuit = fully_connected_graph_state(4).unwrap();
        assert_eq!(circuit.num_qubits(), 4);
        // 4 H gates plus C(4,2) = 6 CZ gates.
        assert_eq!(circuit.gate_count(), 10);
        assert_eq!(circuit.two_qubit_gate_count(), 6);
    }

    #[test]
    fn test_graph_state_trivial_register() {
        let circuit = fully_connected_graph_state(1).unwrap();
        assert_eq!(circuit.gate_count(), 1);
        assert_eq!(circuit.two_qubit_gate_count(), 0);
    }

    #[test]
    fn test_random_circuit_layer_count() {
        let circuit =
            random_two_qubit_circuit_with_rng(6, 10, StdRng::seed_from_u64(0)).unwrap();
        // 10 layers × ⌊6/2⌋ disjoint pairs.
        assert_eq!(circuit.gate_count(), 30);
        assert_eq!(circuit.two_qubit_gate_count(), 30);
        assert_eq!(circuit.depth(), 10);
    }

    #[test]
    fn test_random_circuit_odd_register() {
        let circuit =
            random_two_qubit_circuit_with_rng(5, 4, StdRng::seed_from_u64(1)).unwrap();
        assert_eq!(circuit.gate_count(), 8);
    }

    #[test]
    fn test_random_circuit_reproducible() {
        let a = random_two_qubit_circuit_with_rng(4, 5, StdRng::seed_from_u64(9)).unwrap();
        let b = random_two_qubit_circuit_with_rng(4, 5, StdRng::seed_from_u64(9)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_width_validation() {
        assert!(matches!(
            random_two_qubit_circuit(1, 3),
            Err(GenError::UnsupportedWidth(1))
        ));
    }
}
