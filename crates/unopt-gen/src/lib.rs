//! Circuit generators for the unopt pipeline.
//!
//! Produces the input circuit families consumed by the decomposition and
//! unoptimization stages and by the external benchmarking harness:
//!
//! - [`fully_connected_graph_state`]: H layer plus all-pairs CZ
//! - [`random_two_qubit_circuit`]: layered random CX/CZ/SWAP circuits
//!
//! Randomized generators take an explicit RNG handle in their `_with_rng`
//! form so benchmark trials stay reproducible and parallel workers stay
//! independent.

pub mod error;
pub mod generate;

pub use error::{GenError, GenResult};
pub use generate::{
    fully_connected_graph_state, random_two_qubit_circuit, random_two_qubit_circuit_with_rng,
};
