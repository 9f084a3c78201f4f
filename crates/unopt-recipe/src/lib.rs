//! Unopt Circuit Unoptimization Pipeline
//!
//! This crate implements circuit unoptimization: growing a circuit's gate
//! count and depth while preserving its unitary action exactly, used as a
//! noise-scaling knob for zero-noise extrapolation (ZNE). Rather than
//! stretching pulses, the transform adds logical gates, so a noisy executor
//! accumulates proportionally more error per scale step.
//!
//! # Pipeline
//!
//! ```text
//! generator circuit
//!       │
//!       ▼
//! decompose(circuit, method)          method ∈ {default, kak, basis}
//!       │
//!       ▼
//! unoptimize_circuit(circuit, k, s)   s ∈ {concatenated, random}
//!       │
//!       ▼
//! expanded circuit → simulator / benchmark harness
//! ```
//!
//! Both stages are pure functions from circuit values to circuit values; the
//! only state is the explicit RNG handle consumed by the `random` strategy.
//! For every method, strategy and iteration count the output circuit's
//! unitary equals the input's up to an unobservable global phase. The
//! invariant is stated (and checkable) via [`unitary::circuit_unitary`] and
//! [`unitary::equiv_up_to_global_phase`].
//!
//! # Example
//!
//! ```rust
//! use unopt_ir::{Circuit, QubitId};
//! use unopt_recipe::{DecompositionMethod, UnoptimizationStrategy};
//! use unopt_recipe::{decompose, unoptimize_circuit};
//!
//! let mut circuit = Circuit::with_size("demo", 2, 0);
//! circuit.h(QubitId(0)).unwrap();
//! circuit.cx(QubitId(0), QubitId(1)).unwrap();
//!
//! let decomposed = decompose(&circuit, DecompositionMethod::Kak).unwrap();
//! let expanded =
//!     unoptimize_circuit(&decomposed, 2, UnoptimizationStrategy::Concatenated).unwrap();
//!
//! assert!(expanded.gate_count() > circuit.gate_count());
//! ```

pub mod decompose;
pub mod error;
pub mod unitary;
pub mod unoptimize;

pub use decompose::{DecompositionMethod, decompose};
pub use error::{RecipeError, RecipeResult};
pub use unitary::{Unitary2x2, Unitary4x4, circuit_unitary, equiv_up_to_global_phase};
pub use unoptimize::{
    UnoptimizationStrategy, unoptimize_circuit, unoptimize_circuit_with_rng,
};
