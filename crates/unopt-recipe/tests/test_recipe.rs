//! End-to-end tests for the unoptimization recipe.
//!
//! The full pipeline (generate, decompose, expand) must preserve the
//! circuit unitary up to global phase for every combination of method,
//! strategy and iteration count.

use rand::SeedableRng;
use rand::rngs::StdRng;

use unopt_gen::random_two_qubit_circuit_with_rng;
use unopt_recipe::{
    DecompositionMethod, RecipeError, UnoptimizationStrategy, circuit_unitary, decompose,
    equiv_up_to_global_phase, unoptimize_circuit, unoptimize_circuit_with_rng,
};

const TOL: f64 = 1e-9;

/// Parameter grid mirrored across strategies, sizes and methods.
#[test]
fn test_unoptimize_circuit_unitary_equivalence() {
    let cases = [
        (UnoptimizationStrategy::Concatenated, 1, 4, 5, DecompositionMethod::Default),
        (UnoptimizationStrategy::Concatenated, 2, 6, 10, DecompositionMethod::Default),
        (UnoptimizationStrategy::Random, 1, 4, 5, DecompositionMethod::Kak),
        (UnoptimizationStrategy::Random, 2, 6, 10, DecompositionMethod::Kak),
        (UnoptimizationStrategy::Concatenated, 1, 4, 5, DecompositionMethod::Basis),
        (UnoptimizationStrategy::Concatenated, 2, 6, 10, DecompositionMethod::Basis),
    ];

    for (case, (strategy, iterations, num_qubits, depth, method)) in cases.into_iter().enumerate() {
        let sample =
            random_two_qubit_circuit_with_rng(num_qubits, depth, StdRng::seed_from_u64(case as u64))
                .unwrap();
        let original_unitary = circuit_unitary(&sample).unwrap();

        let decomposed = decompose(&sample, method).unwrap();
        let processed = unoptimize_circuit_with_rng(
            &decomposed,
            iterations,
            strategy,
            StdRng::seed_from_u64(42),
        )
        .unwrap();
        let processed_unitary = circuit_unitary(&processed).unwrap();

        assert!(
            equiv_up_to_global_phase(&original_unitary, &processed_unitary, TOL),
            "unitary equivalence not maintained for strategy={strategy}, \
             iterations={iterations}, method={method}, case={case}"
        );
    }
}

#[test]
fn test_zero_iterations_equivalent_for_all_strategies() {
    let sample = random_two_qubit_circuit_with_rng(4, 5, StdRng::seed_from_u64(11)).unwrap();
    let u = circuit_unitary(&sample).unwrap();
    for strategy in [
        UnoptimizationStrategy::Concatenated,
        UnoptimizationStrategy::Random,
    ] {
        let out = unoptimize_circuit(&sample, 0, strategy).unwrap();
        let v = circuit_unitary(&out).unwrap();
        assert!(equiv_up_to_global_phase(&u, &v, TOL));
    }
}

#[test]
fn test_decomposition_alone_is_equivalent() {
    let sample = random_two_qubit_circuit_with_rng(4, 6, StdRng::seed_from_u64(23)).unwrap();
    let u = circuit_unitary(&sample).unwrap();
    for method in [
        DecompositionMethod::Default,
        DecompositionMethod::Kak,
        DecompositionMethod::Basis,
    ] {
        let decomposed = decompose(&sample, method).unwrap();
        let v = circuit_unitary(&decomposed).unwrap();
        assert!(
            equiv_up_to_global_phase(&u, &v, TOL),
            "decomposition broke equivalence for method={method}"
        );
    }
}

/// 4 qubits × 5 layers, basis decomposition, one concatenated round stays
/// equivalent to the original pre-decomposition unitary.
#[test]
fn test_scenario_basis_concatenated() {
    let sample = random_two_qubit_circuit_with_rng(4, 5, StdRng::seed_from_u64(1001)).unwrap();
    let original_unitary = circuit_unitary(&sample).unwrap();

    let decomposed = decompose(&sample, DecompositionMethod::Basis).unwrap();
    let processed =
        unoptimize_circuit(&decomposed, 1, UnoptimizationStrategy::Concatenated).unwrap();
    let processed_unitary = circuit_unitary(&processed).unwrap();

    assert!(equiv_up_to_global_phase(&original_unitary, &processed_unitary, TOL));
}

/// Same circuit family, kak decomposition, two random rounds: equivalent
/// and strictly larger than the undecomposed input.
#[test]
fn test_scenario_kak_random() {
    let sample = random_two_qubit_circuit_with_rng(4, 5, StdRng::seed_from_u64(1002)).unwrap();
    let original_unitary = circuit_unitary(&sample).unwrap();

    let decomposed = decompose(&sample, DecompositionMethod::Kak).unwrap();
    let processed = unoptimize_circuit_with_rng(
        &decomposed,
        2,
        UnoptimizationStrategy::Random,
        StdRng::seed_from_u64(5),
    )
    .unwrap();
    let processed_unitary = circuit_unitary(&processed).unwrap();

    assert!(equiv_up_to_global_phase(&original_unitary, &processed_unitary, TOL));
    assert!(processed.gate_count() > sample.gate_count());
}

#[test]
fn test_concatenated_scale_monotone_on_generated_circuits() {
    let sample = random_two_qubit_circuit_with_rng(4, 5, StdRng::seed_from_u64(77)).unwrap();
    let decomposed = decompose(&sample, DecompositionMethod::Default).unwrap();
    let mut previous = decomposed.gate_count();
    for k in 1..=3 {
        let out =
            unoptimize_circuit(&decomposed, k, UnoptimizationStrategy::Concatenated).unwrap();
        assert!(out.gate_count() >= previous);
        previous = out.gate_count();
    }
}

#[test]
fn test_boundary_errors() {
    let sample = random_two_qubit_circuit_with_rng(2, 2, StdRng::seed_from_u64(0)).unwrap();

    assert!(matches!(
        unoptimize_circuit(&sample, -1, UnoptimizationStrategy::Concatenated),
        Err(RecipeError::InvalidIterations(-1))
    ));
    assert!(matches!(
        "unknown".parse::<UnoptimizationStrategy>(),
        Err(RecipeError::InvalidStrategy(_))
    ));
    assert!(matches!(
        "unknown".parse::<DecompositionMethod>(),
        Err(RecipeError::InvalidMethod(_))
    ));
}
