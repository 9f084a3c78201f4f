//! Dense unitary matrix utilities.
//!
//! Provides 2x2 and 4x4 unitary operations for gate rewriting (matrix
//! products, ZYZ decomposition) and the full-register circuit operator used
//! to state the unitary-equivalence invariant.
//!
//! Conventions: qubit `k` is bit `k` of a basis index (qubit 0 least
//! significant); the local basis of a two-qubit gate puts `qubits[0]` in the
//! most significant position, so `CX(control, target)` is the familiar
//! `[[1,0,0,0],[0,1,0,0],[0,0,0,1],[0,0,1,0]]`.

use ndarray::Array2;
use num_complex::Complex64;
use std::f64::consts::{FRAC_1_SQRT_2, PI};

use unopt_ir::{Circuit, Gate, InstructionKind, StandardGate};

use crate::error::{RecipeError, RecipeResult};

/// Tolerance for floating point comparisons.
pub(crate) const EPSILON: f64 = 1e-10;

/// A 2x2 unitary matrix in row-major order.
#[derive(Debug, Clone, Copy)]
pub struct Unitary2x2 {
    /// The matrix elements in row-major order: [[a, b], [c, d]].
    pub data: [Complex64; 4],
}

impl Unitary2x2 {
    /// Create a new 2x2 unitary matrix.
    pub fn new(a: Complex64, b: Complex64, c: Complex64, d: Complex64) -> Self {
        Self { data: [a, b, c, d] }
    }

    /// Create the identity matrix.
    pub fn identity() -> Self {
        Self::new(
            Complex64::new(1.0, 0.0),
            Complex64::new(0.0, 0.0),
            Complex64::new(0.0, 0.0),
            Complex64::new(1.0, 0.0),
        )
    }

    /// Create a Hadamard matrix.
    pub fn h() -> Self {
        let s = FRAC_1_SQRT_2;
        Self::new(
            Complex64::new(s, 0.0),
            Complex64::new(s, 0.0),
            Complex64::new(s, 0.0),
            Complex64::new(-s, 0.0),
        )
    }

    /// Create a Pauli-X matrix.
    pub fn x() -> Self {
        Self::new(
            Complex64::new(0.0, 0.0),
            Complex64::new(1.0, 0.0),
            Complex64::new(1.0, 0.0),
            Complex64::new(0.0, 0.0),
        )
    }

    /// Create a Pauli-Y matrix.
    pub fn y() -> Self {
        Self::new(
            Complex64::new(0.0, 0.0),
            Complex64::new(0.0, -1.0),
            Complex64::new(0.0, 1.0),
            Complex64::new(0.0, 0.0),
        )
    }

    /// Create a Pauli-Z matrix.
    pub fn z() -> Self {
        Self::new(
            Complex64::new(1.0, 0.0),
            Complex64::new(0.0, 0.0),
            Complex64::new(0.0, 0.0),
            Complex64::new(-1.0, 0.0),
        )
    }

    /// Create an S gate (sqrt(Z)).
    pub fn s() -> Self {
        Self::new(
            Complex64::new(1.0, 0.0),
            Complex64::new(0.0, 0.0),
            Complex64::new(0.0, 0.0),
            Complex64::new(0.0, 1.0),
        )
    }

    /// Create an S-dagger gate.
    pub fn sdg() -> Self {
        Self::new(
            Complex64::new(1.0, 0.0),
            Complex64::new(0.0, 0.0),
            Complex64::new(0.0, 0.0),
            Complex64::new(0.0, -1.0),
        )
    }

    /// Create a T gate (fourth root of Z).
    pub fn t() -> Self {
        let phase = Complex64::from_polar(1.0, PI / 4.0);
        Self::new(
            Complex64::new(1.0, 0.0),
            Complex64::new(0.0, 0.0),
            Complex64::new(0.0, 0.0),
            phase,
        )
    }

    /// Create a T-dagger gate.
    pub fn tdg() -> Self {
        let phase = Complex64::from_polar(1.0, -PI / 4.0);
        Self::new(
            Complex64::new(1.0, 0.0),
            Complex64::new(0.0, 0.0),
            Complex64::new(0.0, 0.0),
            phase,
        )
    }

    /// Create an SX gate (sqrt(X)).
    pub fn sx() -> Self {
        let half = Complex64::new(0.5, 0.0);
        let half_i = Complex64::new(0.0, 0.5);
        Self::new(half + half_i, half - half_i, half - half_i, half + half_i)
    }

    /// Create an SX-dagger gate.
    pub fn sxdg() -> Self {
        let half = Complex64::new(0.5, 0.0);
        let half_i = Complex64::new(0.0, 0.5);
        Self::new(half - half_i, half + half_i, half + half_i, half - half_i)
    }

    /// Create an RX rotation matrix.
    pub fn rx(theta: f64) -> Self {
        let c = (theta / 2.0).cos();
        let s = (theta / 2.0).sin();
        Self::new(
            Complex64::new(c, 0.0),
            Complex64::new(0.0, -s),
            Complex64::new(0.0, -s),
            Complex64::new(c, 0.0),
        )
    }

    /// Create an RY rotation matrix.
    pub fn ry(theta: f64) -> Self {
        let c = (theta / 2.0).cos();
        let s = (theta / 2.0).sin();
        Self::new(
            Complex64::new(c, 0.0),
            Complex64::new(-s, 0.0),
            Complex64::new(s, 0.0),
            Complex64::new(c, 0.0),
        )
    }

    /// Create an RZ rotation matrix.
    pub fn rz(theta: f64) -> Self {
        let exp_neg = Complex64::from_polar(1.0, -theta / 2.0);
        let exp_pos = Complex64::from_polar(1.0, theta / 2.0);
        Self::new(
            exp_neg,
            Complex64::new(0.0, 0.0),
            Complex64::new(0.0, 0.0),
            exp_pos,
        )
    }

    /// Create a phase gate P(lambda).
    pub fn p(lambda: f64) -> Self {
        let phase = Complex64::from_polar(1.0, lambda);
        Self::new(
            Complex64::new(1.0, 0.0),
            Complex64::new(0.0, 0.0),
            Complex64::new(0.0, 0.0),
            phase,
        )
    }

    /// Create a U gate U(theta, phi, lambda).
    pub fn u(theta: f64, phi: f64, lambda: f64) -> Self {
        let c = (theta / 2.0).cos();
        let s = (theta / 2.0).sin();
        Self::new(
            Complex64::new(c, 0.0),
            -Complex64::from_polar(s, lambda),
            Complex64::from_polar(s, phi),
            Complex64::from_polar(c, phi + lambda),
        )
    }

    /// Matrix of a single-qubit standard gate; `None` for multi-qubit gates.
    pub fn from_standard(gate: &StandardGate) -> Option<Self> {
        Some(match gate {
            StandardGate::I => Self::identity(),
            StandardGate::X => Self::x(),
            StandardGate::Y => Self::y(),
            StandardGate::Z => Self::z(),
            StandardGate::H => Self::h(),
            StandardGate::S => Self::s(),
            StandardGate::Sdg => Self::sdg(),
            StandardGate::T => Self::t(),
            StandardGate::Tdg => Self::tdg(),
            StandardGate::SX => Self::sx(),
            StandardGate::SXdg => Self::sxdg(),
            StandardGate::Rx(t) => Self::rx(*t),
            StandardGate::Ry(t) => Self::ry(*t),
            StandardGate::Rz(t) => Self::rz(*t),
            StandardGate::P(t) => Self::p(*t),
            StandardGate::U(t, p, l) => Self::u(*t, *p, *l),
            _ => return None,
        })
    }

    /// Multiply this matrix by another: self * other.
    #[allow(clippy::many_single_char_names)]
    pub fn mul(&self, other: &Self) -> Self {
        let [a, b, c, d] = self.data;
        let [e, f, g, h] = other.data;
        Self::new(a * e + b * g, a * f + b * h, c * e + d * g, c * f + d * h)
    }

    /// Get the conjugate transpose (dagger).
    pub fn dagger(&self) -> Self {
        Self::new(
            self.data[0].conj(),
            self.data[2].conj(),
            self.data[1].conj(),
            self.data[3].conj(),
        )
    }

    /// Check if this is approximately identity (up to global phase).
    pub fn is_identity(&self) -> bool {
        let [a, b, c, d] = self.data;
        if b.norm() > EPSILON || c.norm() > EPSILON {
            return false;
        }
        (a - d).norm() < EPSILON
    }

    /// Decompose into RZ(alpha) * RY(beta) * RZ(gamma) * `global_phase`.
    ///
    /// Returns (alpha, beta, gamma, `global_phase`) such that
    /// `U = e^{i·phase} · Rz(alpha) · Ry(beta) · Rz(gamma)`.
    pub fn zyz_decomposition(&self) -> (f64, f64, f64, f64) {
        let [a, b, c, d] = self.data;

        // Calculate the global phase factor
        let det = a * d - b * c;
        let global_phase = det.arg() / 2.0;

        // Remove global phase to get SU(2) matrix
        let phase_factor = Complex64::from_polar(1.0, -global_phase);
        let a = a * phase_factor;
        let b = b * phase_factor;
        let c = c * phase_factor;

        // For SU(2): U = [[cos(b/2)*e^(-i(a+g)/2), -sin(b/2)*e^(-i(a-g)/2)],
        //                 [sin(b/2)*e^(i(a-g)/2),   cos(b/2)*e^(i(a+g)/2)]]

        // beta is determined by the magnitude of the diagonal; rounding can
        // push |a| marginally above 1, which would make acos return NaN.
        let beta = 2.0 * a.norm().min(1.0).acos();

        if beta.abs() < EPSILON {
            // beta ≈ 0: pure Z rotation
            let alpha_plus_gamma = -2.0 * a.arg();
            return (
                alpha_plus_gamma / 2.0,
                0.0,
                alpha_plus_gamma / 2.0,
                global_phase,
            );
        }

        if (beta - PI).abs() < EPSILON {
            // beta ≈ π:
            // U ≈ [[0, -e^(-i*(a-g)/2)], [e^(i*(a-g)/2), 0]]
            let alpha_minus_gamma = -2.0 * (-b).arg();
            return (
                alpha_minus_gamma / 2.0,
                PI,
                -alpha_minus_gamma / 2.0,
                global_phase,
            );
        }

        // General case
        // a = cos(beta/2) * e^(-i*(alpha+gamma)/2)
        // c = sin(beta/2) * e^(i*(alpha-gamma)/2)
        let alpha_plus_gamma = -2.0 * a.arg();
        let alpha_minus_gamma = 2.0 * c.arg();

        let alpha = f64::midpoint(alpha_plus_gamma, alpha_minus_gamma);
        let gamma = (alpha_plus_gamma - alpha_minus_gamma) / 2.0;

        (alpha, beta, gamma, global_phase)
    }

    /// Normalize angles to [-pi, pi].
    pub fn normalize_angle(angle: f64) -> f64 {
        if angle.is_nan() || angle.is_infinite() {
            return 0.0;
        }
        let mut a = angle.rem_euclid(2.0 * PI);
        if a > PI {
            a -= 2.0 * PI;
        }
        a
    }
}

impl Default for Unitary2x2 {
    fn default() -> Self {
        Self::identity()
    }
}

impl std::ops::Mul for Unitary2x2 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Unitary2x2::mul(&self, &rhs)
    }
}

/// A 4x4 unitary matrix in row-major order.
///
/// Basis ordering puts the first operand qubit in the most significant
/// position: index = (bit of `qubits[0]`) << 1 | (bit of `qubits[1]`).
#[derive(Debug, Clone, Copy)]
pub struct Unitary4x4 {
    /// The matrix elements in row-major order.
    pub data: [Complex64; 16],
}

impl Unitary4x4 {
    const ZERO: Complex64 = Complex64::new(0.0, 0.0);
    const ONE: Complex64 = Complex64::new(1.0, 0.0);

    /// Create a matrix from row-major elements.
    pub fn new(data: [Complex64; 16]) -> Self {
        Self { data }
    }

    /// Create the identity matrix.
    pub fn identity() -> Self {
        let mut data = [Self::ZERO; 16];
        for i in 0..4 {
            data[i * 4 + i] = Self::ONE;
        }
        Self { data }
    }

    /// Create a diagonal matrix.
    pub fn diagonal(diag: [Complex64; 4]) -> Self {
        let mut data = [Self::ZERO; 16];
        for (i, v) in diag.into_iter().enumerate() {
            data[i * 4 + i] = v;
        }
        Self { data }
    }

    /// Create a CX (CNOT) matrix, control in the most significant position.
    pub fn cx() -> Self {
        let mut data = [Self::ZERO; 16];
        data[0] = Self::ONE;
        data[5] = Self::ONE;
        data[2 * 4 + 3] = Self::ONE;
        data[3 * 4 + 2] = Self::ONE;
        Self { data }
    }

    /// Create a CY matrix.
    pub fn cy() -> Self {
        let mut data = [Self::ZERO; 16];
        data[0] = Self::ONE;
        data[5] = Self::ONE;
        data[2 * 4 + 3] = Complex64::new(0.0, -1.0);
        data[3 * 4 + 2] = Complex64::new(0.0, 1.0);
        Self { data }
    }

    /// Create a CZ matrix.
    pub fn cz() -> Self {
        Self::diagonal([Self::ONE, Self::ONE, Self::ONE, -Self::ONE])
    }

    /// Create a SWAP matrix.
    pub fn swap() -> Self {
        let mut data = [Self::ZERO; 16];
        data[0] = Self::ONE;
        data[4 + 2] = Self::ONE;
        data[2 * 4 + 1] = Self::ONE;
        data[3 * 4 + 3] = Self::ONE;
        Self { data }
    }

    /// Create an RZZ matrix exp(-iθ/2 Z⊗Z).
    pub fn rzz(theta: f64) -> Self {
        let exp_neg = Complex64::from_polar(1.0, -theta / 2.0);
        let exp_pos = Complex64::from_polar(1.0, theta / 2.0);
        Self::diagonal([exp_neg, exp_pos, exp_pos, exp_neg])
    }

    /// Matrix of a two-qubit standard gate; `None` for single-qubit gates.
    pub fn from_standard(gate: &StandardGate) -> Option<Self> {
        Some(match gate {
            StandardGate::CX => Self::cx(),
            StandardGate::CY => Self::cy(),
            StandardGate::CZ => Self::cz(),
            StandardGate::Swap => Self::swap(),
            StandardGate::RZZ(t) => Self::rzz(*t),
            _ => return None,
        })
    }

    /// Kronecker product `a ⊗ b` with `a` in the most significant position.
    pub fn kron(a: &Unitary2x2, b: &Unitary2x2) -> Self {
        let mut data = [Self::ZERO; 16];
        for i1 in 0..2 {
            for j1 in 0..2 {
                for i2 in 0..2 {
                    for j2 in 0..2 {
                        data[(i1 * 2 + i2) * 4 + (j1 * 2 + j2)] =
                            a.data[i1 * 2 + j1] * b.data[i2 * 2 + j2];
                    }
                }
            }
        }
        Self { data }
    }

    /// Multiply this matrix by another: self * other.
    pub fn mul(&self, other: &Self) -> Self {
        let mut data = [Self::ZERO; 16];
        for row in 0..4 {
            for col in 0..4 {
                let mut acc = Self::ZERO;
                for k in 0..4 {
                    acc += self.data[row * 4 + k] * other.data[k * 4 + col];
                }
                data[row * 4 + col] = acc;
            }
        }
        Self { data }
    }

    /// Get the conjugate transpose (dagger).
    pub fn dagger(&self) -> Self {
        let mut data = [Self::ZERO; 16];
        for row in 0..4 {
            for col in 0..4 {
                data[row * 4 + col] = self.data[col * 4 + row].conj();
            }
        }
        Self { data }
    }

    /// Check if this is approximately identity (up to global phase).
    pub fn is_identity(&self) -> bool {
        let first = self.data[0];
        for row in 0..4 {
            for col in 0..4 {
                let v = self.data[row * 4 + col];
                if row == col {
                    if (v - first).norm() > EPSILON {
                        return false;
                    }
                } else if v.norm() > EPSILON {
                    return false;
                }
            }
        }
        true
    }
}

impl std::ops::Mul for Unitary4x4 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Unitary4x4::mul(&self, &rhs)
    }
}

// ---------------------------------------------------------------------------
// Full-register circuit operator
// ---------------------------------------------------------------------------

/// Compute the `2^n × 2^n` unitary operator of a circuit, including its
/// global phase. Barriers are skipped; measurements make the circuit
/// non-unitary and fail with [`RecipeError::NonUnitary`].
pub fn circuit_unitary(circuit: &Circuit) -> RecipeResult<Array2<Complex64>> {
    let n = circuit.num_qubits();
    let dim = 1usize << n;
    let mut u = Array2::<Complex64>::eye(dim);

    for inst in circuit.instructions() {
        match &inst.kind {
            InstructionKind::Gate(gate) => match gate {
                Gate::Standard(g) if g.num_qubits() == 1 => {
                    let m = Unitary2x2::from_standard(g)
                        .expect("single-qubit standard gate has a matrix");
                    apply_one_qubit(&mut u, &m, inst.qubits[0].0 as usize);
                }
                Gate::Standard(g) => {
                    let m = Unitary4x4::from_standard(g)
                        .expect("two-qubit standard gate has a matrix");
                    apply_two_qubit(
                        &mut u,
                        &m,
                        inst.qubits[0].0 as usize,
                        inst.qubits[1].0 as usize,
                    );
                }
                Gate::Custom(g) => match g.num_qubits {
                    1 => {
                        let m = Unitary2x2::new(
                            g.matrix[0], g.matrix[1], g.matrix[2], g.matrix[3],
                        );
                        apply_one_qubit(&mut u, &m, inst.qubits[0].0 as usize);
                    }
                    2 => {
                        let mut data = [Complex64::new(0.0, 0.0); 16];
                        data.copy_from_slice(&g.matrix);
                        let m = Unitary4x4::new(data);
                        apply_two_qubit(
                            &mut u,
                            &m,
                            inst.qubits[0].0 as usize,
                            inst.qubits[1].0 as usize,
                        );
                    }
                    _ => return Err(RecipeError::NonUnitary(g.name.clone())),
                },
            },
            InstructionKind::Barrier => {}
            InstructionKind::Measure => {
                return Err(RecipeError::NonUnitary(inst.name().to_string()));
            }
        }
    }

    let phase = Complex64::from_polar(1.0, circuit.global_phase());
    u.mapv_inplace(|v| v * phase);
    Ok(u)
}

/// Left-multiply a one-qubit gate into the accumulated operator.
fn apply_one_qubit(u: &mut Array2<Complex64>, m: &Unitary2x2, qubit: usize) {
    let dim = u.nrows();
    let bit = 1usize << qubit;
    let [m00, m01, m10, m11] = m.data;
    for base in 0..dim {
        if base & bit != 0 {
            continue;
        }
        let other = base | bit;
        for col in 0..dim {
            let a = u[(base, col)];
            let b = u[(other, col)];
            u[(base, col)] = m00 * a + m01 * b;
            u[(other, col)] = m10 * a + m11 * b;
        }
    }
}

/// Left-multiply a two-qubit gate into the accumulated operator.
///
/// `q_hi` is the gate's first operand (most significant local bit).
fn apply_two_qubit(u: &mut Array2<Complex64>, m: &Unitary4x4, q_hi: usize, q_lo: usize) {
    let dim = u.nrows();
    let bit_hi = 1usize << q_hi;
    let bit_lo = 1usize << q_lo;
    for base in 0..dim {
        if base & bit_hi != 0 || base & bit_lo != 0 {
            continue;
        }
        let rows = [
            base,
            base | bit_lo,
            base | bit_hi,
            base | bit_hi | bit_lo,
        ];
        for col in 0..dim {
            let old = rows.map(|r| u[(r, col)]);
            for (l, &row) in rows.iter().enumerate() {
                let mut acc = Complex64::new(0.0, 0.0);
                for k in 0..4 {
                    acc += m.data[l * 4 + k] * old[k];
                }
                u[(row, col)] = acc;
            }
        }
    }
}

/// Check whether two operators of equal dimension are the same up to an
/// unobservable global phase, via `|tr(A†B)| ≈ dim`.
pub fn equiv_up_to_global_phase(a: &Array2<Complex64>, b: &Array2<Complex64>, tol: f64) -> bool {
    if a.dim() != b.dim() {
        return false;
    }
    let dim = a.nrows() as f64;
    let trace: Complex64 = a
        .iter()
        .zip(b.iter())
        .map(|(x, y)| x.conj() * y)
        .sum();
    (trace.norm() - dim).abs() < tol * dim
}
