//! 2x2 complex matrices for single-qubit operators.

use num_complex::Complex64;

use expval_ir::StandardGate;

/// Tolerance for floating point comparisons.
pub const EPSILON: f64 = 1e-10;

/// A 2x2 complex matrix in row-major order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Unitary2x2 {
    /// The matrix elements in row-major order: [[a, b], [c, d]].
    pub data: [Complex64; 4],
}

impl Unitary2x2 {
    /// Create a new 2x2 matrix.
    pub fn new(a: Complex64, b: Complex64, c: Complex64, d: Complex64) -> Self {
        Self { data: [a, b, c, d] }
    }

    fn real(a: f64, b: f64, c: f64, d: f64) -> Self {
        Self::new(a.into(), b.into(), c.into(), d.into())
    }

    /// The identity matrix.
    pub fn identity() -> Self {
        Self::real(1.0, 0.0, 0.0, 1.0)
    }

    /// Hadamard matrix.
    pub fn h() -> Self {
        let s = 1.0 / 2.0_f64.sqrt();
        Self::real(s, s, s, -s)
    }

    /// Pauli-X matrix.
    pub fn x() -> Self {
        Self::real(0.0, 1.0, 1.0, 0.0)
    }

    /// Pauli-Y matrix.
    pub fn y() -> Self {
        Self::new(
            Complex64::new(0.0, 0.0),
            Complex64::new(0.0, -1.0),
            Complex64::new(0.0, 1.0),
            Complex64::new(0.0, 0.0),
        )
    }

    /// Pauli-Z matrix.
    pub fn z() -> Self {
        Self::real(1.0, 0.0, 0.0, -1.0)
    }

    /// Diagonal phase matrix diag(1, e^{iλ}).
    pub fn phase(lambda: f64) -> Self {
        Self::new(
            Complex64::new(1.0, 0.0),
            Complex64::new(0.0, 0.0),
            Complex64::new(0.0, 0.0),
            Complex64::from_polar(1.0, lambda),
        )
    }

    /// RX rotation matrix.
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

    /// RY rotation matrix.
    pub fn ry(theta: f64) -> Self {
        let c = (theta / 2.0).cos();
        let s = (theta / 2.0).sin();
        Self::real(c, -s, s, c)
    }

    /// RZ rotation matrix.
    pub fn rz(theta: f64) -> Self {
        Self::new(
            Complex64::from_polar(1.0, -theta / 2.0),
            Complex64::new(0.0, 0.0),
            Complex64::new(0.0, 0.0),
            Complex64::from_polar(1.0, theta / 2.0),
        )
    }

    /// Matrix of a concrete single-qubit standard gate.
    ///
    /// Returns `None` for multi-qubit gates and for unbound rotation angles.
    pub fn from_gate(gate: &StandardGate) -> Option<Self> {
        use std::f64::consts::FRAC_PI_4;
        let m = match gate {
            StandardGate::I => Self::identity(),
            StandardGate::X => Self::x(),
            StandardGate::Y => Self::y(),
            StandardGate::Z => Self::z(),
            StandardGate::H => Self::h(),
            StandardGate::S => Self::phase(2.0 * FRAC_PI_4),
            StandardGate::Sdg => Self::phase(-2.0 * FRAC_PI_4),
            StandardGate::T => Self::phase(FRAC_PI_4),
            StandardGate::Tdg => Self::phase(-FRAC_PI_4),
            StandardGate::Rx(t) => Self::rx(t.as_f64()?),
            StandardGate::Ry(t) => Self::ry(t.as_f64()?),
            StandardGate::Rz(t) => Self::rz(t.as_f64()?),
            StandardGate::CX | StandardGate::CZ | StandardGate::Swap => return None,
        };
        Some(m)
    }

    /// Matrix product `self * other`.
    #[allow(clippy::many_single_char_names)]
    #[must_use]
    pub fn mul(&self, other: &Self) -> Self {
        let [a, b, c, d] = self.data;
        let [e, f, g, h] = other.data;
        Self::new(a * e + b * g, a * f + b * h, c * e + d * g, c * f + d * h)
    }

    /// Elementwise sum.
    #[must_use]
    pub fn add(&self, other: &Self) -> Self {
        let [a, b, c, d] = self.data;
        let [e, f, g, h] = other.data;
        Self::new(a + e, b + f, c + g, d + h)
    }

    /// Multiply every element by a scalar.
    #[must_use]
    pub fn scale(&self, factor: Complex64) -> Self {
        Self {
            data: self.data.map(|v| v * factor),
        }
    }

    /// Conjugate transpose.
    #[must_use]
    pub fn dagger(&self) -> Self {
        Self::new(
            self.data[0].conj(),
            self.data[2].conj(),
            self.data[1].conj(),
            self.data[3].conj(),
        )
    }

    /// Elementwise comparison within `tol`.
    pub fn approx_eq(&self, other: &Self, tol: f64) -> bool {
        self.data
            .iter()
            .zip(other.data.iter())
            .all(|(a, b)| (a - b).norm() <= tol)
    }

    /// Comparison up to a global phase factor.
    pub fn approx_eq_up_to_phase(&self, other: &Self, tol: f64) -> bool {
        // Align phases on the largest element of `other`.
        let (idx, _) = other
            .data
            .iter()
            .enumerate()
            .fold((0, 0.0), |best, (i, v)| {
                if v.norm() > best.1 { (i, v.norm()) } else { best }
            });
        if other.data[idx].norm() <= tol || self.data[idx].norm() <= tol {
            return self.approx_eq(other, tol);
        }
        let ratio = other.data[idx] / self.data[idx];
        let phase = ratio / ratio.norm();
        self.scale(phase).approx_eq(other, tol)
    }
}

impl Default for Unitary2x2 {
    fn default() -> Self {
        Self::identity()
    }
}

impl std::ops::Mul for Unitary2x2 {
    type Output = Self;

    #[allow(clippy::needless_pass_by_value)]
    fn mul(self, rhs: Self) -> Self::Output {
        Unitary2x2::mul(&self, &rhs)
    }
}
