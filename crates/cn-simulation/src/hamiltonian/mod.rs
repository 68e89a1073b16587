//! Hamiltonian construction and the Crank–Nicolson stepping law
//! (translates `hamiltonian.h`).
//!
//! A solver advances the wavefunction by one time step through
//!
//! ```text
//! (I + iλH) · ψⁿ⁺¹ = (I − iλH) · ψⁿ
//! ```
//!
//! with `λ = dt / (2·mass·dx²)`. The left operator is inverted with the
//! tridiagonal Thomas solve, so a step costs `O(n)`.

use cn_core::{Real, Result};
use cn_math::{Line, TridiagonalMatrix};
use num_complex::Complex64;

use crate::{ComplexTridiagonalMatrix, ComplexVector};

mod linear;
mod nonlinear;

pub use linear::LinearHamiltonianSolver;
pub use nonlinear::{NonLinearHamiltonianSolver, Nonlinearity};

/// The stepping capability of a Hamiltonian solver.
///
/// Custom steppers implement this trait; the simulation driver only
/// depends on the four methods below.
pub trait HamiltonianSolver {
    /// Advance the wavefunction by one time step.
    ///
    /// Any numerical failure of the inner tridiagonal solve propagates to
    /// the caller.
    fn solve(&mut self, current: &ComplexVector) -> Result<ComplexVector>;

    /// The Hamiltonian matrix H currently in use.
    fn hamiltonian(&self) -> &ComplexTridiagonalMatrix;

    /// The Crank–Nicolson left operator `L = I + iλH`.
    fn left_matrix(&self) -> &ComplexTridiagonalMatrix;

    /// The Crank–Nicolson right operator `R = I − iλH`.
    fn right_matrix(&self) -> &ComplexTridiagonalMatrix;
}

/// Build a Hamiltonian with the (−1, 2, −1) discrete Laplacian band
/// structure and `diagonal(i)` supplying the full main-diagonal value.
fn build_hamiltonian(
    n: usize,
    diagonal: impl Fn(usize) -> Real,
) -> ComplexTridiagonalMatrix {
    let mut h = TridiagonalMatrix::new(n);
    for i in 0..n {
        h[(Line::Lower, i)] = Complex64::new(-1.0, 0.0);
        h[(Line::Main, i)] = Complex64::new(diagonal(i), 0.0);
        h[(Line::Upper, i)] = Complex64::new(-1.0, 0.0);
    }
    h
}

/// The Crank–Nicolson operator pair `(L, R) = (I + iλH, I − iλH)`.
fn crank_nicolson_operators(
    h: &ComplexTridiagonalMatrix,
    lambda: Real,
) -> (ComplexTridiagonalMatrix, ComplexTridiagonalMatrix) {
    let identity = TridiagonalMatrix::identity(h.size(), Complex64::new(1.0, 0.0));
    let ih = h * Complex64::new(0.0, lambda);
    (&identity + &ih, &identity - &ih)
}
