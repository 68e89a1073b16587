//! The self-interacting Schrödinger stepper (translates
//! `nonlinearhamiltonian.h`).

use cn_core::{Real, Result};
use num_complex::ComplexFloat;

use super::{build_hamiltonian, crank_nicolson_operators, HamiltonianSolver};
use crate::{ComplexTridiagonalMatrix, ComplexVector, SimulationParameter};

/// How the `κ·|ψ|²` self-interaction enters the diagonal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nonlinearity {
    /// The state-global scalar `⟨ψ|ψ⟩` on every diagonal entry. This is
    /// what the C++ sources compute and is the default for output
    /// compatibility with them.
    GlobalNorm,
    /// The local density `|ψᵢ|²` at each site, the Gross–Pitaevskii form.
    PointDensity,
}

/// Crank–Nicolson stepper for the nonlinear Schrödinger equation
/// `(P²/2m + V(r) + κ·|ψ|²) |ψ⟩ = i ∂t |ψ⟩`, used for solitons.
///
/// Unlike the linear stepper the Hamiltonian depends on the state, so H
/// and the operator pair are rebuilt on every step before the solve.
pub struct NonLinearHamiltonianSolver {
    parameter: SimulationParameter,
    potential: Box<dyn Fn(Real) -> Real>,
    factor: Real,
    nonlinearity: Nonlinearity,
    hamiltonian: ComplexTridiagonalMatrix,
    left: ComplexTridiagonalMatrix,
    right: ComplexTridiagonalMatrix,
}

impl NonLinearHamiltonianSolver {
    /// Build the stepper from the run parameters, the potential, and the
    /// self-interaction strength `factor` (κ).
    ///
    /// The initial Hamiltonian carries the interaction term of a
    /// normalised state (`κ·1`); the per-step rebuild replaces it with the
    /// live value.
    pub fn new(
        parameter: SimulationParameter,
        potential: impl Fn(Real) -> Real + 'static,
        factor: Real,
    ) -> Self {
        let n = parameter.atom_count();
        let hamiltonian = build_hamiltonian(n, |i| {
            2.0 + 2.0 * potential(i as Real / n as Real) + factor
        });
        let (left, right) = crank_nicolson_operators(&hamiltonian, parameter.lambda());
        Self {
            parameter,
            potential: Box::new(potential),
            factor,
            nonlinearity: Nonlinearity::GlobalNorm,
            hamiltonian,
            left,
            right,
        }
    }

    /// Select the form of the self-interaction term.
    pub fn with_nonlinearity(mut self, nonlinearity: Nonlinearity) -> Self {
        self.nonlinearity = nonlinearity;
        self
    }
}

impl HamiltonianSolver for NonLinearHamiltonianSolver {
    fn solve(&mut self, current: &ComplexVector) -> Result<ComplexVector> {
        let n = self.parameter.atom_count();
        // The scalar form cannot change between sites; evaluate it once.
        let norm = current.dot(current).re();

        let hamiltonian = build_hamiltonian(n, |i| {
            let interaction = match self.nonlinearity {
                Nonlinearity::GlobalNorm => norm,
                Nonlinearity::PointDensity => current[i].norm_sqr(),
            };
            2.0 + 2.0 * (self.potential)(i as Real / n as Real) + self.factor * interaction
        });
        let (left, right) = crank_nicolson_operators(&hamiltonian, self.parameter.lambda());
        self.hamiltonian = hamiltonian;
        self.left = left;
        self.right = right;

        self.left.solve(&(&self.right * current))
    }

    fn hamiltonian(&self) -> &ComplexTridiagonalMatrix {
        &self.hamiltonian
    }

    fn left_matrix(&self) -> &ComplexTridiagonalMatrix {
        &self.left
    }

    fn right_matrix(&self) -> &ComplexTridiagonalMatrix {
        &self.right
    }
}
