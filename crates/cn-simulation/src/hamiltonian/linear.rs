//! The time-independent Schrödinger stepper (translates
//! `linearhamiltonian.h`).

use cn_core::{Real, Result};

use super::{build_hamiltonian, crank_nicolson_operators, HamiltonianSolver};
use crate::{ComplexTridiagonalMatrix, ComplexVector, SimulationParameter};

/// Crank–Nicolson stepper for the linear Schrödinger equation
/// `(P²/2m + V(r)) |ψ⟩ = i ∂t |ψ⟩`.
///
/// The Hamiltonian is time-independent, so H and the operator pair
/// `L = I + iλH`, `R = I − iλH` are built once at construction; every
/// step is then `ψⁿ⁺¹ = L⁻¹ (R · ψⁿ)`.
pub struct LinearHamiltonianSolver {
    hamiltonian: ComplexTridiagonalMatrix,
    left: ComplexTridiagonalMatrix,
    right: ComplexTridiagonalMatrix,
}

impl LinearHamiltonianSolver {
    /// Build the stepper from the run parameters and the potential.
    ///
    /// `potential` maps the normalised lattice position `i / n ∈ [0, 1)`
    /// to a real energy; the discrete Hamiltonian row `i` is
    /// `(−1, 2 + 2·V(i/n), −1)`.
    pub fn new(parameter: SimulationParameter, potential: impl Fn(Real) -> Real) -> Self {
        let n = parameter.atom_count();
        let hamiltonian =
            build_hamiltonian(n, |i| 2.0 + 2.0 * potential(i as Real / n as Real));
        let (left, right) = crank_nicolson_operators(&hamiltonian, parameter.lambda());
        Self {
            hamiltonian,
            left,
            right,
        }
    }
}

impl HamiltonianSolver for LinearHamiltonianSolver {
    fn solve(&mut self, current: &ComplexVector) -> Result<ComplexVector> {
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
