//! # cn-simulation
//!
//! The simulation engine of cranknicolson-rs: lattice parameters, initial
//! wavepackets, the linear and nonlinear Crank–Nicolson Hamiltonian
//! solvers, the iteration driver, and the stock observables.
//!
//! Translates `simulation.h/.cpp`, `hamiltonian.h`, `wave.h`, and the
//! observable headers of the CrankNicolson C++ sources.
//!
//! # Modules
//!
//! * [`parameter`] — the immutable lattice/time-step configuration
//! * [`wave`] — initial-displacement functions, the Gaussian wavepacket
//! * [`hamiltonian`] — the solver contract and its two implementations
//! * [`simulation`] — the iteration driver with Dirichlet boundaries
//! * [`observables`] — sampling sinks fired at startup/iteration/cooldown

#![warn(missing_docs)]
#![forbid(unsafe_code)]

use cn_math::{NumericVector, TridiagonalMatrix};
use num_complex::Complex64;

// ── Modules ───────────────────────────────────────────────────────────────────

/// Simulation parameters: lattice spacing, time step, mass, iteration count.
pub mod parameter;

/// Initial wavepackets added onto the lattice.
pub mod wave;

/// Hamiltonian construction and the Crank–Nicolson stepping law.
pub mod hamiltonian;

/// The simulation driver.
pub mod simulation;

/// The observer contract and the stock observables.
pub mod observables;

// ── Complex aliases used throughout the engine ───────────────────────────────

/// The wavefunction state vector ψ.
pub type ComplexVector = NumericVector<Complex64>;

/// A tridiagonal operator over the complex field.
pub type ComplexTridiagonalMatrix = TridiagonalMatrix<Complex64>;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use hamiltonian::{
    HamiltonianSolver, LinearHamiltonianSolver, NonLinearHamiltonianSolver, Nonlinearity,
};
pub use observables::{CheckMask, CheckTime, Observable, SharedSink};
pub use parameter::SimulationParameter;
pub use simulation::Simulation;
pub use wave::{GaussianWave, Wave};
