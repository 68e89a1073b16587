//! # cranknicolson
//!
//! A Rust translation of the CrankNicolson simulator: numerical
//! integration of the one-dimensional time-dependent Schrödinger equation
//! on a discrete lattice with the Crank–Nicolson scheme.
//!
//! This crate is a **façade** that re-exports the public items of the
//! underlying workspace crates. Application code should depend on this
//! crate rather than the individual `cn-*` crates.
//!
//! ## Quick start
//!
//! ```rust
//! use cranknicolson::simulation::{
//!     GaussianWave, LinearHamiltonianSolver, Simulation, SimulationParameter,
//! };
//!
//! let parameter = SimulationParameter::new(0.01, 1e-5, 1.0, 10, 100);
//! let solver = LinearHamiltonianSolver::new(parameter, |_| 0.0);
//!
//! let mut sim = Simulation::new(parameter, solver);
//! sim.add_wave(&GaussianWave::new(5.0, 50.0, 0.0));
//! sim.run().unwrap();
//!
//! assert_eq!(sim.iteration(), Some(9));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Core types, aliases, and error definitions.
pub use cn_core as core;

/// Vectors, tridiagonal matrices, and their solvers.
pub use cn_math as math;

/// The simulation engine: parameters, waves, solvers, observables.
pub use cn_simulation as simulation;
