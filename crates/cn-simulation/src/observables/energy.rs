//! Energy sampling: the expectation value of H and its spectrum
//! (translates `expectationvalueobservable.h` and
//! `energyeigenvalueobservable.h`).

use cn_core::{Real, Result};
use std::io::Write;

use super::{CheckMask, CheckTime, Observable, SharedSink};
use crate::simulation::Simulation;

/// Off-diagonal threshold handed to the eigensolver.
const EIGENVALUE_ERROR: Real = 1e-5;

/// Writes `Re⟨ψ|H|ψ⟩` after each iteration as a `iteration value` time
/// series.
pub struct ExpectationValue {
    sink: SharedSink,
}

impl ExpectationValue {
    /// Create an observer writing to `sink`.
    pub fn new(sink: SharedSink) -> Self {
        Self { sink }
    }
}

impl Observable for ExpectationValue {
    fn mask(&self) -> CheckMask {
        CheckTime::Iteration.into()
    }

    fn filter(&mut self, sim: &Simulation) -> Result<()> {
        let energy = sim
            .solver()
            .hamiltonian()
            .expectation_value(sim.atoms());
        let mut out = self.sink.borrow_mut();
        writeln!(out, "{} {}", sim.iteration().unwrap_or(0), energy.re)?;
        Ok(())
    }
}

/// Writes the spectrum of the Hamiltonian once at startup: one `k λₖ`
/// record per eigenvalue, ascending, followed by a blank-line frame
/// separator.
///
/// The eigensolver runs on the real part of H, the regime in which the
/// Hamiltonians built by this crate are real-symmetric tridiagonal.
pub struct EnergyEigenvalues {
    sink: SharedSink,
}

impl EnergyEigenvalues {
    /// Create an observer writing to `sink`.
    pub fn new(sink: SharedSink) -> Self {
        Self { sink }
    }
}

impl Observable for EnergyEigenvalues {
    fn mask(&self) -> CheckMask {
        CheckTime::Startup.into()
    }

    fn filter(&mut self, sim: &Simulation) -> Result<()> {
        let real_hamiltonian = sim.solver().hamiltonian().map(|z| z.re);
        let eigenvalues = real_hamiltonian.eigenvalues(EIGENVALUE_ERROR)?;
        let mut out = self.sink.borrow_mut();
        for (k, value) in eigenvalues.iter().enumerate() {
            writeln!(out, "{k} {value}")?;
        }
        writeln!(out)?;
        writeln!(out)?;
        Ok(())
    }
}
