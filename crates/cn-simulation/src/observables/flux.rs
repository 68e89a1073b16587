//! The probability current (translates `streamdensity.h`).

use cn_core::{Real, Result};
use std::io::Write;

use super::{CheckMask, CheckTime, Observable, SharedSink};
use crate::simulation::Simulation;
use crate::ComplexVector;

/// Writes the probability flux `j = (1/mass) · Im⟨ψ|∇ψ⟩` after each
/// iteration as a `iteration j` time series.
///
/// The gradient uses a centred finite difference on the interior and
/// one-sided differences at the two boundary sites.
pub struct ProbabilityFlux {
    sink: SharedSink,
}

impl ProbabilityFlux {
    /// Create an observer writing to `sink`.
    pub fn new(sink: SharedSink) -> Self {
        Self { sink }
    }
}

impl Observable for ProbabilityFlux {
    fn mask(&self) -> CheckMask {
        CheckTime::Iteration.into()
    }

    fn filter(&mut self, sim: &Simulation) -> Result<()> {
        let atoms = sim.atoms();
        let grad = gradient(atoms, sim.parameter().dx());
        let j = atoms.dot(&grad).im / sim.parameter().mass();
        let mut out = self.sink.borrow_mut();
        writeln!(out, "{} {}", sim.iteration().unwrap_or(0), j)?;
        Ok(())
    }
}

/// Finite-difference gradient: forward at the left edge, centred on the
/// interior, backward at the right edge.
fn gradient(vec: &ComplexVector, dx: Real) -> ComplexVector {
    let n = vec.size();
    let mut grad = ComplexVector::zeros(n);
    grad[0] = (vec[1] - vec[0]) / dx;
    for i in 1..n - 1 {
        grad[i] = (vec[i + 1] - vec[i - 1]) / (2.0 * dx);
    }
    grad[n - 1] = (vec[n - 1] - vec[n - 2]) / dx;
    grad
}
