//! Per-site samples of the wavefunction (translates
//! `properbilityoberservable.h`).

use cn_core::{Real, Result};
use std::io::Write;

use super::{CheckMask, CheckTime, Observable, SharedSink};
use crate::simulation::Simulation;

/// Writes `i/n |ψ(i)|` for every lattice site after each iteration,
/// followed by a blank-line frame separator.
pub struct ProbabilityDensity {
    sink: SharedSink,
}

impl ProbabilityDensity {
    /// Create an observer writing to `sink`.
    pub fn new(sink: SharedSink) -> Self {
        Self { sink }
    }
}

impl Observable for ProbabilityDensity {
    fn mask(&self) -> CheckMask {
        CheckTime::Iteration.into()
    }

    fn filter(&mut self, sim: &Simulation) -> Result<()> {
        let atoms = sim.atoms();
        let n = atoms.size();
        let mut out = self.sink.borrow_mut();
        for i in 0..n {
            writeln!(out, "{} {}", i as Real / n as Real, atoms[i].norm())?;
        }
        writeln!(out)?;
        writeln!(out)?;
        Ok(())
    }
}

/// Writes `i/n Re(ψ(i))` for every lattice site after each iteration,
/// followed by a blank-line frame separator.
pub struct RealPart {
    sink: SharedSink,
}

impl RealPart {
    /// Create an observer writing to `sink`.
    pub fn new(sink: SharedSink) -> Self {
        Self { sink }
    }
}

impl Observable for RealPart {
    fn mask(&self) -> CheckMask {
        CheckTime::Iteration.into()
    }

    fn filter(&mut self, sim: &Simulation) -> Result<()> {
        let atoms = sim.atoms();
        let n = atoms.size();
        let mut out = self.sink.borrow_mut();
        for i in 0..n {
            writeln!(out, "{} {}", i as Real / n as Real, atoms[i].re)?;
        }
        writeln!(out)?;
        writeln!(out)?;
        Ok(())
    }
}

/// Writes `i/n Im(ψ(i))` for every lattice site after each iteration,
/// followed by a blank-line frame separator.
pub struct ImaginaryPart {
    sink: SharedSink,
}

impl ImaginaryPart {
    /// Create an observer writing to `sink`.
    pub fn new(sink: SharedSink) -> Self {
        Self { sink }
    }
}

impl Observable for ImaginaryPart {
    fn mask(&self) -> CheckMask {
        CheckTime::Iteration.into()
    }

    fn filter(&mut self, sim: &Simulation) -> Result<()> {
        let atoms = sim.atoms();
        let n = atoms.size();
        let mut out = self.sink.borrow_mut();
        for i in 0..n {
            writeln!(out, "{} {}", i as Real / n as Real, atoms[i].im)?;
        }
        writeln!(out)?;
        writeln!(out)?;
        Ok(())
    }
}
