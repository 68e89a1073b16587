//! The potential profile (translates `potentialobservable.h`).

use cn_core::{Real, Result};
use std::io::Write;

use super::{CheckMask, CheckTime, Observable, SharedSink};
use crate::simulation::Simulation;

/// Writes `i/n V(i/n)` for every lattice site once at startup, followed
/// by a blank-line frame separator.
///
/// The observer carries its own copy of the potential function; the
/// solvers only keep the discretised Hamiltonian.
pub struct Potential {
    sink: SharedSink,
    potential: Box<dyn Fn(Real) -> Real>,
}

impl Potential {
    /// Create an observer writing the profile of `potential` to `sink`.
    pub fn new(sink: SharedSink, potential: impl Fn(Real) -> Real + 'static) -> Self {
        Self {
            sink,
            potential: Box::new(potential),
        }
    }
}

impl Observable for Potential {
    fn mask(&self) -> CheckMask {
        CheckTime::Startup.into()
    }

    fn filter(&mut self, sim: &Simulation) -> Result<()> {
        let n = sim.atoms().size();
        let mut out = self.sink.borrow_mut();
        for i in 0..n {
            let x = i as Real / n as Real;
            writeln!(out, "{} {}", x, (self.potential)(x))?;
        }
        writeln!(out)?;
        writeln!(out)?;
        Ok(())
    }
}
