//! The simulation driver (translates `simulation.h` / `simulation.cpp`).

use cn_core::Result;
use num_complex::Complex64;

use crate::hamiltonian::HamiltonianSolver;
use crate::observables::{CheckTime, Observable};
use crate::wave::Wave;
use crate::{ComplexVector, SimulationParameter};

/// Lifecycle of a [`Simulation`]: the schedule runs exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunState {
    Unstarted,
    Running,
    Finished,
}

/// The sandbox that glues everything together: it owns the atoms (the
/// wavefunction ψ sampled on the lattice), the equation solver, and the
/// observers, and executes the fixed iteration schedule.
///
/// Every step is `solve → Dirichlet clamp → observer fan-out`; observers
/// fire in insertion order and always see a consistent ψ with
/// `ψ[0] = ψ[n−1] = 0`.
pub struct Simulation {
    atoms: ComplexVector,
    solver: Box<dyn HamiltonianSolver>,
    filters: Vec<Box<dyn Observable>>,
    parameter: SimulationParameter,
    current_iteration: Option<usize>,
    state: RunState,
}

impl Simulation {
    /// Create a simulation with zero-initialised atoms.
    pub fn new(parameter: SimulationParameter, solver: impl HamiltonianSolver + 'static) -> Self {
        Self {
            atoms: ComplexVector::zeros(parameter.atom_count()),
            solver: Box::new(solver),
            filters: Vec::new(),
            parameter,
            current_iteration: None,
            state: RunState::Unstarted,
        }
    }

    /// The wavefunction ψ.
    pub fn atoms(&self) -> &ComplexVector {
        &self.atoms
    }

    /// The run parameters.
    pub fn parameter(&self) -> SimulationParameter {
        self.parameter
    }

    /// The solver currently attached.
    pub fn solver(&self) -> &dyn HamiltonianSolver {
        self.solver.as_ref()
    }

    /// The index of the most recently completed step, `None` before the
    /// first step has finished.
    pub fn iteration(&self) -> Option<usize> {
        self.current_iteration
    }

    /// Replace the solver.
    ///
    /// # Panics
    ///
    /// Panics when called after [`run`](Self::run) has started.
    pub fn set_solver(&mut self, solver: impl HamiltonianSolver + 'static) {
        self.assert_unstarted();
        self.solver = Box::new(solver);
    }

    /// Add a wavepacket onto the interior lattice sites `1..n−2`.
    ///
    /// Displacements are additive, so several waves superpose; the
    /// boundary sites are never perturbed.
    ///
    /// # Panics
    ///
    /// Panics when called after [`run`](Self::run) has started.
    pub fn add_wave(&mut self, wave: &dyn Wave) {
        self.assert_unstarted();
        for i in 1..self.atoms.size() - 1 {
            self.atoms[i] += wave.displacement(i);
        }
    }

    /// Append an observer. Observers fire in insertion order.
    ///
    /// # Panics
    ///
    /// Panics when called after [`run`](Self::run) has started.
    pub fn add_filter(&mut self, filter: impl Observable + 'static) {
        self.assert_unstarted();
        self.filters.push(Box::new(filter));
    }

    /// Execute the full iteration schedule.
    ///
    /// Startup observers fire first, then `iterations` steps each followed
    /// by the iteration observers, then the cooldown observers. The first
    /// numerical or observer-output error aborts the schedule and is
    /// returned.
    ///
    /// # Panics
    ///
    /// Panics when called a second time.
    pub fn run(&mut self) -> Result<()> {
        self.assert_unstarted();
        self.state = RunState::Running;
        let outcome = self.run_schedule();
        self.state = RunState::Finished;
        outcome
    }

    fn run_schedule(&mut self) -> Result<()> {
        self.dispatch(CheckTime::Startup)?;

        for i in 0..self.parameter.iterations() {
            let next = self.solver.solve(&self.atoms)?;
            assert_eq!(
                next.size(),
                self.parameter.atom_count(),
                "solver changed the lattice size"
            );
            self.atoms = next;

            let n = self.atoms.size();
            self.atoms[0] = Complex64::new(0.0, 0.0);
            self.atoms[n - 1] = Complex64::new(0.0, 0.0);

            self.current_iteration = Some(i);
            self.dispatch(CheckTime::Iteration)?;
        }

        self.dispatch(CheckTime::Cooldown)
    }

    /// Fan out to every observer whose mask includes `time`, in insertion
    /// order. The filter list is moved out of `self` for the duration so
    /// observers can borrow the simulation immutably.
    fn dispatch(&mut self, time: CheckTime) -> Result<()> {
        let mut filters = std::mem::take(&mut self.filters);
        let mut outcome = Ok(());
        for filter in filters.iter_mut() {
            if filter.check(time) {
                if let Err(e) = filter.filter(self) {
                    outcome = Err(e);
                    break;
                }
            }
        }
        self.filters = filters;
        outcome
    }

    fn assert_unstarted(&self) {
        assert!(
            self.state == RunState::Unstarted,
            "the simulation may only be configured and started before its run"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hamiltonian::LinearHamiltonianSolver;
    use crate::wave::GaussianWave;
    use approx::assert_relative_eq;

    fn simulation(iterations: usize) -> Simulation {
        let p = SimulationParameter::new(0.01, 1e-5, 1.0, iterations, 16);
        let solver = LinearHamiltonianSolver::new(p, |_| 0.0);
        Simulation::new(p, solver)
    }

    #[test]
    fn atoms_start_zeroed() {
        let sim = simulation(1);
        assert_eq!(sim.atoms().size(), 16);
        assert!(sim.atoms().iter().all(|z| z.norm() == 0.0));
        assert_eq!(sim.iteration(), None);
    }

    #[test]
    fn waves_superpose_on_interior_sites_only() {
        let mut sim = simulation(1);
        let wave = GaussianWave::new(3.0, 8.0, 0.0);
        sim.add_wave(&wave);
        let once = sim.atoms()[8];
        sim.add_wave(&wave);

        assert_relative_eq!(sim.atoms()[8].re, 2.0 * once.re, epsilon = 1e-12);
        assert_eq!(sim.atoms()[0].norm(), 0.0);
        assert_eq!(sim.atoms()[15].norm(), 0.0);
    }

    #[test]
    #[should_panic(expected = "before its run")]
    fn mutation_after_run_panics() {
        let mut sim = simulation(1);
        sim.run().unwrap();
        sim.add_wave(&GaussianWave::new(3.0, 8.0, 0.0));
    }

    #[test]
    #[should_panic(expected = "before its run")]
    fn second_run_panics() {
        let mut sim = simulation(1);
        sim.run().unwrap();
        let _ = sim.run();
    }

    #[test]
    fn run_reports_the_last_iteration() {
        let mut sim = simulation(4);
        sim.add_wave(&GaussianWave::new(3.0, 8.0, 0.0));
        sim.run().unwrap();
        assert_eq!(sim.iteration(), Some(3));
    }
}
