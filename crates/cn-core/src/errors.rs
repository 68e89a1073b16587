//! Error types for cranknicolson-rs.
//!
//! The C++ sources fail through `assert` only; this crate splits failures
//! the way the Rust workspace needs them: contract violations (size
//! mismatches in arithmetic and solves, out-of-range indexing) stay
//! fail-fast and panic, while numerical breakdowns and observer output
//! failures are surfaced as values of the single `thiserror`-derived enum
//! below.

use thiserror::Error;

/// The top-level error type used throughout cranknicolson-rs.
#[derive(Debug, Error)]
pub enum Error {
    /// A numerical breakdown: a zero or near-zero pivot in the tridiagonal
    /// solve, or a zero-norm operand where a unit vector is required.
    #[error("numerical instability: {0}")]
    NumericInstability(String),

    /// The eigenvalue iteration exhausted its sweep budget.
    #[error("eigenvalue iteration failed to converge after {sweeps} sweeps")]
    NonConvergent {
        /// Number of QR sweeps performed before giving up.
        sweeps: usize,
    },

    /// An observer failed to write to its output sink.
    #[error("observer output failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand `Result` type used throughout cranknicolson-rs.
pub type Result<T, E = Error> = std::result::Result<T, E>;
