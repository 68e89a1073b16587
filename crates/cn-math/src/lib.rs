//! # cn-math
//!
//! Mathematical core of cranknicolson-rs: the scalar-field abstraction,
//! the dense `NumericVector`, and the `TridiagonalMatrix` with its
//! Thomas-algorithm solve and symmetric-tridiagonal QR eigensolver.
//!
//! Translates `Vector.h` and `TridiagonalMatrix.h` of the CrankNicolson
//! C++ sources.
//!
//! # Modules
//!
//! * [`field`] — the numeric-field trait shared by real and complex scalars
//! * [`vector`] — dense vector with Hermitian inner product
//! * [`tridiagonal`] — banded matrix, direct solve, eigenvalues

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Scalar-field trait: the operations vectors and matrices require.
pub mod field;

/// Dense vector with elementwise arithmetic and Hermitian inner product.
pub mod vector;

/// Tridiagonal matrix: arithmetic, product, Thomas solve, eigenvalues.
pub mod tridiagonal;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use field::Field;
pub use tridiagonal::{Line, TridiagonalMatrix};
pub use vector::NumericVector;
