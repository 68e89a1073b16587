//! `TridiagonalMatrix` — banded storage for tridiagonal operators
//! (translates `TridiagonalMatrix.h`).
//!
//! Only the three diagonals are stored. For row `i` the non-zero entries
//! are `(lower[i], main[i], upper[i])`: `lower[i]` is the element at
//! `(i, i−1)` and `upper[i]` the element at `(i, i+1)`. `lower[0]` and
//! `upper[n−1]` are out-of-band storage; products and solves never read
//! them.
//!
//! Three algorithms live here:
//!
//! * the matrix–vector product in the standard row convention,
//! * the Thomas-algorithm direct solve (`O(n)`, fails on a near-zero
//!   pivot),
//! * an implicit-shift QR eigensolver for real-symmetric tridiagonal
//!   matrices (Wilkinson shift, Givens bulge chase), the documented
//!   regime for the Hamiltonians built on top of this type.

use crate::field::Field;
use crate::vector::NumericVector;
use cn_core::{Error, Real, Result};
use std::ops::{Add, AddAssign, Index, IndexMut, Mul, Sub, SubAssign};

/// QR sweep budget per matrix row; exhausting it yields
/// [`Error::NonConvergent`].
const MAX_SWEEPS_PER_ROW: usize = 30;

/// Selects one of the three stored diagonals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line {
    /// The sub-diagonal: element `(i, i−1)` of row `i`.
    Lower,
    /// The main diagonal.
    Main,
    /// The super-diagonal: element `(i, i+1)` of row `i`.
    Upper,
}

/// A tridiagonal matrix over the field `T` with `O(n)` storage.
#[derive(Debug, Clone, PartialEq)]
pub struct TridiagonalMatrix<T: Field> {
    lower: Vec<T>,
    main: Vec<T>,
    upper: Vec<T>,
}

impl<T: Field> TridiagonalMatrix<T> {
    /// Create a zero matrix of size `n`.
    pub fn new(n: usize) -> Self {
        Self {
            lower: vec![T::zero(); n],
            main: vec![T::zero(); n],
            upper: vec![T::zero(); n],
        }
    }

    /// A matrix with `value` along the main diagonal and zero elsewhere.
    pub fn identity(n: usize, value: T) -> Self {
        let mut mat = Self::new(n);
        for i in 0..n {
            mat.main[i] = value;
        }
        mat
    }

    /// Size (number of rows/columns).
    pub fn size(&self) -> usize {
        self.main.len()
    }

    /// Return `true` if the matrix has no rows.
    pub fn is_empty(&self) -> bool {
        self.main.is_empty()
    }

    /// Borrow one of the three diagonals as a slice.
    pub fn band(&self, line: Line) -> &[T] {
        match line {
            Line::Lower => &self.lower,
            Line::Main => &self.main,
            Line::Upper => &self.upper,
        }
    }

    fn band_mut(&mut self, line: Line) -> &mut [T] {
        match line {
            Line::Lower => &mut self.lower,
            Line::Main => &mut self.main,
            Line::Upper => &mut self.upper,
        }
    }

    /// Apply `f` to every stored entry, producing a matrix over a possibly
    /// different field (e.g. the real part of a complex Hamiltonian).
    pub fn map<U: Field>(&self, f: impl Fn(T) -> U) -> TridiagonalMatrix<U> {
        TridiagonalMatrix {
            lower: self.lower.iter().map(|&v| f(v)).collect(),
            main: self.main.iter().map(|&v| f(v)).collect(),
            upper: self.upper.iter().map(|&v| f(v)).collect(),
        }
    }

    /// The expectation value `⟨state|A|state⟩` of this operator.
    pub fn expectation_value(&self, state: &NumericVector<T>) -> T {
        state.dot(&(self * state))
    }

    /// Solve `A·x = b` with the Thomas algorithm.
    ///
    /// Fails with [`Error::NumericInstability`] when a pivot falls below
    /// machine epsilon in magnitude. A right-hand side of the wrong
    /// length is a contract violation and panics, like the arithmetic
    /// operators.
    pub fn solve(&self, rhs: &NumericVector<T>) -> Result<NumericVector<T>> {
        let n = self.size();
        assert_eq!(rhs.size(), n, "solve requires equal sizes");
        if n == 0 {
            return Ok(NumericVector::zeros(0));
        }

        let pivot = |p: T, row: usize| -> Result<T> {
            if p.abs() <= Real::EPSILON {
                Err(Error::NumericInstability(format!(
                    "near-zero pivot at row {row}"
                )))
            } else {
                Ok(p)
            }
        };

        if n == 1 {
            let p = pivot(self.main[0], 0)?;
            return Ok(NumericVector::from_vec(vec![rhs[0] / p]));
        }

        // Forward sweep: eliminate the sub-diagonal.
        let mut c_prime = vec![T::zero(); n];
        let mut d_prime = vec![T::zero(); n];

        let p = pivot(self.main[0], 0)?;
        c_prime[0] = self.upper[0] / p;
        d_prime[0] = rhs[0] / p;

        for i in 1..n - 1 {
            let m = pivot(self.main[i] - self.lower[i] * c_prime[i - 1], i)?;
            c_prime[i] = self.upper[i] / m;
            d_prime[i] = (rhs[i] - self.lower[i] * d_prime[i - 1]) / m;
        }

        let m = pivot(self.main[n - 1] - self.lower[n - 1] * c_prime[n - 2], n - 1)?;
        d_prime[n - 1] = (rhs[n - 1] - self.lower[n - 1] * d_prime[n - 2]) / m;

        // Back substitution.
        let mut x = vec![T::zero(); n];
        x[n - 1] = d_prime[n - 1];
        for i in (0..n - 1).rev() {
            x[i] = d_prime[i] - c_prime[i] * x[i + 1];
        }

        Ok(NumericVector::from_vec(x))
    }

    /// Eigenvalues of a real-symmetric tridiagonal matrix, ascending.
    ///
    /// Implicit-shift QR: the active tail index contracts from `n−1`
    /// towards `1`, deflating whenever the adjacent off-diagonal magnitude
    /// drops below `error`; each sweep applies a Wilkinson shift computed
    /// from the trailing 2×2 block followed by a Givens bulge chase.
    ///
    /// The off-diagonal is read from the upper band; symmetry of the
    /// lower band is assumed, not checked. The iteration runs in `T`
    /// arithmetic; for a complex `T` whose off-band structure is
    /// real-symmetric the imaginary parts vanish at convergence and the
    /// real parts are returned. Results are only meaningful in that
    /// regime.
    ///
    /// Fails with [`Error::NonConvergent`] when the sweep budget
    /// (30 per row) is exhausted.
    pub fn eigenvalues(&self, error: Real) -> Result<NumericVector<Real>> {
        let n = self.size();
        if n == 0 {
            return Ok(NumericVector::zeros(0));
        }

        let mut d = self.main.clone();
        let mut off = self.upper.clone();
        let two = T::one() + T::one();
        let budget = MAX_SWEEPS_PER_ROW * n;
        let mut sweeps = 0;

        let mut m = n - 1;
        while m >= 1 {
            if off[m - 1].abs() <= error {
                off[m - 1] = T::zero();
                m -= 1;
                continue;
            }

            sweeps += 1;
            if sweeps > budget {
                return Err(Error::NonConvergent { sweeps });
            }

            // Wilkinson shift from the trailing 2x2 block
            // (d[m-1], off[m-1]; off[m-1], d[m]).
            let b = off[m - 1];
            let u = (d[m - 1] - d[m]) / two;
            let shift = if u.abs() <= Real::EPSILON {
                d[m] - T::from_real(b.abs())
            } else {
                d[m] - sign(u) * b * b / (T::from_real(u.abs()) + (u * u + b * b).sqrt())
            };

            // Givens bulge chase over the active block.
            let mut x = d[0] - shift;
            let mut y = off[0];
            for k in 0..m {
                let (c, s) = givens(x, y);
                let w = c * x - s * y;
                let delta = d[k] - d[k + 1];
                let z = (two * c * off[k] + delta * s) * s;
                d[k] = d[k] - z;
                d[k + 1] = d[k + 1] + z;
                off[k] = delta * c * s + (c * c - s * s) * off[k];
                x = off[k];
                if k > 0 {
                    off[k - 1] = w;
                }
                if k < m - 1 {
                    y = -(s * off[k + 1]);
                    off[k + 1] = c * off[k + 1];
                }
            }
        }

        let mut eigenvalues: Vec<Real> = d.iter().map(|v| v.re()).collect();
        eigenvalues.sort_by(Real::total_cmp);
        Ok(NumericVector::from_vec(eigenvalues))
    }
}

/// The sign of the real part of `x`, as a field element in {−1, +1}.
fn sign<T: Field>(x: T) -> T {
    if x.re() < 0.0 {
        -T::one()
    } else {
        T::one()
    }
}

/// Givens rotation `(c, s)` annihilating `y` against `x`, in the
/// numerically stable formulation that divides by the larger component.
fn givens<T: Field>(x: T, y: T) -> (T, T) {
    if y.abs() <= Real::EPSILON {
        (sign(x), T::zero())
    } else if x.abs() <= Real::EPSILON {
        (T::zero(), sign(y))
    } else if y.abs() > x.abs() {
        let t = x / y;
        let u = sign(y) * (T::one() + t * t).sqrt();
        let s = -(T::one() / u);
        (-s * t, s)
    } else {
        let t = y / x;
        let u = sign(x) * (T::one() + t * t).sqrt();
        let c = T::one() / u;
        (c, -c * t)
    }
}

// ── Element access ────────────────────────────────────────────────────────────

impl<T: Field> Index<(Line, usize)> for TridiagonalMatrix<T> {
    type Output = T;
    fn index(&self, (line, j): (Line, usize)) -> &T {
        &self.band(line)[j]
    }
}

impl<T: Field> IndexMut<(Line, usize)> for TridiagonalMatrix<T> {
    fn index_mut(&mut self, (line, j): (Line, usize)) -> &mut T {
        &mut self.band_mut(line)[j]
    }
}

// ── Matrix arithmetic ─────────────────────────────────────────────────────────

impl<T: Field> Add for &TridiagonalMatrix<T> {
    type Output = TridiagonalMatrix<T>;
    fn add(self, rhs: &TridiagonalMatrix<T>) -> TridiagonalMatrix<T> {
        assert_eq!(self.size(), rhs.size(), "addition requires equal sizes");
        let mut out = self.clone();
        out += rhs;
        out
    }
}

impl<T: Field> Add for TridiagonalMatrix<T> {
    type Output = TridiagonalMatrix<T>;
    fn add(self, rhs: TridiagonalMatrix<T>) -> TridiagonalMatrix<T> {
        &self + &rhs
    }
}

impl<T: Field> AddAssign<&TridiagonalMatrix<T>> for TridiagonalMatrix<T> {
    fn add_assign(&mut self, rhs: &TridiagonalMatrix<T>) {
        assert_eq!(self.size(), rhs.size(), "addition requires equal sizes");
        for i in 0..self.size() {
            self.lower[i] += rhs.lower[i];
            self.main[i] += rhs.main[i];
            self.upper[i] += rhs.upper[i];
        }
    }
}

impl<T: Field> Sub for &TridiagonalMatrix<T> {
    type Output = TridiagonalMatrix<T>;
    fn sub(self, rhs: &TridiagonalMatrix<T>) -> TridiagonalMatrix<T> {
        assert_eq!(self.size(), rhs.size(), "subtraction requires equal sizes");
        let mut out = self.clone();
        out -= rhs;
        out
    }
}

impl<T: Field> Sub for TridiagonalMatrix<T> {
    type Output = TridiagonalMatrix<T>;
    fn sub(self, rhs: TridiagonalMatrix<T>) -> TridiagonalMatrix<T> {
        &self - &rhs
    }
}

impl<T: Field> SubAssign<&TridiagonalMatrix<T>> for TridiagonalMatrix<T> {
    fn sub_assign(&mut self, rhs: &TridiagonalMatrix<T>) {
        assert_eq!(self.size(), rhs.size(), "subtraction requires equal sizes");
        for i in 0..self.size() {
            self.lower[i] -= rhs.lower[i];
            self.main[i] -= rhs.main[i];
            self.upper[i] -= rhs.upper[i];
        }
    }
}

impl<T: Field> Mul<T> for &TridiagonalMatrix<T> {
    type Output = TridiagonalMatrix<T>;
    fn mul(self, rhs: T) -> TridiagonalMatrix<T> {
        self.map(|v| v * rhs)
    }
}

impl<T: Field> Mul<T> for TridiagonalMatrix<T> {
    type Output = TridiagonalMatrix<T>;
    fn mul(self, rhs: T) -> TridiagonalMatrix<T> {
        &self * rhs
    }
}

// ── Matrix–vector product ─────────────────────────────────────────────────────

impl<T: Field> Mul<&NumericVector<T>> for &TridiagonalMatrix<T> {
    type Output = NumericVector<T>;

    /// `A·x` in the standard row convention: row 0 reads `upper[0]`, row
    /// `n−1` reads `lower[n−1]`, the out-of-band slots are ignored.
    fn mul(self, x: &NumericVector<T>) -> NumericVector<T> {
        let n = self.size();
        assert_eq!(x.size(), n, "product requires equal sizes");
        if n == 0 {
            return NumericVector::zeros(0);
        }

        let mut r = vec![T::zero(); n];
        if n == 1 {
            r[0] = self.main[0] * x[0];
            return NumericVector::from_vec(r);
        }

        r[0] = self.main[0] * x[0] + self.upper[0] * x[1];
        for i in 1..n - 1 {
            r[i] = self.lower[i] * x[i - 1] + self.main[i] * x[i] + self.upper[i] * x[i + 1];
        }
        r[n - 1] = self.lower[n - 1] * x[n - 2] + self.main[n - 1] * x[n - 1];
        NumericVector::from_vec(r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use num_complex::Complex64;
    use proptest::prelude::*;

    fn c(re: Real, im: Real) -> Complex64 {
        Complex64::new(re, im)
    }

    /// The (-1, 2, -1) discrete Laplacian with symmetric band storage.
    fn laplacian(n: usize) -> TridiagonalMatrix<Real> {
        let mut a = TridiagonalMatrix::identity(n, 2.0);
        for i in 1..n {
            a[(Line::Lower, i)] = -1.0;
            a[(Line::Upper, i - 1)] = -1.0;
        }
        a
    }

    #[test]
    fn identity_matrix() {
        let m = TridiagonalMatrix::identity(3, 4.0);
        assert_eq!(m.size(), 3);
        assert_eq!(m[(Line::Main, 1)], 4.0);
        assert_eq!(m[(Line::Lower, 1)], 0.0);
        assert_eq!(m[(Line::Upper, 1)], 0.0);
    }

    #[test]
    fn elementwise_arithmetic() {
        let a = TridiagonalMatrix::identity(3, 1.0);
        let b = TridiagonalMatrix::identity(3, 2.0);
        let sum = &a + &b;
        assert_eq!(sum[(Line::Main, 0)], 3.0);
        let diff = &b - &a;
        assert_eq!(diff[(Line::Main, 2)], 1.0);
        let scaled = &b * 3.0;
        assert_eq!(scaled[(Line::Main, 1)], 6.0);
    }

    #[test]
    fn product_standard_convention() {
        // A = [[2, -1, 0], [-1, 2, -1], [0, -1, 2]], x = [1, 2, 3].
        let a = laplacian(3);
        let x = NumericVector::from_slice(&[1.0, 2.0, 3.0]);
        let r = &a * &x;
        assert_eq!(r.size(), 3);
        assert_eq!(r.as_slice(), &[0.0, 0.0, 4.0]);
    }

    #[test]
    fn product_ignores_out_of_band_slots() {
        let mut a = laplacian(3);
        a[(Line::Lower, 0)] = 99.0;
        a[(Line::Upper, 2)] = 99.0;
        let x = NumericVector::from_slice(&[1.0, 2.0, 3.0]);
        assert_eq!((&a * &x).as_slice(), &[0.0, 0.0, 4.0]);
    }

    #[test]
    fn solve_identity() {
        let a = TridiagonalMatrix::identity(5, 1.0);
        let b = NumericVector::from_slice(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let x = a.solve(&b).unwrap();
        for i in 0..5 {
            assert_relative_eq!(x[i], b[i], epsilon = 1e-12);
        }
    }

    #[test]
    fn solve_known_system() {
        // 2x0 - x1 = 1, -x0 + 2x1 - x2 = 0, -x1 + 2x2 = 1  =>  x = [1, 1, 1].
        let a = laplacian(3);
        let b = NumericVector::from_slice(&[1.0, 0.0, 1.0]);
        let x = a.solve(&b).unwrap();
        for i in 0..3 {
            assert_relative_eq!(x[i], 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn solve_complex_system() {
        let mut a = TridiagonalMatrix::identity(3, c(2.0, 0.0));
        for i in 1..3 {
            a[(Line::Lower, i)] = c(0.0, -1.0);
            a[(Line::Upper, i - 1)] = c(0.0, -1.0);
        }
        let b = NumericVector::from_slice(&[c(1.0, 0.0), c(0.0, 1.0), c(1.0, 0.0)]);
        let x = a.solve(&b).unwrap();
        let back = &a * &x;
        for i in 0..3 {
            assert_relative_eq!(back[i].re, b[i].re, epsilon = 1e-12);
            assert_relative_eq!(back[i].im, b[i].im, epsilon = 1e-12);
        }
    }

    #[test]
    fn solve_singular_fails() {
        let a = TridiagonalMatrix::<Real>::new(3);
        let b = NumericVector::from_slice(&[1.0, 1.0, 1.0]);
        assert!(matches!(
            a.solve(&b),
            Err(Error::NumericInstability(_))
        ));
    }

    #[test]
    #[should_panic(expected = "equal sizes")]
    fn solve_wrong_size_panics() {
        let a = TridiagonalMatrix::identity(3, 1.0);
        let b = NumericVector::from_slice(&[1.0, 2.0]);
        let _ = a.solve(&b);
    }

    #[test]
    fn eigenvalues_of_uniform_laplacian_band() {
        // Symmetric (1, 2, 1): eigenvalues {2 - sqrt(2), 2, 2 + sqrt(2)}.
        let mut a = TridiagonalMatrix::identity(3, 2.0);
        for i in 1..3 {
            a[(Line::Lower, i)] = 1.0;
            a[(Line::Upper, i - 1)] = 1.0;
        }
        let eig = a.eigenvalues(1e-10).unwrap();
        assert_eq!(eig.size(), 3);
        let sqrt2 = 2.0_f64.sqrt();
        assert_relative_eq!(eig[0], 2.0 - sqrt2, epsilon = 1e-4);
        assert_relative_eq!(eig[1], 2.0, epsilon = 1e-4);
        assert_relative_eq!(eig[2], 2.0 + sqrt2, epsilon = 1e-4);
    }

    #[test]
    fn eigenvalues_of_diagonal_matrix() {
        let mut a = TridiagonalMatrix::<Real>::new(4);
        for (i, v) in [3.0, -1.0, 2.0, 0.5].iter().enumerate() {
            a[(Line::Main, i)] = *v;
        }
        let eig = a.eigenvalues(1e-10).unwrap();
        assert_eq!(eig.as_slice(), &[-1.0, 0.5, 2.0, 3.0]);
    }

    #[test]
    fn eigenvalues_complex_entries_real_symmetric_structure() {
        let mut a = TridiagonalMatrix::identity(3, c(2.0, 0.0));
        for i in 1..3 {
            a[(Line::Lower, i)] = c(1.0, 0.0);
            a[(Line::Upper, i - 1)] = c(1.0, 0.0);
        }
        let eig = a.eigenvalues(1e-10).unwrap();
        let sqrt2 = 2.0_f64.sqrt();
        assert_relative_eq!(eig[0], 2.0 - sqrt2, epsilon = 1e-4);
        assert_relative_eq!(eig[2], 2.0 + sqrt2, epsilon = 1e-4);
    }

    #[test]
    fn expectation_value_of_identity_is_the_norm() {
        let id = TridiagonalMatrix::identity(2, c(1.0, 0.0));
        let v = NumericVector::from_slice(&[c(1.0, 1.0), c(0.0, 2.0)]);
        let e = id.expectation_value(&v);
        assert_relative_eq!(e.re, 6.0, epsilon = 1e-12);
        assert_relative_eq!(e.im, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn map_takes_real_parts() {
        let mut a = TridiagonalMatrix::<Complex64>::new(2);
        a[(Line::Main, 0)] = c(1.5, 3.0);
        a[(Line::Upper, 0)] = c(-1.0, 0.5);
        let r = a.map(|v| v.re);
        assert_eq!(r[(Line::Main, 0)], 1.5);
        assert_eq!(r[(Line::Upper, 0)], -1.0);
    }

    // ── Property tests ────────────────────────────────────────────────────

    /// A random diagonally dominant system: always solvable.
    fn dominant_system() -> impl Strategy<Value = (TridiagonalMatrix<Real>, NumericVector<Real>)>
    {
        (2usize..24).prop_flat_map(|n| {
            (
                proptest::collection::vec(-1.0..1.0f64, n),
                proptest::collection::vec(-1.0..1.0f64, n),
                proptest::collection::vec(3.0..5.0f64, n),
                proptest::collection::vec(-10.0..10.0f64, n),
            )
                .prop_map(move |(lower, upper, main, rhs)| {
                    let mut a = TridiagonalMatrix::new(n);
                    for i in 0..n {
                        a[(Line::Lower, i)] = lower[i];
                        a[(Line::Main, i)] = main[i];
                        a[(Line::Upper, i)] = upper[i];
                    }
                    (a, NumericVector::from_vec(rhs))
                })
        })
    }

    proptest! {
        #[test]
        fn solve_round_trip((a, b) in dominant_system()) {
            let x = a.solve(&b).unwrap();
            prop_assert_eq!(x.size(), b.size());
            let back = &a * &x;
            for i in 0..b.size() {
                prop_assert!((back[i] - b[i]).abs() < 1e-9);
            }
        }

        #[test]
        fn eigenvalues_ascending_and_trace_preserving(
            (n, main, off) in (2usize..16).prop_flat_map(|n| (
                Just(n),
                proptest::collection::vec(-2.0..2.0f64, n),
                proptest::collection::vec(-2.0..2.0f64, n - 1),
            ))
        ) {
            let mut a = TridiagonalMatrix::new(n);
            for i in 0..n {
                a[(Line::Main, i)] = main[i];
            }
            for i in 0..n - 1 {
                a[(Line::Upper, i)] = off[i];
                a[(Line::Lower, i + 1)] = off[i];
            }
            let eig = a.eigenvalues(1e-12).unwrap();
            prop_assert_eq!(eig.size(), n);
            for i in 1..n {
                prop_assert!(eig[i - 1] <= eig[i]);
            }
            // A similarity transform preserves the trace.
            let trace: Real = main.iter().sum();
            let eigsum: Real = eig.as_slice().iter().sum();
            prop_assert!((trace - eigsum).abs() < 1e-6);
        }
    }
}
