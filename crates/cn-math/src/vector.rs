//! `NumericVector` — a dense vector over a numeric field (translates
//! `Vector.h`).
//!
//! This is a thin newtype around `nalgebra::DVector<T>` that exposes the
//! surface the solvers need: elementwise arithmetic, scalar multiply,
//! conjugation, the Hermitian inner product, and the Euclidean norm.

use crate::field::Field;
use cn_core::{Error, Real, Result};
use nalgebra::DVector;
use std::ops::{Add, AddAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign};

/// A dynamically-sized dense vector over the field `T`.
///
/// In the simulation `T` is `Complex64` (the wavefunction ψ); the
/// eigensolver hands back a `NumericVector<Real>`.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericVector<T: Field>(DVector<T>);

impl<T: Field> NumericVector<T> {
    /// Create a zero-filled vector of length `n`.
    pub fn zeros(n: usize) -> Self {
        Self(DVector::zeros(n))
    }

    /// Create a vector from a slice.
    pub fn from_slice(data: &[T]) -> Self {
        Self(DVector::from_column_slice(data))
    }

    /// Create a vector from a `Vec`.
    pub fn from_vec(data: Vec<T>) -> Self {
        Self(DVector::from_vec(data))
    }

    /// Number of elements.
    pub fn size(&self) -> usize {
        self.0.len()
    }

    /// Return `true` if empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Return the elements as a slice.
    pub fn as_slice(&self) -> &[T] {
        self.0.as_slice()
    }

    /// Iterator over elements.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.0.iter()
    }

    /// Elementwise complex conjugate.
    ///
    /// For a real field this is the identity (the conjugation dispatch of
    /// the C++ `Vector::conjungate` lives in the [`Field`] impls here).
    pub fn conjugate(&self) -> Self {
        Self(self.0.map(|v| v.conj()))
    }

    /// Hermitian inner product `Σᵢ conj(selfᵢ) · otherᵢ`.
    ///
    /// The left operand is conjugated; `dot(a, a)` is therefore real and
    /// non-negative for every field.
    pub fn dot(&self, other: &NumericVector<T>) -> T {
        assert_eq!(
            self.size(),
            other.size(),
            "dot product requires equal sizes"
        );
        self.0
            .iter()
            .zip(other.0.iter())
            .fold(T::zero(), |acc, (a, b)| acc + a.conj() * *b)
    }

    /// Euclidean norm `√dot(self, self)` as a real magnitude.
    pub fn length(&self) -> Real {
        self.dot(self).re().sqrt()
    }

    /// This vector scaled to unit norm.
    ///
    /// Fails with [`Error::NumericInstability`] when the norm is zero (or
    /// indistinguishable from zero at machine precision).
    pub fn normalised(&self) -> Result<Self> {
        let len = self.length();
        if len <= Real::EPSILON {
            return Err(Error::NumericInstability(
                "cannot normalise a vector of zero norm".to_string(),
            ));
        }
        Ok(self * T::from_real(1.0 / len))
    }
}

// ── Index ─────────────────────────────────────────────────────────────────────

impl<T: Field> Index<usize> for NumericVector<T> {
    type Output = T;
    fn index(&self, i: usize) -> &T {
        &self.0[i]
    }
}

impl<T: Field> IndexMut<usize> for NumericVector<T> {
    fn index_mut(&mut self, i: usize) -> &mut T {
        &mut self.0[i]
    }
}

// ── Element-wise arithmetic ───────────────────────────────────────────────────

impl<T: Field> Add for &NumericVector<T> {
    type Output = NumericVector<T>;
    fn add(self, rhs: &NumericVector<T>) -> NumericVector<T> {
        assert_eq!(self.size(), rhs.size(), "addition requires equal sizes");
        NumericVector(self.0.zip_map(&rhs.0, |a, b| a + b))
    }
}

impl<T: Field> Add for NumericVector<T> {
    type Output = NumericVector<T>;
    fn add(self, rhs: NumericVector<T>) -> NumericVector<T> {
        &self + &rhs
    }
}

impl<T: Field> AddAssign<&NumericVector<T>> for NumericVector<T> {
    fn add_assign(&mut self, rhs: &NumericVector<T>) {
        assert_eq!(self.size(), rhs.size(), "addition requires equal sizes");
        for (a, b) in self.0.iter_mut().zip(rhs.0.iter()) {
            *a += *b;
        }
    }
}

impl<T: Field> Sub for &NumericVector<T> {
    type Output = NumericVector<T>;
    fn sub(self, rhs: &NumericVector<T>) -> NumericVector<T> {
        assert_eq!(self.size(), rhs.size(), "subtraction requires equal sizes");
        NumericVector(self.0.zip_map(&rhs.0, |a, b| a - b))
    }
}

impl<T: Field> Sub for NumericVector<T> {
    type Output = NumericVector<T>;
    fn sub(self, rhs: NumericVector<T>) -> NumericVector<T> {
        &self - &rhs
    }
}

impl<T: Field> SubAssign<&NumericVector<T>> for NumericVector<T> {
    fn sub_assign(&mut self, rhs: &NumericVector<T>) {
        assert_eq!(self.size(), rhs.size(), "subtraction requires equal sizes");
        for (a, b) in self.0.iter_mut().zip(rhs.0.iter()) {
            *a -= *b;
        }
    }
}

impl<T: Field> Mul<T> for &NumericVector<T> {
    type Output = NumericVector<T>;
    fn mul(self, rhs: T) -> NumericVector<T> {
        NumericVector(self.0.map(|v| v * rhs))
    }
}

impl<T: Field> Mul<T> for NumericVector<T> {
    type Output = NumericVector<T>;
    fn mul(self, rhs: T) -> NumericVector<T> {
        &self * rhs
    }
}

impl<T: Field> MulAssign<T> for NumericVector<T> {
    fn mul_assign(&mut self, rhs: T) {
        for v in self.0.iter_mut() {
            *v *= rhs;
        }
    }
}

impl<T: Field> Neg for &NumericVector<T> {
    type Output = NumericVector<T>;
    fn neg(self) -> NumericVector<T> {
        NumericVector(self.0.map(|v| -v))
    }
}

impl<T: Field> Neg for NumericVector<T> {
    type Output = NumericVector<T>;
    fn neg(self) -> NumericVector<T> {
        -&self
    }
}

// ── Display ───────────────────────────────────────────────────────────────────

impl<T: Field> std::fmt::Display for NumericVector<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{v}")?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use num_complex::Complex64;

    fn c(re: Real, im: Real) -> Complex64 {
        Complex64::new(re, im)
    }

    #[test]
    fn zeros() {
        let v = NumericVector::<Complex64>::zeros(5);
        assert_eq!(v.size(), 5);
        assert_eq!(v[0], c(0.0, 0.0));
        assert_eq!(v[4], c(0.0, 0.0));
    }

    #[test]
    fn element_wise_ops() {
        let a = NumericVector::from_slice(&[1.0, 2.0, 3.0]);
        let b = NumericVector::from_slice(&[4.0, 5.0, 6.0]);

        let sum = &a + &b;
        assert_eq!(sum.as_slice(), &[5.0, 7.0, 9.0]);

        let diff = &b - &a;
        assert_eq!(diff.as_slice(), &[3.0, 3.0, 3.0]);

        let scaled = &a * 2.0;
        assert_eq!(scaled.as_slice(), &[2.0, 4.0, 6.0]);

        let neg = -&a;
        assert_eq!(neg.as_slice(), &[-1.0, -2.0, -3.0]);
    }

    #[test]
    fn in_place_ops() {
        let mut a = NumericVector::from_slice(&[1.0, 2.0]);
        let b = NumericVector::from_slice(&[3.0, 4.0]);
        a += &b;
        assert_eq!(a.as_slice(), &[4.0, 6.0]);
        a -= &b;
        assert_eq!(a.as_slice(), &[1.0, 2.0]);
        a *= 3.0;
        assert_eq!(a.as_slice(), &[3.0, 6.0]);
    }

    #[test]
    #[should_panic(expected = "equal sizes")]
    fn mismatched_sizes_panic() {
        let a = NumericVector::from_slice(&[1.0, 2.0]);
        let b = NumericVector::from_slice(&[1.0, 2.0, 3.0]);
        let _ = &a + &b;
    }

    #[test]
    fn conjugate_dispatch() {
        let v = NumericVector::from_slice(&[c(1.0, 2.0), c(3.0, -4.0)]);
        let conj = v.conjugate();
        assert_eq!(conj[0], c(1.0, -2.0));
        assert_eq!(conj[1], c(3.0, 4.0));

        // Identity for a real field.
        let r = NumericVector::from_slice(&[1.0, -2.0]);
        assert_eq!(r.conjugate(), r);
    }

    #[test]
    fn dot_conjugates_the_left_operand() {
        let a = NumericVector::from_slice(&[c(0.0, 1.0)]);
        let b = NumericVector::from_slice(&[c(0.0, 1.0)]);
        // conj(i) · i = -i · i = 1
        assert_eq!(a.dot(&b), c(1.0, 0.0));
    }

    #[test]
    fn dot_with_self_is_real_non_negative() {
        let v = NumericVector::from_slice(&[c(1.0, 2.0), c(-3.0, 0.5)]);
        let d = v.dot(&v);
        assert_relative_eq!(d.im, 0.0);
        assert!(d.re >= 0.0);
        assert_relative_eq!(d.re, 1.0 + 4.0 + 9.0 + 0.25);
    }

    #[test]
    fn length_is_the_euclidean_norm() {
        let v = NumericVector::from_slice(&[c(0.0, 3.0), c(4.0, 0.0)]);
        assert_relative_eq!(v.length(), 5.0);
    }

    #[test]
    fn normalised_has_unit_length() {
        let v = NumericVector::from_slice(&[c(3.0, 0.0), c(0.0, 4.0)]);
        let unit = v.normalised().unwrap();
        assert_relative_eq!(unit.length(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn normalised_zero_vector_fails() {
        let v = NumericVector::<Complex64>::zeros(4);
        assert!(matches!(
            v.normalised(),
            Err(cn_core::Error::NumericInstability(_))
        ));
    }

    proptest::proptest! {
        #[test]
        fn dot_positivity_holds_for_any_vector(
            parts in proptest::collection::vec((-10.0..10.0f64, -10.0..10.0f64), 0..32)
        ) {
            let v = NumericVector::from_vec(
                parts.iter().map(|&(re, im)| c(re, im)).collect(),
            );
            let d = v.dot(&v);
            proptest::prop_assert!(d.im.abs() < 1e-9);
            proptest::prop_assert!(d.re >= 0.0);
            proptest::prop_assert!((v.length() - d.re.sqrt()).abs() < 1e-9);
        }
    }
}
