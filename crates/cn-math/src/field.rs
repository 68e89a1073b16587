//! The scalar-field abstraction shared by real and complex element types.
//!
//! The C++ sources dispatch conjugation and sign tests on an
//! `std::is_complex` SFINAE helper (`utilitys.h`); here the same dispatch
//! is a trait. `num_complex::ComplexFloat` already unifies the real and
//! complex surfaces (`re`, `im`, `conj`, `abs`, `sqrt`), so [`Field`] only
//! adds the lift from a bare real and the bounds the containers need.

use cn_core::Real;
use num_complex::{Complex64, ComplexFloat};
use num_traits::NumAssign;
use std::fmt::Display;

/// The numeric field `NumericVector` and `TridiagonalMatrix` are generic
/// over.
///
/// Implemented for [`Real`] (where conjugation is the identity) and for
/// [`Complex64`]. `Real` is fixed to `f64`: the magnitude type of every
/// field element is an `f64` regardless of the element type itself.
pub trait Field:
    ComplexFloat<Real = Real> + NumAssign + nalgebra::Scalar + Display
{
    /// Lift a real number into the field.
    fn from_real(x: Real) -> Self;
}

impl Field for Real {
    fn from_real(x: Real) -> Self {
        x
    }
}

impl Field for Complex64 {
    fn from_real(x: Real) -> Self {
        Complex64::new(x, 0.0)
    }
}
