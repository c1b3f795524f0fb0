use std::fmt::{Debug, Display};

use num_traits::Float;

/// A floating-point scalar usable as a vector or matrix component.
///
/// Implemented for `f32` and `f64`, so precision is chosen by the caller
/// when naming the concrete vector type.
pub trait Scalar: Float + Debug + Display + Default + Send + Sync + 'static {
    /// Converts an `f64` literal into this scalar type.
    ///
    /// Generic numeric code uses this for constants like tolerances and
    /// thresholds, where `num_traits::NumCast` would return an `Option`.
    fn lit(value: f64) -> Self;
}

impl Scalar for f64 {
    fn lit(value: f64) -> Self {
        value
    }
}

impl Scalar for f32 {
    #[allow(clippy::cast_possible_truncation)]
    fn lit(value: f64) -> Self {
        value as f32
    }
}
