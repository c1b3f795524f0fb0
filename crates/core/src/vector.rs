//! Fixed-size vectors with compile-time dimension.
//!
//! A [`Vector<T, N>`] is a thin wrapper around `[T; N]`. Indexed access
//! (`v[i]`) and the named accessors available for dimensions 2, 3, and 4
//! (`x`, `y`, `z`, `w`) read and write the same storage, so `v[0]` and
//! `v.x()` always agree.
//!
//! Arithmetic follows value semantics: `a + b` produces a new vector, and the
//! compound operators (`+=`, `-=`, `*=`) update in place.

use std::{
    fmt,
    ops::{Add, AddAssign, Div, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign},
};

use crate::Scalar;

/// Squared magnitude at or below which a vector is treated as degenerate by
/// [`Vector::normalized`].
pub const DEGENERATE_SQUARE_MAG: f64 = 1e-5;

/// A vector of `N` components stored contiguously.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vector<T, const N: usize>([T; N]);

/// A two-component vector with `x` and `y` accessors.
pub type Vector2<T = f64> = Vector<T, 2>;

/// A three-component vector with `x`, `y`, and `z` accessors.
pub type Vector3<T = f64> = Vector<T, 3>;

/// A four-component vector with `x`, `y`, `z`, and `w` accessors.
pub type Vector4<T = f64> = Vector<T, 4>;

impl<T, const N: usize> Vector<T, N> {
    /// Creates a vector from its components.
    pub const fn from_array(components: [T; N]) -> Self {
        Self(components)
    }

    /// Creates a vector by calling `f` with each component index.
    pub fn from_fn(f: impl FnMut(usize) -> T) -> Self {
        Self(std::array::from_fn(f))
    }

    /// Returns the number of components.
    #[must_use]
    pub const fn dim(&self) -> usize {
        N
    }

    /// Returns the components as an array reference.
    #[must_use]
    pub const fn as_array(&self) -> &[T; N] {
        &self.0
    }

    /// Returns the components as a mutable array reference.
    pub fn as_mut_array(&mut self) -> &mut [T; N] {
        &mut self.0
    }

    /// Consumes the vector and returns its components.
    pub fn into_array(self) -> [T; N] {
        self.0
    }

    /// Returns an iterator over the components.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.0.iter()
    }

    /// Borrows `M` components starting at `start` without copying.
    ///
    /// # Panics
    ///
    /// Panics if `start + M > N`.
    #[must_use]
    pub fn subvec_ref<const M: usize>(&self, start: usize) -> &[T; M] {
        self.0
            .get(start..)
            .and_then(|tail| tail.first_chunk::<M>())
            .unwrap_or_else(|| out_of_range(start, M, N))
    }

    /// Mutably borrows `M` components starting at `start` without copying.
    ///
    /// Writes through the returned array land in this vector's storage.
    ///
    /// # Panics
    ///
    /// Panics if `start + M > N`.
    pub fn subvec_mut<const M: usize>(&mut self, start: usize) -> &mut [T; M] {
        self.0
            .get_mut(start..)
            .and_then(|tail| tail.first_chunk_mut::<M>())
            .unwrap_or_else(|| out_of_range(start, M, N))
    }
}

impl<T: Copy, const N: usize> Vector<T, N> {
    /// Creates a vector with every component set to `value`.
    pub fn splat(value: T) -> Self {
        Self([value; N])
    }

    /// Returns a copy of `M` components starting at `start`.
    ///
    /// # Panics
    ///
    /// Panics if `start + M > N`.
    #[must_use]
    pub fn subvec<const M: usize>(&self, start: usize) -> Vector<T, M> {
        Vector(*self.subvec_ref::<M>(start))
    }

    /// Overwrites `M` components starting at `start` with `values`.
    ///
    /// # Panics
    ///
    /// Panics if `start + M > N`.
    pub fn set_subvec<const M: usize>(&mut self, start: usize, values: &Vector<T, M>) {
        *self.subvec_mut::<M>(start) = values.0;
    }

    /// Applies `f` to each component, producing a new vector.
    #[must_use]
    pub fn map<U>(&self, mut f: impl FnMut(T) -> U) -> Vector<U, N> {
        Vector(std::array::from_fn(|i| f(self.0[i])))
    }
}

#[track_caller]
fn out_of_range(start: usize, len: usize, dim: usize) -> ! {
    panic!("sub-vector of length {len} at {start} is out of range for dimension {dim}")
}

impl<T: Scalar, const N: usize> Vector<T, N> {
    /// Returns the zero vector.
    #[must_use]
    pub fn zeros() -> Self {
        Self([T::zero(); N])
    }

    /// Returns the dot product of two vectors.
    #[must_use]
    pub fn dot(&self, other: &Self) -> T {
        self.0
            .iter()
            .zip(&other.0)
            .fold(T::zero(), |acc, (&a, &b)| acc + a * b)
    }

    /// Returns the sum of squared components.
    ///
    /// Prefer this over [`Vector::magnitude`] when comparing against a
    /// squared threshold, since it avoids a square root.
    #[must_use]
    pub fn square_mag(&self) -> T {
        self.dot(self)
    }

    /// Returns the sum of squared componentwise differences.
    #[must_use]
    pub fn square_dist(&self, other: &Self) -> T {
        self.0
            .iter()
            .zip(&other.0)
            .fold(T::zero(), |acc, (&a, &b)| acc + (a - b) * (a - b))
    }

    /// Returns the Euclidean length.
    #[must_use]
    pub fn magnitude(&self) -> T {
        self.square_mag().sqrt()
    }

    /// Returns a unit vector in the same direction.
    ///
    /// A vector whose squared magnitude is at or below
    /// [`DEGENERATE_SQUARE_MAG`] is returned unchanged rather than divided by
    /// a near-zero length.
    #[must_use]
    pub fn normalized(&self) -> Self {
        let smag = self.square_mag();
        if smag <= T::lit(DEGENERATE_SQUARE_MAG) {
            *self
        } else {
            *self * smag.sqrt().recip()
        }
    }

    /// Normalizes the vector in place.
    ///
    /// See [`Vector::normalized`] for degenerate vector handling.
    pub fn normalize(&mut self) {
        *self = self.normalized();
    }

    /// Returns the largest absolute component, or `None` when `N == 0`.
    #[must_use]
    pub fn max_abs_component(&self) -> Option<T> {
        let (first, rest) = self.0.split_first()?;
        let max = rest.iter().fold(first.abs(), |max, c| {
            if c.abs() > max { c.abs() } else { max }
        });
        Some(max)
    }

    /// Scales the vector so its largest absolute component equals `clamp`.
    ///
    /// If no component exceeds `clamp` in magnitude, the vector is left
    /// untouched. Otherwise every component is multiplied by
    /// `clamp / max_abs_component`, which preserves direction. This bounds
    /// the largest component, not the Euclidean length.
    ///
    /// Returns `true` if the vector was scaled.
    pub fn clamp_components(&mut self, clamp: T) -> bool {
        let Some(max) = self.max_abs_component() else {
            return false;
        };
        if max <= clamp {
            return false;
        }

        for c in &mut self.0 {
            *c = *c * clamp / max;
        }
        true
    }

    /// Returns a copy clamped by [`Vector::clamp_components`].
    #[must_use]
    pub fn comp_clamp_scaled(mut self, clamp: T) -> Self {
        self.clamp_components(clamp);
        self
    }

    /// Returns `true` if every component is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|c| c.is_finite())
    }
}

impl<T: Scalar> Vector<T, 3> {
    /// Returns the cross product `self × other`.
    #[must_use]
    pub fn cross(&self, other: &Self) -> Self {
        let [ax, ay, az] = self.0;
        let [bx, by, bz] = other.0;
        Self([ay * bz - az * by, az * bx - ax * bz, ax * by - ay * bx])
    }
}

/// Generates named component accessors over the backing array.
macro_rules! named_components {
    ($dim:literal; $($name:ident, $set:ident, $get_mut:ident => $idx:literal),+) => {
        impl<T: Copy> Vector<T, $dim> {
            /// Creates a vector from named components.
            pub const fn new($($name: T),+) -> Self {
                Self([$($name),+])
            }

            $(
                #[doc = concat!("Returns the `", stringify!($name), "` component (index ", stringify!($idx), ").")]
                #[must_use]
                pub fn $name(&self) -> T {
                    self.0[$idx]
                }

                #[doc = concat!("Sets the `", stringify!($name), "` component (index ", stringify!($idx), ").")]
                pub fn $set(&mut self, value: T) {
                    self.0[$idx] = value;
                }

                #[doc = concat!("Returns a mutable reference to the `", stringify!($name), "` component.")]
                pub fn $get_mut(&mut self) -> &mut T {
                    &mut self.0[$idx]
                }
            )+
        }
    };
}

named_components!(2; x, set_x, x_mut => 0, y, set_y, y_mut => 1);
named_components!(3; x, set_x, x_mut => 0, y, set_y, y_mut => 1, z, set_z, z_mut => 2);
named_components!(4; x, set_x, x_mut => 0, y, set_y, y_mut => 1, z, set_z, z_mut => 2, w, set_w, w_mut => 3);

impl<T: Scalar, const N: usize> Default for Vector<T, N> {
    fn default() -> Self {
        Self::zeros()
    }
}

impl<T, const N: usize> From<[T; N]> for Vector<T, N> {
    fn from(components: [T; N]) -> Self {
        Self(components)
    }
}

impl<T, const N: usize> From<Vector<T, N>> for [T; N] {
    fn from(vector: Vector<T, N>) -> Self {
        vector.0
    }
}

impl<T, const N: usize> Index<usize> for Vector<T, N> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.0[index]
    }
}

impl<T, const N: usize> IndexMut<usize> for Vector<T, N> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.0[index]
    }
}

impl<T: Scalar, const N: usize> Add for Vector<T, N> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(std::array::from_fn(|i| self.0[i] + rhs.0[i]))
    }
}

impl<T: Scalar, const N: usize> Sub for Vector<T, N> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(std::array::from_fn(|i| self.0[i] - rhs.0[i]))
    }
}

impl<T: Scalar, const N: usize> Neg for Vector<T, N> {
    type Output = Self;

    fn neg(self) -> Self {
        self.map(|c| -c)
    }
}

impl<T: Scalar, const N: usize> Mul<T> for Vector<T, N> {
    type Output = Self;

    fn mul(self, scalar: T) -> Self {
        self.map(|c| c * scalar)
    }
}

impl<T: Scalar, const N: usize> Div<T> for Vector<T, N> {
    type Output = Self;

    fn div(self, scalar: T) -> Self {
        self.map(|c| c / scalar)
    }
}

impl<T: Scalar, const N: usize> AddAssign for Vector<T, N> {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<T: Scalar, const N: usize> SubAssign for Vector<T, N> {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl<T: Scalar, const N: usize> MulAssign<T> for Vector<T, N> {
    fn mul_assign(&mut self, scalar: T) {
        *self = *self * scalar;
    }
}

impl<T: fmt::Display, const N: usize> fmt::Display for Vector<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, c) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            fmt::Display::fmt(c, f)?;
        }
        write!(f, ")")
    }
}
