use crate::{Matrix, Scalar, Vector};

/// A vector-valued function paired with its Jacobian.
///
/// `N` is the input dimension and `M` the output dimension. Solvers treat
/// both methods as deterministic functions of `x` for the duration of a
/// solve, and assume `jacobian(x)` is the true derivative of `evaluate` at
/// `x`. An inconsistent Jacobian degrades convergence (stagnation or
/// divergence) but does not make a solve fail.
///
/// Implementors may capture external state (a kinematic chain, a target
/// pose), but must be safe to call at any configuration a solver might visit.
pub trait DifferentiableMap<T, const N: usize, const M: usize> {
    /// Evaluates the map at `x`.
    fn evaluate(&self, x: &Vector<T, N>) -> Vector<T, M>;

    /// Returns the `M` × `N` Jacobian of [`evaluate`](Self::evaluate) at `x`.
    fn jacobian(&self, x: &Vector<T, N>) -> Matrix<T, M, N>;
}

impl<T, D, const N: usize, const M: usize> DifferentiableMap<T, N, M> for &D
where
    D: DifferentiableMap<T, N, M> + ?Sized,
{
    fn evaluate(&self, x: &Vector<T, N>) -> Vector<T, M> {
        (**self).evaluate(x)
    }

    fn jacobian(&self, x: &Vector<T, N>) -> Matrix<T, M, N> {
        (**self).jacobian(x)
    }
}

/// A [`DifferentiableMap`] built from a value closure and a Jacobian closure.
///
/// This is the usual way to bind forward-kinematics state into a solver
/// call without defining a new type:
///
/// ```
/// use ikarus_core::{DiffMap, DifferentiableMap, Matrix, Vector2};
///
/// let target = Vector2::new(3.0, 4.0);
/// let map = DiffMap::new(
///     move |x: &Vector2| *x - target,
///     |_: &Vector2| Matrix::identity(),
/// );
///
/// assert_eq!(map.evaluate(&Vector2::new(3.0, 5.0)), Vector2::new(0.0, 1.0));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct DiffMap<V, J> {
    value: V,
    jacobian: J,
}

impl<V, J> DiffMap<V, J> {
    /// Pairs a value closure with its Jacobian closure.
    pub fn new<T, const N: usize, const M: usize>(value: V, jacobian: J) -> Self
    where
        V: Fn(&Vector<T, N>) -> Vector<T, M>,
        J: Fn(&Vector<T, N>) -> Matrix<T, M, N>,
    {
        Self { value, jacobian }
    }
}

impl<T, V, J, const N: usize, const M: usize> DifferentiableMap<T, N, M> for DiffMap<V, J>
where
    V: Fn(&Vector<T, N>) -> Vector<T, M>,
    J: Fn(&Vector<T, N>) -> Matrix<T, M, N>,
{
    fn evaluate(&self, x: &Vector<T, N>) -> Vector<T, M> {
        (self.value)(x)
    }

    fn jacobian(&self, x: &Vector<T, N>) -> Matrix<T, M, N> {
        (self.jacobian)(x)
    }
}

/// A [`DifferentiableMap`] whose Jacobian is estimated by central differences.
///
/// Column `j` of the Jacobian is `(f(x + h·e_j) - f(x - h·e_j)) / 2h`, which
/// costs `2N` evaluations per Jacobian. Useful when an analytic Jacobian is
/// unavailable, and for checking one that is.
#[derive(Debug, Clone, Copy)]
pub struct CentralDifference<F, T> {
    value: F,
    step: T,
}

impl<F, T: Scalar> CentralDifference<F, T> {
    /// Wraps `value` using a step of `ε^(1/3)` for the scalar type.
    pub fn new<const N: usize, const M: usize>(value: F) -> Self
    where
        F: Fn(&Vector<T, N>) -> Vector<T, M>,
    {
        Self::with_step(value, T::epsilon().cbrt())
    }

    /// Wraps `value` using an explicit finite-difference step.
    ///
    /// # Panics
    ///
    /// Panics if `step` is not finite and strictly positive.
    pub fn with_step<const N: usize, const M: usize>(value: F, step: T) -> Self
    where
        F: Fn(&Vector<T, N>) -> Vector<T, M>,
    {
        assert!(
            step.is_finite() && step > T::zero(),
            "finite-difference step must be finite and positive, got {step}"
        );
        Self { value, step }
    }

    /// Returns the finite-difference step.
    pub fn step(&self) -> T {
        self.step
    }
}

impl<F, T, const N: usize, const M: usize> DifferentiableMap<T, N, M> for CentralDifference<F, T>
where
    F: Fn(&Vector<T, N>) -> Vector<T, M>,
    T: Scalar,
{
    fn evaluate(&self, x: &Vector<T, N>) -> Vector<T, M> {
        (self.value)(x)
    }

    fn jacobian(&self, x: &Vector<T, N>) -> Matrix<T, M, N> {
        let h = self.step;
        let inv_two_h = (h + h).recip();

        let mut jacobian = Matrix::zeros();
        for j in 0..N {
            let mut forward = *x;
            let mut backward = *x;
            forward[j] = forward[j] + h;
            backward[j] = backward[j] - h;

            let column = ((self.value)(&forward) - (self.value)(&backward)) * inv_two_h;
            jacobian.set_column(j, &column);
        }
        jacobian
    }
}
