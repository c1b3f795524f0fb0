use ikarus_core::{Scalar, Vector};

/// Event emitted once per iteration, after the update step is computed and
/// before it is applied.
///
/// `x` is the configuration the residual was evaluated at, and `step` is the
/// clamped update the solver is about to subtract from it.
#[derive(Debug, Clone, Copy)]
pub struct Event<'a, T, const N: usize, const M: usize> {
    /// Iteration number (1-based).
    pub iter: usize,

    /// Configuration at the start of this iteration.
    pub x: &'a Vector<T, N>,

    /// Residual evaluated at `x`.
    pub residual: &'a Vector<T, M>,

    /// Update step after clamping.
    pub step: &'a Vector<T, N>,

    /// Whether the step was scaled down to the configured `max_step`.
    pub clamped: bool,
}

impl<T: Scalar, const N: usize, const M: usize> Event<'_, T, N, M> {
    /// Returns the squared residual magnitude at `x`.
    #[must_use]
    pub fn square_residual(&self) -> T {
        self.residual.square_mag()
    }

    /// Returns the configuration the solver will move to if not stopped.
    #[must_use]
    pub fn next_x(&self) -> Vector<T, N> {
        *self.x - *self.step
    }
}
