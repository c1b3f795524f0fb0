use ikarus_core::{Scalar, Vector};

/// Indicates why the solver stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The residual magnitude reached the configured tolerance.
    Converged,

    /// Reached the iteration limit without converging.
    MaxIters,

    /// Stopped early due to an observer decision.
    StoppedByObserver,

    /// The residual, Jacobian, or update step was not finite.
    ///
    /// No non-finite step is ever applied, so the configuration is left at
    /// the last finite iterate.
    NonFinite,
}

/// The result of a Newton IK solve.
///
/// The solved configuration itself lives in the caller's vector, which the
/// solver updates in place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Solution<T, const M: usize> {
    /// Final solver status.
    pub status: Status,

    /// Residual at the final configuration.
    pub residual: Vector<T, M>,

    /// Number of update steps applied.
    pub iters: usize,
}

impl<T: Scalar, const M: usize> Solution<T, M> {
    /// Returns the squared residual magnitude at the final configuration.
    #[must_use]
    pub fn square_residual(&self) -> T {
        self.residual.square_mag()
    }

    /// Returns `true` if the solver converged.
    #[must_use]
    pub fn is_converged(&self) -> bool {
        self.status == Status::Converged
    }
}
