use ikarus_core::Scalar;
use thiserror::Error;

use super::Method;

/// Configuration for the Newton IK solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config<T> {
    max_iters: usize,
    residual_tol: T,
    max_step: T,
    method: Method<T>,
}

/// Errors that can occur when validating a Newton solver config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("residual_tol must be finite and non-negative")]
    ResidualTol,

    #[error("max_step must be finite and positive")]
    MaxStep,

    #[error("damping must be finite and non-negative")]
    Damping,
}

impl<T: Scalar> Default for Config<T> {
    fn default() -> Self {
        Self {
            max_iters: 100,
            residual_tol: T::lit(1e-4),
            max_step: T::lit(0.5),
            method: Method::default(),
        }
    }
}

impl<T: Scalar> Config<T> {
    /// Creates a new config with validated tolerances.
    ///
    /// - `max_iters` bounds the number of update steps applied.
    /// - `residual_tol` is the residual magnitude at or below which the
    ///   solver reports convergence.
    /// - `max_step` bounds the largest component of each update step.
    ///
    /// # Errors
    ///
    /// Returns an error if `residual_tol` is negative or non-finite, if
    /// `max_step` is not strictly positive and finite, or if the method's
    /// damping is negative or non-finite.
    pub fn new(
        max_iters: usize,
        residual_tol: T,
        max_step: T,
        method: Method<T>,
    ) -> Result<Self, ConfigError> {
        if !residual_tol.is_finite() || residual_tol < T::zero() {
            return Err(ConfigError::ResidualTol);
        }
        if !max_step.is_finite() || max_step <= T::zero() {
            return Err(ConfigError::MaxStep);
        }
        if let Method::DampedLeastSquares { damping } = method
            && (!damping.is_finite() || damping < T::zero())
        {
            return Err(ConfigError::Damping);
        }

        Ok(Self {
            max_iters,
            residual_tol,
            max_step,
            method,
        })
    }

    /// Returns a copy with a different iteration budget.
    #[must_use]
    pub fn with_max_iters(self, max_iters: usize) -> Self {
        Self { max_iters, ..self }
    }

    /// Returns a copy with a different convergence tolerance.
    ///
    /// # Errors
    ///
    /// Returns an error if `residual_tol` is negative or non-finite.
    pub fn with_residual_tol(self, residual_tol: T) -> Result<Self, ConfigError> {
        Self::new(self.max_iters, residual_tol, self.max_step, self.method)
    }

    /// Returns a copy with a different per-step clamp.
    ///
    /// # Errors
    ///
    /// Returns an error if `max_step` is not strictly positive and finite.
    pub fn with_max_step(self, max_step: T) -> Result<Self, ConfigError> {
        Self::new(self.max_iters, self.residual_tol, max_step, self.method)
    }

    /// Returns a copy with a different linear-solve method.
    ///
    /// # Errors
    ///
    /// Returns an error if the method's damping is negative or non-finite.
    pub fn with_method(self, method: Method<T>) -> Result<Self, ConfigError> {
        Self::new(self.max_iters, self.residual_tol, self.max_step, method)
    }

    /// Returns the maximum number of update steps.
    #[must_use]
    pub fn max_iters(&self) -> usize {
        self.max_iters
    }

    /// Returns the residual magnitude tolerance.
    #[must_use]
    pub fn residual_tol(&self) -> T {
        self.residual_tol
    }

    /// Returns the largest allowed component of a single update step.
    #[must_use]
    pub fn max_step(&self) -> T {
        self.max_step
    }

    /// Returns the linear-solve method.
    #[must_use]
    pub fn method(&self) -> Method<T> {
        self.method
    }
}
