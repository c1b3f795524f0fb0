use ikarus_core::Observer;
use log::debug;
use thiserror::Error;

use crate::traits::{CanStopEarly, HasResidual};

/// Errors that can occur when configuring a [`StallDetector`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum StallConfigError {
    #[error("ratio must be in (0, 1]")]
    Ratio,

    #[error("patience must be at least one")]
    Patience,
}

/// An observer that stops a solver whose residual has stopped improving.
///
/// An iteration counts as stalled when its residual is not below `ratio`
/// times the previous one. After `patience` consecutive stalled iterations
/// the detector requests an early stop. A non-finite residual also counts
/// as stalled.
#[derive(Debug, Clone, PartialEq)]
pub struct StallDetector {
    ratio: f64,
    patience: usize,
    previous: Option<f64>,
    stalled: usize,
}

impl StallDetector {
    /// Creates a detector with the given improvement ratio and patience.
    ///
    /// # Errors
    ///
    /// Returns an error if `ratio` is not in `(0, 1]` or `patience` is zero.
    pub fn new(ratio: f64, patience: usize) -> Result<Self, StallConfigError> {
        if !(ratio > 0.0 && ratio <= 1.0) {
            return Err(StallConfigError::Ratio);
        }
        if patience == 0 {
            return Err(StallConfigError::Patience);
        }

        Ok(Self {
            ratio,
            patience,
            previous: None,
            stalled: 0,
        })
    }

    /// Returns the number of consecutive stalled iterations seen so far.
    #[must_use]
    pub fn stalled(&self) -> usize {
        self.stalled
    }

    /// Forgets all observed residuals so the detector can be reused.
    pub fn reset(&mut self) {
        self.previous = None;
        self.stalled = 0;
    }

    fn update(&mut self, residual: f64) -> bool {
        let improved = match self.previous {
            Some(previous) => residual < previous * self.ratio,
            None => residual.is_finite(),
        };
        self.stalled = if improved { 0 } else { self.stalled + 1 };
        self.previous = Some(residual);

        if self.stalled >= self.patience {
            debug!(
                "stall detected: {} iterations without improvement, |e| = {residual:e}",
                self.stalled
            );
            return true;
        }
        false
    }
}

impl<E, A> Observer<E, A> for StallDetector
where
    E: HasResidual,
    A: CanStopEarly,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        self.update(event.residual()).then(A::stop_early)
    }
}

impl<E, A> Observer<E, A> for &mut StallDetector
where
    E: HasResidual,
    A: CanStopEarly,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        self.update(event.residual()).then(A::stop_early)
    }
}
