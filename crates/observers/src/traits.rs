//! Capability traits for cross-solver observers.
//!
//! These traits abstract over solver-specific event and action types, enabling
//! observers to work generically across different solvers.
//!
//! # Event traits
//!
//! - [`HasResidual`] — events that carry a residual magnitude
//! - [`HasStep`] — events that carry a pending update step
//!
//! # Action traits
//!
//! - [`CanStopEarly`] — actions that can signal early termination
//!
//! # Example
//!
//! ```rust
//! use ikarus_core::Observer;
//! use ikarus_observers::traits::{CanStopEarly, HasResidual};
//!
//! struct GoodEnough {
//!     tolerance: f64,
//!     min_iters: usize,
//!     iter: usize,
//! }
//!
//! impl<E: HasResidual, A: CanStopEarly> Observer<E, A> for GoodEnough {
//!     fn observe(&mut self, event: &E) -> Option<A> {
//!         self.iter += 1;
//!         if self.iter >= self.min_iters && event.residual() < self.tolerance {
//!             return Some(A::stop_early());
//!         }
//!         None
//!     }
//! }
//! ```

use ikarus_core::Scalar;
use ikarus_solvers::ik::newton;
use num_traits::ToPrimitive;

/// An event that carries a residual.
pub trait HasResidual {
    /// Returns the residual magnitude for this event.
    ///
    /// Returns `f64::NAN` when no finite residual is available.
    fn residual(&self) -> f64;
}

/// An event that carries the update step the solver is about to apply.
pub trait HasStep {
    /// Returns the largest absolute component of the pending step.
    fn step_size(&self) -> f64;

    /// Returns `true` if the step was scaled down to the solver's limit.
    fn was_clamped(&self) -> bool {
        false
    }
}

/// An action type that can signal early termination.
pub trait CanStopEarly {
    /// Returns the action that stops the solver early.
    fn stop_early() -> Self;
}

fn to_f64<T: Scalar>(value: T) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}

// --- newton::Event ---

impl<T: Scalar, const N: usize, const M: usize> HasResidual for newton::Event<'_, T, N, M> {
    fn residual(&self) -> f64 {
        to_f64(self.residual.magnitude())
    }
}

impl<T: Scalar, const N: usize, const M: usize> HasStep for newton::Event<'_, T, N, M> {
    fn step_size(&self) -> f64 {
        self.step.max_abs_component().map_or(0.0, to_f64)
    }

    fn was_clamped(&self) -> bool {
        self.clamped
    }
}

// --- CanStopEarly impls ---

impl CanStopEarly for newton::Action {
    fn stop_early() -> Self {
        Self::StopEarly
    }
}
