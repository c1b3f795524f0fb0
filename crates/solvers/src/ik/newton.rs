//! Newton-type iteration for inverse kinematics.
//!
//! # Algorithm
//!
//! Each iteration evaluates the residual `e = f(x)`. If `|e|` is within the
//! configured tolerance the solver stops. Otherwise it evaluates the Jacobian
//! `J`, solves `J · Δx ≈ e` in a least-squares sense using the configured
//! [`Method`], clamps `Δx` so its largest component is at most `max_step`,
//! and updates `x ← x − Δx`.
//!
//! The step is computed entirely in temporaries and applied as a single
//! assignment, so the caller's vector only ever holds complete iterates.
//!
//! # Termination
//!
//! Exhausting the iteration budget is not an error: the solver returns
//! [`Status::MaxIters`] with `x` holding the latest iterate. A singular
//! Jacobian produces a zero or damped step rather than NaN, and any
//! non-finite residual, Jacobian, or step stops the solver with
//! [`Status::NonFinite`] before it can reach `x`.
//!
//! # Observer Events
//!
//! The solver emits one [`Event`] per iteration, after the clamped step is
//! computed and before it is applied. Observers can return
//! [`Action::StopEarly`] to leave `x` at the event's configuration.
//!
//! # Example
//!
//! ```
//! use ikarus_core::{DiffMap, Matrix, Vector2};
//! use ikarus_solvers::ik::newton::{self, Config, Status};
//!
//! let target = Vector2::new(3.0, 4.0);
//! let map = DiffMap::new(
//!     move |x: &Vector2| *x - target,
//!     |_: &Vector2| Matrix::identity(),
//! );
//!
//! let mut x = Vector2::zeros();
//! let solution = newton::solve_unobserved(&map, &mut x, &Config::default());
//!
//! assert_eq!(solution.status, Status::Converged);
//! assert!(x.square_dist(&target) < 1e-8);
//! ```

mod action;
mod config;
mod event;
mod method;
mod solution;

#[cfg(test)]
mod tests;

pub use action::Action;
pub use config::{Config, ConfigError};
pub use event::Event;
pub use method::Method;
pub use solution::{Solution, Status};

use ikarus_core::{DifferentiableMap, Observer, Scalar, Vector};
use log::{debug, trace};

/// Drives `x` toward a root of `map` using damped Newton iteration.
///
/// `x` is updated in place. The observer receives an [`Event`] for each
/// iteration; see the [module docs](self) for details.
pub fn solve<T, D, Obs, const N: usize, const M: usize>(
    map: &D,
    x: &mut Vector<T, N>,
    config: &Config<T>,
    mut observer: Obs,
) -> Solution<T, M>
where
    T: Scalar,
    D: DifferentiableMap<T, N, M> + ?Sized,
    Obs: for<'a> Observer<Event<'a, T, N, M>, Action>,
{
    let tol_sq = config.residual_tol() * config.residual_tol();
    let mut residual = map.evaluate(x);

    for iter in 0..config.max_iters() {
        let square_residual = residual.square_mag();
        if !square_residual.is_finite() {
            return finish(Status::NonFinite, residual, iter);
        }
        if square_residual <= tol_sq {
            return finish(Status::Converged, residual, iter);
        }

        let jacobian = map.jacobian(x);
        if !jacobian.is_finite() {
            return finish(Status::NonFinite, residual, iter);
        }

        let mut step = config.method().step(&jacobian, &residual);
        let clamped = step.clamp_components(config.max_step());
        if !step.is_finite() {
            return finish(Status::NonFinite, residual, iter);
        }

        trace!(
            "newton iter {}: |e|² = {square_residual}, step = {step}{}",
            iter + 1,
            if clamped { " (clamped)" } else { "" },
        );

        let event = Event {
            iter: iter + 1,
            x: &*x,
            residual: &residual,
            step: &step,
            clamped,
        };
        if let Some(Action::StopEarly) = observer.observe(&event) {
            return finish(Status::StoppedByObserver, residual, iter);
        }

        *x -= step;
        residual = map.evaluate(x);
    }

    // The last step may have landed within tolerance.
    let square_residual = residual.square_mag();
    let status = if !square_residual.is_finite() {
        Status::NonFinite
    } else if square_residual <= tol_sq {
        Status::Converged
    } else {
        Status::MaxIters
    };
    finish(status, residual, config.max_iters())
}

/// Runs the Newton solver without observation.
///
/// This is a convenience wrapper around [`solve`] that uses a no-op observer.
pub fn solve_unobserved<T, D, const N: usize, const M: usize>(
    map: &D,
    x: &mut Vector<T, N>,
    config: &Config<T>,
) -> Solution<T, M>
where
    T: Scalar,
    D: DifferentiableMap<T, N, M> + ?Sized,
{
    solve(map, x, config, ())
}

/// Moves `x` toward a root of `map` using the default [`Config`].
///
/// This is the minimal interface: it reports nothing back. Callers that need
/// to know whether the solve converged can re-evaluate `map` at `x`, or use
/// [`solve_unobserved`] to get a [`Solution`].
pub fn ik_solve<T, D, const N: usize, const M: usize>(x: &mut Vector<T, N>, map: &D)
where
    T: Scalar,
    D: DifferentiableMap<T, N, M> + ?Sized,
{
    solve_unobserved(map, x, &Config::default());
}

fn finish<T: Scalar, const M: usize>(
    status: Status,
    residual: Vector<T, M>,
    iters: usize,
) -> Solution<T, M> {
    debug!(
        "newton solve finished: {status:?} after {iters} iterations, |e|² = {}",
        residual.square_mag()
    );
    Solution {
        status,
        residual,
        iters,
    }
}
