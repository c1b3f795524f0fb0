//! Solvers for inverse-kinematics problems.
//!
//! A [`DifferentiableMap`] maps a configuration `x: Vector<T, N>` to a
//! task-space residual `Vector<T, M>` (for example, end-effector position
//! minus target) and supplies its Jacobian. Solvers in this module mutate
//! `x` in place to drive that residual toward zero.
//!
//! # Solvers
//!
//! - [`newton`] — Newton-type iteration with a damped least-squares update,
//!   clamped per step
//!
//! [`DifferentiableMap`]: ikarus_core::DifferentiableMap

pub mod newton;

pub use newton::ik_solve;
