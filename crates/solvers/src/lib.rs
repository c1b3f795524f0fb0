//! Iterative solvers for Ikarus.
//!
//! # Modules
//!
//! - [`ik`] — inverse-kinematics solvers that drive a configuration vector
//!   toward a root of a [`DifferentiableMap`]
//!
//! [`DifferentiableMap`]: ikarus_core::DifferentiableMap

pub mod ik;

pub use ik::ik_solve;
