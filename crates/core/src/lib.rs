//! Core types and traits for Ikarus.
//!
//! This crate defines the numeric building blocks that solvers and callers
//! share:
//!
//! - [`Vector`] — a fixed-size vector with named accessors for 2–4 dimensions
//! - [`Matrix`] — a fixed-size dense matrix, used to represent Jacobians
//! - [`DifferentiableMap`] — a vector-valued function paired with its Jacobian
//! - [`DiffMap`], [`CentralDifference`] — ready-made differentiable maps built
//!   from closures
//! - [`Observer`] — receives solver events and optionally returns control actions
//!
//! Every type is generic over a [`Scalar`], so callers pick `f32` or `f64`.

mod map;
mod matrix;
mod observer;
mod scalar;
mod vector;

pub use map::{CentralDifference, DiffMap, DifferentiableMap};
pub use matrix::Matrix;
pub use observer::Observer;
pub use scalar::Scalar;
pub use vector::{DEGENERATE_SQUARE_MAG, Vector, Vector2, Vector3, Vector4};
