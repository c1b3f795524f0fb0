//! Reusable observers for Ikarus solvers.
//!
//! This crate provides [`Observer`] implementations and capability traits that
//! work across solvers without depending on their concrete event types.
//!
//! # Modules
//!
//! - [`traits`] — Capability traits for cross-solver observers
//!   ([`HasResidual`], [`HasStep`], [`CanStopEarly`])
//!
//! # Observers
//!
//! - [`LogObserver`] — logs each event through the `log` facade
//! - [`History`] — records residual and step sizes for later inspection
//! - [`StallDetector`] — stops a solver whose residual has stopped improving
//!
//! [`Observer`]: ikarus_core::Observer
//! [`HasResidual`]: traits::HasResidual
//! [`HasStep`]: traits::HasStep
//! [`CanStopEarly`]: traits::CanStopEarly

pub mod traits;

mod history;
mod log_observer;
mod stall;

pub use history::{History, Record};
pub use log_observer::LogObserver;
pub use stall::{StallConfigError, StallDetector};
