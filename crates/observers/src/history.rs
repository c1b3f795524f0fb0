use ikarus_core::Observer;

use crate::traits::{HasResidual, HasStep};

/// One observed iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Record {
    /// Residual magnitude before the step.
    pub residual: f64,

    /// Largest absolute component of the pending step.
    pub step_size: f64,

    /// Whether the step was clamped.
    pub clamped: bool,
}

/// An observer that records every event for later inspection.
///
/// Pass `&mut History` as the solver observer so the records remain
/// available after the solve returns.
#[derive(Debug, Clone, Default)]
pub struct History {
    records: Vec<Record>,
}

impl History {
    /// Creates an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded iterations in order.
    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Returns the recorded residual magnitudes in order.
    pub fn residuals(&self) -> impl Iterator<Item = f64> + '_ {
        self.records.iter().map(|record| record.residual)
    }

    /// Returns the number of recorded iterations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the number of recorded steps that were clamped.
    #[must_use]
    pub fn clamped_count(&self) -> usize {
        self.records.iter().filter(|record| record.clamped).count()
    }

    /// Returns `true` if each recorded residual is strictly below the last.
    #[must_use]
    pub fn is_strictly_decreasing(&self) -> bool {
        self.records
            .windows(2)
            .all(|pair| pair[1].residual < pair[0].residual)
    }

    /// Discards all records.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    fn push<E: HasResidual + HasStep>(&mut self, event: &E) {
        self.records.push(Record {
            residual: event.residual(),
            step_size: event.step_size(),
            clamped: event.was_clamped(),
        });
    }
}

impl<E, A> Observer<E, A> for History
where
    E: HasResidual + HasStep,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        self.push(event);
        None
    }
}

impl<E, A> Observer<E, A> for &mut History
where
    E: HasResidual + HasStep,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        self.push(event);
        None
    }
}
