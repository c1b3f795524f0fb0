use ikarus_core::Observer;
use log::{Level, log};

use crate::traits::{HasResidual, HasStep};

/// An observer that logs every solver event and never intervenes.
///
/// Events are numbered in the order they are observed and written through
/// the `log` facade at the configured [`Level`], with `target` set to the
/// observer's label so output from concurrent solves can be told apart.
#[derive(Debug, Clone)]
pub struct LogObserver {
    label: String,
    level: Level,
    events: usize,
}

impl LogObserver {
    /// Creates an observer that logs at `Level::Info` under `label`.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            level: Level::Info,
            events: 0,
        }
    }

    /// Sets the log level used for each event.
    #[must_use]
    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Returns the number of events observed so far.
    #[must_use]
    pub fn events(&self) -> usize {
        self.events
    }

    fn log_event<E: HasResidual + HasStep>(&mut self, event: &E) {
        self.events += 1;
        log!(
            target: self.label.as_str(),
            self.level,
            "event {}: |e| = {:.6e}, step = {:.6e}{}",
            self.events,
            event.residual(),
            event.step_size(),
            if event.was_clamped() { " (clamped)" } else { "" },
        );
    }
}

impl<E, A> Observer<E, A> for LogObserver
where
    E: HasResidual + HasStep,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        self.log_event(event);
        None
    }
}

impl<E, A> Observer<E, A> for &mut LogObserver
where
    E: HasResidual + HasStep,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        self.log_event(event);
        None
    }
}
