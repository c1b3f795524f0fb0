/// Actions an observer can take during a Newton IK solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Stop the solver before the pending step is applied.
    StopEarly,
}
