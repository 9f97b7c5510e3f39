use sawrun_common::Action;
use serde::Serialize;

/// Errors from binding lookups.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    /// The action has no entry in the binding table at all. Every action
    /// is registered at construction, so this means a table was built
    /// without it.
    #[error("action `{0}` is not registered in the binding table")]
    UnknownAction(Action),
}

/// A problem with one source's value. Recovered locally: the resolver
/// still produces a value for the action.
#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
pub enum SourceAnomaly {
    /// The source produced something that is neither a press nor a usable level.
    #[error("source {origin} bound to `{action}` broke its contract; contributing neutral default")]
    ContractViolation { action: Action, origin: String },
    /// An analog level outside `[0.0, 1.0]`; clamped before aggregation.
    #[error("source {origin} bound to `{action}` returned {value}; clamped to {clamped}")]
    OutOfRange {
        action: Action,
        origin: String,
        value: f32,
        clamped: f32,
    },
}
