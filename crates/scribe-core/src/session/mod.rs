pub mod events;
pub mod machine;
pub mod state;

pub use events::EditorEvent;
pub use machine::SessionMachine;
pub use state::{SessionPhase, SessionSnapshot, SessionState};

/// Inputs the session machine accepts. The set is closed on purpose:
/// every transition is an exhaustive match over `(state, event)`.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// User asked for a continuation of the given document text.
    Submit { text: String },
    /// The remote call produced a continuation.
    ResultOk { text: String },
    /// The remote call failed; `reason` is shown to the user verbatim.
    ResultFail { reason: String },
    /// User-triggered reset (also used by the failed-dwell timer).
    Reset,
}

/// What a transition asks the orchestration layer to do. `Ignored` means the
/// event was absorbed without a state change and the caller must not perform
/// any side effect for it (in particular: no network call for a rejected
/// submit).
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    EnteredRequesting { prompt: String },
    EnteredRevealing { text: String },
    EnteredFailed { reason: String },
    EnteredIdle,
    Ignored,
}
