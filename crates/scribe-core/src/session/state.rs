use std::time::Instant;

/// The four phases of a continuation session. Exactly one is active at a
/// time; per-phase payloads live inside their variant and disappear on any
/// transition away from it.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Idle,
    Requesting {
        submitted_text: String,
        started_at: Instant,
    },
    Revealing {
        generated_text: String,
    },
    Failed {
        reason: String,
    },
}

impl SessionState {
    pub fn phase(&self) -> SessionPhase {
        match self {
            SessionState::Idle => SessionPhase::Idle,
            SessionState::Requesting { .. } => SessionPhase::Requesting,
            SessionState::Revealing { .. } => SessionPhase::Revealing,
            SessionState::Failed { .. } => SessionPhase::Failed,
        }
    }
}

/// Payload-free view of the active phase, convenient for matching in UIs
/// and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    Requesting,
    Revealing,
    Failed,
}

/// Read accessor the UI layer consumes. Derived entirely from the machine;
/// there is no other way to observe session state.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub phase: SessionPhase,
    pub is_loading: bool,
    pub is_error: bool,
    pub error_message: Option<String>,
}

impl SessionSnapshot {
    pub fn from_state(state: &SessionState) -> Self {
        Self {
            phase: state.phase(),
            is_loading: matches!(state, SessionState::Requesting { .. }),
            is_error: matches!(state, SessionState::Failed { .. }),
            error_message: match state {
                SessionState::Failed { reason } => Some(reason.clone()),
                _ => None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_reflects_loading_phase() {
        let state = SessionState::Requesting {
            submitted_text: "draft".to_string(),
            started_at: Instant::now(),
        };
        let snapshot = SessionSnapshot::from_state(&state);
        assert_eq!(snapshot.phase, SessionPhase::Requesting);
        assert!(snapshot.is_loading);
        assert!(!snapshot.is_error);
        assert_eq!(snapshot.error_message, None);
    }

    #[test]
    fn snapshot_exposes_failure_reason() {
        let state = SessionState::Failed {
            reason: "quota exceeded".to_string(),
        };
        let snapshot = SessionSnapshot::from_state(&state);
        assert!(snapshot.is_error);
        assert!(!snapshot.is_loading);
        assert_eq!(snapshot.error_message.as_deref(), Some("quota exceeded"));
    }
}
