use std::time::{Duration, Instant};

use crate::session::state::{SessionSnapshot, SessionState};
use crate::session::{SessionEvent, Transition};

/// Minimum spacing between two accepted submissions. Measured from the end
/// of the previous reveal, not from submission.
pub const MIN_REQUEST_SPACING: Duration = Duration::from_millis(1000);

/// Pure session protocol. Transitions are total functions of
/// `(state, event, now)`; the machine performs no I/O, holds no timers and
/// never fails. All failure reporting flows in through `ResultFail`.
#[derive(Debug)]
pub struct SessionMachine {
    state: SessionState,
    /// Session-lifetime metadata: survives every transition and is the sole
    /// input to rate limiting.
    last_request_time: Option<Instant>,
    min_request_spacing: Duration,
}

impl Default for SessionMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionMachine {
    pub fn new() -> Self {
        Self::with_spacing(MIN_REQUEST_SPACING)
    }

    pub fn with_spacing(min_request_spacing: Duration) -> Self {
        Self {
            state: SessionState::Idle,
            last_request_time: None,
            min_request_spacing,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::from_state(&self.state)
    }

    pub fn last_request_time(&self) -> Option<Instant> {
        self.last_request_time
    }

    /// Apply one event. Returns what the orchestration layer has to do next;
    /// `Transition::Ignored` means the event was absorbed and no side effect
    /// may be performed for it.
    pub fn apply(&mut self, event: SessionEvent, now: Instant) -> Transition {
        match (&self.state, event) {
            (SessionState::Idle, SessionEvent::Submit { text }) => {
                if !self.submit_allowed(&text, now) {
                    return Transition::Ignored;
                }
                self.state = SessionState::Requesting {
                    submitted_text: text.clone(),
                    started_at: now,
                };
                Transition::EnteredRequesting { prompt: text }
            }
            // A submit while a request, reveal or error is in progress is
            // absorbed silently; rapid double-clicks land here.
            (_, SessionEvent::Submit { .. }) => Transition::Ignored,

            (SessionState::Requesting { .. }, SessionEvent::ResultOk { text }) => {
                self.state = SessionState::Revealing {
                    generated_text: text.clone(),
                };
                Transition::EnteredRevealing { text }
            }
            (SessionState::Requesting { .. }, SessionEvent::ResultFail { reason }) => {
                self.state = SessionState::Failed {
                    reason: reason.clone(),
                };
                Transition::EnteredFailed { reason }
            }

            // Results are only meaningful while a request is in flight.
            // Anything else is a stale delivery and must be discarded.
            (_, SessionEvent::ResultOk { .. }) | (_, SessionEvent::ResultFail { .. }) => {
                log::debug!("discarding result event outside Requesting");
                Transition::Ignored
            }

            (_, SessionEvent::Reset) => {
                self.state = SessionState::Idle;
                Transition::EnteredIdle
            }
        }
    }

    /// Exit from `Revealing`, driven by the reveal sequencer finishing.
    /// Records `last_request_time` so rate limiting applies from completion,
    /// not from submission. Ignored outside `Revealing`.
    pub fn finish_reveal(&mut self, now: Instant) -> Transition {
        match self.state {
            SessionState::Revealing { .. } => {
                self.state = SessionState::Idle;
                self.last_request_time = Some(now);
                Transition::EnteredIdle
            }
            _ => Transition::Ignored,
        }
    }

    fn submit_allowed(&self, text: &str, now: Instant) -> bool {
        if text.trim().is_empty() {
            return false;
        }
        match self.last_request_time {
            None => true,
            Some(last) => now.duration_since(last) >= self.min_request_spacing,
        }
    }
}
