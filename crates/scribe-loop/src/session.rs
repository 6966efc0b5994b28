use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Instant;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use scribe_core::{
    DocumentAdapter, EditorEvent, SessionEvent, SessionMachine, SessionSnapshot, Transition,
};
use scribe_llm::{CompletionProvider, Continuation, ContinuationRequest, Result as LlmResult};

use crate::config::SessionConfig;
use crate::reveal::{reveal_text, RevealOutcome};

/// Orchestration layer around the pure session machine: issues provider
/// calls, runs reveal tasks, owns the failed-dwell timer and discards stale
/// results. Cheap to clone; clones share the same session.
///
/// Every in-flight request is tagged with a generation number; `reset`
/// bumps the generation so a response that arrives afterwards is identified
/// as stale and dropped instead of being applied to a session that has moved
/// on.
#[derive(Clone)]
pub struct EditorSession {
    inner: Arc<Inner>,
}

struct Inner {
    machine: Mutex<SessionMachine>,
    document: Arc<dyn DocumentAdapter>,
    provider: Arc<dyn CompletionProvider>,
    config: SessionConfig,
    generation: AtomicU64,
    reveal_cancel: Mutex<Option<CancellationToken>>,
    dwell_cancel: Mutex<Option<CancellationToken>>,
    event_tx: mpsc::Sender<EditorEvent>,
}

impl EditorSession {
    pub fn new(
        document: Arc<dyn DocumentAdapter>,
        provider: Arc<dyn CompletionProvider>,
        config: SessionConfig,
    ) -> (Self, mpsc::Receiver<EditorEvent>) {
        let (event_tx, event_rx) = mpsc::channel(config.event_buffer);
        let machine = SessionMachine::with_spacing(config.min_request_spacing);
        let session = Self {
            inner: Arc::new(Inner {
                machine: Mutex::new(machine),
                document,
                provider,
                config,
                generation: AtomicU64::new(0),
                reveal_cancel: Mutex::new(None),
                dwell_cancel: Mutex::new(None),
                event_tx,
            }),
        };
        (session, event_rx)
    }

    /// Current state plus derived flags. The only read path.
    pub fn snapshot(&self) -> SessionSnapshot {
        self.inner.lock_machine().snapshot()
    }

    pub fn document(&self) -> &Arc<dyn DocumentAdapter> {
        &self.inner.document
    }

    /// Submit the current document text for continuation. Returns whether
    /// the guard accepted the submission; a rejected submission performs no
    /// network I/O and no state change.
    pub async fn submit(&self) -> bool {
        let text = self.inner.document.plain_text();
        let transition = self
            .inner
            .lock_machine()
            .apply(SessionEvent::Submit { text }, Instant::now());

        let prompt = match transition {
            Transition::EnteredRequesting { prompt } => prompt,
            _ => {
                log::debug!("submission rejected by session guard");
                return false;
            }
        };

        let generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
        log::info!("continuation request started (generation {generation})");
        self.inner.emit(EditorEvent::RequestStarted).await;

        let request =
            ContinuationRequest::new(prompt).with_max_tokens(self.inner.config.max_tokens);
        let session = self.clone();
        tokio::spawn(async move {
            let result = session.inner.provider.complete(&request).await;
            session.deliver(generation, result).await;
        });
        true
    }

    /// User-triggered reset: interrupt any reveal, drop any pending error,
    /// mark in-flight requests stale and clear the document.
    pub async fn reset(&self) {
        let was_error = {
            let mut machine = self.inner.lock_machine();
            // Bumping under the machine lock means a delivery can never
            // observe the old generation together with the new state.
            self.inner.generation.fetch_add(1, Ordering::SeqCst);
            self.inner.cancel_reveal();
            self.inner.cancel_dwell();
            let was_error = machine.snapshot().is_error;
            machine.apply(SessionEvent::Reset, Instant::now());
            was_error
        };

        self.inner.document.clear();
        if was_error {
            self.inner.emit(EditorEvent::ErrorCleared).await;
        }
    }

    async fn deliver(&self, generation: u64, result: LlmResult<Continuation>) {
        let event = match result {
            Ok(continuation) => SessionEvent::ResultOk {
                text: continuation.text,
            },
            Err(error) => SessionEvent::ResultFail {
                reason: error.to_string(),
            },
        };

        let (transition, cancel) = {
            let mut machine = self.inner.lock_machine();
            // Checked under the machine lock: a reset bumps the generation
            // under the same lock, so a match here proves this result still
            // belongs to the live request and not to a superseded one.
            if self.inner.generation.load(Ordering::SeqCst) != generation {
                log::debug!(
                    "discarding stale continuation result (generation {generation} superseded)"
                );
                return;
            }
            let transition = machine.apply(event, Instant::now());
            // The reveal token is installed under the machine lock so a
            // concurrent reset either sees Idle (and the result is ignored)
            // or finds the token to cancel.
            let cancel = match &transition {
                Transition::EnteredRevealing { .. } => {
                    let token = CancellationToken::new();
                    *self.inner.lock_reveal_cancel() = Some(token.clone());
                    Some(token)
                }
                _ => None,
            };
            (transition, cancel)
        };

        match transition {
            Transition::EnteredRevealing { text } => {
                let cancel = cancel.expect("reveal token installed above");
                self.inner.emit(EditorEvent::RevealStarted).await;
                let outcome = reveal_text(
                    self.inner.document.as_ref(),
                    &text,
                    &cancel,
                    &self.inner.config.reveal,
                )
                .await;

                match outcome {
                    RevealOutcome::Completed { chars } => {
                        let finished = {
                            let mut machine = self.inner.lock_machine();
                            // A matching generation means no reset ran since
                            // this request started, so the token slot and the
                            // Revealing state are still ours to retire.
                            if self.inner.generation.load(Ordering::SeqCst) == generation {
                                self.inner.lock_reveal_cancel().take();
                                machine.finish_reveal(Instant::now())
                            } else {
                                Transition::Ignored
                            }
                        };
                        if finished == Transition::EnteredIdle {
                            self.inner.emit(EditorEvent::RevealFinished { chars }).await;
                        }
                    }
                    // A reset superseded the run; it already took the token
                    // and the machine is back in Idle.
                    RevealOutcome::Cancelled { .. } => {}
                }
            }
            Transition::EnteredFailed { reason } => {
                log::warn!("continuation request failed: {reason}");
                self.inner.emit(EditorEvent::RequestFailed { reason }).await;
                self.start_dwell_timer();
            }
            // Stale delivery absorbed by the machine.
            _ => {}
        }
    }

    /// Clear the failure banner once the dwell elapses, unless a
    /// superseding event cancelled the timer first.
    fn start_dwell_timer(&self) {
        let token = CancellationToken::new();
        *self.inner.lock_dwell_cancel() = Some(token.clone());

        let session = self.clone();
        let dwell = self.inner.config.failed_dwell;
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                _ = tokio::time::sleep(dwell) => {
                    session.expire_failure().await;
                }
            }
        });
    }

    async fn expire_failure(&self) {
        let transition = {
            let mut machine = self.inner.lock_machine();
            if !machine.snapshot().is_error {
                return;
            }
            machine.apply(SessionEvent::Reset, Instant::now())
        };
        // The dwell timeout clears the banner but leaves the document alone.
        if transition == Transition::EnteredIdle {
            self.inner.emit(EditorEvent::ErrorCleared).await;
        }
    }
}

impl Inner {
    fn cancel_reveal(&self) {
        if let Some(token) = self.lock_reveal_cancel().take() {
            token.cancel();
        }
    }

    fn cancel_dwell(&self) {
        if let Some(token) = self.lock_dwell_cancel().take() {
            token.cancel();
        }
    }

    async fn emit(&self, event: EditorEvent) {
        let _ = self.event_tx.send(event).await;
    }

    fn lock_machine(&self) -> std::sync::MutexGuard<'_, SessionMachine> {
        self.machine.lock().expect("session machine lock poisoned")
    }

    fn lock_reveal_cancel(&self) -> std::sync::MutexGuard<'_, Option<CancellationToken>> {
        self.reveal_cancel.lock().expect("reveal token lock poisoned")
    }

    fn lock_dwell_cancel(&self) -> std::sync::MutexGuard<'_, Option<CancellationToken>> {
        self.dwell_cancel.lock().expect("dwell token lock poisoned")
    }
}
