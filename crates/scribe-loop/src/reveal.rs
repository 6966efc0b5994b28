use std::time::Duration;

use rand::Rng;
use tokio_util::sync::CancellationToken;

use scribe_core::DocumentAdapter;

/// Characters that suppress the lead-in space when the continuation starts
/// with one of them.
const LEADING_PUNCTUATION: &[char] = &['.', ',', '!', '?', ';', ':'];

#[derive(Debug, Clone)]
pub struct RevealOptions {
    /// Nominal pause between two inserted characters.
    pub base_delay: Duration,
    /// Uniform jitter applied on top of `base_delay` in both directions.
    pub jitter: Duration,
}

impl Default for RevealOptions {
    fn default() -> Self {
        Self {
            base_delay: Duration::from_millis(30),
            jitter: Duration::from_millis(5),
        }
    }
}

impl RevealOptions {
    /// Zero-delay options for tests.
    pub fn immediate() -> Self {
        Self {
            base_delay: Duration::ZERO,
            jitter: Duration::ZERO,
        }
    }
}

/// How a reveal run ended. Cancellation is a normal outcome, not an error;
/// `chars` counts the characters actually inserted, lead-in space included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealOutcome {
    Completed { chars: usize },
    Cancelled { chars: usize },
}

fn needs_leading_space(text: &str) -> bool {
    match text.trim_start().chars().next() {
        Some(first) => !LEADING_PUNCTUATION.contains(&first),
        None => false,
    }
}

fn sample_delay(options: &RevealOptions) -> Duration {
    let jitter_ms = options.jitter.as_millis() as i64;
    if jitter_ms == 0 {
        return options.base_delay;
    }
    let base_ms = options.base_delay.as_millis() as i64;
    let offset = rand::thread_rng().gen_range(-jitter_ms..=jitter_ms);
    Duration::from_millis((base_ms + offset).max(0) as u64)
}

/// Insert `text` into the document one character at a time.
///
/// A space is prepended unless the continuation opens with terminal
/// punctuation, so `"world"` after `"Hello"` reads `"Hello world"` while
/// `"!"` reads `"Hello!"`. The cancellation token is checked before every
/// step; an interrupted run stops within one step delay and leaves the
/// characters inserted so far untouched. The cursor moves to the document
/// end on normal completion only.
pub async fn reveal_text(
    document: &dyn DocumentAdapter,
    text: &str,
    cancel: &CancellationToken,
    options: &RevealOptions,
) -> RevealOutcome {
    let effective = if needs_leading_space(text) {
        format!(" {text}")
    } else {
        text.to_string()
    };

    let total = effective.chars().count();
    let mut inserted = 0usize;
    let mut buf = [0u8; 4];

    for (index, ch) in effective.chars().enumerate() {
        if cancel.is_cancelled() {
            log::debug!("reveal interrupted after {inserted} of {total} characters");
            return RevealOutcome::Cancelled { chars: inserted };
        }
        document.append_text(ch.encode_utf8(&mut buf));
        inserted += 1;
        if index + 1 < total {
            tokio::time::sleep(sample_delay(options)).await;
        }
    }

    document.move_cursor_to_end();
    RevealOutcome::Completed { chars: inserted }
}
