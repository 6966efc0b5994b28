use std::time::Duration;

use crate::reveal::RevealOptions;

/// Tunables for one editor session. Defaults match the production values;
/// tests shrink the durations.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Token budget sent with every continuation request.
    pub max_tokens: u32,
    /// Minimum spacing between accepted submissions, measured from reveal
    /// completion.
    pub min_request_spacing: Duration,
    /// How long a failure banner stays up before clearing itself.
    pub failed_dwell: Duration,
    pub reveal: RevealOptions,
    /// Capacity of the editor event channel.
    pub event_buffer: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_tokens: 150,
            min_request_spacing: Duration::from_millis(1000),
            failed_dwell: Duration::from_millis(3000),
            reveal: RevealOptions::default(),
            event_buffer: 32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_protocol_constants() {
        let config = SessionConfig::default();
        assert_eq!(config.max_tokens, 150);
        assert_eq!(config.min_request_spacing, Duration::from_millis(1000));
        assert_eq!(config.failed_dwell, Duration::from_millis(3000));
        assert!(config.event_buffer > 0);
    }
}
