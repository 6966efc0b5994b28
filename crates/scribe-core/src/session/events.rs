use serde::{Deserialize, Serialize};

/// Notifications the orchestration layer emits for UI consumers. Per-character
/// document mutations are observed through the document adapter's change
/// callback instead; these events mark the coarse protocol milestones.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EditorEvent {
    /// A submission passed the guard and the remote call was started.
    RequestStarted,

    /// A continuation arrived and the animated insertion began.
    RevealStarted,

    /// The reveal ran to completion; `chars` counts the inserted characters
    /// including the lead-in space when one was added.
    RevealFinished { chars: usize },

    /// The remote call failed; `reason` is displayed verbatim.
    RequestFailed { reason: String },

    /// The failure banner was cleared (dwell timeout or explicit reset).
    ErrorCleared,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_serialize_with_snake_case_tags() {
        let event = EditorEvent::RequestFailed {
            reason: "quota".to_string(),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"type":"request_failed","reason":"quota"}"#);

        let round_trip: EditorEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(round_trip, event);
    }

    #[test]
    fn reveal_finished_carries_char_count() {
        let json = serde_json::to_string(&EditorEvent::RevealFinished { chars: 12 }).unwrap();
        assert_eq!(json, r#"{"type":"reveal_finished","chars":12}"#);
    }
}
