//! Inline state-block parser
//!
//! Model replies carry a machine-readable payload after the user-facing
//! prose: `<prose>\n<STATE_JSON>{...}</STATE_JSON>`. This module splits the
//! two apart. The backend is an untrusted text generator, so every malformed
//! shape degrades to "conversation only" rather than erroring out.

use serde_json::Value;
use tracing::debug;

/// Opening marker of the embedded state payload
pub const STATE_OPEN: &str = "<STATE_JSON>";

/// Closing marker of the embedded state payload
pub const STATE_CLOSE: &str = "</STATE_JSON>";

/// Split a raw model reply into user-facing prose and an optional payload
///
/// Matches the *last* occurrence of each marker so the token text can appear
/// spuriously earlier in the prose (the model sometimes echoes it). Returns
/// prose only when either marker is missing, the close precedes the open, or
/// the payload is not valid JSON.
pub fn split_reply(raw: &str) -> (String, Option<Value>) {
    debug!(raw_len = raw.len(), "split_reply: called");
    if raw.is_empty() {
        return (String::new(), None);
    }

    let open = raw.rfind(STATE_OPEN);
    let close = raw.rfind(STATE_CLOSE);

    let (start, end) = match (open, close) {
        (Some(s), Some(e)) if s < e => (s, e),
        _ => {
            debug!("split_reply: markers missing or out of order");
            return (raw.trim().to_string(), None);
        }
    };

    let prose = raw[..start].trim().to_string();
    let blob = raw[start + STATE_OPEN.len()..end].trim();

    match serde_json::from_str::<Value>(blob) {
        Ok(payload) => {
            debug!("split_reply: payload recovered");
            (prose, Some(payload))
        }
        Err(e) => {
            // Malformed payload must never abort the turn
            debug!(error = %e, "split_reply: payload unparsable, dropping");
            (prose, None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_reply_round_trip() {
        let raw = r#"Hello<STATE_JSON>{"objective":"x"}</STATE_JSON>"#;
        let (prose, payload) = split_reply(raw);
        assert_eq!(prose, "Hello");
        assert_eq!(payload.unwrap()["objective"], "x");
    }

    #[test]
    fn test_split_reply_no_markers() {
        let (prose, payload) = split_reply("  Just a question for you.  ");
        assert_eq!(prose, "Just a question for you.");
        assert!(payload.is_none());
    }

    #[test]
    fn test_split_reply_only_open_marker() {
        let (prose, payload) = split_reply("Text <STATE_JSON>{\"objective\":\"x\"}");
        assert_eq!(prose, "Text <STATE_JSON>{\"objective\":\"x\"}");
        assert!(payload.is_none());
    }

    #[test]
    fn test_split_reply_close_before_open() {
        let raw = "</STATE_JSON> some text <STATE_JSON>";
        let (prose, payload) = split_reply(raw);
        assert_eq!(prose, raw.trim());
        assert!(payload.is_none());
    }

    #[test]
    fn test_split_reply_malformed_json_returns_prose_only() {
        let raw = "Hello<STATE_JSON>{not json</STATE_JSON>";
        let (prose, payload) = split_reply(raw);
        assert_eq!(prose, "Hello");
        assert!(payload.is_none());
    }

    #[test]
    fn test_split_reply_uses_last_markers() {
        // Marker text echoed in the prose must not confuse the split
        let raw = "The block looks like <STATE_JSON>...</STATE_JSON>\n\nReal answer.<STATE_JSON>{\"scope\":\"smb\"}</STATE_JSON>";
        let (prose, payload) = split_reply(raw);
        assert!(prose.ends_with("Real answer."));
        assert_eq!(payload.unwrap()["scope"], "smb");
    }

    #[test]
    fn test_split_reply_empty_input() {
        let (prose, payload) = split_reply("");
        assert_eq!(prose, "");
        assert!(payload.is_none());
    }

    #[test]
    fn test_split_reply_payload_whitespace_trimmed() {
        let raw = "Hi\n<STATE_JSON>\n  {\"advantage\":\"speed\"}\n</STATE_JSON>";
        let (prose, payload) = split_reply(raw);
        assert_eq!(prose, "Hi");
        assert_eq!(payload.unwrap()["advantage"], "speed");
    }
}
