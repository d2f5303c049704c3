//! Server-sent-events framing for the downstream push channel.
//!
//! Each event becomes one `data:` line holding the JSON-encoded payload,
//! separated from the next event by a blank line, the standard
//! `text/event-stream` framing that existing consumers depend on byte for
//! byte.

use crate::event::SessionEvent;

/// Encodes one event as an SSE frame.
///
/// # Errors
///
/// Returns the underlying serialization error if the payload cannot be
/// encoded (which cannot happen for the event types defined here, but the
/// signature keeps the failure visible rather than panicking).
pub fn encode_frame(event: &SessionEvent) -> Result<String, serde_json::Error> {
    let payload = serde_json::to_string(event)?;
    Ok(format!("data: {payload}\n\n"))
}
