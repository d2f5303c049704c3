//! Decoding of the upstream generation service's streaming envelope.
//!
//! The service pushes `data:` lines, each carrying a JSON envelope with a
//! content delta, and signals logical completion with a `[DONE]` sentinel
//! distinct from the end of the connection. Lines that fail to decode are
//! logged and skipped; a bad fragment must never abort the session.

use std::future::ready;

use futures::{Stream, StreamExt};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::SessionError;

/// Sentinel payload signaling logical completion of the generation.
pub const DONE_SENTINEL: &str = "[DONE]";

/// One decoded item of the upstream stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpstreamItem {
    /// A fragment of generated text, in production order.
    Delta(String),
    /// The generation finished; trailing fragments may be discarded.
    Done,
}

#[derive(Debug, Deserialize)]
struct DeltaEnvelope {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    delta: Delta,
}

#[derive(Debug, Deserialize)]
struct Delta {
    #[serde(default)]
    content: Option<String>,
}

/// Decodes one line of the upstream push stream.
///
/// Returns `None` for lines that carry no text: comments, keep-alive blanks,
/// envelopes without a content delta (role announcements), and malformed
/// payloads, which are logged and skipped.
#[must_use]
pub fn decode_data_line(line: &str) -> Option<UpstreamItem> {
    let line = line.trim();
    if line.is_empty() || line.starts_with(':') {
        return None;
    }
    let payload = line.strip_prefix("data:")?.trim_start();
    if payload == DONE_SENTINEL {
        return Some(UpstreamItem::Done);
    }
    match serde_json::from_str::<DeltaEnvelope>(payload) {
        Ok(envelope) => {
            let content = envelope
                .choices
                .into_iter()
                .next()
                .and_then(|choice| choice.delta.content);
            if content.is_none() {
                debug!("upstream envelope carried no content delta");
            }
            content.map(UpstreamItem::Delta)
        }
        Err(err) => {
            warn!(error = %err, "skipping malformed upstream fragment");
            None
        }
    }
}

/// Adapts a stream of raw upstream lines into decoded items, dropping
/// everything [`decode_data_line`] rejects.
pub fn decode_lines<S>(lines: S) -> impl Stream<Item = Result<UpstreamItem, SessionError>>
where
    S: Stream<Item = String>,
{
    lines.filter_map(|line| ready(decode_data_line(&line).map(Ok)))
}
