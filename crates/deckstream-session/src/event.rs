//! The downstream event contract.
//!
//! Events are serialized with an embedded `type` discriminator so one
//! `data:` line carries both the kind and the payload.

use deckstream::ParseEvent;
use serde::{Deserialize, Serialize};

/// Render-style selector carried in the `start` event.
///
/// Influences only the upstream prompt, never the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NarrationStyle {
    Concise,
    Explanatory,
    Formal,
    Storytelling,
}

impl NarrationStyle {
    /// The wire name of the style.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Concise => "concise",
            Self::Explanatory => "explanatory",
            Self::Formal => "formal",
            Self::Storytelling => "storytelling",
        }
    }
}

/// One event of a session's ordered output stream.
///
/// For a given slide index the subsequence is always `slideStart`,
/// `slideChunk`*, `slideComplete`. `finish` is terminal and appears exactly
/// once per session; `error` may precede it but never follows it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SessionEvent {
    /// Session begins. `id` is an opaque correlation identifier echoed in
    /// `finish`.
    Start {
        id: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        style: Option<NarrationStyle>,
    },
    /// A slide's identity is known and its script is streaming.
    SlideStart { index: u64, title: String },
    /// One fragment of a slide's script. Produced per character by the
    /// parser, but consumers must accept fragments of any length.
    SlideChunk { index: u64, fragment: String },
    /// A slide's script is complete.
    SlideComplete { index: u64 },
    /// An unrecoverable failure; `finish` still follows.
    Error { message: String },
    /// Terminal marker, always the last event of a session.
    Finish { id: String },
}

impl From<ParseEvent> for SessionEvent {
    fn from(event: ParseEvent) -> Self {
        match event {
            ParseEvent::SlideStart { index, title } => Self::SlideStart { index, title },
            ParseEvent::SlideChunk { index, fragment } => Self::SlideChunk { index, fragment },
            ParseEvent::SlideComplete { index } => Self::SlideComplete { index },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{NarrationStyle, SessionEvent};

    #[test]
    fn discriminators_are_camel_case() {
        let event = SessionEvent::SlideStart {
            index: 1,
            title: "Intro".to_string(),
        };
        assert_eq!(
            serde_json::to_string(&event).unwrap(),
            r#"{"type":"slideStart","index":1,"title":"Intro"}"#
        );
    }

    #[test]
    fn start_omits_absent_style() {
        let event = SessionEvent::Start {
            id: "abc".to_string(),
            style: None,
        };
        assert_eq!(
            serde_json::to_string(&event).unwrap(),
            r#"{"type":"start","id":"abc"}"#
        );
    }

    #[test]
    fn style_serializes_lowercase() {
        let event = SessionEvent::Start {
            id: "abc".to_string(),
            style: Some(NarrationStyle::Storytelling),
        };
        assert_eq!(
            serde_json::to_string(&event).unwrap(),
            r#"{"type":"start","id":"abc","style":"storytelling"}"#
        );
    }

    #[test]
    fn parse_events_map_onto_wire_events() {
        let event: SessionEvent = deckstream::ParseEvent::SlideChunk {
            index: 2,
            fragment: "H".to_string(),
        }
        .into();
        assert_eq!(
            event,
            SessionEvent::SlideChunk {
                index: 2,
                fragment: "H".to_string()
            }
        );
    }
}
