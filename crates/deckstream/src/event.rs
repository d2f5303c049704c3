//! Events emitted by the streaming slide parser.
//!
//! One slide produces the ordered subsequence `SlideStart`, zero or more
//! `SlideChunk`s, `SlideComplete`. Events for different slides never
//! interleave because the parser is a single forward scan over the input.

use alloc::string::String;

/// A semantic event produced the instant its triggering character is parsed.
///
/// # Examples
///
/// ```rust
/// use deckstream::{ParseEvent, ParserOptions, SlideParser};
///
/// let mut parser = SlideParser::new(ParserOptions::default());
/// parser.feed(r#"{"slides":[{"slideNumber":1,"title":"A","script":""}]}"#);
/// let events: Vec<_> = parser.by_ref().collect::<Result<_, _>>().unwrap();
/// assert_eq!(events.last(), Some(&ParseEvent::SlideComplete { index: 1 }));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseEvent {
    /// A slide's identifying fields are known and its script has opened.
    ///
    /// Emitted at most once per slide index within one parse, even if the
    /// upstream text repeats the slide's opening sequence.
    SlideStart {
        /// The slide's number as written in the input.
        index: u64,
        /// The slide's title, fully decoded.
        title: String,
    },
    /// One decoded fragment of the slide's script.
    ///
    /// The parser emits one fragment per script character; consumers must not
    /// assume a fixed fragment length.
    SlideChunk {
        /// The slide this fragment belongs to.
        index: u64,
        /// The decoded text (escape sequences already resolved).
        fragment: String,
    },
    /// The slide's script string closed.
    SlideComplete {
        /// The slide whose script is complete.
        index: u64,
    },
}

impl ParseEvent {
    /// The slide index this event is attributed to.
    #[must_use]
    pub fn index(&self) -> u64 {
        match self {
            Self::SlideStart { index, .. }
            | Self::SlideChunk { index, .. }
            | Self::SlideComplete { index } => *index,
        }
    }
}
