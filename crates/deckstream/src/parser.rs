//! The streaming slide-record parser.
//!
//! [`SlideParser`] consumes the characters of the structured value one at a
//! time (post-filter) and emits [`ParseEvent`]s the instant each sub-value is
//! fully determined: a slide's identity when its script field opens, one
//! chunk per decoded script character, and a completion marker at the
//! script's closing quote.
//!
//! # Examples
//!
//! ```rust
//! use deckstream::{ParseEvent, ParserOptions, SlideParser};
//!
//! let mut parser = SlideParser::new(ParserOptions::default());
//! parser.feed(r#"{"slides":[{"slideNumber":1,"#);
//! parser.feed(r#""title":"Intro","script":"Hi"}]}"#);
//! for event in parser.finish() {
//!     println!("{:?}", event.unwrap());
//! }
//! ```

use alloc::{
    collections::{BTreeSet, VecDeque},
    format,
    string::String,
};

use crate::{
    error::ParserError, escape_buffer::UnicodeEscapeBuffer, event::ParseEvent,
    options::ParserOptions,
};

/// Which quoted field a text state is accumulating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TextKind {
    Title,
    Script,
}

/// Position within the target schema's grammar. Exactly one is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    /// Inside the document wrapper, before the slide list's `[`.
    AwaitingList,
    /// Between records of the list, or before the first / after the last.
    RecordList,
    /// Inside one record, between its fields.
    Record,
    /// Inside the numeric index literal.
    NumberField,
    /// Inside a quoted string value.
    TextField(TextKind),
    /// Saw the escape introducer; the next character is an escape code.
    TextEscape(TextKind),
    /// Inside the four hex digits of a `\u` escape.
    TextEscapeUnicode(TextKind),
    /// The list's closing `]` was seen; trailing text is ignored.
    End,
    /// A reported error latched the parser.
    Error,
}

/// The streaming slide parser.
///
/// Feed it text with [`feed`](Self::feed) and drain events through its
/// `Iterator` implementation between feeds. Event order depends only on the
/// character sequence, never on fragment boundaries.
///
/// A slide's `slideNumber` and `title` must precede its `script`; the parser
/// carries them through the record so script events can be attributed without
/// re-reading surrounding text. A `script` opener seen before both are known
/// is a data-shape violation: the parser yields
/// [`ParserError::ScriptBeforeIdentity`] once and ignores further input.
#[derive(Debug)]
pub struct SlideParser {
    state: ParseState,

    /// Recent structural characters (whitespace elided), kept only long
    /// enough to recognize a field marker; trimmed after every character.
    lookahead: String,
    lookahead_cap: usize,

    // Field markers derived from the configured key names.
    index_marker: String,
    title_marker: String,
    script_marker: String,

    /// Digit accumulator for the index literal.
    number_buffer: String,
    /// Decoded-character accumulator for the title.
    text_buffer: String,
    unicode_escape_buffer: UnicodeEscapeBuffer,

    // Per-record context, monotonically filled, reset at the record's `}`.
    current_index: Option<u64>,
    current_title: Option<String>,
    /// Index the open script field is attributed to.
    script_index: u64,

    /// Indices that already produced a `SlideStart` this parse.
    started: BTreeSet<u64>,

    events: VecDeque<ParseEvent>,
    error: Option<ParserError>,
}

impl Default for SlideParser {
    fn default() -> Self {
        Self::new(ParserOptions::default())
    }
}

impl Iterator for SlideParser {
    type Item = Result<ParseEvent, ParserError>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(event) = self.events.pop_front() {
            return Some(Ok(event));
        }
        self.error.take().map(Err)
    }
}

/// A `SlideParser` whose input has ended.
///
/// Returned by [`SlideParser::finish`]. An abrupt end mid-field is not an
/// error: a script that never closed simply produces no completion event.
#[derive(Debug)]
pub struct ClosedSlideParser {
    parser: SlideParser,
}

impl Iterator for ClosedSlideParser {
    type Item = Result<ParseEvent, ParserError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.parser.next()
    }
}

impl SlideParser {
    /// Creates a parser for the schema described by `options`.
    #[must_use]
    pub fn new(options: ParserOptions) -> Self {
        let index_marker = format!("\"{}\":", options.index_field);
        let title_marker = format!("\"{}\":\"", options.title_field);
        let script_marker = format!("\"{}\":\"", options.script_field);
        let lookahead_cap = index_marker
            .len()
            .max(title_marker.len())
            .max(script_marker.len());

        Self {
            state: ParseState::AwaitingList,
            lookahead: String::new(),
            lookahead_cap,
            index_marker,
            title_marker,
            script_marker,
            number_buffer: String::new(),
            text_buffer: String::new(),
            unicode_escape_buffer: UnicodeEscapeBuffer::new(),
            current_index: None,
            current_title: None,
            script_index: 0,
            started: BTreeSet::new(),
            events: VecDeque::new(),
            error: None,
        }
    }

    /// Feeds a fragment of the structured value.
    ///
    /// Every character is processed before this returns; emitted events queue
    /// up and are drained through the `Iterator` implementation.
    pub fn feed(&mut self, text: &str) {
        for c in text.chars() {
            if self.state == ParseState::Error {
                return;
            }
            if let Err(err) = self.step_char(c) {
                self.error = Some(err);
                self.state = ParseState::Error;
                return;
            }
        }
    }

    /// Marks the end of input and returns an iterator over pending events.
    #[must_use]
    pub fn finish(self) -> ClosedSlideParser {
        ClosedSlideParser { parser: self }
    }

    /// Whether the slide list's closing `]` has been seen.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.state == ParseState::End
    }

    fn step_char(&mut self, c: char) -> Result<(), ParserError> {
        // A completed number hands its delimiter back to the record state.
        let mut again = true;
        while again {
            again = self.step(c)?;
        }
        Ok(())
    }

    /// One transition of the state machine. Returns `true` if `c` must be
    /// reprocessed in the new state.
    fn step(&mut self, c: char) -> Result<bool, ParserError> {
        use ParseState::{
            AwaitingList, End, Error, NumberField, Record, RecordList, TextEscape,
            TextEscapeUnicode, TextField,
        };

        match self.state {
            AwaitingList => {
                // Skips the document wrapper (`{"slides":`) up to the list.
                if c == '[' {
                    self.state = RecordList;
                }
                Ok(false)
            }

            RecordList => {
                match c {
                    '{' => {
                        self.current_index = None;
                        self.current_title = None;
                        self.lookahead.clear();
                        self.state = Record;
                    }
                    ']' => self.state = End,
                    // Commas and whitespace between records.
                    _ => {}
                }
                Ok(false)
            }

            Record => {
                if c == '}' {
                    self.current_index = None;
                    self.current_title = None;
                    self.lookahead.clear();
                    self.state = RecordList;
                    return Ok(false);
                }
                if c.is_whitespace() {
                    return Ok(false);
                }
                self.push_lookahead(c);
                self.match_field_marker()?;
                Ok(false)
            }

            NumberField => {
                if c.is_ascii_digit() {
                    self.number_buffer.push(c);
                    return Ok(false);
                }
                if self.number_buffer.is_empty() {
                    // Whitespace (or stray quoting) before the digits.
                    return Ok(false);
                }
                let text = core::mem::take(&mut self.number_buffer);
                match text.parse::<u64>() {
                    Ok(index) => {
                        self.current_index = Some(index);
                        self.state = Record;
                        // The delimiter also belongs to the record state.
                        Ok(true)
                    }
                    Err(_) => Err(ParserError::InvalidNumber { text }),
                }
            }

            TextField(kind) => {
                match c {
                    '"' => self.close_text_field(kind),
                    '\\' => self.state = TextEscape(kind),
                    _ => self.append_text(kind, c),
                }
                Ok(false)
            }

            TextEscape(kind) => {
                let decoded = match c {
                    'b' => '\u{0008}',
                    'f' => '\u{000C}',
                    'n' => '\n',
                    'r' => '\r',
                    't' => '\t',
                    'u' => {
                        self.unicode_escape_buffer.reset();
                        self.state = TextEscapeUnicode(kind);
                        return Ok(false);
                    }
                    // `"`, `\`, `/`, and any non-standard escape: literal.
                    other => other,
                };
                self.append_text(kind, decoded);
                self.state = TextField(kind);
                Ok(false)
            }

            TextEscapeUnicode(kind) => {
                if let Some(decoded) = self.unicode_escape_buffer.feed(c)? {
                    self.append_text(kind, decoded);
                    self.state = TextField(kind);
                }
                Ok(false)
            }

            End | Error => Ok(false),
        }
    }

    fn push_lookahead(&mut self, c: char) {
        self.lookahead.push(c);
        while self.lookahead.len() > self.lookahead_cap {
            let first = self.lookahead.chars().next().map_or(0, char::len_utf8);
            self.lookahead.drain(..first);
        }
    }

    /// Checks whether the lookahead now ends in a field marker and enters the
    /// matching field state.
    fn match_field_marker(&mut self) -> Result<(), ParserError> {
        if self.lookahead.ends_with(self.index_marker.as_str()) {
            self.lookahead.clear();
            self.number_buffer.clear();
            self.state = ParseState::NumberField;
        } else if self.lookahead.ends_with(self.title_marker.as_str()) {
            self.lookahead.clear();
            self.text_buffer.clear();
            self.state = ParseState::TextField(TextKind::Title);
        } else if self.lookahead.ends_with(self.script_marker.as_str()) {
            self.lookahead.clear();
            self.open_script_field()?;
        }
        Ok(())
    }

    fn open_script_field(&mut self) -> Result<(), ParserError> {
        let (Some(index), Some(title)) = (self.current_index, self.current_title.as_ref()) else {
            return Err(ParserError::ScriptBeforeIdentity);
        };
        self.script_index = index;
        if self.started.insert(index) {
            self.events.push_back(ParseEvent::SlideStart {
                index,
                title: title.clone(),
            });
        }
        self.state = ParseState::TextField(TextKind::Script);
        Ok(())
    }

    fn append_text(&mut self, kind: TextKind, c: char) {
        match kind {
            TextKind::Title => self.text_buffer.push(c),
            TextKind::Script => self.events.push_back(ParseEvent::SlideChunk {
                index: self.script_index,
                fragment: c.into(),
            }),
        }
    }

    fn close_text_field(&mut self, kind: TextKind) {
        match kind {
            TextKind::Title => {
                self.current_title = Some(core::mem::take(&mut self.text_buffer));
            }
            TextKind::Script => {
                self.events.push_back(ParseEvent::SlideComplete {
                    index: self.script_index,
                });
            }
        }
        self.state = ParseState::Record;
    }
}
