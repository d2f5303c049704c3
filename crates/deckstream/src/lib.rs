//! Incremental extraction of slide records from streamed model output.
//!
//! A language model asked to produce a slide deck eventually emits one JSON
//! object of a fixed shape (`{"slides": [{"slideNumber": …, "title": …,
//! "script": …}, …]}`), usually preceded by narrative text and a code fence.
//! This crate turns that growing text stream into semantic events the moment
//! each sub-value is known, without waiting for the document to close:
//!
//! * [`PreambleFilter`] watches the stream prefix and decides where narrative
//!   text ends and the structured value begins.
//! * [`SlideParser`] consumes the gated characters one at a time and emits
//!   [`ParseEvent`]s: a slide's identity as soon as its script opens, each
//!   script character as it arrives, and a completion marker at the closing
//!   quote.
//!
//! The parser is synchronous and owns no I/O; a driver loop feeds it text
//! fragments of arbitrary size and drains events between fragments. The event
//! sequence is identical regardless of how the input is fragmented.
//!
//! # Examples
//!
//! ```rust
//! use deckstream::{ParseEvent, ParserOptions, SlideParser};
//!
//! let mut parser = SlideParser::new(ParserOptions::default());
//! parser.feed(r#"{"slides":[{"slideNumber":1,"title":"Intro","script":"Hi"}]}"#);
//! let events: Vec<_> = parser.by_ref().collect::<Result<_, _>>().unwrap();
//! assert_eq!(
//!     events[0],
//!     ParseEvent::SlideStart {
//!         index: 1,
//!         title: "Intro".to_string()
//!     }
//! );
//! ```
#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod error;
mod escape_buffer;
mod event;
mod filter;
mod options;
mod parser;

#[cfg(test)]
mod tests;

pub use error::ParserError;
pub use escape_buffer::EscapeError;
pub use event::ParseEvent;
pub use filter::{PreambleFilter, Routed};
pub use options::{FilterOptions, ParserOptions};
pub use parser::{ClosedSlideParser, SlideParser};
