use alloc::string::String;

use crate::escape_buffer::EscapeError;

/// Errors produced by [`SlideParser`](crate::SlideParser).
///
/// The parser latches after reporting an error: it yields the error once from
/// its iterator and ignores any further input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParserError {
    /// The script field opened before both the slide number and the title
    /// were resolved. The schema requires the identifying fields to precede
    /// the content field, so a slide-start event cannot be attributed.
    #[error("script field opened before the slide number and title were resolved")]
    ScriptBeforeIdentity,

    /// A numeric field accumulated digits that do not fit the index type.
    #[error("invalid slide number: {text:?}")]
    InvalidNumber {
        /// The digit run as it appeared in the input.
        text: String,
    },

    /// A `\u` escape sequence inside a quoted string failed to decode.
    #[error("invalid escape sequence: {0}")]
    Escape(#[from] EscapeError),
}
