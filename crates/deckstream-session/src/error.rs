use deckstream::ParserError;

/// Errors that terminate a session.
///
/// Only unrecoverable conditions live here; malformed upstream fragments are
/// absorbed at the decoding layer and never surface to the consumer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// The upstream stream failed (connection refused, non-success status,
    /// read failure). Fatal: surfaced as one `error` event, then `finish`.
    #[error("upstream transport failed: {0}")]
    Upstream(String),

    /// The structured value violated the expected shape.
    #[error("structured value violated the expected shape: {0}")]
    Parse(#[from] ParserError),

    /// The event consumer disconnected before the session could start.
    #[error("consumer disconnected")]
    ConsumerGone,
}
