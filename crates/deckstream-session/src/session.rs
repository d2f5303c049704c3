//! The session drive loop.
//!
//! One call to [`run_session`] owns one complete parse session: it pulls
//! decoded fragments from the upstream stream, routes them through a fresh
//! [`PreambleFilter`] and [`SlideParser`], and pushes the resulting
//! [`SessionEvent`]s to the consumer. Each fragment is processed in a tight
//! synchronous loop; the task suspends only between fragments.
//!
//! The loop guarantees the downstream contract: `start` is the first event,
//! exactly one `finish` is the last on every path, and `error` (when an
//! unrecoverable failure occurs) immediately precedes `finish`.

use std::{future::Future, pin::pin};

use deckstream::{FilterOptions, ParserOptions, PreambleFilter, Routed, SlideParser};
use futures::{Stream, StreamExt};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::{
    error::SessionError,
    event::{NarrationStyle, SessionEvent},
    upstream::UpstreamItem,
};

/// Per-session configuration, passed explicitly to [`run_session`].
///
/// There is deliberately no ambient per-request state: everything a session
/// needs travels in this value, so concurrent sessions in one process cannot
/// observe each other.
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    /// Opaque correlation identifier echoed in `start` and `finish`.
    pub id: String,
    /// Render-style selector forwarded in `start`; prompt-side only.
    pub style: Option<NarrationStyle>,
    /// Lead-in markers for the preamble filter.
    pub filter: FilterOptions,
    /// Target-schema key names for the parser.
    pub parser: ParserOptions,
}

impl SessionOptions {
    /// Options with the given correlation identifier and stock filter and
    /// parser configuration.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }
}

/// Drives one parse session to completion.
///
/// Pulls from `upstream` until it ends, yields [`UpstreamItem::Done`], fails,
/// or `cancel` completes. Narrative text ahead of the structured value goes
/// to `narrative` (if provided); everything after the lead-in is parsed and
/// emitted on `events`.
///
/// Cancellation — `cancel` completing, or the consumer dropping the `events`
/// receiver — stops the pull loop immediately and suppresses all further data
/// events; the terminal `finish` is still sent best-effort so an attached
/// consumer can never wait forever. The upstream handle is released on every
/// exit path.
///
/// # Errors
///
/// Returns the upstream or parse failure that ended the session, after that
/// failure has been reported downstream as an `error` event followed by
/// `finish`. Cancellation is not an error.
pub async fn run_session<U, C>(
    options: SessionOptions,
    upstream: U,
    events: mpsc::Sender<SessionEvent>,
    narrative: Option<mpsc::Sender<String>>,
    cancel: C,
) -> Result<(), SessionError>
where
    U: Stream<Item = Result<UpstreamItem, SessionError>>,
    C: Future<Output = ()>,
{
    let SessionOptions {
        id,
        style,
        filter,
        parser,
    } = options;

    let mut filter = PreambleFilter::new(filter);
    let mut parser = SlideParser::new(parser);
    let mut upstream = pin!(upstream);
    let mut cancel = pin!(cancel);

    debug!(id = %id, "session started");
    if events
        .send(SessionEvent::Start {
            id: id.clone(),
            style,
        })
        .await
        .is_err()
    {
        debug!(id = %id, "consumer disconnected before start");
        return Err(SessionError::ConsumerGone);
    }

    let mut outcome: Result<(), SessionError> = Ok(());
    let mut cancelled = false;

    'drive: loop {
        let item = tokio::select! {
            biased;
            () = &mut cancel => {
                cancelled = true;
                break 'drive;
            }
            item = upstream.next() => item,
        };

        let fragment = match item {
            None | Some(Ok(UpstreamItem::Done)) => break 'drive,
            Some(Err(err)) => {
                outcome = Err(err);
                break 'drive;
            }
            Some(Ok(UpstreamItem::Delta(text))) => text,
        };

        let (narrative_text, structured) = match filter.feed(&fragment) {
            Routed::Narrative(text) => (Some(text), None),
            Routed::Gated {
                narrative,
                structured,
            } => {
                debug!(id = %id, "structured value detected");
                (Some(narrative), Some(structured))
            }
            Routed::Structured(text) => (None, Some(text)),
        };

        if let Some(text) = narrative_text.filter(|text| !text.is_empty()) {
            if let Some(sink) = narrative.as_ref() {
                // A lost narrative consumer does not affect parsing.
                let _ = sink.send(text).await;
            }
        }

        if let Some(chunk) = structured {
            parser.feed(&chunk);
            for event in parser.by_ref() {
                match event {
                    Ok(event) => {
                        if events.send(event.into()).await.is_err() {
                            cancelled = true;
                            break 'drive;
                        }
                    }
                    Err(err) => {
                        outcome = Err(SessionError::Parse(err));
                        break 'drive;
                    }
                }
            }
        }
    }

    if cancelled {
        debug!(id = %id, "session cancelled, discarding in-flight state");
    } else {
        if let Some(leftover) = filter.finish() {
            if let Some(sink) = narrative.as_ref() {
                let _ = sink.send(leftover).await;
            }
        }
        if let Err(err) = &outcome {
            warn!(id = %id, error = %err, "session failed");
            let _ = events
                .send(SessionEvent::Error {
                    message: err.to_string(),
                })
                .await;
        }
    }

    // Terminal marker on every path, best-effort if the consumer left.
    let _ = events.send(SessionEvent::Finish { id }).await;
    outcome
}
