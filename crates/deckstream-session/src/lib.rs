//! Session plumbing around the [`deckstream`] core.
//!
//! One session binds one upstream text-generation stream to one downstream
//! event consumer:
//!
//! * [`upstream`] decodes the generation service's streaming envelope
//!   (`data:` lines carrying content deltas, terminated by a `[DONE]`
//!   sentinel) into plain text fragments, skipping malformed payloads.
//! * [`run_session`] drives the preamble filter and slide parser over those
//!   fragments and pushes [`SessionEvent`]s to the consumer, guaranteeing a
//!   single terminal `finish` event on every path — normal completion,
//!   upstream failure, data-shape violation, or cancellation.
//! * [`sse`] frames each event for delivery as a server-sent event
//!   (`data: <json>` followed by a blank line).
//!
//! Every session owns a fresh filter, parser, and duplicate-suppression memo;
//! nothing is shared across sessions or requests.

mod error;
mod event;
mod session;
pub mod sse;
pub mod upstream;

pub use error::SessionError;
pub use event::{NarrationStyle, SessionEvent};
pub use session::{SessionOptions, run_session};
