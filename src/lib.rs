//! Deterministic transcript surface for chat widgets.
//!
//! This crate owns message rendering only: the restricted markdown subset,
//! escaped-by-default markup construction, and the transcript log with its
//! ephemeral loading-placeholder lifecycle. It contains no transport code and
//! no persistence code; callers serialize the log through
//! [`TranscriptLog::serialized`] and store the result themselves.
//!
//! Rendering contract:
//! - plain content is HTML-escaped before markdown conversion;
//! - `preformatted` content is trusted verbatim and must only ever be markup
//!   the caller controls;
//! - loading placeholders never appear in serialized output, so a restored
//!   transcript cannot resurrect a stuck spinner.

pub mod log;
pub mod markup;
pub mod message;

pub use log::{PlaceholderHandle, TranscriptLog};
pub use markup::{escape_attr, escape_text, markdown_to_markup, LOADING_SPINNER_MARKUP};
pub use message::{Message, Sender};
