//! File-backed persistence for the chat widget.
//!
//! Two layers: [`KvStore`] is a synchronous key-value string store with
//! local-storage semantics (writes are immediately visible to subsequent
//! reads, one logical namespace per store root), and [`ChatStore`] maps the
//! widget's two logical records onto it — the transcript markup and the
//! versioned session-state record.

mod error;
mod kv;
mod paths;
mod records;
mod schema;

pub use error::ChatStoreError;
pub use kv::KvStore;
pub use paths::{sanitize_key, store_root, STORE_DIR};
pub use records::{ChatStore, STATE_KEY, TRANSCRIPT_KEY};
pub use schema::{SessionState, StateRecord, StudyAttachment};
