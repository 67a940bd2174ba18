//! Career-coach chat widget runtime.
//!
//! ## Backend bootstrap
//!
//! `coach_app` selects its backend through `EVELYN_BACKEND`:
//!
//! - `EVELYN_BACKEND=http` (default) talks to a running coaching API
//! - `EVELYN_BACKEND=mock` answers deterministically for local tests
//!
//! HTTP transport settings come from `EVELYN_API_BASE_URL` (normalized to the
//! `/api` mount point) and `EVELYN_USER_ID` (default `default_user`).
//!
//! ## State ownership
//!
//! `App` owns the conversation state machine, the transcript log, and the
//! session-state record; every side effect (starting a request, persisting,
//! rendering) goes through the [`app::HostOps`] seam so transitions are unit
//! testable without a rendered UI. Request completions are delivered back to
//! the driver loop over a channel; `App` and the store are only ever touched
//! from that loop.

pub mod app;
pub mod backend;
pub mod backends;
pub mod bootstrap;
pub mod cli;
pub mod commands;
pub mod jobs;
pub mod runtime;
