use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread;

use chat_store::ChatStore;

use crate::app::{HostOps, RequestId};
use crate::backend::{ApiReply, ApiRequest, BackendError, CoachBackend};

/// Terminal outcome of one request, delivered to the driver loop.
#[derive(Debug)]
pub struct CompletionEvent {
    pub request_id: RequestId,
    pub result: Result<ApiReply, BackendError>,
}

/// Spawns one worker thread per request and reports completions over a
/// channel.
///
/// Requests are independent: nothing is shared between workers, overlapping
/// requests may complete in any order, and there is no cancellation. Every
/// worker sends exactly one terminal event, panics included, so the driver
/// can always release that request's placeholder.
pub struct RequestController {
    backend: Arc<dyn CoachBackend>,
    completions: Sender<CompletionEvent>,
    next_request_id: AtomicU64,
}

impl RequestController {
    pub fn new(backend: Arc<dyn CoachBackend>, completions: Sender<CompletionEvent>) -> Arc<Self> {
        Arc::new(Self {
            backend,
            completions,
            next_request_id: AtomicU64::new(1),
        })
    }

    pub fn start(&self, request: ApiRequest) -> Result<RequestId, String> {
        let request_id = self.next_request_id.fetch_add(1, Ordering::SeqCst);
        let backend = Arc::clone(&self.backend);
        let completions = self.completions.clone();

        thread::Builder::new()
            .name(format!("coach-request-{request_id}"))
            .spawn(move || {
                let outcome = catch_unwind(AssertUnwindSafe(|| backend.execute(request)));
                let result = match outcome {
                    Ok(result) => result,
                    Err(_) => Err(BackendError::transport("backend panicked")),
                };

                if completions
                    .send(CompletionEvent { request_id, result })
                    .is_err()
                {
                    tracing::debug!(request_id, "completion receiver dropped");
                }
            })
            .map_err(|error| format!("Failed to spawn request worker: {error}"))?;

        Ok(request_id)
    }
}

/// Host wiring for a live widget: requests go to the controller, persistence
/// goes to the store.
///
/// Persistence failures are logged and swallowed; a broken disk must not take
/// the conversation down with it.
pub struct WidgetHost {
    controller: Arc<RequestController>,
    store: ChatStore,
    needs_render: bool,
}

impl WidgetHost {
    pub fn new(controller: Arc<RequestController>, store: ChatStore) -> Self {
        Self {
            controller,
            store,
            needs_render: false,
        }
    }

    #[must_use]
    pub fn store(&self) -> &ChatStore {
        &self.store
    }

    /// Takes and clears the pending render request.
    pub fn take_render_request(&mut self) -> bool {
        std::mem::take(&mut self.needs_render)
    }
}

impl HostOps for WidgetHost {
    fn start_request(&mut self, request: ApiRequest) -> Result<RequestId, String> {
        self.controller.start(request)
    }

    fn persist_transcript(&mut self, markup: &str) {
        if let Err(error) = self.store.save_transcript(markup) {
            tracing::warn!(%error, "failed to persist transcript");
        }
    }

    fn persist_state(&mut self, state: &chat_store::SessionState) {
        if let Err(error) = self.store.save_state(state) {
            tracing::warn!(%error, "failed to persist session state");
        }
    }

    fn clear_persisted(&mut self) {
        if let Err(error) = self.store.clear_all() {
            tracing::warn!(%error, "failed to clear persisted records");
        }
    }

    fn request_render(&mut self) {
        self.needs_render = true;
    }
}
