use chat_store::SessionState;
use coach_app::app::{HostOps, RequestId};
use coach_app::backend::ApiRequest;

/// Recording host: requests get sequential ids, side effects are captured.
#[derive(Default)]
pub struct HostSpy {
    pub started: Vec<ApiRequest>,
    pub persisted_transcripts: Vec<String>,
    pub persisted_states: Vec<SessionState>,
    pub clear_calls: usize,
    pub render_requests: usize,
    pub fail_start_with: Option<String>,
    last_request_id: RequestId,
}

impl HostSpy {
    pub fn failing_to_start(error: &str) -> Self {
        Self {
            fail_start_with: Some(error.to_string()),
            ..Self::default()
        }
    }

    /// Id handed out for the most recent started request.
    pub fn last_request_id(&self) -> RequestId {
        self.last_request_id
    }
}

impl HostOps for HostSpy {
    fn start_request(&mut self, request: ApiRequest) -> Result<RequestId, String> {
        if let Some(error) = &self.fail_start_with {
            return Err(error.clone());
        }

        self.started.push(request);
        self.last_request_id += 1;
        Ok(self.last_request_id)
    }

    fn persist_transcript(&mut self, markup: &str) {
        self.persisted_transcripts.push(markup.to_string());
    }

    fn persist_state(&mut self, state: &SessionState) {
        self.persisted_states.push(state.clone());
    }

    fn clear_persisted(&mut self) {
        self.clear_calls += 1;
    }

    fn request_render(&mut self) {
        self.render_requests += 1;
    }
}
