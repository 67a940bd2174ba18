use std::sync::mpsc;
use std::time::Duration;

use chat_store::ChatStore;
use coach_app::app::HostOps;
use coach_app::backend::{ApiReply, ApiRequest, BackendError, BackendErrorKind, CoachBackend};
use coach_app::backends::MockCoachBackend;
use coach_app::runtime::{RequestController, WidgetHost};

const COMPLETION_WAIT: Duration = Duration::from_secs(5);

struct PanickingBackend;

impl CoachBackend for PanickingBackend {
    fn execute(&self, _request: ApiRequest) -> Result<ApiReply, BackendError> {
        panic!("backend exploded");
    }
}

#[test]
fn every_started_request_reports_exactly_one_completion() {
    let (sender, receiver) = mpsc::channel();
    let controller = RequestController::new(std::sync::Arc::new(MockCoachBackend::default()), sender);

    let first = controller
        .start(ApiRequest::Chat {
            prompt: "oi".to_string(),
        })
        .expect("first request should start");
    let second = controller
        .start(ApiRequest::MatchJobs {
            cargo: "vaga".to_string(),
        })
        .expect("second request should start");
    assert_ne!(first, second);

    let mut completed = Vec::new();
    for _ in 0..2 {
        let event = receiver
            .recv_timeout(COMPLETION_WAIT)
            .expect("completion should arrive");
        assert!(event.result.is_ok());
        completed.push(event.request_id);
    }
    completed.sort_unstable();
    assert_eq!(completed, vec![first, second]);
}

#[test]
fn panicking_backend_still_delivers_a_terminal_event() {
    let (sender, receiver) = mpsc::channel();
    let controller = RequestController::new(std::sync::Arc::new(PanickingBackend), sender);

    let request_id = controller
        .start(ApiRequest::Chat {
            prompt: "oi".to_string(),
        })
        .expect("request should start");

    let event = receiver
        .recv_timeout(COMPLETION_WAIT)
        .expect("completion should arrive even after a panic");
    assert_eq!(event.request_id, request_id);
    let error = event.result.expect_err("panic must surface as failure");
    assert_eq!(error.kind, BackendErrorKind::Transport);
    assert!(error.message.contains("panicked"));
}

#[test]
fn widget_host_persists_through_the_store_and_tracks_render_requests() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let store = ChatStore::open(dir.path()).expect("store should open");
    let (sender, _receiver) = mpsc::channel();
    let controller = RequestController::new(std::sync::Arc::new(MockCoachBackend::default()), sender);
    let mut host = WidgetHost::new(controller, store.clone());

    host.persist_transcript("<div>oi</div>");
    assert_eq!(
        store.load_transcript().expect("load should succeed"),
        Some("<div>oi</div>".to_string())
    );

    host.persist_state(&chat_store::SessionState::studying("grafos", None));
    let state = store
        .load_state()
        .expect("load should succeed")
        .expect("state should exist");
    assert_eq!(state.study_subject.as_deref(), Some("grafos"));

    host.clear_persisted();
    assert!(store.load_transcript().expect("load").is_none());
    assert!(store.load_state().expect("load").is_none());

    assert!(!host.take_render_request());
    host.request_render();
    assert!(host.take_render_request());
    assert!(!host.take_render_request());
}
