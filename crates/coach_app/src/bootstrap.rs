use chat_store::{ChatStore, ChatStoreError};

use crate::app::{App, HostOps};

/// What the driver must do after initial load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapOutcome {
    /// A study flow was interrupted mid-session; the transcript is restored
    /// and the topic selector must be shown again.
    ResumedStudyFlow,
    /// A prior conversation exists; ask before rendering anything.
    PromptContinueOrFresh { transcript: String },
    /// Nothing persisted; the welcome message has been rendered.
    FreshWelcome,
}

/// Initial-load decision: resume a study flow, offer to continue a prior
/// conversation, or start fresh.
pub fn bootstrap(
    app: &mut App,
    store: &ChatStore,
    host: &mut dyn HostOps,
) -> Result<BootstrapOutcome, ChatStoreError> {
    let state = store.load_state()?.unwrap_or_default();

    if state.is_studying {
        if let Some(markup) = store.load_transcript()? {
            app.restore_transcript(&markup);
        }
        app.resume_study_flow(state);
        host.request_render();
        return Ok(BootstrapOutcome::ResumedStudyFlow);
    }

    if let Some(transcript) = store.load_transcript()?.filter(|markup| !markup.is_empty()) {
        return Ok(BootstrapOutcome::PromptContinueOrFresh { transcript });
    }

    app.show_welcome(host);
    host.request_render();
    Ok(BootstrapOutcome::FreshWelcome)
}
