use coach_api::{JobFilters, PdfUpload};

use crate::jobs::JobActionKind;

/// One request the flow controller can issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiRequest {
    Chat {
        prompt: String,
    },
    StudyPlan {
        subject: String,
        interests: Vec<String>,
        pdf: Option<PdfUpload>,
    },
    UploadCv {
        file_name: String,
        bytes: Vec<u8>,
    },
    FindJobs(JobFilters),
    MatchJobs {
        cargo: String,
    },
    JobAnalysis {
        kind: JobActionKind,
        job_title: String,
        job_description: String,
    },
}

/// Successful payload of one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiReply {
    ChatReply(String),
    StudyPlan(String),
    CvSummary(String),
    Jobs(Vec<coach_api::Job>),
    Analysis(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendErrorKind {
    /// Network unreachable or non-success status.
    Transport,
    /// Response parsed but lacked the expected field.
    MissingData,
}

/// Terminal failure of one request; never retried, only displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendError {
    pub kind: BackendErrorKind,
    pub message: String,
}

impl BackendError {
    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            kind: BackendErrorKind::Transport,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn missing_data(message: impl Into<String>) -> Self {
        Self {
            kind: BackendErrorKind::MissingData,
            message: message.into(),
        }
    }
}

/// Backend interface for executing one request.
///
/// `execute` is called from a worker thread and blocks until the single
/// attempt resolves; implementations must not retry.
pub trait CoachBackend: Send + Sync + 'static {
    fn execute(&self, request: ApiRequest) -> Result<ApiReply, BackendError>;
}
