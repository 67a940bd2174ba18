/// Default base URL for coaching API requests.
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:5000/api";

/// Coaching endpoints consumed by the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Chat,
    Study,
    UploadCv,
    FindJobs,
    MatchJobs,
    JobFit,
    AdaptCv,
    CoverLetter,
}

impl Endpoint {
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Chat => "/chat",
            Self::Study => "/study",
            Self::UploadCv => "/upload_cv",
            Self::FindJobs => "/find_jobs",
            Self::MatchJobs => "/match_jobs",
            Self::JobFit => "/job_fit",
            Self::AdaptCv => "/adapt_cv",
            Self::CoverLetter => "/generate_cover_letter",
        }
    }

    /// Short name used in error and log context.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Chat => "chat",
            Self::Study => "study",
            Self::UploadCv => "upload_cv",
            Self::FindJobs => "find_jobs",
            Self::MatchJobs => "match_jobs",
            Self::JobFit => "job_fit",
            Self::AdaptCv => "adapt_cv",
            Self::CoverLetter => "generate_cover_letter",
        }
    }
}

/// Normalize a base URL to the API mount point.
///
/// Normalization rules:
/// 1) blank input falls back to [`DEFAULT_API_BASE_URL`]
/// 2) trailing slashes are trimmed
/// 3) `/api` is appended unless already present
pub fn normalize_api_url(input: &str) -> String {
    let base = if input.trim().is_empty() {
        DEFAULT_API_BASE_URL
    } else {
        input.trim()
    };

    let trimmed = base.trim_end_matches('/');
    if trimmed.ends_with("/api") {
        return trimmed.to_string();
    }
    format!("{trimmed}/api")
}

/// Full request URL for one endpoint under a normalized base.
#[must_use]
pub fn endpoint_url(base_url: &str, endpoint: Endpoint) -> String {
    format!("{}{}", normalize_api_url(base_url), endpoint.path())
}
