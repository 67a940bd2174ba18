use serde::Serialize;

/// Free-text prompt forwarded to the general-chat endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatRequest {
    pub user_id: String,
    pub prompt: String,
}

/// Job-search filters, serialized with the wire field names the search
/// endpoint expects.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct JobFilters {
    /// Role or area of interest.
    pub cargo: String,
    pub cidade: String,
    pub estado: String,
    /// Work model (remote, hybrid, on-site).
    pub modelo: String,
    /// Employment type.
    pub tipo: String,
}

/// Profile-match search parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchRequest {
    pub cargo: String,
    pub user_id: String,
}

/// Parameters shared by the per-job analysis endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobAnalysisRequest {
    pub user_id: String,
    pub job_title: String,
    pub job_description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_link: Option<String>,
}

/// PDF bytes attached to a multipart request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl PdfUpload {
    #[must_use]
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }
}
