use serde::Deserialize;

/// One job listing from a search response.
///
/// Only `title`, `body`, and `href` are guaranteed; the rest depend on the
/// search backend that produced the listing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Job {
    pub title: String,
    pub body: String,
    pub href: String,
    #[serde(default)]
    pub local: Option<String>,
    #[serde(default)]
    pub modelo: Option<String>,
    #[serde(default)]
    pub tipo: Option<String>,
    #[serde(default)]
    pub analysis: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatResponse {
    pub ia_response: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StudyResponse {
    pub ok: Option<bool>,
    pub study_plan: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UploadCvResponse {
    pub cv_analysis_summary: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct JobsResponse {
    pub ok: Option<bool>,
    pub jobs: Option<Vec<Job>>,
    pub error: Option<String>,
}

/// Analysis endpoints answer under endpoint-specific field names, with a
/// couple of legacy spellings still in circulation.
#[derive(Debug, Deserialize)]
pub(crate) struct AnalysisResponse {
    pub analysis: Option<String>,
    pub fit_analysis: Option<String>,
    pub adapted_cv: Option<String>,
    pub cover_letter: Option<String>,
    pub generated_cover_letter: Option<String>,
    pub error: Option<String>,
}

impl AnalysisResponse {
    pub(crate) fn fit_text(self) -> (Option<String>, Option<String>) {
        (self.fit_analysis.or(self.analysis), self.error)
    }

    pub(crate) fn adapted_text(self) -> (Option<String>, Option<String>) {
        (self.adapted_cv, self.error)
    }

    pub(crate) fn cover_letter_text(self) -> (Option<String>, Option<String>) {
        (self.generated_cover_letter.or(self.cover_letter), self.error)
    }
}
