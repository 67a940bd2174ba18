use coach_api::{CoachApiClient, CoachApiConfig, CoachApiError};

use crate::backend::{ApiReply, ApiRequest, BackendError, CoachBackend};
use crate::jobs::JobActionKind;

/// Blocking adapter over the async transport client.
///
/// Each `execute` call drives exactly one request to completion on a private
/// current-thread runtime; workers calling in never share in-flight state.
pub struct HttpCoachBackend {
    client: CoachApiClient,
    runtime: tokio::runtime::Runtime,
}

impl HttpCoachBackend {
    pub fn new(config: CoachApiConfig) -> Result<Self, String> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|error| format!("Failed to build transport runtime: {error}"))?;
        let client = CoachApiClient::new(config).map_err(|error| error.to_string())?;
        Ok(Self { client, runtime })
    }
}

impl CoachBackend for HttpCoachBackend {
    fn execute(&self, request: ApiRequest) -> Result<ApiReply, BackendError> {
        self.runtime.block_on(async {
            match request {
                ApiRequest::Chat { prompt } => self
                    .client
                    .chat(&prompt)
                    .await
                    .map(ApiReply::ChatReply)
                    .map_err(backend_error),
                ApiRequest::StudyPlan {
                    subject,
                    interests,
                    pdf,
                } => self
                    .client
                    .study_plan(&subject, &interests, pdf)
                    .await
                    .map(ApiReply::StudyPlan)
                    .map_err(backend_error),
                ApiRequest::UploadCv { file_name, bytes } => self
                    .client
                    .upload_cv(&file_name, bytes)
                    .await
                    .map(ApiReply::CvSummary)
                    .map_err(backend_error),
                ApiRequest::FindJobs(filters) => self
                    .client
                    .find_jobs(&filters)
                    .await
                    .map(ApiReply::Jobs)
                    .map_err(backend_error),
                ApiRequest::MatchJobs { cargo } => self
                    .client
                    .match_jobs(&cargo)
                    .await
                    .map(ApiReply::Jobs)
                    .map_err(backend_error),
                ApiRequest::JobAnalysis {
                    kind,
                    job_title,
                    job_description,
                } => {
                    let text = match kind {
                        JobActionKind::Fit => {
                            self.client.job_fit(&job_title, &job_description).await
                        }
                        JobActionKind::Adapt => {
                            self.client.adapt_cv(&job_title, &job_description).await
                        }
                        JobActionKind::Cover => {
                            self.client.cover_letter(&job_title, &job_description).await
                        }
                    };
                    text.map(ApiReply::Analysis).map_err(backend_error)
                }
            }
        })
    }
}

fn backend_error(error: CoachApiError) -> BackendError {
    match error {
        CoachApiError::MissingData { message, .. } => BackendError::missing_data(message),
        other => BackendError::transport(other.to_string()),
    }
}
