use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::CoachApiConfig;
use crate::error::{parse_error_message, CoachApiError};
use crate::payload::{ChatRequest, JobAnalysisRequest, JobFilters, MatchRequest, PdfUpload};
use crate::response::{AnalysisResponse, ChatResponse, Job, JobsResponse, StudyResponse, UploadCvResponse};
use crate::url::{endpoint_url, Endpoint};

#[derive(Debug)]
pub struct CoachApiClient {
    http: Client,
    config: CoachApiConfig,
}

impl CoachApiClient {
    pub fn new(config: CoachApiConfig) -> Result<Self, CoachApiError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent.clone());
        }
        if !config.extra_headers.is_empty() {
            builder = builder.default_headers(build_headers(&config)?);
        }
        let http = builder.build().map_err(CoachApiError::from)?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &CoachApiConfig {
        &self.config
    }

    pub fn endpoint_url(&self, endpoint: Endpoint) -> String {
        endpoint_url(&self.config.base_url, endpoint)
    }

    /// Forwards a free-text prompt and returns the assistant's reply.
    pub async fn chat(&self, prompt: &str) -> Result<String, CoachApiError> {
        let request = ChatRequest {
            user_id: self.config.user_id.clone(),
            prompt: prompt.to_string(),
        };
        let response: ChatResponse = self.post_json(Endpoint::Chat, &request).await?;
        response
            .ia_response
            .ok_or_else(|| CoachApiError::missing_data(Endpoint::Chat.name(), response.error))
    }

    /// Requests a study plan for `subject` focused on `interests`, with an
    /// optional source PDF.
    pub async fn study_plan(
        &self,
        subject: &str,
        interests: &[String],
        pdf: Option<PdfUpload>,
    ) -> Result<String, CoachApiError> {
        let interests_json = serde_json::to_string(interests)?;
        let mut form = Form::new()
            .text("subject", subject.to_string())
            .text("interests", interests_json);
        if let Some(pdf) = pdf {
            let part = Part::bytes(pdf.bytes)
                .file_name(pdf.file_name)
                .mime_str("application/pdf")?;
            form = form.part("pdf", part);
        }

        let response: StudyResponse = self.post_multipart(Endpoint::Study, form, &[]).await?;
        if response.ok == Some(true) {
            if let Some(plan) = response.study_plan {
                return Ok(plan);
            }
        }
        Err(CoachApiError::missing_data(
            Endpoint::Study.name(),
            response.error,
        ))
    }

    /// Uploads a résumé PDF and returns the analysis summary.
    pub async fn upload_cv(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<String, CoachApiError> {
        let part = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str("application/pdf")?;
        let form = Form::new().part("cv_file", part);
        let user_id = self.config.user_id.clone();

        let response: UploadCvResponse = self
            .post_multipart(Endpoint::UploadCv, form, &[("user_id", user_id.as_str())])
            .await?;
        response
            .cv_analysis_summary
            .ok_or_else(|| CoachApiError::missing_data(Endpoint::UploadCv.name(), response.error))
    }

    /// Filter-based job search. An empty result list is a successful
    /// response, not an error.
    pub async fn find_jobs(&self, filters: &JobFilters) -> Result<Vec<Job>, CoachApiError> {
        let response: JobsResponse = self.post_json(Endpoint::FindJobs, filters).await?;
        jobs_or_error(Endpoint::FindJobs, response)
    }

    /// Profile-match job search against the uploaded résumé.
    pub async fn match_jobs(&self, cargo: &str) -> Result<Vec<Job>, CoachApiError> {
        let request = MatchRequest {
            cargo: cargo.to_string(),
            user_id: self.config.user_id.clone(),
        };
        let response: JobsResponse = self.post_json(Endpoint::MatchJobs, &request).await?;
        jobs_or_error(Endpoint::MatchJobs, response)
    }

    pub async fn job_fit(
        &self,
        job_title: &str,
        job_description: &str,
    ) -> Result<String, CoachApiError> {
        let request = self.analysis_request(job_title, job_description);
        let response: AnalysisResponse = self.post_json(Endpoint::JobFit, &request).await?;
        let (text, error) = response.fit_text();
        text.ok_or_else(|| CoachApiError::missing_data(Endpoint::JobFit.name(), error))
    }

    pub async fn adapt_cv(
        &self,
        job_title: &str,
        job_description: &str,
    ) -> Result<String, CoachApiError> {
        let request = self.analysis_request(job_title, job_description);
        let response: AnalysisResponse = self.post_json(Endpoint::AdaptCv, &request).await?;
        let (text, error) = response.adapted_text();
        text.ok_or_else(|| CoachApiError::missing_data(Endpoint::AdaptCv.name(), error))
    }

    pub async fn cover_letter(
        &self,
        job_title: &str,
        job_description: &str,
    ) -> Result<String, CoachApiError> {
        let request = self.analysis_request(job_title, job_description);
        let response: AnalysisResponse = self.post_json(Endpoint::CoverLetter, &request).await?;
        let (text, error) = response.cover_letter_text();
        text.ok_or_else(|| CoachApiError::missing_data(Endpoint::CoverLetter.name(), error))
    }

    fn analysis_request(&self, job_title: &str, job_description: &str) -> JobAnalysisRequest {
        JobAnalysisRequest {
            user_id: self.config.user_id.clone(),
            job_title: job_title.to_string(),
            job_description: job_description.to_string(),
            job_link: None,
        }
    }

    async fn post_json<B, R>(&self, endpoint: Endpoint, body: &B) -> Result<R, CoachApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        tracing::debug!(endpoint = endpoint.name(), "dispatching json request");
        let response = self
            .http
            .post(self.endpoint_url(endpoint))
            .json(body)
            .send()
            .await
            .map_err(CoachApiError::from)?;
        parse_response(endpoint, response).await
    }

    async fn post_multipart<R>(
        &self,
        endpoint: Endpoint,
        form: Form,
        query: &[(&str, &str)],
    ) -> Result<R, CoachApiError>
    where
        R: DeserializeOwned,
    {
        tracing::debug!(endpoint = endpoint.name(), "dispatching multipart request");
        let response = self
            .http
            .post(self.endpoint_url(endpoint))
            .query(query)
            .multipart(form)
            .send()
            .await
            .map_err(CoachApiError::from)?;
        parse_response(endpoint, response).await
    }
}

async fn parse_response<R>(endpoint: Endpoint, response: Response) -> Result<R, CoachApiError>
where
    R: DeserializeOwned,
{
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let message = parse_error_message(status, &body);
        tracing::warn!(endpoint = endpoint.name(), %status, "request failed");
        return Err(CoachApiError::Status(status, message));
    }

    response.json::<R>().await.map_err(CoachApiError::from)
}

fn jobs_or_error(endpoint: Endpoint, response: JobsResponse) -> Result<Vec<Job>, CoachApiError> {
    if response.ok == Some(true) {
        return Ok(response.jobs.unwrap_or_default());
    }
    Err(CoachApiError::missing_data(endpoint.name(), response.error))
}

fn build_headers(config: &CoachApiConfig) -> Result<HeaderMap, CoachApiError> {
    let mut headers = HeaderMap::new();
    for (key, value) in &config.extra_headers {
        headers.insert(
            HeaderName::from_bytes(key.as_bytes())
                .map_err(|_| CoachApiError::InvalidHeader(format!("invalid header key: {key}")))?,
            HeaderValue::from_str(value).map_err(|_| {
                CoachApiError::InvalidHeader(format!("invalid header value for {key}"))
            })?,
        );
    }
    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::{jobs_or_error, CoachApiClient};
    use crate::config::CoachApiConfig;
    use crate::error::CoachApiError;
    use crate::response::{Job, JobsResponse};
    use crate::url::Endpoint;

    fn job(title: &str) -> Job {
        Job {
            title: title.to_string(),
            body: "descricao".to_string(),
            href: "https://example.com/vaga".to_string(),
            local: None,
            modelo: None,
            tipo: None,
            analysis: None,
        }
    }

    #[test]
    fn jobs_or_error_returns_listings_on_ok() {
        let response = JobsResponse {
            ok: Some(true),
            jobs: Some(vec![job("Engenheiro de Dados")]),
            error: None,
        };

        let jobs = jobs_or_error(Endpoint::FindJobs, response).expect("ok response yields jobs");
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].title, "Engenheiro de Dados");
    }

    #[test]
    fn jobs_or_error_treats_missing_list_as_empty() {
        let response = JobsResponse {
            ok: Some(true),
            jobs: None,
            error: None,
        };

        let jobs = jobs_or_error(Endpoint::FindJobs, response).expect("ok response yields jobs");
        assert!(jobs.is_empty());
    }

    #[test]
    fn jobs_or_error_surfaces_server_rejection() {
        let response = JobsResponse {
            ok: Some(false),
            jobs: None,
            error: Some("⚠️ Faça o upload do seu currículo antes".to_string()),
        };

        let error = jobs_or_error(Endpoint::MatchJobs, response)
            .expect_err("rejected response must fail");
        assert!(matches!(
            error,
            CoachApiError::MissingData { endpoint: "match_jobs", .. }
        ));
        assert!(error.to_string().contains("Faça o upload"));
    }

    #[test]
    fn client_builds_with_default_config() {
        let client =
            CoachApiClient::new(CoachApiConfig::default()).expect("default config should build");
        assert_eq!(client.config().user_id, "default_user");
        assert_eq!(
            client.endpoint_url(Endpoint::Chat),
            "http://127.0.0.1:5000/api/chat"
        );
    }
}
