use coach_api::Job;

use crate::backend::{ApiReply, ApiRequest, BackendError, CoachBackend};
use crate::jobs::JobActionKind;

/// Deterministic backend for local runs and tests.
#[derive(Debug, Clone)]
pub struct MockCoachBackend {
    jobs: Vec<Job>,
}

impl Default for MockCoachBackend {
    fn default() -> Self {
        Self {
            jobs: vec![
                Job {
                    title: "Engenheiro de Dados Pleno".to_string(),
                    body: "Construção de pipelines em nuvem, modelagem de dados e \
                           orquestração de cargas diárias para o time de analytics."
                        .to_string(),
                    href: "https://vagas.example.com/engenheiro-de-dados".to_string(),
                    local: Some("Recife".to_string()),
                    modelo: Some("remoto".to_string()),
                    tipo: Some("CLT".to_string()),
                    analysis: None,
                },
                Job {
                    title: "Analista de BI Júnior".to_string(),
                    body: "Dashboards, indicadores e apoio à área comercial.".to_string(),
                    href: "https://vagas.example.com/analista-bi".to_string(),
                    local: Some("São Paulo".to_string()),
                    modelo: Some("híbrido".to_string()),
                    tipo: None,
                    analysis: None,
                },
            ],
        }
    }
}

impl MockCoachBackend {
    #[must_use]
    pub fn with_jobs(jobs: Vec<Job>) -> Self {
        Self { jobs }
    }
}

impl CoachBackend for MockCoachBackend {
    fn execute(&self, request: ApiRequest) -> Result<ApiReply, BackendError> {
        match request {
            ApiRequest::Chat { prompt } => Ok(ApiReply::ChatReply(format!(
                "Resposta simulada para: {prompt}"
            ))),
            ApiRequest::StudyPlan {
                subject, interests, ..
            } => Ok(ApiReply::StudyPlan(format!(
                "**Semana 1** — fundamentos de {subject}.\n**Semana 2** — prática guiada com foco em {}.",
                interests.join(", ")
            ))),
            ApiRequest::UploadCv { file_name, .. } => Ok(ApiReply::CvSummary(format!(
                "Currículo {file_name} analisado: perfil com boa base técnica e espaço \
                 para destacar resultados quantificados."
            ))),
            ApiRequest::FindJobs(_) | ApiRequest::MatchJobs { .. } => {
                Ok(ApiReply::Jobs(self.jobs.clone()))
            }
            ApiRequest::JobAnalysis { kind, job_title, .. } => {
                let text = match kind {
                    JobActionKind::Fit => format!(
                        "Compatibilidade alta com a vaga {job_title}: os requisitos centrais \
                         aparecem no seu histórico."
                    ),
                    JobActionKind::Adapt => format!(
                        "RESUMO PROFISSIONAL\nProfissional alinhado à vaga {job_title}.\n\nEXPERIÊNCIA\n- Projetos relevantes em destaque."
                    ),
                    JobActionKind::Cover => format!(
                        "Prezada equipe,\n\nTenho grande interesse na vaga {job_title} e acredito \
                         que minha experiência contribui diretamente para o time.\n\nAtenciosamente."
                    ),
                };
                Ok(ApiReply::Analysis(text))
            }
        }
    }
}
