use std::collections::HashMap;

use chat_store::{SessionState, StudyAttachment};
use chat_surface::{escape_text, markdown_to_markup, Message, PlaceholderHandle, Sender, TranscriptLog};
use coach_api::{JobFilters, PdfUpload};

use crate::backend::{ApiReply, ApiRequest, BackendError, BackendErrorKind};
use crate::commands::{study_intent, UiEvent};
use crate::jobs::{render_job_card, JobActionKind, JobContextRegistry};

pub type RequestId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Idle,
    AwaitingTopicSelection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PendingKind {
    Chat,
    Study,
    UploadCv,
    JobSearch,
    JobAction(JobActionKind),
}

#[derive(Debug, Clone, Copy)]
struct PendingRequest {
    kind: PendingKind,
    placeholder: PlaceholderHandle,
}

/// Side effects the state machine may request from its host.
pub trait HostOps {
    fn start_request(&mut self, request: ApiRequest) -> Result<RequestId, String>;
    fn persist_transcript(&mut self, markup: &str);
    fn persist_state(&mut self, state: &SessionState);
    fn clear_persisted(&mut self);
    fn request_render(&mut self);
}

pub const WELCOME_MARKUP: &str = "Olá! Eu sou a <strong>Evelyn PRO</strong>, sua agente de \
    carreira e estudos.<br><br>O que posso fazer por você?<ul>\
    <li>Analisar seu currículo (📄 Enviar Currículo)</li>\
    <li>Buscar vagas compatíveis com seu perfil</li>\
    <li>Adaptar seu currículo para uma vaga específica</li>\
    <li>Gerar cartas de apresentação</li>\
    <li>Criar um plano de estudos personalizado (📘 Enviar PDF ou digite o tema)</li></ul>";

pub const NO_JOBS_MESSAGE: &str = "😕 Nenhuma vaga encontrada com esses critérios.";
pub const INVALID_REPLY_MESSAGE: &str = "❌ Erro: Resposta inválida da API.";

const STUDY_PDF_SUBJECT: &str = "Conteúdo do PDF";
const DEFAULT_MATCH_ROLE: &str = "vaga";

/// Conversation state machine.
///
/// Owns the session state, the transcript log, and the job-context registry;
/// everything else happens through [`HostOps`].
#[derive(Debug, Default)]
pub struct App {
    mode: Mode,
    session: SessionState,
    log: TranscriptLog,
    jobs: JobContextRegistry,
    pending: HashMap<RequestId, PendingRequest>,
}

impl Default for Mode {
    fn default() -> Self {
        Self::Idle
    }
}

impl App {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[must_use]
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    #[must_use]
    pub fn transcript(&self) -> &TranscriptLog {
        &self.log
    }

    #[must_use]
    pub fn jobs(&self) -> &JobContextRegistry {
        &self.jobs
    }

    #[must_use]
    pub fn has_pending_requests(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Applies one UI event to the state machine.
    pub fn dispatch(&mut self, event: UiEvent, host: &mut dyn HostOps) {
        match event {
            UiEvent::SubmitText(text) => self.handle_submit_text(text, host),
            UiEvent::AttachResume { file_name, bytes } => {
                self.handle_attach_resume(file_name, bytes, host);
            }
            UiEvent::AttachStudyPdf { file_name, bytes } => {
                self.handle_attach_study_pdf(file_name, bytes, host);
            }
            UiEvent::PickTopic(interest) => self.handle_pick_topic(interest, host),
            UiEvent::FindJobs(filters) => self.handle_find_jobs(filters, host),
            UiEvent::MatchJobs { cargo } => self.handle_match_jobs(cargo, host),
            UiEvent::JobAction { job_id, kind } => self.handle_job_action(&job_id, kind, host),
            UiEvent::NewChat => self.handle_new_chat(host),
        }
    }

    /// Applies the terminal outcome of a started request.
    ///
    /// Unknown request ids are stale (their state was cleared while the
    /// request was in flight) and apply against whatever transcript exists
    /// now; their placeholder, if any survived, is released first.
    pub fn on_request_finished(
        &mut self,
        request_id: RequestId,
        result: Result<ApiReply, BackendError>,
        host: &mut dyn HostOps,
    ) {
        let Some(pending) = self.pending.remove(&request_id) else {
            return;
        };
        self.log.end_loading(pending.placeholder);

        match pending.kind {
            PendingKind::Chat => match result {
                Ok(ApiReply::ChatReply(text)) => self.push_assistant_plain(&text, host),
                Ok(_) => self.push_assistant_plain(INVALID_REPLY_MESSAGE, host),
                Err(error) => {
                    let message = match error.kind {
                        BackendErrorKind::Transport => {
                            format!("❌ Erro de conexão: {}", error.message)
                        }
                        BackendErrorKind::MissingData => {
                            "❌ Erro: Não recebi uma resposta válida.".to_string()
                        }
                    };
                    self.push_assistant_plain(&message, host);
                }
            },
            PendingKind::Study => {
                match result {
                    Ok(ApiReply::StudyPlan(plan)) => {
                        let markup = format!(
                            "<b>📘 Plano de Estudos — Método Paulo Freire:</b><br><br>{}",
                            markdown_to_markup(&plan)
                        );
                        self.push_assistant_markup(&markup, host);
                    }
                    Ok(_) => self.push_assistant_plain(INVALID_REPLY_MESSAGE, host),
                    Err(error) => {
                        let message = match error.kind {
                            BackendErrorKind::Transport => {
                                format!("❌ Erro de conexão: {}", error.message)
                            }
                            BackendErrorKind::MissingData => {
                                format!("❌ Erro ao gerar plano de estudos: {}", error.message)
                            }
                        };
                        self.push_assistant_plain(&message, host);
                    }
                }

                // One attempt per flow: close it no matter how the request went.
                self.session.reset();
                host.persist_state(&self.session);
            }
            PendingKind::UploadCv => match result {
                Ok(ApiReply::CvSummary(summary)) => {
                    let message = format!(
                        "**✅ Currículo processado!** Aqui está minha análise como Coach de \
                         Carreira:\n\n{summary}"
                    );
                    self.push_assistant_plain(&message, host);
                }
                Ok(_) => self.push_assistant_plain(INVALID_REPLY_MESSAGE, host),
                Err(error) => {
                    let message = match error.kind {
                        BackendErrorKind::Transport => {
                            format!("❌ Erro de conexão: {}", error.message)
                        }
                        BackendErrorKind::MissingData => {
                            format!("❌ Erro no upload: {}", error.message)
                        }
                    };
                    self.push_assistant_plain(&message, host);
                }
            },
            PendingKind::JobSearch => match result {
                Ok(ApiReply::Jobs(jobs)) => {
                    if jobs.is_empty() {
                        self.push_assistant_plain(NO_JOBS_MESSAGE, host);
                    } else {
                        self.push_assistant_plain(
                            &format!("Encontrei {} vagas. Analisando...", jobs.len()),
                            host,
                        );
                        for job in &jobs {
                            let id = self.jobs.register(job);
                            let card = render_job_card(job, &id);
                            self.push_assistant_markup(&card, host);
                        }
                    }
                }
                Ok(_) => self.push_assistant_plain(INVALID_REPLY_MESSAGE, host),
                Err(error) => {
                    let message = match error.kind {
                        BackendErrorKind::Transport => {
                            format!("❌ Erro de conexão ao buscar vagas: {}", error.message)
                        }
                        BackendErrorKind::MissingData => format!("❌ Erro: {}", error.message),
                    };
                    self.push_assistant_plain(&message, host);
                }
            },
            PendingKind::JobAction(kind) => match result {
                Ok(ApiReply::Analysis(text)) => match kind {
                    JobActionKind::Fit => self.push_assistant_plain(&text, host),
                    JobActionKind::Adapt | JobActionKind::Cover => {
                        let markup = format!(
                            "Pronto! Aqui está:<br><br><pre>{}</pre>",
                            escape_text(&text)
                        );
                        self.push_assistant_markup(&markup, host);
                    }
                },
                Ok(_) => self.push_assistant_plain(INVALID_REPLY_MESSAGE, host),
                Err(error) => {
                    let message = match error.kind {
                        BackendErrorKind::Transport => {
                            format!("❌ Erro de conexão: {}", error.message)
                        }
                        BackendErrorKind::MissingData => format!("❌ Erro: {}", error.message),
                    };
                    self.push_assistant_plain(&message, host);
                }
            },
        }

        host.request_render();
    }

    /// Renders the welcome message as the opening transcript entry.
    pub fn show_welcome(&mut self, host: &mut dyn HostOps) {
        self.push_assistant_markup(WELCOME_MARKUP, host);
    }

    /// Replaces the transcript with previously persisted markup.
    pub fn restore_transcript(&mut self, markup: &str) {
        self.log.restore(markup);
    }

    pub(crate) fn resume_study_flow(&mut self, state: SessionState) {
        self.session = state;
        self.mode = Mode::AwaitingTopicSelection;
    }

    fn handle_submit_text(&mut self, text: String, host: &mut dyn HostOps) {
        let prompt = text.trim().to_string();
        if prompt.is_empty() {
            return;
        }

        if self.mode == Mode::AwaitingTopicSelection {
            // The free-text control doubles as the freeform topic input while
            // the selector is up.
            self.handle_pick_topic(prompt, host);
            return;
        }

        self.push_user_plain(&prompt, host);
        if let Some(subject) = study_intent(&prompt) {
            self.push_assistant_plain(&format!("Certo! Vamos estudar sobre \"{subject}\"."), host);
            self.enter_study_flow(subject, None, host);
        } else {
            self.begin_request(ApiRequest::Chat { prompt }, PendingKind::Chat, host);
        }
        host.request_render();
    }

    fn handle_attach_study_pdf(
        &mut self,
        file_name: String,
        bytes: Vec<u8>,
        host: &mut dyn HostOps,
    ) {
        if file_name.trim().is_empty() || bytes.is_empty() {
            return;
        }

        self.push_user_plain(&format!("📘 Enviando PDF de estudos: {file_name}"), host);
        self.push_assistant_plain(
            "Certo! Vou analisar seu PDF. Agora, para personalizar seu estudo, escolha um foco \
             de interesse.",
            host,
        );
        self.enter_study_flow(
            STUDY_PDF_SUBJECT.to_string(),
            Some(StudyAttachment::new(file_name, bytes)),
            host,
        );
        host.request_render();
    }

    fn handle_pick_topic(&mut self, interest: String, host: &mut dyn HostOps) {
        let interest = interest.trim().to_string();
        if interest.is_empty() || self.mode != Mode::AwaitingTopicSelection {
            return;
        }

        let subject = self.session.study_subject.clone().unwrap_or_default();
        self.push_user_plain(
            &format!("Quero estudar sobre \"{subject}\" com foco em \"{interest}\"."),
            host,
        );

        self.mode = Mode::Idle;
        let pdf = self
            .session
            .study_pdf
            .clone()
            .map(|attachment| PdfUpload::new(attachment.file_name, attachment.bytes));
        self.begin_request(
            ApiRequest::StudyPlan {
                subject,
                interests: vec![interest],
                pdf,
            },
            PendingKind::Study,
            host,
        );
        host.request_render();
    }

    fn handle_attach_resume(&mut self, file_name: String, bytes: Vec<u8>, host: &mut dyn HostOps) {
        if file_name.trim().is_empty() || bytes.is_empty() {
            return;
        }

        self.push_user_plain(&format!("📄 Enviando currículo: {file_name}"), host);
        self.begin_request(
            ApiRequest::UploadCv { file_name, bytes },
            PendingKind::UploadCv,
            host,
        );
        host.request_render();
    }

    fn handle_find_jobs(&mut self, filters: JobFilters, host: &mut dyn HostOps) {
        self.push_user_plain("Buscando vagas com base nos seus filtros...", host);
        self.begin_request(ApiRequest::FindJobs(filters), PendingKind::JobSearch, host);
        host.request_render();
    }

    fn handle_match_jobs(&mut self, cargo: String, host: &mut dyn HostOps) {
        let cargo = cargo.trim().to_string();
        let cargo = if cargo.is_empty() {
            DEFAULT_MATCH_ROLE.to_string()
        } else {
            cargo
        };

        self.push_user_plain("Buscando vagas com match (IA) no seu currículo...", host);
        self.begin_request(ApiRequest::MatchJobs { cargo }, PendingKind::JobSearch, host);
        host.request_render();
    }

    fn handle_job_action(&mut self, job_id: &str, kind: JobActionKind, host: &mut dyn HostOps) {
        let Some(context) = self.jobs.get(job_id).cloned() else {
            self.push_assistant_plain("❌ Erro: vaga não encontrada para esta ação.", host);
            host.request_render();
            return;
        };

        let user_message = match kind {
            JobActionKind::Fit => {
                format!("Analisando compatibilidade para: \"{}\"...", context.title)
            }
            JobActionKind::Adapt => format!("Adaptando meu CV para: \"{}\"...", context.title),
            JobActionKind::Cover => {
                format!("Gerando carta de apresentação para: \"{}\"...", context.title)
            }
        };
        self.push_user_plain(&user_message, host);

        self.begin_request(
            ApiRequest::JobAnalysis {
                kind,
                job_title: context.title,
                job_description: context.description,
            },
            PendingKind::JobAction(kind),
            host,
        );
        host.request_render();
    }

    fn handle_new_chat(&mut self, host: &mut dyn HostOps) {
        self.log.clear();
        self.jobs.clear();
        self.session.reset();
        self.mode = Mode::Idle;
        // In-flight requests stay pending; a late completion applies against
        // the fresh transcript.
        host.clear_persisted();
        self.show_welcome(host);
        host.request_render();
    }

    fn enter_study_flow(
        &mut self,
        subject: String,
        pdf: Option<StudyAttachment>,
        host: &mut dyn HostOps,
    ) {
        self.session = SessionState::studying(subject, pdf);
        host.persist_state(&self.session);
        self.mode = Mode::AwaitingTopicSelection;
    }

    fn begin_request(&mut self, request: ApiRequest, kind: PendingKind, host: &mut dyn HostOps) {
        let placeholder = self.log.begin_loading();
        match host.start_request(request) {
            Ok(request_id) => {
                self.pending.insert(
                    request_id,
                    PendingRequest { kind, placeholder },
                );
            }
            Err(error) => {
                self.log.end_loading(placeholder);
                self.push_assistant_plain(&format!("❌ Erro de conexão: {error}"), host);
            }
        }
    }

    fn push_user_plain(&mut self, text: &str, host: &mut dyn HostOps) {
        self.log.push(&Message::plain(Sender::User, text));
        host.persist_transcript(&self.log.serialized());
    }

    fn push_assistant_plain(&mut self, text: &str, host: &mut dyn HostOps) {
        self.log.push(&Message::plain(Sender::Assistant, text));
        host.persist_transcript(&self.log.serialized());
    }

    fn push_assistant_markup(&mut self, markup: &str, host: &mut dyn HostOps) {
        self.log.push(&Message::trusted_markup(Sender::Assistant, markup));
        host.persist_transcript(&self.log.serialized());
    }
}
