use std::collections::HashMap;

use chat_surface::{escape_attr, escape_text};
use coach_api::Job;
use uuid::Uuid;

/// Per-job follow-up actions offered on a rendered card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobActionKind {
    Fit,
    Adapt,
    Cover,
}

impl JobActionKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fit => "fit",
            Self::Adapt => "adapt",
            Self::Cover => "cover",
        }
    }

    #[must_use]
    pub fn button_label(self) -> &'static str {
        match self {
            Self::Fit => "1. Compatibilidade (IA)",
            Self::Adapt => "2. Adaptar CV",
            Self::Cover => "3. Carta de Apresentação",
        }
    }
}

/// Request parameters for one rendered job card.
///
/// Cards reference this context through a generated identifier instead of
/// re-deriving title and description from the rendered markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobContext {
    pub title: String,
    pub description: String,
    pub href: String,
}

/// Registry of active job contexts, keyed by generated identifier.
#[derive(Debug, Default, Clone)]
pub struct JobContextRegistry {
    by_id: HashMap<String, JobContext>,
    order: Vec<String>,
}

impl JobContextRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listing and returns its context identifier.
    pub fn register(&mut self, job: &Job) -> String {
        let id = Uuid::new_v4().to_string();
        self.by_id.insert(
            id.clone(),
            JobContext {
                title: job.title.clone(),
                description: job.body.clone(),
                href: job.href.clone(),
            },
        );
        self.order.push(id.clone());
        id
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&JobContext> {
        self.by_id.get(id)
    }

    /// Identifier of the `index`-th registered card, in render order.
    #[must_use]
    pub fn id_at(&self, index: usize) -> Option<&str> {
        self.order.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &JobContext)> {
        self.order
            .iter()
            .filter_map(|id| self.by_id.get(id).map(|context| (id.as_str(), context)))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn clear(&mut self) {
        self.by_id.clear();
        self.order.clear();
    }
}

const PREVIEW_CHARS: usize = 150;

fn description_preview(body: &str) -> String {
    let mut preview: String = body.chars().take(PREVIEW_CHARS).collect();
    preview.push_str("...");
    preview
}

/// Renders one job card as trusted markup.
///
/// All listing text is escaped on the way in; the action buttons carry only
/// the generated context identifier.
#[must_use]
pub fn render_job_card(job: &Job, context_id: &str) -> String {
    let title = escape_text(&job.title);
    let preview = escape_text(&description_preview(&job.body));
    let href = escape_attr(&job.href);
    let id = escape_attr(context_id);

    let mut actions = format!(
        r#"<a href="{href}" target="_blank" class="job-btn job-link">Ver Vaga</a>"#
    );
    for kind in [JobActionKind::Fit, JobActionKind::Adapt, JobActionKind::Cover] {
        actions.push_str(&format!(
            r#"<button class="job-btn" data-action="{}" data-job="{id}">{}</button>"#,
            kind.as_str(),
            kind.button_label()
        ));
    }

    format!(
        r#"<div class="job-card"><h4>{title}</h4><p class="job-card-desc">{preview}</p><div class="job-card-actions">{actions}</div></div>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(title: &str, body: &str) -> Job {
        Job {
            title: title.to_string(),
            body: body.to_string(),
            href: "https://example.com/vaga".to_string(),
            local: None,
            modelo: None,
            tipo: None,
            analysis: None,
        }
    }

    #[test]
    fn registry_resolves_cards_in_render_order() {
        let mut registry = JobContextRegistry::new();
        let first = registry.register(&listing("Analista", "descrição a"));
        let second = registry.register(&listing("Engenheiro", "descrição b"));

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.id_at(0), Some(first.as_str()));
        assert_eq!(registry.id_at(1), Some(second.as_str()));
        assert_ne!(first, second);
        assert_eq!(
            registry.get(&second).map(|context| context.title.as_str()),
            Some("Engenheiro")
        );
    }

    #[test]
    fn clear_drops_every_context() {
        let mut registry = JobContextRegistry::new();
        registry.register(&listing("Analista", "descrição"));
        registry.clear();

        assert!(registry.is_empty());
        assert_eq!(registry.id_at(0), None);
    }

    #[test]
    fn card_markup_escapes_listing_text() {
        let mut registry = JobContextRegistry::new();
        let job = listing(r#"Dev <Júnior> "PJ""#, "vaga & detalhes <b>cruciais</b>");
        let id = registry.register(&job);

        let card = render_job_card(&job, &id);
        assert!(card.contains("Dev &lt;Júnior&gt;"));
        assert!(card.contains("vaga &amp; detalhes &lt;b&gt;cruciais&lt;/b&gt;"));
        assert!(!card.contains("<b>cruciais</b>"));
        assert!(card.contains(&format!(r#"data-job="{id}""#)));
    }

    #[test]
    fn long_descriptions_are_truncated_character_safe() {
        let body = "é".repeat(300);
        let job = listing("Analista", &body);
        let card = render_job_card(&job, "ctx");

        let preview = "é".repeat(150);
        assert!(card.contains(&format!("{preview}...")));
        assert!(!card.contains(&"é".repeat(151)));
    }

    #[test]
    fn card_offers_the_three_analysis_actions_and_the_listing_link() {
        let job = listing("Analista", "descrição");
        let card = render_job_card(&job, "ctx");

        assert!(card.contains(r#"data-action="fit""#));
        assert!(card.contains(r#"data-action="adapt""#));
        assert!(card.contains(r#"data-action="cover""#));
        assert!(card.contains(r#"href="https://example.com/vaga""#));
    }
}
