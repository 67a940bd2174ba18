use crate::markup::{markdown_to_markup, LOADING_SPINNER_MARKUP};
use crate::message::{Message, Sender};

/// Handle to one outstanding loading placeholder.
///
/// Each in-flight request must own its handle exclusively; removal through a
/// shared handle is exactly the race the per-request contract rules out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlaceholderHandle(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
struct RenderedNode {
    markup: String,
    placeholder: Option<PlaceholderHandle>,
}

impl RenderedNode {
    fn is_ephemeral(&self) -> bool {
        self.placeholder.is_some()
    }
}

/// Append-only log of rendered chat bubbles.
///
/// Nodes are kept in arrival order. Placeholder nodes are ephemeral: they are
/// excluded from [`TranscriptLog::serialized`] and removed individually by
/// handle, so interleaved completions of independent requests cannot remove
/// each other's spinner.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TranscriptLog {
    nodes: Vec<RenderedNode>,
    next_placeholder: u64,
}

impl TranscriptLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders a message and appends it to the log.
    ///
    /// Returns the rendered bubble markup.
    pub fn push(&mut self, message: &Message) -> &str {
        let body = if message.preformatted {
            message.content.clone()
        } else {
            markdown_to_markup(&message.content)
        };
        let markup = format!(
            r#"<div class="message {}">{}</div>"#,
            message.sender.as_class(),
            body
        );
        self.nodes.push(RenderedNode {
            markup,
            placeholder: None,
        });
        &self.nodes[self.nodes.len() - 1].markup
    }

    /// Inserts an ephemeral loading bubble and returns its handle.
    pub fn begin_loading(&mut self) -> PlaceholderHandle {
        self.next_placeholder += 1;
        let handle = PlaceholderHandle(self.next_placeholder);
        self.nodes.push(RenderedNode {
            markup: format!(
                r#"<div class="message {}">{LOADING_SPINNER_MARKUP}</div>"#,
                Sender::Assistant.as_class()
            ),
            placeholder: Some(handle),
        });
        handle
    }

    /// Removes the placeholder owned by `handle`.
    ///
    /// Removing a handle twice is a no-op; the second caller finds nothing.
    pub fn end_loading(&mut self, handle: PlaceholderHandle) {
        self.nodes
            .retain(|node| node.placeholder != Some(handle));
    }

    /// True while any placeholder is outstanding (the global "thinking"
    /// indicator).
    #[must_use]
    pub fn is_thinking(&self) -> bool {
        self.nodes.iter().any(RenderedNode::is_ephemeral)
    }

    /// Serializes the persistable transcript: every node in order, loading
    /// placeholders excluded.
    #[must_use]
    pub fn serialized(&self) -> String {
        self.nodes
            .iter()
            .filter(|node| !node.is_ephemeral())
            .map(|node| node.markup.as_str())
            .collect()
    }

    /// Replaces the log contents with a previously serialized transcript.
    pub fn restore(&mut self, markup: &str) {
        self.nodes.clear();
        if !markup.is_empty() {
            self.nodes.push(RenderedNode {
                markup: markup.to_string(),
                placeholder: None,
            });
        }
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Markup of the newest node, placeholders included.
    #[must_use]
    pub fn last_markup(&self) -> Option<&str> {
        self.nodes.last().map(|node| node.markup.as_str())
    }

    /// Markup of every node in arrival order, placeholders included.
    pub fn markup_nodes(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(|node| node.markup.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_renders_sender_class_and_escaped_body() {
        let mut log = TranscriptLog::new();
        log.push(&Message::plain(Sender::User, "oi **tudo** bem?"));

        assert_eq!(
            log.last_markup(),
            Some(r#"<div class="message user">oi <b>tudo</b> bem?</div>"#)
        );
    }

    #[test]
    fn preformatted_content_is_trusted_verbatim() {
        let mut log = TranscriptLog::new();
        log.push(&Message::trusted_markup(Sender::Assistant, "<ul><li>a</li></ul>"));

        assert_eq!(
            log.last_markup(),
            Some(r#"<div class="message bot"><ul><li>a</li></ul></div>"#)
        );
    }

    #[test]
    fn each_placeholder_is_removed_only_by_its_own_handle() {
        let mut log = TranscriptLog::new();
        let first = log.begin_loading();
        let second = log.begin_loading();
        assert!(log.is_thinking());

        log.end_loading(first);
        assert!(log.is_thinking());

        log.end_loading(second);
        assert!(!log.is_thinking());
    }

    #[test]
    fn end_loading_twice_is_a_noop() {
        let mut log = TranscriptLog::new();
        let handle = log.begin_loading();
        log.push(&Message::plain(Sender::Assistant, "done"));
        log.end_loading(handle);
        log.end_loading(handle);

        assert_eq!(
            log.serialized(),
            r#"<div class="message bot">done</div>"#
        );
    }

    #[test]
    fn restore_reinstates_serialized_markup() {
        let mut log = TranscriptLog::new();
        log.push(&Message::plain(Sender::User, "primeira"));
        log.push(&Message::plain(Sender::Assistant, "segunda"));
        let saved = log.serialized();

        let mut restored = TranscriptLog::new();
        restored.restore(&saved);
        assert_eq!(restored.serialized(), saved);
    }
}
