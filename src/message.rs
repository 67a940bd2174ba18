/// Originator of one chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Assistant,
}

impl Sender {
    /// Returns the css class used on the rendered bubble.
    #[must_use]
    pub fn as_class(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "bot",
        }
    }
}

/// One unit of conversation, created transiently on submission or response.
///
/// Messages are never mutated after rendering; the whole transcript is only
/// ever cleared in full.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub sender: Sender,
    pub content: String,
    /// Content is already trusted markup; plain text is escaped and run
    /// through the restricted markdown conversion instead.
    pub preformatted: bool,
}

impl Message {
    #[must_use]
    pub fn plain(sender: Sender, content: impl Into<String>) -> Self {
        Self {
            sender,
            content: content.into(),
            preformatted: false,
        }
    }

    #[must_use]
    pub fn trusted_markup(sender: Sender, content: impl Into<String>) -> Self {
        Self {
            sender,
            content: content.into(),
            preformatted: true,
        }
    }
}
