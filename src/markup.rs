use once_cell::sync::Lazy;
use regex::Regex;

/// Markup inserted for an in-flight request placeholder.
///
/// The `loading-spinner` class doubles as the sentinel that marks a node as
/// ephemeral; serialization filters on the node flag, never on this string.
pub const LOADING_SPINNER_MARKUP: &str = r#"<div class="loading-spinner"></div>"#;

static BOLD_PAIR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("bold-pair pattern is valid"));

/// Escapes text for interpolation into element content.
#[must_use]
pub fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Escapes text for interpolation into a quoted attribute value.
#[must_use]
pub fn escape_attr(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Converts the restricted markdown subset to inline markup.
///
/// The input is escaped first, then `**bold**` pairs become `<b>…</b>`,
/// asterisks left over after pairing are stripped, and line breaks become
/// `<br>`. Lists, links, and code spans are not converted.
#[must_use]
pub fn markdown_to_markup(text: &str) -> String {
    let escaped = escape_text(text);
    let bolded = BOLD_PAIR.replace_all(&escaped, "<b>$1</b>");
    let mut out = String::with_capacity(bolded.len());
    let mut chars = bolded.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '*' => {}
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push_str("<br>");
            }
            '\n' => out.push_str("<br>"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{escape_attr, escape_text, markdown_to_markup};

    #[test]
    fn escape_text_replaces_angle_brackets_and_ampersand() {
        assert_eq!(escape_text("a < b & c > d"), "a &lt; b &amp; c &gt; d");
    }

    #[test]
    fn escape_attr_also_replaces_quotes() {
        assert_eq!(escape_attr(r#"it's "big""#), "it&#39;s &quot;big&quot;");
    }

    #[test]
    fn bold_pairs_become_emphasis() {
        assert_eq!(
            markdown_to_markup("use **bold** words"),
            "use <b>bold</b> words"
        );
    }

    #[test]
    fn stray_asterisks_are_stripped() {
        assert_eq!(markdown_to_markup("* item *"), " item ");
        assert_eq!(markdown_to_markup("a ** b"), "a  b");
    }

    #[test]
    fn newline_variants_become_line_breaks() {
        assert_eq!(markdown_to_markup("a\nb\r\nc\rd"), "a<br>b<br>c<br>d");
    }

    #[test]
    fn markup_in_plain_text_is_neutralized_before_conversion() {
        assert_eq!(
            markdown_to_markup("<script>alert(1)</script>"),
            "&lt;script&gt;alert(1)&lt;/script&gt;"
        );
    }
}
