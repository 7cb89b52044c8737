//! Plain-text rendering of note content.
//!
//! Notes flagged `isHTML` carry markup from the dashboard's rich-text editor.
//! Terminals get it reduced to text with scripts and styles dropped.

use std::sync::OnceLock;

use regex::Regex;

use crate::entity::Note;

struct Patterns {
    script_style: Regex,
    line_break: Regex,
    block_end: Regex,
    list_item: Regex,
    tag: Regex,
    blank_lines: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        script_style: Regex::new(r"(?is)<(script|style)\b[^>]*>.*?</\s*(script|style)\s*>")
            .expect("valid script regex"),
        line_break: Regex::new(r"(?i)<br\s*/?>").expect("valid br regex"),
        block_end: Regex::new(r"(?i)</\s*(p|div|li|ul|ol|h[1-6]|tr|blockquote|pre)\s*>")
            .expect("valid block regex"),
        list_item: Regex::new(r"(?i)<li\b[^>]*>").expect("valid li regex"),
        tag: Regex::new(r"(?s)<[^>]*>").expect("valid tag regex"),
        blank_lines: Regex::new(r"\n{3,}").expect("valid blank line regex"),
    })
}

/// Reduce an HTML fragment to readable text.
pub fn html_to_text(html: &str) -> String {
    let p = patterns();

    let text = p.script_style.replace_all(html, "");
    let text = p.line_break.replace_all(&text, "\n");
    let text = p.block_end.replace_all(&text, "\n");
    let text = p.list_item.replace_all(&text, "- ");
    let text = p.tag.replace_all(&text, "");

    // &amp; last so "&amp;lt;" stays "&lt;"
    let text = text
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&amp;", "&");

    let trimmed: Vec<&str> = text.lines().map(str::trim_end).collect();
    let joined = trimmed.join("\n");
    p.blank_lines.replace_all(&joined, "\n\n").trim().to_string()
}

/// Content of `note` as plain text
pub fn plain_text(note: &Note) -> String {
    if note.is_html {
        html_to_text(&note.content)
    } else {
        note.content.clone()
    }
}

/// First non-blank line of the content, cut to `max_chars`.
pub fn preview(note: &Note, max_chars: usize) -> String {
    let text = plain_text(note);
    let line = text
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .unwrap_or("");

    if line.chars().count() <= max_chars {
        line.to_string()
    } else {
        let cut: String = line.chars().take(max_chars.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn html_note(content: &str) -> Note {
        let mut note = Note::new("t".to_string(), content.to_string());
        note.is_html = true;
        note
    }

    #[test]
    fn test_plain_content_is_untouched() {
        let note = Note::new("t".to_string(), "<b>not html</b>".to_string());
        assert_eq!(plain_text(&note), "<b>not html</b>");
    }

    #[test]
    fn test_html_is_stripped() {
        let note = html_note("<p>Hello <b>there</b></p><p>Second&nbsp;line &amp; more</p>");
        assert_eq!(plain_text(&note), "Hello there\nSecond line & more");
    }

    #[test]
    fn test_scripts_and_styles_are_dropped() {
        let note = html_note(
            "<style>p{color:red}</style><p>safe</p><SCRIPT type=\"text/javascript\">alert(1)</script>",
        );
        assert_eq!(plain_text(&note), "safe");
    }

    #[test]
    fn test_lists_and_breaks() {
        let text = html_to_text("<ul><li>one</li><li>two</li></ul>a<br/>b");
        assert_eq!(text, "- one\n- two\n\na\nb");
    }

    #[test]
    fn test_escaped_entities_decode_once() {
        assert_eq!(html_to_text("&amp;lt;tag&amp;gt;"), "&lt;tag&gt;");
    }

    #[test]
    fn test_preview_truncates() {
        let note = Note::new("t".to_string(), "\n\n  abcdefghij\nrest".to_string());
        assert_eq!(preview(&note, 20), "abcdefghij");
        assert_eq!(preview(&note, 5), "abcd…");
    }
}
