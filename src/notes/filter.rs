use crate::entity::{Note, NoteCategory};
use crate::render;

/// Client-side filter over a note list. Empty criteria match everything.
#[derive(Debug, Clone, Default)]
pub struct NoteFilter {
    /// Case-insensitive substring of the title or plain-text content
    pub query: Option<String>,
    pub category: Option<NoteCategory>,
    /// Matched case-insensitively against `entityType`
    pub entity_type: Option<String>,
}

impl NoteFilter {
    pub fn is_empty(&self) -> bool {
        self.query.as_deref().map_or(true, |q| q.trim().is_empty())
            && self.category.is_none()
            && self.entity_type.is_none()
    }

    pub fn matches(&self, note: &Note) -> bool {
        if let Some(category) = self.category {
            if note.category != Some(category) {
                return false;
            }
        }

        if let Some(ref wanted) = self.entity_type {
            match note.entity_type {
                Some(ref actual) if actual.eq_ignore_ascii_case(wanted) => {}
                _ => return false,
            }
        }

        match self.query.as_deref().map(str::trim) {
            Some(q) if !q.is_empty() => {
                let q = q.to_lowercase();
                note.title.to_lowercase().contains(&q)
                    || render::plain_text(note).to_lowercase().contains(&q)
            }
            _ => true,
        }
    }

    /// Matching notes, order preserved
    pub fn apply<'a>(&self, notes: &'a [Note]) -> Vec<&'a Note> {
        notes.iter().filter(|n| self.matches(n)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(title: &str, content: &str) -> Note {
        Note::new(title.to_string(), content.to_string())
    }

    #[test]
    fn test_empty_filter_matches_all() {
        let notes = vec![note("a", "b"), note("c", "d")];
        let filter = NoteFilter::default();
        assert!(filter.is_empty());
        assert_eq!(filter.apply(&notes).len(), 2);
    }

    #[test]
    fn test_query_matches_title_and_content() {
        let notes = vec![
            note("Invoice follow-up", "ask about payment"),
            note("Call", "Discuss INVOICE terms"),
            note("Lunch", "tacos"),
        ];
        let filter = NoteFilter {
            query: Some("invoice".to_string()),
            ..Default::default()
        };
        let titles: Vec<&str> = filter.apply(&notes).iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, vec!["Invoice follow-up", "Call"]);
    }

    #[test]
    fn test_query_ignores_markup() {
        let mut n = note("t", "<p>hello <span class=\"invoice\">world</span></p>");
        n.is_html = true;
        let filter = NoteFilter {
            query: Some("invoice".to_string()),
            ..Default::default()
        };
        assert!(!filter.matches(&n));
        let filter = NoteFilter {
            query: Some("hello world".to_string()),
            ..Default::default()
        };
        assert!(filter.matches(&n));
    }

    #[test]
    fn test_category_and_entity_type() {
        let mut work = note("w", "x");
        work.category = Some(NoteCategory::Work);
        work.entity_type = Some("BUSINESS".to_string());
        let plain = note("p", "x");

        let filter = NoteFilter {
            category: Some(NoteCategory::Work),
            entity_type: Some("business".to_string()),
            ..Default::default()
        };
        assert!(filter.matches(&work));
        assert!(!filter.matches(&plain));
    }
}
