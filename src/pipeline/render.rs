//! Display-column rendering: matched entities are wrapped in a highlight
//! span inside the headline text before ingest.

use crate::entity::types::strip_organization_marker;

/// Wrap each entity occurrence in the text with the highlight markup.
/// Organization markers are stripped first so the raw name is matched.
pub fn render_text(text: &str, entities: &[String]) -> String {
    let mut rendered = text.to_string();
    for entity in entities {
        let name = strip_organization_marker(entity);
        if name.is_empty() {
            continue;
        }
        rendered = rendered.replace(name, &format!("<span class=\"highlight\">{}</span>", name));
    }
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_entity_occurrences() {
        let out = render_text(
            "Sony announces new earbuds",
            &["Sony (organization)".to_string()],
        );
        assert_eq!(
            out,
            "<span class=\"highlight\">Sony</span> announces new earbuds"
        );
    }

    #[test]
    fn highlights_every_occurrence_of_an_entity() {
        let out = render_text("Biogen said Biogen will comply", &["Biogen".to_string()]);
        assert_eq!(out.matches("<span class=\"highlight\">Biogen</span>").count(), 2);
    }

    #[test]
    fn text_without_matches_is_unchanged() {
        let text = "Nothing notable happened today";
        assert_eq!(render_text(text, &["Sony (organization)".to_string()]), text);
    }
}
