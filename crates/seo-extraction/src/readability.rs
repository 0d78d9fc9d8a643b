//! Main-body text extraction: a density-based heuristic over the leaf
//! block-level elements (paragraph, list item, table cell, blockquote),
//! excluding script/style/nav/footer/aside chrome by walking each
//! candidate's ancestor chain.

use scraper::{Html, Selector};

const EXCLUDED_ANCESTORS: &[&str] = &["script", "style", "nav", "footer", "aside"];
const BLOCK_SELECTOR: &str = "p, li, td, th, blockquote";

/// The readable body text: leaf block elements joined by a blank line,
/// in document order. Empty if the document has no matching elements.
pub fn extract_main_text(document: &Html) -> String {
    let Ok(selector) = Selector::parse(BLOCK_SELECTOR) else {
        return String::new();
    };

    let mut parts = Vec::new();
    'elements: for element in document.select(&selector) {
        for ancestor in element.ancestors() {
            if let Some(el) = ancestor.value().as_element() {
                if EXCLUDED_ANCESTORS.contains(&el.name()) {
                    continue 'elements;
                }
            }
        }
        let text: String = element.text().collect::<Vec<_>>().join(" ");
        let trimmed = text.trim();
        if !trimmed.is_empty() {
            parts.push(trimmed.to_string());
        }
    }

    parts.join("\n\n")
}

/// All text nodes in the document concatenated with no separator, used
/// only for the text/HTML ratio signal (matches a whole-document
/// `get_text()`-style pass, not the main-content extraction above).
pub fn full_document_text(document: &Html) -> String {
    document.root_element().text().collect::<Vec<_>>().join("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_paragraph_text_and_excludes_nav_chrome() {
        let html = r#"<html><body>
            <nav><p>skip this nav link text</p></nav>
            <article><p>Real paragraph one.</p><p>Real paragraph two.</p></article>
        </body></html>"#;
        let document = Html::parse_document(html);
        let text = extract_main_text(&document);
        assert!(text.contains("Real paragraph one."));
        assert!(text.contains("Real paragraph two."));
        assert!(!text.contains("skip this nav link text"));
    }

    #[test]
    fn excludes_script_and_style_content() {
        let html = r#"<html><body>
            <script>var x = "not content";</script>
            <style>.a { color: red; }</style>
            <p>Visible text.</p>
        </body></html>"#;
        let document = Html::parse_document(html);
        let text = extract_main_text(&document);
        assert_eq!(text, "Visible text.");
    }

    #[test]
    fn empty_document_yields_empty_string() {
        let document = Html::parse_document("<html><body></body></html>");
        assert_eq!(extract_main_text(&document), "");
    }

    #[test]
    fn full_document_text_includes_everything() {
        let document = Html::parse_document("<html><body><p>a</p><nav>b</nav></body></html>");
        let text = full_document_text(&document);
        assert!(text.contains('a'));
        assert!(text.contains('b'));
    }

}
