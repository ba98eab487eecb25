// ABOUTME: Thin field extractors for title, bullet points, and description.
// ABOUTME: Each is a selector-chain application plus a field-specific post-processing rule.

use scraper::Html;

use crate::selectors::{resolve_all_texts, resolve_first_text, SelectorSpec};

/// Extracts the product title: first chain match, whitespace-normalized.
pub fn extract_title(doc: &Html, specs: &[SelectorSpec]) -> Option<String> {
    resolve_first_text(doc, specs)
}

/// Extracts the ordered bullet-point features.
///
/// All matches of the winning selector, empty entries dropped, document
/// order preserved. Joining and positional indexing happen in the flat
/// record view.
pub fn extract_bullet_points(doc: &Html, specs: &[SelectorSpec]) -> Vec<String> {
    resolve_all_texts(doc, specs)
}

/// Extracts the long-form description: first chain match, normalized.
pub fn extract_description(doc: &Html, specs: &[SelectorSpec]) -> Option<String> {
    resolve_first_text(doc, specs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE_HTML: &str = r#"
        <span id="productTitle">  Widget
            Deluxe </span>
        <div id="feature-bullets"><ul>
            <li><span class="a-list-item">Fast</span></li>
            <li><span class="a-list-item">Durable</span></li>
        </ul></div>
        <div id="productDescription"><p>A very  good widget.</p></div>
    "#;

    #[test]
    fn title_is_normalized() {
        let doc = Html::parse_document(SAMPLE_HTML);
        let specs = vec![SelectorSpec::Css("#productTitle".to_string())];
        assert_eq!(extract_title(&doc, &specs), Some("Widget Deluxe".to_string()));
    }

    #[test]
    fn bullets_preserve_order() {
        let doc = Html::parse_document(SAMPLE_HTML);
        let specs = vec![SelectorSpec::Css("#feature-bullets li span.a-list-item".to_string())];
        assert_eq!(
            extract_bullet_points(&doc, &specs),
            vec!["Fast".to_string(), "Durable".to_string()]
        );
    }

    #[test]
    fn description_from_paragraph() {
        let doc = Html::parse_document(SAMPLE_HTML);
        let specs = vec![SelectorSpec::Css("#productDescription p".to_string())];
        assert_eq!(
            extract_description(&doc, &specs),
            Some("A very good widget.".to_string())
        );
    }

    #[test]
    fn missing_fields_are_none_or_empty() {
        let doc = Html::parse_document("<p>nothing here</p>");
        let specs = vec![SelectorSpec::Css("#productTitle".to_string())];
        assert_eq!(extract_title(&doc, &specs), None);
        assert!(extract_bullet_points(&doc, &specs).is_empty());
    }
}
