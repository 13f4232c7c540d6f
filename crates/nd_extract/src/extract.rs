//! Heuristic title/body extraction from arbitrary HTML.
//!
//! The body comes out of an ordered cascade of candidate strategies, first
//! non-empty result wins: paragraphs inside `<article>`, then paragraphs
//! inside the class-keyworded container with the most of them, then every
//! paragraph on the page. The cascade is best-effort; captions and
//! boilerplate longer than the length filter pass through undetected.

use scraper::{ElementRef, Html, Selector};

/// Best-effort title and body text pulled out of a page. Never fails;
/// worst case both fields are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extracted {
    pub title: String,
    pub text: String,
}

const CONTENT_CLASS_KEYWORDS: [&str; 5] = ["article", "content", "story", "post", "main"];
const MIN_PARAGRAPH_CHARS: usize = 20;
const MIN_KEPT_PARAGRAPHS: usize = 3;
const FALLBACK_PARAGRAPH_LIMIT: usize = 10;

pub fn extract(html: &str) -> Extracted {
    let document = Html::parse_document(html);
    let title = extract_title(&document);

    let strategies: [fn(&Html) -> Option<Vec<String>>; 3] = [
        article_paragraphs,
        keyword_container_paragraphs,
        all_paragraphs,
    ];
    let candidates = strategies
        .iter()
        .find_map(|strategy| strategy(&document))
        .unwrap_or_default();

    let mut kept: Vec<&str> = candidates
        .iter()
        .map(String::as_str)
        .filter(|text| text.chars().count() > MIN_PARAGRAPH_CHARS)
        .collect();

    // Too few survivors means the filter was too aggressive for this page;
    // take the first paragraphs verbatim instead so we still return content.
    if kept.len() < MIN_KEPT_PARAGRAPHS {
        let fallback: Vec<&str> = candidates
            .iter()
            .take(FALLBACK_PARAGRAPH_LIMIT)
            .map(String::as_str)
            .filter(|text| !text.is_empty())
            .collect();
        if !fallback.is_empty() {
            kept = fallback;
        }
    }

    let text = kept.join("\n\n").trim().to_string();

    Extracted { title, text }
}

/// Element text with runs of whitespace collapsed to single spaces.
fn collapsed_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn selector(css: &str) -> Selector {
    // Selectors in this module are static and known-valid.
    Selector::parse(css).unwrap()
}

/// Page title if non-empty, else the first non-empty `<h1>`, else empty.
fn extract_title(document: &Html) -> String {
    if let Some(element) = document.select(&selector("title")).next() {
        let title = collapsed_text(element);
        if !title.is_empty() {
            return title;
        }
    }
    document
        .select(&selector("h1"))
        .map(collapsed_text)
        .find(|text| !text.is_empty())
        .unwrap_or_default()
}

/// Paragraphs inside the first `<article>` element, if the page has one.
fn article_paragraphs(document: &Html) -> Option<Vec<String>> {
    let article = document.select(&selector("article")).next()?;
    let paragraphs: Vec<String> = article
        .select(&selector("p"))
        .map(collapsed_text)
        .collect();
    (!paragraphs.is_empty()).then_some(paragraphs)
}

/// Paragraphs inside the div/section whose class attribute names content
/// (`article`, `content`, `story`, `post`, `main`); with several matching
/// containers, the one holding the most paragraphs wins.
fn keyword_container_paragraphs(document: &Html) -> Option<Vec<String>> {
    let p_selector = selector("p");
    let mut best: Option<(usize, ElementRef<'_>)> = None;
    for element in document.select(&selector("div, section")) {
        let matches = element.value().attr("class").is_some_and(|class| {
            let class = class.to_lowercase();
            CONTENT_CLASS_KEYWORDS.iter().any(|kw| class.contains(kw))
        });
        if !matches {
            continue;
        }
        let count = element.select(&p_selector).count();
        // Strict comparison: on ties the earliest container in document
        // order keeps winning.
        if best.as_ref().map_or(true, |(best_count, _)| count > *best_count) {
            best = Some((count, element));
        }
    }
    let (_, best) = best?;

    let paragraphs: Vec<String> = best.select(&p_selector).map(collapsed_text).collect();
    (!paragraphs.is_empty()).then_some(paragraphs)
}

/// Every paragraph on the page, the last resort.
fn all_paragraphs(document: &Html) -> Option<Vec<String>> {
    let paragraphs: Vec<String> = document
        .select(&selector("p"))
        .map(collapsed_text)
        .collect();
    (!paragraphs.is_empty()).then_some(paragraphs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_html_yields_empty_pair() {
        let extracted = extract("");
        assert_eq!(extracted.title, "");
        assert_eq!(extracted.text, "");
    }

    #[test]
    fn malformed_html_never_panics() {
        let extracted = extract("<div><p>unclosed <b>mess <article><<<>>");
        // Totality is the property under test, not the recovered content.
        let _ = extracted;
    }

    #[test]
    fn title_element_wins_over_heading() {
        let html = "<html><head><title>Page Title</title></head>\
                    <body><h1>Heading</h1></body></html>";
        assert_eq!(extract(html).title, "Page Title");
    }

    #[test]
    fn first_nonempty_heading_backs_up_missing_title() {
        let html = "<html><body><h1>  </h1><h1>Real Heading</h1><p>x</p></body></html>";
        assert_eq!(extract(html).title, "Real Heading");
    }

    #[test]
    fn article_paragraphs_beat_page_wide_paragraphs() {
        let html = "<html><body>\
            <p>This sidebar paragraph is certainly long enough to keep.</p>\
            <article>\
              <p>First paragraph of the actual story, long enough to pass.</p>\
              <p>Second paragraph of the actual story, long enough to pass.</p>\
              <p>Third paragraph of the actual story, long enough to pass.</p>\
            </article>\
            </body></html>";
        let extracted = extract(html);
        assert!(extracted.text.contains("actual story"));
        assert!(!extracted.text.contains("sidebar"));
    }

    #[test]
    fn keyword_container_with_most_paragraphs_is_chosen() {
        let html = "<html><body>\
            <div class=\"story-body\">\
              <p>Story body paragraph one, comfortably over the length filter.</p>\
              <p>Story body paragraph two, comfortably over the length filter.</p>\
              <p>Story body paragraph three, comfortably over the length filter.</p>\
            </div>\
            <div class=\"main-footer\">\
              <p>Footer content paragraph, also longer than twenty characters.</p>\
            </div>\
            </body></html>";
        let extracted = extract(html);
        assert!(extracted.text.contains("Story body paragraph one"));
        assert!(!extracted.text.contains("Footer content"));
    }

    #[test]
    fn tied_containers_resolve_to_the_first_in_document_order() {
        let html = "<html><body>\
            <div class=\"content-a\">\
              <p>First container paragraph, comfortably over the filter.</p>\
              <p>First container second paragraph, also over the filter.</p>\
            </div>\
            <div class=\"content-b\">\
              <p>Second container paragraph, comfortably over the filter.</p>\
              <p>Second container second paragraph, also over the filter.</p>\
            </div>\
            </body></html>";
        let extracted = extract(html);
        assert!(extracted.text.contains("First container paragraph"));
        assert!(!extracted.text.contains("Second container"));
    }

    #[test]
    fn class_matching_is_case_insensitive() {
        let html = "<html><body><div class=\"ArticleBody\">\
            <p>Paragraph one inside the mixed-case container, long enough.</p>\
            <p>Paragraph two inside the mixed-case container, long enough.</p>\
            <p>Paragraph three inside the mixed-case container, long enough.</p>\
            </div><p>Stray outside paragraph that should not be selected here.</p></body></html>";
        let extracted = extract(html);
        assert!(extracted.text.contains("mixed-case container"));
        assert!(!extracted.text.contains("Stray outside"));
    }

    #[test]
    fn short_paragraphs_trigger_first_ten_fallback() {
        let html = "<html><body>\
            <p>tiny one</p><p>tiny two</p><p></p><p>tiny three</p>\
            </body></html>";
        let extracted = extract(html);
        assert_eq!(extracted.text, "tiny one\n\ntiny two\n\ntiny three");
    }

    #[test]
    fn fallback_is_capped_at_ten_paragraphs() {
        let paragraphs: String = (0..15).map(|i| format!("<p>p{}</p>", i)).collect();
        let html = format!("<html><body>{}</body></html>", paragraphs);
        let extracted = extract(&html);
        assert_eq!(extracted.text.split("\n\n").count(), 10);
        assert!(extracted.text.ends_with("p9"));
    }

    #[test]
    fn long_paragraph_whitespace_is_collapsed() {
        let html = "<html><body><article>\
            <p>Spaced   out\n   text inside a paragraph long enough to keep.</p>\
            <p>Another paragraph with plenty of characters to survive here.</p>\
            <p>A third paragraph with plenty of characters to survive here.</p>\
            </article></body></html>";
        let extracted = extract(html);
        assert!(extracted.text.starts_with("Spaced out text"));
    }

    #[test]
    fn empty_article_falls_through_to_page_paragraphs() {
        let html = "<html><body><article></article>\
            <p>Page level paragraph long enough to clear the length filter.</p>\
            <p>Second page level paragraph long enough to clear the filter.</p>\
            <p>Third page level paragraph long enough to clear the filter.</p>\
            </body></html>";
        let extracted = extract(html);
        assert!(extracted.text.contains("Page level paragraph"));
    }
}
