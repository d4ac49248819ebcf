//! Keyword-based summary of the top search results.

use crate::models::ScoredDocument;

/// Topic vocabulary recognized in result text, in reporting order.
pub const KEYWORDS: [&str; 16] = [
    "conversion",
    "trust",
    "form",
    "badge",
    "cta",
    "button",
    "headline",
    "testimonial",
    "urgency",
    "pricing",
    "checkout",
    "funnel",
    "landing",
    "optimization",
    "test",
    "experiment",
];

/// The top result's lead sentence is quoted only when shorter than this.
pub const MAX_LEAD_SENTENCE_CHARS: usize = 120;

/// Vocabulary keywords that appear anywhere in the titles or bodies of
/// `docs`, in [`KEYWORDS`] order.
pub fn find_keywords(docs: &[ScoredDocument<'_>]) -> Vec<&'static str> {
    let text = docs
        .iter()
        .map(|s| format!("{} {}", s.doc.title, s.doc.body))
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();

    KEYWORDS
        .iter()
        .copied()
        .filter(|keyword| text.contains(keyword))
        .collect()
}

/// Text of `body` before its first period, or all of it if there is none.
fn lead_sentence(body: &str) -> &str {
    body.split('.').next().unwrap_or_default()
}

/// Builds the human-readable summary for a non-empty result slice.
///
/// `query` is reported as given. `docs[0]` is treated as the best match.
pub fn summarize(docs: &[ScoredDocument<'_>], query: &str, max_keywords: usize) -> String {
    let count = docs.len();
    let mut summary = format!(
        "Your search for \"{}\" returned {} relevant result{}.",
        query,
        count,
        if count > 1 { "s" } else { "" }
    );

    let keywords = find_keywords(docs);
    if !keywords.is_empty() {
        let shown: Vec<&str> = keywords.into_iter().take(max_keywords).collect();
        summary.push_str(&format!(
            " The results focus on {} strategies.",
            shown.join(", ")
        ));
    }

    if let Some(top) = docs.first() {
        let lead = lead_sentence(&top.doc.body);
        if !lead.is_empty() && lead.chars().count() < MAX_LEAD_SENTENCE_CHARS {
            summary.push_str(&format!(" Top result: {}.", lead));
        }
    }

    summary
}
