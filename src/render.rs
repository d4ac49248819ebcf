//! Plain-text rendering of search responses for the terminal.
//!
//! Three states are rendered: an error, an empty result set, and a result
//! set with its summary block followed by one entry per document.

use std::borrow::Cow;

use crate::models::SearchResponse;

/// Maximum body characters shown per result before truncation.
pub const SNIPPET_CHARS: usize = 150;

/// Body preview: the first [`SNIPPET_CHARS`] characters followed by `...`,
/// or the whole body if it is short enough.
pub fn snippet(body: &str) -> Cow<'_, str> {
    match body.char_indices().nth(SNIPPET_CHARS) {
        Some((cut, _)) => Cow::Owned(format!("{}...", &body[..cut])),
        None => Cow::Borrowed(body),
    }
}

pub fn render_error(message: &str) -> String {
    format!("Error\n{}\n", message)
}

pub fn render_response(response: &SearchResponse) -> String {
    let mut out = String::new();

    if response.results.is_empty() {
        out.push_str("No Results Found\n");
        out.push_str(&response.message);
        out.push('\n');
        return out;
    }

    if let Some(summary) = &response.summary {
        out.push_str("Summary\n");
        out.push_str(summary);
        out.push('\n');
        if !response.sources.is_empty() {
            out.push_str(&format!("Sources: {}\n", response.sources.join(", ")));
        }
        out.push('\n');
    }

    out.push_str(&response.message);
    out.push_str("\n\n");

    for (i, doc) in response.results.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", i + 1, doc.title));
        out.push_str(&format!("    {}\n", snippet(&doc.body)));
        out.push_str(&format!("    id: {}\n", doc.id));
        out.push('\n');
    }

    out
}
