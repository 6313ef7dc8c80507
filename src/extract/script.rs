//! Inline script isolation
//!
//! Narrows a page down to the text of its `<script>` elements so the record
//! patterns cannot match stray quoted strings in the surrounding markup.

use scraper::{Html, Selector};

/// Returns the concatenated text of every `<script>` element in `body`
///
/// Bodies without any script element are returned unchanged, which lets
/// callers feed bare script fragments straight to the extractors.
pub fn script_text(body: &str) -> String {
    let document = Html::parse_document(body);

    let Ok(selector) = Selector::parse("script") else {
        return body.to_string();
    };

    let scripts: Vec<String> = document
        .select(&selector)
        .map(|element| element.text().collect::<String>())
        .collect();

    if scripts.is_empty() {
        body.to_string()
    } else {
        scripts.join("\n")
    }
}
