//! Title normalization before external search.
//!
//! Catalog titles carry dataset artifacts that hurt search hit rate: a
//! trailing parenthesized release year ("Heat (1995)") and the
//! trailing-article comma form ("Matrix, The"). Both are undone here
//! before the query goes out.

/// Normalize a catalog title into a search query.
pub fn normalize_title(raw: &str) -> String {
    let stripped = strip_year_suffix(raw.trim());
    restore_leading_article(stripped).unwrap_or_else(|| stripped.to_string())
}

/// Strip one trailing "(NNNN)" year suffix: "Heat (1995)" -> "Heat".
fn strip_year_suffix(title: &str) -> &str {
    if let Some(start) = title.rfind('(') {
        if title.ends_with(')') {
            let inner = &title[start + 1..title.len() - 1];
            if inner.len() == 4 && inner.chars().all(|c| c.is_ascii_digit()) {
                return title[..start].trim_end();
            }
        }
    }
    title
}

/// Move a trailing article back to the front: "Matrix, The" -> "The Matrix".
///
/// Returns None when the title has no trailing article, so genuine commas
/// ("New York, New York") pass through untouched.
fn restore_leading_article(title: &str) -> Option<String> {
    const ARTICLES: [&str; 3] = ["The", "A", "An"];

    let (body, tail) = title.rsplit_once(", ")?;
    let article = ARTICLES.iter().find(|&&a| a.eq_ignore_ascii_case(tail))?;
    Some(format!("{article} {body}"))
}
