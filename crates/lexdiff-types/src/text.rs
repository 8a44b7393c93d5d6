//! Text normalization used when comparing article bodies.
//!
//! Extracted texts from different sources disagree on whitespace layout and
//! on typographic quote marks. Two bodies that differ only in those respects
//! are the same legal text and must not be reported as a change.

/// Normalize an article body for equality comparison.
///
/// Collapses every run of whitespace (including tabs and newlines) to a
/// single space, trims both ends, maps typographic double quotes to `"` and
/// typographic single quotes to `'`.
pub fn normalize_for_comparison(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for word in text.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.extend(word.chars().map(unify_quote));
    }
    out
}

fn unify_quote(c: char) -> char {
    match c {
        '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{00AB}' | '\u{00BB}' => '"',
        '\u{2018}' | '\u{2019}' | '\u{201A}' => '\'',
        other => other,
    }
}
