//! Conversion between job titles and URL-safe slugs.
//!
//! The slug is the denormalized foreign key linking an applicant to its job,
//! so both directions must stay stable across the whole crate.

/// Derive a URL-safe slug from a human-readable title.
///
/// Lowercases the input, collapses each run of whitespace to a single hyphen
/// (including leading/trailing runs), and drops every character that is not
/// ASCII alphanumeric, `_` or `-`. Pure and total; an empty title produces an
/// empty slug. Idempotent: applying it to its own output is a no-op.
pub fn slugify(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    let mut in_whitespace = false;
    for ch in title.to_lowercase().chars() {
        if ch.is_whitespace() {
            if !in_whitespace {
                out.push('-');
            }
            in_whitespace = true;
        } else {
            in_whitespace = false;
            if ch.is_ascii_alphanumeric() || ch == '_' || ch == '-' {
                out.push(ch);
            }
        }
    }
    out
}

/// Turn a slug back into a display title: hyphens become spaces and the first
/// letter of each word is uppercased.
///
/// This is a display heuristic, not an inverse: acronym casing, punctuation
/// and repeated whitespace in the original title are gone for good, so
/// `deslugify(slugify(t))` does not equal `t` in general.
pub fn deslugify(slug: &str) -> String {
    let mut out = String::with_capacity(slug.len());
    let mut at_word_start = true;
    for ch in slug.chars() {
        if ch == '-' {
            out.push(' ');
            at_word_start = true;
        } else if at_word_start && is_word_char(ch) {
            out.extend(ch.to_uppercase());
            at_word_start = false;
        } else {
            if !is_word_char(ch) {
                at_word_start = true;
            }
            out.push(ch);
        }
    }
    out
}

fn is_word_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}
