//! Title-to-identifier helpers.
//!
//! Section anchors, element ids, and processed-image file stems are all
//! derived from hand-authored titles. This module owns the one derivation
//! rule so a title always maps to the same identifier everywhere:
//! lowercase, alphanumeric runs joined by single hyphens.
//!
//! - `"Upadhi - MERN Stack Web App"` → `upadhi-mern-stack-web-app`
//! - `"CI/CD & DevOps"` → `ci-cd-devops`
//!
//! Also derives initials for the monogram fallbacks (header mark, hero
//! portrait placeholder, project card banner).

/// Convert a display title into a URL/file-safe slug.
///
/// Alphanumeric characters are lowercased and kept; every other run of
/// characters collapses into a single hyphen; leading and trailing
/// hyphens are dropped. An all-symbol title yields an empty slug, which
/// scan validation rejects.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_gap = false;
    for c in title.chars() {
        if c.is_alphanumeric() {
            if pending_gap && !slug.is_empty() {
                slug.push('-');
            }
            pending_gap = false;
            for lc in c.to_lowercase() {
                slug.push(lc);
            }
        } else {
            pending_gap = true;
        }
    }
    slug
}

/// Initials for a person or project name: first letter of the first and
/// last whitespace-separated words, uppercased. Single-word names yield
/// one letter; empty input yields an empty string.
pub fn initials(name: &str) -> String {
    let mut words = name.split_whitespace();
    let first = words.next();
    let last = words.last();
    let mut out = String::new();
    for word in [first, last].into_iter().flatten() {
        if let Some(c) = word.chars().next() {
            out.extend(c.to_uppercase());
        }
    }
    out
}
