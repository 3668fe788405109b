//! Identifier normalization
//!
//! Turns a path-like content reference (`./docs/getting-started.mdx`) into
//! the stable identifier (`getting-started`) and display title
//! (`Getting Started`) used everywhere else.

use serde::Serialize;

/// Default prefix for document route addresses.
pub const DEFAULT_ROUTE_PREFIX: &str = "/docs/";

/// Opaque handle to one discovered source document.
///
/// Only the path-like string is interpreted; identity is derived from it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentReference {
    path: String,
}

impl ContentReference {
    /// Wrap a path-like string.
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    /// The raw path string.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Normalize this reference into `(id, title)`.
    pub fn normalize(&self) -> (String, String) {
        normalize(&self.path)
    }
}

impl From<&str> for ContentReference {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl From<String> for ContentReference {
    fn from(path: String) -> Self {
        Self::new(path)
    }
}

/// A normalized, immutable document descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DocumentEntry {
    /// Unique identifier
    pub id: String,

    /// Human-readable label
    pub title: String,

    /// Canonical route address
    pub route_path: String,
}

impl DocumentEntry {
    /// Build an entry for `id` with its derived title and route under `route_prefix`.
    pub fn new(id: impl Into<String>, route_prefix: &str) -> Self {
        let id = id.into();
        Self {
            title: title_from_id(&id),
            route_path: route_path(route_prefix, &id),
            id,
        }
    }

    /// Normalize a reference straight into an entry.
    pub fn from_reference(reference: &ContentReference, route_prefix: &str) -> Self {
        let id = id_from_path(reference.path());
        Self::new(id, route_prefix)
    }
}

/// Derive `(id, title)` from a path-like string.
///
/// Accepts any input; an empty string yields an empty id and title.
pub fn normalize(path: &str) -> (String, String) {
    let id = id_from_path(path);
    let title = title_from_id(&id);
    (id, title)
}

/// Final path segment with its extension stripped.
pub fn id_from_path(path: &str) -> String {
    let segment = path.rsplit(['/', '\\']).next().unwrap_or(path);
    match segment.rfind('.') {
        // A leading dot names a hidden file, not an extension
        Some(dot) if dot > 0 => segment[..dot].to_string(),
        _ => segment.to_string(),
    }
}

/// Hyphens become spaces and every ASCII lowercase letter that starts a
/// word is upper-cased.
///
/// A word starts after any character that is not alphanumeric or `_`, so
/// `release.notes` becomes `Release.Notes`. Words led by a digit or a
/// non-ASCII letter are left as they are.
pub fn title_from_id(id: &str) -> String {
    let mut title = String::with_capacity(id.len());
    let mut at_word_start = true;
    for ch in id.chars() {
        let ch = if ch == '-' { ' ' } else { ch };
        if at_word_start && ch.is_ascii_lowercase() {
            title.push(ch.to_ascii_uppercase());
        } else {
            title.push(ch);
        }
        at_word_start = !(ch.is_alphanumeric() || ch == '_');
    }
    title
}

/// Route address for `id` under `prefix`.
pub fn route_path(prefix: &str, id: &str) -> String {
    format!("{}{}", prefix, id)
}
