//! Route address resolution
//!
//! | Address            | Result                                |
//! |--------------------|---------------------------------------|
//! | `/`                | redirect to the default document      |
//! | `/docs/<known id>` | the document                          |
//! | `/docs/<other>`    | document-not-found presentation       |
//! | anything else      | page-not-found presentation           |

use crate::identifier::{route_path, DocumentEntry};
use crate::registry::Registry;

/// What a route address resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route<'a> {
    /// Redirect to this address
    Redirect(String),

    /// A registered document
    Document(&'a DocumentEntry),

    /// The address has the document shape but no such id is registered
    DocumentNotFound(String),

    /// The address matches no route at all
    PageNotFound,
}

impl Registry {
    /// Resolve a route address. Query strings and fragments are ignored.
    pub fn route(&self, address: &str) -> Route<'_> {
        let path = address
            .split(['?', '#'])
            .next()
            .unwrap_or_default();
        let path = match path.strip_suffix('/') {
            Some(trimmed) if !trimmed.is_empty() => trimmed,
            _ => path,
        };

        if path == "/" || path.is_empty() {
            let config = self.config();
            return Route::Redirect(route_path(&config.route_prefix, &config.default_document));
        }

        let Some(slug) = path.strip_prefix(self.config().route_prefix.as_str()) else {
            return Route::PageNotFound;
        };
        if slug.is_empty() || slug.contains('/') {
            return Route::PageNotFound;
        }

        match self.resolve(slug) {
            Some(entry) => Route::Document(entry),
            None => Route::DocumentNotFound(slug.to_string()),
        }
    }
}
