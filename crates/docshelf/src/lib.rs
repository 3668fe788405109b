//! # Docshelf
//!
//! Content registry and navigation ordering for documentation viewers.
//!
//! Docshelf takes the set of discovered content documents, sorts them into
//! named categories, orders each category by an explicit priority list,
//! flattens the result for previous/next pagination, and loads each
//! document's body on demand.
//!
//! ## Architecture
//!
//! ```text
//! (path, loader) → Identifier → Classifier + Ordering → Registry
//!                                                         │
//!                       LinearSequence / Pagination ←─────┤
//!                       Resolver (deferred loads)   ←─────┘
//! ```
//!
//! - **Registry**: built once, read-only afterwards
//! - **Resolver**: the only component doing asynchronous work
//! - **ViewSession**: discards load results for superseded navigations
//!
//! ## Example
//!
//! ```
//! use docshelf::{DeferredLoader, Registry, RegistryConfig};
//!
//! let docs = ["getting-started.mdx", "media-flow.mdx", "architecture.mdx"]
//!     .into_iter()
//!     .map(|path| (path, DeferredLoader::from_static("...")));
//! let registry = Registry::build(RegistryConfig::default(), docs).unwrap();
//!
//! let nav = registry.navigate("architecture");
//! assert_eq!(nav.previous.unwrap().id, "getting-started");
//! assert_eq!(nav.next.unwrap().id, "media-flow");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod classify;
pub mod config;
pub mod content;
pub mod discovery;
pub mod error;
pub mod identifier;
pub mod linear;
pub mod ordering;
pub mod registry;
pub mod resolver;
pub mod routes;
pub mod sidebar;
pub mod view;

// Re-export main types
pub use classify::{Classification, Classifier};
pub use config::{CategorySpec, RegistryConfig};
pub use content::{BoxError, Content, DeferredLoader, LoadFuture};
pub use discovery::discover;
pub use error::{ConfigError, DiscoveryError, DocshelfError, LoadError, Result};
pub use identifier::{normalize, ContentReference, DocumentEntry};
pub use linear::{LinearSequence, Pagination};
pub use ordering::{sort_by_priority, PriorityOrder};
pub use registry::{
    Category, DuplicateIdentifier, PageView, RegisteredDocument, Registry, RegistryBuilder,
};
pub use resolver::{LoadOutcome, LoadState, Resolver};
pub use routes::Route;
pub use sidebar::{Sidebar, SidebarLink, SidebarSection};
pub use view::{ViewSession, ViewState, ViewTicket};

/// Docshelf version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_exists() {
        assert!(!VERSION.is_empty());
    }
}
