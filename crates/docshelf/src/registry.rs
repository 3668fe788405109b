//! The content registry
//!
//! Built once from the discovery collection and read-only afterwards:
//!
//! ```text
//! (path, loader) → normalize → classify → category lists → priority sort
//!                                   └────→ id → loader (every id, even excluded)
//! ```

use indexmap::map::Entry;
use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::classify::{Classification, Classifier};
use crate::config::RegistryConfig;
use crate::content::DeferredLoader;
use crate::error::ConfigError;
use crate::identifier::{ContentReference, DocumentEntry};
use crate::linear::{LinearSequence, Pagination};
use crate::ordering::PriorityOrder;
use crate::sidebar::Sidebar;

/// A named, ordered group of documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    /// Display name
    pub name: String,

    /// Entries in display order
    pub entries: Vec<DocumentEntry>,
}

impl Category {
    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the category has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Ids in display order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.id.as_str())
    }
}

/// Two references normalized to the same id; the later one was dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateIdentifier {
    /// The contested id
    pub id: String,

    /// Path of the reference that was kept
    pub kept: String,

    /// Path of the reference that was shadowed
    pub shadowed: String,
}

/// One registered document.
#[derive(Debug, Clone)]
pub struct RegisteredDocument {
    /// Normalized entry
    pub entry: DocumentEntry,

    /// Where it was discovered
    pub source: ContentReference,

    /// Where it was classified
    pub classification: Classification,

    /// Deferred body loader
    pub loader: DeferredLoader,
}

/// Everything a page view needs besides the document body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageView<'a> {
    /// The resolved document
    pub entry: &'a DocumentEntry,

    /// Linear predecessor and successor
    pub pagination: Pagination<'a>,
}

/// The immutable category mapping plus the id → loader lookup.
#[derive(Debug, Clone)]
pub struct Registry {
    config: RegistryConfig,
    categories: Vec<Category>,
    documents: IndexMap<String, RegisteredDocument>,
    duplicates: Vec<DuplicateIdentifier>,
}

impl Registry {
    /// Build a registry from a discovery collection.
    ///
    /// # Errors
    ///
    /// Returns the validation error if `config` is not a total, disjoint
    /// partition. Duplicate ids are not errors; see [`Registry::duplicates`].
    pub fn build<I, R>(config: RegistryConfig, references: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (R, DeferredLoader)>,
        R: Into<ContentReference>,
    {
        let mut builder = RegistryBuilder::new(config)?;
        for (reference, loader) in references {
            builder.add(reference, loader);
        }
        Ok(builder.finish())
    }

    /// The configuration this registry was built with.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Categories in declaration order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Look up a category by name.
    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// Resolve an id to its entry without loading anything.
    ///
    /// The excluded document resolves like any other.
    pub fn resolve(&self, id: &str) -> Option<&DocumentEntry> {
        self.documents.get(id).map(|doc| &doc.entry)
    }

    /// Full registration record for an id.
    pub fn document(&self, id: &str) -> Option<&RegisteredDocument> {
        self.documents.get(id)
    }

    /// The deferred loader registered for an id.
    pub fn loader(&self, id: &str) -> Option<&DeferredLoader> {
        self.documents.get(id).map(|doc| &doc.loader)
    }

    /// Whether an id is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.documents.contains_key(id)
    }

    /// Every registered document in discovery order.
    pub fn documents(&self) -> impl Iterator<Item = &RegisteredDocument> {
        self.documents.values()
    }

    /// Number of registered documents, excluded one included.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether nothing was registered.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Collisions shadowed during construction.
    pub fn duplicates(&self) -> &[DuplicateIdentifier] {
        &self.duplicates
    }

    /// Flatten categories into the pagination order.
    pub fn linear(&self) -> LinearSequence<'_> {
        LinearSequence::from_categories(&self.categories)
    }

    /// Previous/next for `id`; both `None` when `id` is not listed.
    pub fn navigate(&self, id: &str) -> Pagination<'_> {
        self.linear().navigate(id)
    }

    /// Entry plus pagination for a page view, or `None` if `id` is unknown.
    pub fn page(&self, id: &str) -> Option<PageView<'_>> {
        let entry = self.resolve(id)?;
        Some(PageView {
            entry,
            pagination: self.navigate(id),
        })
    }

    /// Category export for navigation chrome.
    pub fn sidebar(&self) -> Sidebar {
        Sidebar::from_categories(&self.categories)
    }
}

/// Incremental registry construction.
///
/// Loaders are captured, never invoked.
#[derive(Debug)]
pub struct RegistryBuilder {
    config: RegistryConfig,
    classifier: Classifier,
    working: Vec<Vec<DocumentEntry>>,
    documents: IndexMap<String, RegisteredDocument>,
    duplicates: Vec<DuplicateIdentifier>,
}

impl RegistryBuilder {
    /// Validate `config` and start an empty builder.
    pub fn new(config: RegistryConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            classifier: Classifier::new(&config),
            working: vec![Vec::new(); config.categories.len()],
            documents: IndexMap::new(),
            duplicates: Vec::new(),
            config,
        })
    }

    /// Register one reference. Returns `false` if its id was already taken,
    /// in which case the earlier registration wins.
    pub fn add(&mut self, reference: impl Into<ContentReference>, loader: DeferredLoader) -> bool {
        let reference = reference.into();
        let entry = DocumentEntry::from_reference(&reference, &self.config.route_prefix);

        match self.documents.entry(entry.id.clone()) {
            Entry::Occupied(existing) => {
                let kept = existing.get().source.path().to_string();
                warn!(
                    id = %entry.id,
                    kept = %kept,
                    shadowed = %reference.path(),
                    "duplicate document id; keeping first occurrence"
                );
                self.duplicates.push(DuplicateIdentifier {
                    id: entry.id,
                    kept,
                    shadowed: reference.path().to_string(),
                });
                false
            }
            Entry::Vacant(slot) => {
                let classification = self.classifier.classify(&entry.id);
                match classification {
                    Classification::Excluded => {
                        debug!(id = %entry.id, "excluded from navigation");
                    }
                    Classification::Category(index) => {
                        debug!(
                            id = %entry.id,
                            category = %self.config.categories[index].name,
                            "classified"
                        );
                        self.working[index].push(entry.clone());
                    }
                }
                slot.insert(RegisteredDocument {
                    entry,
                    source: reference,
                    classification,
                    loader,
                });
                true
            }
        }
    }

    /// Apply each category's priority order and freeze the registry.
    pub fn finish(self) -> Registry {
        let categories: Vec<Category> = self
            .config
            .categories
            .iter()
            .zip(self.working)
            .map(|(declared, mut entries)| {
                PriorityOrder::new(declared.priority.iter().cloned()).sort(&mut entries);
                Category {
                    name: declared.name.clone(),
                    entries,
                }
            })
            .collect();

        info!(
            documents = self.documents.len(),
            categories = categories.len(),
            duplicates = self.duplicates.len(),
            "registry built"
        );

        Registry {
            config: self.config,
            categories,
            documents: self.documents,
            duplicates: self.duplicates,
        }
    }
}
