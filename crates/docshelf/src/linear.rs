//! Linear sequence and previous/next navigation

use serde::Serialize;

use crate::identifier::DocumentEntry;
use crate::registry::Category;

/// All listed entries, categories in declaration order, each pre-sorted.
///
/// Borrowed from the registry and recomputed on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinearSequence<'a> {
    entries: Vec<&'a DocumentEntry>,
}

impl<'a> LinearSequence<'a> {
    /// Concatenate category entries in order.
    pub fn from_categories(categories: &'a [Category]) -> Self {
        Self {
            entries: categories.iter().flat_map(|c| c.entries.iter()).collect(),
        }
    }

    /// Number of listed entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is listed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in pagination order.
    pub fn iter(&self) -> impl Iterator<Item = &'a DocumentEntry> + '_ {
        self.entries.iter().copied()
    }

    /// Entry at `index`.
    pub fn get(&self, index: usize) -> Option<&'a DocumentEntry> {
        self.entries.get(index).copied()
    }

    /// Position of `id`.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }

    /// Linear neighbours of `id`. Unlisted ids get no pagination.
    pub fn navigate(&self, id: &str) -> Pagination<'a> {
        let Some(index) = self.position(id) else {
            return Pagination::default();
        };
        Pagination {
            previous: index.checked_sub(1).and_then(|i| self.get(i)),
            next: self.get(index + 1),
        }
    }
}

impl<'a> IntoIterator for LinearSequence<'a> {
    type Item = &'a DocumentEntry;
    type IntoIter = std::vec::IntoIter<&'a DocumentEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Previous/next pagination links.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Pagination<'a> {
    /// Linear predecessor
    pub previous: Option<&'a DocumentEntry>,

    /// Linear successor
    pub next: Option<&'a DocumentEntry>,
}

impl Pagination<'_> {
    /// Whether neither link exists.
    pub fn is_empty(&self) -> bool {
        self.previous.is_none() && self.next.is_none()
    }
}
