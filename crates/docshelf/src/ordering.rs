//! Priority-list ordering within a category

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::identifier::DocumentEntry;

/// Comparator built from one category's priority list.
///
/// Listed ids sort by their position in the list; listed ids sort before
/// unlisted ones; unlisted ids compare equal so a stable sort keeps their
/// discovery order.
#[derive(Debug, Clone, Default)]
pub struct PriorityOrder {
    ranks: HashMap<String, usize>,
}

impl PriorityOrder {
    /// Build from a priority list. A repeated id keeps its first position.
    pub fn new<I, S>(priority: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut ranks = HashMap::new();
        for (index, id) in priority.into_iter().enumerate() {
            ranks.entry(id.into()).or_insert(index);
        }
        Self { ranks }
    }

    /// Position of `id` in the priority list.
    pub fn rank(&self, id: &str) -> Option<usize> {
        self.ranks.get(id).copied()
    }

    /// Compare two ids.
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        match (self.rank(a), self.rank(b)) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }

    /// Sort entries in place. `sort_by` is stable.
    pub fn sort(&self, entries: &mut [DocumentEntry]) {
        entries.sort_by(|a, b| self.compare(&a.id, &b.id));
    }
}

/// Sort `entries` in place by `priority`.
pub fn sort_by_priority(entries: &mut [DocumentEntry], priority: &[String]) {
    PriorityOrder::new(priority.iter().cloned()).sort(entries);
}
