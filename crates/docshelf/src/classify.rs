//! Category classification
//!
//! Predicates are evaluated in a fixed priority order: the reserved
//! exclusion first, then each explicit member set in declaration order,
//! then the fallthrough category.

use std::collections::HashSet;

use crate::config::RegistryConfig;

/// Outcome of classifying one identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// The reserved id; loadable but never listed
    Excluded,

    /// Index of the owning category in declaration order
    Category(usize),
}

impl Classification {
    /// The category index, if any.
    pub fn category(self) -> Option<usize> {
        match self {
            Classification::Excluded => None,
            Classification::Category(index) => Some(index),
        }
    }
}

/// Compiled predicate table.
#[derive(Debug, Clone)]
pub struct Classifier {
    excluded: Option<String>,
    member_sets: Vec<(usize, HashSet<String>)>,
    fallback: usize,
}

impl Classifier {
    /// Compile the predicate table from a config.
    ///
    /// The config is expected to have passed
    /// [`RegistryConfig::validate`]; if no fallthrough category is declared
    /// the first category receives unclaimed ids.
    pub fn new(config: &RegistryConfig) -> Self {
        let member_sets = config
            .categories
            .iter()
            .enumerate()
            .filter_map(|(index, category)| {
                category
                    .members
                    .as_ref()
                    .map(|members| (index, members.iter().cloned().collect()))
            })
            .collect();

        let fallback = config
            .categories
            .iter()
            .position(|c| c.is_fallback())
            .unwrap_or(0);

        Self {
            excluded: config.excluded.clone(),
            member_sets,
            fallback,
        }
    }

    /// Assign `id` to exactly one category, or exclude it.
    pub fn classify(&self, id: &str) -> Classification {
        if self.excluded.as_deref() == Some(id) {
            return Classification::Excluded;
        }

        for (index, members) in &self.member_sets {
            if members.contains(id) {
                return Classification::Category(*index);
            }
        }

        Classification::Category(self.fallback)
    }

    /// The reserved excluded id, if configured.
    pub fn excluded(&self) -> Option<&str> {
        self.excluded.as_deref()
    }
}
