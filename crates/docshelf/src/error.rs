//! Error types for registry configuration, discovery and loading

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for docshelf operations
#[derive(Error, Debug)]
pub enum DocshelfError {
    /// Configuration could not be read or is invalid
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The content root could not be enumerated
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),

    /// A document body failed to load
    #[error(transparent)]
    Load(#[from] LoadError),
}

/// Errors raised while reading or validating a [`RegistryConfig`](crate::RegistryConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read
    #[error("Failed to read config {path}: {source}")]
    Read {
        /// Path that was read
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The config text is not valid JSON for the schema
    #[error("Malformed config: {0}")]
    Parse(#[from] serde_json::Error),

    /// No categories were declared
    #[error("Config declares no categories")]
    NoCategories,

    /// Two categories share a name
    #[error("Category '{name}' is declared more than once")]
    DuplicateCategory {
        /// The repeated category name
        name: String,
    },

    /// Categories without an explicit member set must number exactly one
    #[error("Expected exactly one default category, found {found}")]
    DefaultCategoryCount {
        /// Number of categories declared without members
        found: usize,
    },

    /// The reserved identifier also appears in a member set
    #[error("Excluded id '{id}' must not be a member of category '{category}'")]
    ExcludedIsMember {
        /// The reserved identifier
        id: String,
        /// Category whose member set names it
        category: String,
    },

    /// An id is claimed by two explicit member sets
    #[error("Id '{id}' is a member of both '{first}' and '{second}'")]
    OverlappingMembers {
        /// The contested identifier
        id: String,
        /// Category declared first
        first: String,
        /// Category declared later
        second: String,
    },
}

/// Errors raised while enumerating a content root.
#[derive(Error, Debug)]
#[error("Failed to scan content root {root}: {source}")]
pub struct DiscoveryError {
    /// The directory being scanned
    pub root: PathBuf,
    /// Underlying I/O error
    pub source: std::io::Error,
}

/// Failure of a deferred loader.
///
/// Cloneable so that every caller waiting on the same in-flight load
/// observes the same failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// The loader reported a failure
    #[error("Failed to load '{id}': {message}")]
    Failed {
        /// Document identifier
        id: String,
        /// Loader-supplied message
        message: String,
    },

    /// The loader task was torn down before it produced a result
    #[error("Load of '{id}' was aborted")]
    Aborted {
        /// Document identifier
        id: String,
    },
}

impl LoadError {
    /// Build a [`LoadError::Failed`] from any displayable cause.
    pub fn failed(id: impl Into<String>, cause: impl std::fmt::Display) -> Self {
        LoadError::Failed {
            id: id.into(),
            message: cause.to_string(),
        }
    }

    /// Identifier of the document that failed.
    pub fn id(&self) -> &str {
        match self {
            LoadError::Failed { id, .. } | LoadError::Aborted { id } => id,
        }
    }
}

/// Result type alias for docshelf operations
pub type Result<T> = std::result::Result<T, DocshelfError>;
