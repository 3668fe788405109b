//! Registry configuration
//!
//! The classification table and per-category priority lists are
//! configuration, not discovered data: changing where a document appears
//! means changing this table.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::identifier::DEFAULT_ROUTE_PREFIX;

/// Declaration of one navigation category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySpec {
    /// Display name
    pub name: String,

    /// Explicit member set. `None` marks the default category that
    /// receives every id no other category claims.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub members: Option<Vec<String>>,

    /// Desired display order; unlisted ids sort after these
    #[serde(default)]
    pub priority: Vec<String>,
}

impl CategorySpec {
    /// A fallthrough category with no explicit member set.
    pub fn fallback(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: None,
            priority: Vec::new(),
        }
    }

    /// A category whose membership is exactly `members`.
    pub fn with_members<I, S>(name: impl Into<String>, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            members: Some(members.into_iter().map(Into::into).collect()),
            priority: Vec::new(),
        }
    }

    /// Set the priority list.
    pub fn priority<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.priority = ids.into_iter().map(Into::into).collect();
        self
    }

    /// Whether this is the fallthrough category.
    pub fn is_fallback(&self) -> bool {
        self.members.is_none()
    }
}

/// Configuration for building a [`Registry`](crate::Registry).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Reserved id that is loadable but never listed in navigation
    pub excluded: Option<String>,

    /// Categories in declaration order
    pub categories: Vec<CategorySpec>,

    /// Id the root route redirects to
    pub default_document: String,

    /// Prefix for document route addresses
    pub route_prefix: String,

    /// File extension picked up by filesystem discovery
    pub extension: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            excluded: Some("api-reference".to_string()),
            categories: vec![
                CategorySpec::fallback("General").priority([
                    "getting-started",
                    "core-concepts",
                    "architecture",
                    "authentication",
                ]),
                CategorySpec::with_members(
                    "API",
                    ["authentication-flow", "media-flow", "subscription-flow"],
                )
                .priority(["media-flow", "authentication-flow", "subscription-flow"]),
            ],
            default_document: "getting-started".to_string(),
            route_prefix: DEFAULT_ROUTE_PREFIX.to_string(),
            extension: "mdx".to_string(),
        }
    }
}

impl RegistryConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// A configuration with no categories, to be filled in with
    /// [`with_category`](Self::with_category).
    pub fn empty() -> Self {
        Self {
            excluded: None,
            categories: Vec::new(),
            ..Self::default()
        }
    }

    /// Parse and validate a JSON config.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Set the reserved excluded id.
    pub fn with_excluded(mut self, id: impl Into<String>) -> Self {
        self.excluded = Some(id.into());
        self
    }

    /// Append a category after those already declared.
    pub fn with_category(mut self, category: CategorySpec) -> Self {
        self.categories.push(category);
        self
    }

    /// Set the document the root route redirects to.
    pub fn with_default_document(mut self, id: impl Into<String>) -> Self {
        self.default_document = id.into();
        self
    }

    /// Set the route prefix.
    pub fn with_route_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.route_prefix = prefix.into();
        self
    }

    /// Set the discovery file extension (without the dot).
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Look up a category declaration by name.
    pub fn category(&self, name: &str) -> Option<&CategorySpec> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// Check the table is a total, disjoint partition.
    ///
    /// # Errors
    ///
    /// - `NoCategories` if nothing is declared
    /// - `DuplicateCategory` if two categories share a name
    /// - `DefaultCategoryCount` unless exactly one category lacks members
    /// - `ExcludedIsMember` if the reserved id is claimed by a category
    /// - `OverlappingMembers` if two member sets share an id
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.categories.is_empty() {
            return Err(ConfigError::NoCategories);
        }

        let mut names: Vec<&str> = Vec::with_capacity(self.categories.len());
        for category in &self.categories {
            if names.contains(&category.name.as_str()) {
                return Err(ConfigError::DuplicateCategory {
                    name: category.name.clone(),
                });
            }
            names.push(&category.name);
        }

        let fallbacks = self.categories.iter().filter(|c| c.is_fallback()).count();
        if fallbacks != 1 {
            return Err(ConfigError::DefaultCategoryCount { found: fallbacks });
        }

        let mut owners: HashMap<&str, &str> = HashMap::new();
        for category in &self.categories {
            let Some(members) = &category.members else {
                continue;
            };
            for id in members {
                if self.excluded.as_deref() == Some(id.as_str()) {
                    return Err(ConfigError::ExcludedIsMember {
                        id: id.clone(),
                        category: category.name.clone(),
                    });
                }
                if let Some(first) = owners.insert(id, &category.name) {
                    if first != category.name {
                        return Err(ConfigError::OverlappingMembers {
                            id: id.clone(),
                            first: first.to_string(),
                            second: category.name.clone(),
                        });
                    }
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = RegistryConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.categories[0].name, "General");
        assert_eq!(config.categories[1].name, "API");
        assert_eq!(config.excluded.as_deref(), Some("api-reference"));
    }

    #[test]
    fn test_empty_config_rejected() {
        let err = RegistryConfig::empty().validate().unwrap_err();
        assert!(matches!(err, ConfigError::NoCategories));
    }

    #[test]
    fn test_two_fallbacks_rejected() {
        let config = RegistryConfig::empty()
            .with_category(CategorySpec::fallback("A"))
            .with_category(CategorySpec::fallback("B"));
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::DefaultCategoryCount { found: 2 }));
    }

    #[test]
    fn test_excluded_member_rejected() {
        let config = RegistryConfig::empty()
            .with_excluded("api-reference")
            .with_category(CategorySpec::fallback("General"))
            .with_category(CategorySpec::with_members("API", ["api-reference"]));
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::ExcludedIsMember { .. }));
    }

    #[test]
    fn test_overlapping_members_rejected() {
        let config = RegistryConfig::empty()
            .with_category(CategorySpec::fallback("General"))
            .with_category(CategorySpec::with_members("A", ["x"]))
            .with_category(CategorySpec::with_members("B", ["x"]));
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::OverlappingMembers { .. }));
    }

    #[test]
    fn test_json_partial_config_uses_defaults() {
        let config = RegistryConfig::from_json_str(
            r#"{ "categories": [ { "name": "Guides", "priority": ["intro"] } ] }"#,
        )
        .unwrap();
        assert_eq!(config.categories.len(), 1);
        assert_eq!(config.route_prefix, "/docs/");
        assert_eq!(config.default_document, "getting-started");
    }

    #[test]
    fn test_json_malformed_rejected() {
        let err = RegistryConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
