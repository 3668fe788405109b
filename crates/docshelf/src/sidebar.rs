//! Category export for navigation chrome

use serde::Serialize;

use crate::registry::Category;

/// One navigation link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SidebarLink {
    /// Route address
    pub path: String,

    /// Display label
    pub label: String,
}

/// One category header and its links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SidebarSection {
    /// Category name
    pub name: String,

    /// Links in display order
    pub links: Vec<SidebarLink>,
}

/// The full category mapping, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Sidebar {
    /// Sections in declaration order
    pub sections: Vec<SidebarSection>,
}

impl Sidebar {
    /// Project categories into links.
    pub fn from_categories(categories: &[Category]) -> Self {
        let sections = categories
            .iter()
            .map(|category| SidebarSection {
                name: category.name.clone(),
                links: category
                    .entries
                    .iter()
                    .map(|entry| SidebarLink {
                        path: entry.route_path.clone(),
                        label: entry.title.clone(),
                    })
                    .collect(),
            })
            .collect();
        Self { sections }
    }

    /// Look up a section by category name.
    pub fn section(&self, name: &str) -> Option<&SidebarSection> {
        self.sections.iter().find(|s| s.name == name)
    }

    /// Render as JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
