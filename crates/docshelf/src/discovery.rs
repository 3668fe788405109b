//! Filesystem discovery
//!
//! Stands in for a build-time glob: every `*.<extension>` file directly
//! inside a content root becomes a `(path, loader)` pair. Paths are sorted
//! so discovery order, and with it the order of unlisted documents, is
//! deterministic.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::RegistryConfig;
use crate::content::DeferredLoader;
use crate::error::{DiscoveryError, DocshelfError};
use crate::identifier::ContentReference;
use crate::registry::Registry;

/// Enumerate content files under `root` with the given extension.
pub fn discover(
    root: impl AsRef<Path>,
    extension: &str,
) -> Result<Vec<(ContentReference, DeferredLoader)>, DiscoveryError> {
    let root = root.as_ref();
    let to_error = |source: std::io::Error| DiscoveryError {
        root: root.to_path_buf(),
        source,
    };

    let mut paths: Vec<PathBuf> = Vec::new();
    for entry in std::fs::read_dir(root).map_err(to_error)? {
        let path = entry.map_err(to_error)?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == extension) {
            paths.push(path);
        }
    }
    paths.sort();
    debug!(root = %root.display(), count = paths.len(), "discovered content files");

    Ok(paths
        .into_iter()
        .map(|path| {
            let reference = ContentReference::new(path.to_string_lossy().into_owned());
            (reference, DeferredLoader::from_file(path))
        })
        .collect())
}

impl Registry {
    /// Discover content under `root` and build a registry from it.
    pub fn from_dir(config: RegistryConfig, root: impl AsRef<Path>) -> crate::Result<Self> {
        let references = discover(root, &config.extension)?;
        Registry::build(config, references).map_err(DocshelfError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_discover_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.mdx"), "b").unwrap();
        fs::write(dir.path().join("a.mdx"), "a").unwrap();
        fs::write(dir.path().join("notes.txt"), "skip").unwrap();
        fs::create_dir(dir.path().join("nested.mdx")).unwrap();

        let found = discover(dir.path(), "mdx").unwrap();
        let ids: Vec<String> = found.iter().map(|(r, _)| r.normalize().0).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_discover_missing_root() {
        let err = discover("/definitely/not/a/dir", "mdx").unwrap_err();
        assert_eq!(err.root, PathBuf::from("/definitely/not/a/dir"));
    }
}
