//! Static Resource Library Adapter
//!
//! Serves support content from a YAML document keyed by category. The
//! default document is embedded in the binary via `include_str!`; a file
//! on disk can replace it wholesale. Entries are read-only after loading.

use std::collections::HashMap;
use std::path::Path;

use crate::domain::resources::{ResourceCategory, ResourceEntry};
use crate::ports::{ResourceError, ResourceLibrary};

const EMBEDDED_LIBRARY: &str = include_str!("default_library.yaml");

/// In-memory resource library loaded once at startup.
#[derive(Debug, Clone)]
pub struct StaticResourceLibrary {
    entries: HashMap<ResourceCategory, ResourceEntry>,
}

impl StaticResourceLibrary {
    /// Loads the library shipped with the binary.
    pub fn embedded() -> Result<Self, ResourceError> {
        Self::from_yaml_str(EMBEDDED_LIBRARY)
    }

    /// Parses a YAML document. The document must contain a `CRISIS` entry.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ResourceError> {
        let entries: HashMap<ResourceCategory, ResourceEntry> =
            serde_yaml::from_str(yaml).map_err(|e| ResourceError::Malformed(e.to_string()))?;

        match entries.get(&ResourceCategory::Crisis) {
            Some(crisis) if !crisis.contacts.is_empty() => Ok(Self { entries }),
            Some(_) => Err(ResourceError::Malformed(
                "CRISIS entry has no contacts".to_string(),
            )),
            None => Err(ResourceError::Malformed("missing CRISIS entry".to_string())),
        }
    }

    /// Loads a YAML document from disk.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ResourceError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path)
            .map_err(|e| ResourceError::Io(format!("{}: {}", path.display(), e)))?;
        Self::from_yaml_str(&yaml)
    }

    /// Builds a library from entries without validation (useful for tests).
    pub fn from_entries(entries: impl IntoIterator<Item = (ResourceCategory, ResourceEntry)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Categories that have an entry.
    pub fn categories(&self) -> Vec<ResourceCategory> {
        let mut categories: Vec<_> = self.entries.keys().copied().collect();
        categories.sort();
        categories
    }
}

impl ResourceLibrary for StaticResourceLibrary {
    fn lookup(&self, category: ResourceCategory) -> Result<ResourceEntry, ResourceError> {
        self.entries
            .get(&category)
            .cloned()
            .ok_or(ResourceError::NotFound(category))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn embedded_library_covers_every_category() {
        let library = StaticResourceLibrary::embedded().unwrap();
        assert_eq!(library.categories(), ResourceCategory::ALL.to_vec());
    }

    #[test]
    fn crisis_lookup_is_idempotent() {
        let library = StaticResourceLibrary::embedded().unwrap();
        let first = library.lookup(ResourceCategory::Crisis).unwrap();
        let second = library.lookup(ResourceCategory::Crisis).unwrap();
        assert_eq!(first, second);
        assert!(first.render_block().contains("988"));
    }

    #[test]
    fn missing_category_is_not_found() {
        let library = StaticResourceLibrary::from_entries(Vec::new());
        assert_eq!(
            library.lookup(ResourceCategory::SleepHygiene),
            Err(ResourceError::NotFound(ResourceCategory::SleepHygiene))
        );
    }

    #[test]
    fn document_without_crisis_is_rejected() {
        let yaml = "SLEEP_HYGIENE:\n  title: Sleep\n  body: Rest well\n";
        assert!(matches!(
            StaticResourceLibrary::from_yaml_str(yaml),
            Err(ResourceError::Malformed(_))
        ));
    }

    #[test]
    fn unknown_category_key_is_malformed() {
        let yaml = "CRISIS:\n  title: t\n  body: b\n  contacts:\n    - name: n\n      detail: d\nPODCASTS:\n  title: t\n  body: b\n";
        assert!(matches!(
            StaticResourceLibrary::from_yaml_str(yaml),
            Err(ResourceError::Malformed(_))
        ));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "CRISIS:\n  title: Local help\n  body: Call now\n  contacts:\n    - name: Local line\n      detail: \"555-0100\""
        )
        .unwrap();

        let library = StaticResourceLibrary::from_file(file.path()).unwrap();
        let entry = library.lookup(ResourceCategory::Crisis).unwrap();
        assert_eq!(entry.render_block(), "Local help\nCall now\n- Local line: 555-0100");
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = StaticResourceLibrary::from_file(dir.path().join("absent.yaml"));
        assert!(matches!(result, Err(ResourceError::Io(_))));
    }
}
