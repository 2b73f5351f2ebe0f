//! Resource library configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Where support content is loaded from
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ResourcesConfig {
    /// YAML file replacing the embedded library
    pub library_path: Option<PathBuf>,
}

impl ResourcesConfig {
    /// Validate resources configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        match &self.library_path {
            Some(path) if path.as_os_str().is_empty() => Err(ValidationError::EmptyLibraryPath),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_library_by_default() {
        let config = ResourcesConfig::default();
        assert!(config.library_path.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_path_is_rejected() {
        let config = ResourcesConfig {
            library_path: Some(PathBuf::new()),
        };
        assert_eq!(config.validate(), Err(ValidationError::EmptyLibraryPath));
    }
}
