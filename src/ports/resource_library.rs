//! Resource Library Port - Interface for static support content.
//!
//! The library is owned outside the core and consulted read-only. Crisis
//! responses embed its `CRISIS` entry verbatim.

use crate::domain::foundation::ErrorCode;
use crate::domain::resources::{ResourceCategory, ResourceEntry};

/// Errors that can occur when reading the library.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResourceError {
    #[error("No resource for category: {0}")]
    NotFound(ResourceCategory),

    #[error("Malformed resource library: {0}")]
    Malformed(String),

    #[error("IO error: {0}")]
    Io(String),
}

impl ResourceError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ResourceError::NotFound(_) => ErrorCode::ResourceNotFound,
            ResourceError::Malformed(_) | ResourceError::Io(_) => ErrorCode::InternalError,
        }
    }
}

/// Port for looking up support content by category.
pub trait ResourceLibrary: Send + Sync {
    /// Returns the entry stored under `category`.
    ///
    /// # Errors
    /// Returns `ResourceError::NotFound` when the library has no entry.
    fn lookup(&self, category: ResourceCategory) -> Result<ResourceEntry, ResourceError>;
}
