//! Error types for TokenSwap.

use thiserror::Error;

/// A shared error type for the entire TokenSwap workspace.
///
/// Skipped actors during a model swap and unresolvable references are *not*
/// errors; they are reported through [`crate::swap::SwapReport`] and the
/// resolver fallback respectively.
#[derive(Error, Debug, Clone)]
pub enum SwapError {
    /// Network, status or parse failure while talking to the remote catalog
    #[error("Error fetching data from HeroForge: {message}")]
    CatalogFetch { message: String, is_retryable: bool },

    /// No bearer token configured
    #[error("No auth key provided. Please configure the auth key in the module settings.")]
    MissingAuthKey,

    /// The catalog browser was confirmed without a selection
    #[error("No file selected.")]
    NoSelection,

    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// The host application rejected an operation
    #[error("Host error: {0}")]
    Host(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl SwapError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a retryable CatalogFetch error
    pub fn catalog_fetch(message: impl Into<String>) -> Self {
        Self::CatalogFetch {
            message: message.into(),
            is_retryable: true,
        }
    }

    /// Creates a CatalogFetch error that another attempt cannot fix
    /// (rejected credentials)
    pub fn catalog_rejected(message: impl Into<String>) -> Self {
        Self::CatalogFetch {
            message: message.into(),
            is_retryable: false,
        }
    }

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a Host error
    pub fn host(message: impl Into<String>) -> Self {
        Self::Host(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a catalog fetch error
    pub fn is_catalog_fetch(&self) -> bool {
        matches!(self, Self::CatalogFetch { .. })
    }

    /// Check if repeating the failed operation may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::CatalogFetch {
                is_retryable: true,
                ..
            }
        )
    }

    /// Check if this is a missing auth key error
    pub fn is_missing_auth_key(&self) -> bool {
        matches!(self, Self::MissingAuthKey)
    }

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a serialization error
    pub fn is_serialization(&self) -> bool {
        matches!(self, Self::Serialization { .. })
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for SwapError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for SwapError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for SwapError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for SwapError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<anyhow::Error> for SwapError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// A type alias for `Result<T, SwapError>`.
pub type Result<T> = std::result::Result<T, SwapError>;
