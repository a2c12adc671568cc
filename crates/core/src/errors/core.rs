use crate::config::ConfigError;
use thiserror::Error;

/// Error type for container registration and resolution
#[derive(Debug, Error)]
pub enum ContainerError {
    #[error("No item \"{key}\" available")]
    UnknownKey { key: String },

    #[error("{message}")]
    InvalidPayload { message: String },

    #[error("Protected item \"{key}\" cannot be extended")]
    ProtectedItem { key: String },

    #[error("Cyclic resolution detected: {path}")]
    CyclicResolution { path: String },

    #[error("Resolution of \"{key}\" exceeded the maximum depth of {limit}")]
    ResolutionDepthExceeded { key: String, limit: usize },

    #[error("Item \"{key}\" does not resolve to {expected}")]
    TypeMismatch { key: String, expected: &'static str },

    #[error("Service \"{key}\" failed: {source}")]
    Service {
        key: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Invalid container configuration: {0}")]
    Config(#[from] ConfigError),
}

impl ContainerError {
    /// Create an unknown key error
    pub fn unknown_key(key: impl Into<String>) -> Self {
        Self::UnknownKey { key: key.into() }
    }

    /// Create an invalid payload error
    pub fn invalid_payload(message: impl Into<String>) -> Self {
        Self::InvalidPayload {
            message: message.into(),
        }
    }

    /// Create a protected item error
    pub fn protected_item(key: impl Into<String>) -> Self {
        Self::ProtectedItem { key: key.into() }
    }

    /// Wrap an application error raised inside a factory or extension
    pub fn service(
        key: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Service {
            key: key.into(),
            source: source.into(),
        }
    }

    pub(crate) fn not_extendable(key: &str) -> Self {
        Self::invalid_payload(format!(
            "Item \"{}\" is not a closure or invokable object and cannot be extended",
            key
        ))
    }

    pub(crate) fn extension_not_invokable() -> Self {
        Self::invalid_payload("The extension is not a closure or invokable object")
    }

    /// Check if the error is an unknown key error
    pub fn is_unknown_key(&self) -> bool {
        matches!(self, Self::UnknownKey { .. })
    }

    /// Check if the error is an invalid payload error
    pub fn is_invalid_payload(&self) -> bool {
        matches!(self, Self::InvalidPayload { .. })
    }

    /// Check if the error is a protected item error
    pub fn is_protected_item(&self) -> bool {
        matches!(self, Self::ProtectedItem { .. })
    }

    /// Check if resolution was aborted by the cycle guard
    pub fn is_cyclic(&self) -> bool {
        matches!(
            self,
            Self::CyclicResolution { .. } | Self::ResolutionDepthExceeded { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, ContainerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_match_container_wording() {
        assert_eq!(
            ContainerError::unknown_key("someKey").to_string(),
            "No item \"someKey\" available"
        );
        assert_eq!(
            ContainerError::protected_item("protected").to_string(),
            "Protected item \"protected\" cannot be extended"
        );
        assert_eq!(
            ContainerError::not_extendable("nonInvokable").to_string(),
            "Item \"nonInvokable\" is not a closure or invokable object and cannot be extended"
        );
        assert_eq!(
            ContainerError::extension_not_invokable().to_string(),
            "The extension is not a closure or invokable object"
        );
    }

    #[test]
    fn test_predicates() {
        assert!(ContainerError::unknown_key("a").is_unknown_key());
        assert!(ContainerError::extension_not_invokable().is_invalid_payload());
        assert!(ContainerError::protected_item("a").is_protected_item());
        assert!(ContainerError::CyclicResolution { path: "a -> a".into() }.is_cyclic());
        assert!(!ContainerError::unknown_key("a").is_cyclic());
    }

    #[test]
    fn test_service_error_keeps_source() {
        let err = ContainerError::service("db", "connection refused");
        assert_eq!(err.to_string(), "Service \"db\" failed: connection refused");
        assert!(std::error::Error::source(&err).is_some());
    }
}
