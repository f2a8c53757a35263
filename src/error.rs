use thiserror::Error;

/// Errors surfaced by registry construction and discovery.
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("invalid registry name '{0}': only alphanumeric characters and hyphens are allowed")]
    InvalidName(String),

    #[error("unsupported registry backend '{0}'")]
    UnsupportedBackend(String),

    #[error("invalid filter pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("registry request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    Http {
        status: reqwest::StatusCode,
        url: String,
    },

    #[error("failed to decode spec label: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("failed to parse spec metadata: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error("failed to parse registry response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RegistryError {
    /// Whether this error must halt broker startup.
    ///
    /// An unrecognized backend type with no injected adapter leaves the
    /// registry ill-defined; the caller must not continue past it. Every
    /// other variant is recoverable or subject to per-registry fail policy.
    pub fn is_fatal(&self) -> bool {
        matches!(self, RegistryError::UnsupportedBackend(_))
    }
}

pub type Result<T> = std::result::Result<T, RegistryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_backend_is_fatal() {
        assert!(RegistryError::UnsupportedBackend("quay".to_string()).is_fatal());
    }

    #[test]
    fn invalid_name_is_recoverable() {
        assert!(!RegistryError::InvalidName("bad_name".to_string()).is_fatal());
    }
}
