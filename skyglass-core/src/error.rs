use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

/// Failures of a single weather lookup.
#[derive(Debug, Error)]
pub enum LookupError {
    /// The provider answered, but could not resolve the location.
    #[error("location could not be resolved by the provider (status {status})")]
    NotFound { status: StatusCode },

    /// DNS, connect, timeout or body-read failures. Not distinguished further.
    #[error("failed to reach the weather provider: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("weather provider returned an unexpected payload: {0}")]
    MalformedPayload(#[from] serde_json::Error),
}

impl LookupError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, LookupError::NotFound { .. })
    }
}

/// Persistence failures. Logged by the stores, never returned to lookup callers.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failed for {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode stored value: {0}")]
    Encode(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_is_classified() {
        let err = LookupError::NotFound { status: StatusCode::NOT_FOUND };
        assert!(err.is_not_found());
        assert!(err.to_string().contains("404"));
    }

    #[test]
    fn malformed_payload_is_not_not_found() {
        let json_err = serde_json::from_str::<u8>("nope").unwrap_err();
        let err = LookupError::from(json_err);
        assert!(!err.is_not_found());
    }
}
