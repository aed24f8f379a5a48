use thiserror::Error;

/// Failure reported by the remote playback service.  Never fatal: the caller
/// logs it and keeps its last-known-good state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// The service answered with a non-success status.
    #[error("remote returned status {0}")]
    Status(u16),
    /// The request never produced a status (connect, TLS, timeout, body).
    #[error("transport error: {0}")]
    Transport(String),
}

impl ServiceError {
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ServiceError::Status(code) => Some(*code),
            ServiceError::Transport(_) => None,
        }
    }
}

impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => ServiceError::Status(status.as_u16()),
            None => ServiceError::Transport(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code() {
        assert_eq!(ServiceError::Status(204).status_code(), Some(204));
        assert_eq!(ServiceError::Transport("reset".into()).status_code(), None);
        assert_eq!(
            ServiceError::Status(401).to_string(),
            "remote returned status 401"
        );
    }
}
