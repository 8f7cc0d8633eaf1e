use http::StatusCode;
use thiserror::Error;

/// Errors from the upstream media server client
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("authentication rejected: {0}")]
    Auth(String),

    #[error("upstream responded with {status}: {body}")]
    Upstream { status: StatusCode, body: String },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl MediaError {
    /// Status reported by the upstream server, `None` when the request never got a response
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            MediaError::Upstream { status, .. } => Some(*status),
            MediaError::Auth(_) | MediaError::Transport(_) => None,
        }
    }

    /// Whether the upstream server refused the session token
    pub fn is_session_rejected(&self) -> bool {
        matches!(
            self.status(),
            Some(StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_statuses() {
        let err = MediaError::Upstream {
            status: StatusCode::UNAUTHORIZED,
            body: String::new(),
        };
        assert!(err.is_session_rejected());

        let err = MediaError::Upstream {
            status: StatusCode::FORBIDDEN,
            body: String::new(),
        };
        assert!(err.is_session_rejected());

        let err = MediaError::Upstream {
            status: StatusCode::BAD_GATEWAY,
            body: "oops".to_string(),
        };
        assert!(!err.is_session_rejected());
        assert_eq!(Some(StatusCode::BAD_GATEWAY), err.status());
    }

    #[test]
    fn auth_error_has_no_status() {
        let err = MediaError::Auth("bad credentials".to_string());
        assert_eq!(None, err.status());
        assert!(!err.is_session_rejected());
        assert_eq!("authentication rejected: bad credentials", err.to_string());
    }
}
