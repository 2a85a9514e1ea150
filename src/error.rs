use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScalerError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Failed to get transform url. status: {status}, text: {text}")]
    Sign { status: u16, text: String },

    #[error("Failed to transform image. status: {status}, text: {text}")]
    Submission { status: u16, text: String },

    #[error("Failed to download image. status: {status}, text: {text}")]
    Download { status: u16, text: String },

    #[error("Failed to download image: {0}")]
    DownloadFailed(String),

    #[error("Unexpected service response: {0}")]
    UnexpectedResponse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ScalerError {
    /// HTTP status reported by the remote side, when the failure came from one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ScalerError::Sign { status, .. }
            | ScalerError::Submission { status, .. }
            | ScalerError::Download { status, .. } => Some(*status),
            ScalerError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ScalerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_carry_status_and_text() {
        let err = ScalerError::Sign {
            status: 403,
            text: "forbidden".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Failed to get transform url. status: 403, text: forbidden"
        );
        assert_eq!(err.status(), Some(403));
    }

    #[test]
    fn test_download_failures_share_a_prefix() {
        let by_status = ScalerError::Download {
            status: 404,
            text: "gone".to_string(),
        };
        let by_transport = ScalerError::DownloadFailed("connection refused".to_string());
        assert!(by_status.to_string().starts_with("Failed to download image"));
        assert!(by_transport.to_string().starts_with("Failed to download image"));
        assert_eq!(by_transport.status(), None);
    }

    #[test]
    fn test_validation_has_no_status() {
        let err = ScalerError::Validation("No destination provided".to_string());
        assert_eq!(err.status(), None);
    }
}
