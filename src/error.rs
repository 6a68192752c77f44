use std::fmt;

use crate::constants::MAX_ERROR_DETAILS;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Upstream answered with a non-2xx status.
    Upstream {
        status: u16,
        status_text: String,
        details: String,
    },
    Transport(String),
    Decode(String),
}

impl ApiError {
    pub fn upstream(status: u16, status_text: impl Into<String>, details: &str) -> Self {
        Self::Upstream {
            status,
            status_text: status_text.into(),
            details: truncate_details(details),
        }
    }

    pub fn transport(message: impl fmt::Display) -> Self {
        Self::Transport(message.to_string())
    }

    pub fn decode(message: impl fmt::Display) -> Self {
        Self::Decode(message.to_string())
    }

    /// Status to report to our own caller. Anything that is not an upstream
    /// answer maps to 500.
    pub fn status(&self) -> u16 {
        match self {
            Self::Upstream { status, .. } => *status,
            _ => 500,
        }
    }

    pub fn is_forbidden(&self) -> bool {
        matches!(self, Self::Upstream { status: 403, .. })
    }

    pub fn details(&self) -> &str {
        match self {
            Self::Upstream { details, .. } => details,
            Self::Transport(message) | Self::Decode(message) => message,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Upstream { status, status_text, .. } => {
                write!(f, "upstream returned {status} {status_text}")
            }
            Self::Transport(message) => write!(f, "upstream transport error: {message}"),
            Self::Decode(message) => write!(f, "failed to decode upstream payload: {message}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::decode(err)
        } else {
            Self::transport(err)
        }
    }
}

pub fn truncate_details(details: &str) -> String {
    details.chars().take(MAX_ERROR_DETAILS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_truncate_upstream_details() {
        let body = "x".repeat(MAX_ERROR_DETAILS * 2);
        let err = ApiError::upstream(502, "Bad Gateway", &body);

        assert_eq!(err.details().chars().count(), MAX_ERROR_DETAILS);
        assert_eq!(err.status(), 502);
    }

    #[test]
    fn should_truncate_on_char_boundaries() {
        let body = "щ".repeat(MAX_ERROR_DETAILS + 1);
        let truncated = truncate_details(&body);

        assert_eq!(truncated.chars().count(), MAX_ERROR_DETAILS);
    }

    #[test]
    fn should_map_non_upstream_errors_to_500() {
        assert_eq!(ApiError::transport("connection reset").status(), 500);
        assert_eq!(ApiError::decode("missing field").status(), 500);
        assert!(ApiError::upstream(403, "Forbidden", "").is_forbidden());
        assert!(!ApiError::upstream(404, "Not Found", "").is_forbidden());
    }
}
