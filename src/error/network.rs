//! Network-related error types.

use std::fmt;

use crate::traits::HttpError;

/// Network-specific error variants.
#[derive(Debug, Clone)]
pub enum NetworkError {
    /// Connection to the site failed.
    ConnectionFailed { url: String, message: String },

    /// Request timed out.
    Timeout { operation: String },

    /// HTTP status error (non-2xx response).
    HttpStatus { status: u16, message: String },

    /// The site answered with a web service exception payload.
    WebService { error_code: String, message: String },

    /// Response body could not be decoded.
    InvalidResponse { message: String },

    /// Request was cancelled.
    Cancelled,

    /// Generic network error.
    Other { message: String },
}

impl NetworkError {
    /// True for errors reported by the site itself rather than the transport.
    pub fn is_server_side(&self) -> bool {
        match self {
            NetworkError::HttpStatus { status, .. } => *status >= 500,
            NetworkError::WebService { .. } => true,
            _ => false,
        }
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            NetworkError::ConnectionFailed { .. } => {
                "Unable to connect to the site. Please check your internet connection.".to_string()
            }
            NetworkError::Timeout { operation } => {
                format!("The {} operation timed out. The site may be slow or unreachable.", operation)
            }
            NetworkError::HttpStatus { status, .. } => match *status {
                401 => "Your session has expired. Please sign in again.".to_string(),
                403 => "Access denied. You don't have permission for this action.".to_string(),
                404 => "The requested resource was not found.".to_string(),
                500..=599 => "The site is experiencing issues. Please try again later.".to_string(),
                _ => format!("The site returned an error (HTTP {}). Please try again.", status),
            },
            NetworkError::WebService { message, .. } => message.clone(),
            NetworkError::InvalidResponse { .. } => {
                "Received an invalid response from the site. Please try again.".to_string()
            }
            NetworkError::Cancelled => "The request was cancelled.".to_string(),
            NetworkError::Other { message } => format!("Network error: {}", message),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            NetworkError::ConnectionFailed { .. } => "E_NET_CONN",
            NetworkError::Timeout { .. } => "E_NET_TIMEOUT",
            NetworkError::HttpStatus { .. } => "E_NET_HTTP",
            NetworkError::WebService { .. } => "E_NET_WS",
            NetworkError::InvalidResponse { .. } => "E_NET_INVALID",
            NetworkError::Cancelled => "E_NET_CANCEL",
            NetworkError::Other { .. } => "E_NET_OTHER",
        }
    }
}

impl fmt::Display for NetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkError::ConnectionFailed { url, message } => {
                write!(f, "Connection failed to '{}': {}", url, message)
            }
            NetworkError::Timeout { operation } => write!(f, "{} timed out", operation),
            NetworkError::HttpStatus { status, message } => {
                write!(f, "HTTP {} error: {}", status, message)
            }
            NetworkError::WebService { error_code, message } => {
                write!(f, "Web service error ({}): {}", error_code, message)
            }
            NetworkError::InvalidResponse { message } => {
                write!(f, "Invalid response: {}", message)
            }
            NetworkError::Cancelled => write!(f, "Request cancelled"),
            NetworkError::Other { message } => write!(f, "Network error: {}", message),
        }
    }
}

impl std::error::Error for NetworkError {}

impl From<HttpError> for NetworkError {
    fn from(err: HttpError) -> Self {
        match err {
            HttpError::ConnectionFailed(message) => NetworkError::ConnectionFailed {
                url: "unknown".to_string(),
                message,
            },
            HttpError::Timeout(operation) => NetworkError::Timeout { operation },
            HttpError::ServerError { status, message } => {
                NetworkError::HttpStatus { status, message }
            }
            HttpError::Cancelled => NetworkError::Cancelled,
            HttpError::InvalidUrl(message) | HttpError::Other(message) => {
                NetworkError::Other { message }
            }
        }
    }
}

/// Classify a reqwest error into a NetworkError.
pub fn classify_reqwest_error(err: &reqwest::Error, url: &str) -> NetworkError {
    if err.is_connect() {
        NetworkError::ConnectionFailed {
            url: url.to_string(),
            message: err.to_string(),
        }
    } else if err.is_timeout() {
        NetworkError::Timeout {
            operation: "HTTP request".to_string(),
        }
    } else if let Some(status) = err.status() {
        NetworkError::HttpStatus {
            status: status.as_u16(),
            message: err.to_string(),
        }
    } else if err.is_decode() {
        NetworkError::InvalidResponse {
            message: format!("Failed to decode response: {}", err),
        }
    } else {
        NetworkError::Other {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_side_statuses() {
        let server = NetworkError::HttpStatus {
            status: 503,
            message: "unavailable".to_string(),
        };
        let forbidden = NetworkError::HttpStatus {
            status: 403,
            message: "forbidden".to_string(),
        };
        assert!(server.is_server_side());
        assert!(!forbidden.is_server_side());
        assert!(!NetworkError::Cancelled.is_server_side());
    }

    #[test]
    fn test_web_service_error_is_server_side() {
        let err = NetworkError::WebService {
            error_code: "invalidtoken".to_string(),
            message: "Invalid token".to_string(),
        };
        assert!(err.is_server_side());
        assert_eq!(err.user_message(), "Invalid token");
        assert_eq!(err.error_code(), "E_NET_WS");
    }

    #[test]
    fn test_from_http_error() {
        let err: NetworkError = HttpError::ServerError {
            status: 500,
            message: "boom".to_string(),
        }
        .into();
        assert!(matches!(err, NetworkError::HttpStatus { status: 500, .. }));

        let err: NetworkError = HttpError::Timeout("GET".to_string()).into();
        assert!(matches!(err, NetworkError::Timeout { .. }));
    }

    #[test]
    fn test_display() {
        let err = NetworkError::ConnectionFailed {
            url: "https://school.example".to_string(),
            message: "refused".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Connection failed to 'https://school.example': refused"
        );
    }
}
