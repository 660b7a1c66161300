use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    // Connectivity failures, reported before any HTTP status exists
    #[error("Transport error: {message}\nURL: {url}")]
    Transport { message: String, url: String },

    // Non-200 status or a body that cannot be decoded
    #[error("Invalid response{}: {message}\nURL: {url}", status_suffix(.status))]
    InvalidResponse {
        status: Option<u16>,
        message: String,
        url: String,
    },

    // Vendor envelope reported something other than OK
    #[error("API error: {message}\nURL: {url}")]
    General { message: String, url: String },

    #[error("Cache error: {message}\nURL: {url}")]
    Cache { message: String, url: String },

    #[error("API rate limit reached: {message}\nURL: {url}")]
    RateLimit { message: String, url: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("Log setup error: {0}")]
    LogSetup(String),
}

fn status_suffix(status: &Option<u16>) -> String {
    match status {
        Some(code) => format!(" (HTTP {code})"),
        None => String::new(),
    }
}

impl AppError {
    /// Create a configuration error with context
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an invalid parameter error with context
    pub fn invalid_parameter(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }

    /// Create a log setup error with context
    pub fn log_setup_error(msg: impl Into<String>) -> Self {
        Self::LogSetup(msg.into())
    }

    /// Create a transport-level error (DNS, refused connection, timeout)
    pub fn transport_error(message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create an error for a response with a non-200 HTTP status
    pub fn http_status(status: u16, body: impl Into<String>, url: impl Into<String>) -> Self {
        Self::InvalidResponse {
            status: Some(status),
            message: format!("Wrong HTTP status code: {status} - {}", body.into()),
            url: url.into(),
        }
    }

    /// Create an error for a body that could not be decoded
    pub fn invalid_response(message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::InvalidResponse {
            status: None,
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create an error for a vendor envelope that did not report OK
    pub fn general_error(message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::General {
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create a cache store error
    pub fn cache_error(message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::Cache {
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create an API rate limit error
    pub fn rate_limit(message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::RateLimit {
            message: message.into(),
            url: url.into(),
        }
    }

    /// Check if error is retryable (connectivity problems and quota exhaustion).
    /// A non-200 status is an application-level rejection and is not.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AppError::Transport { .. } | AppError::RateLimit { .. }
        )
    }

    /// Request URL the error refers to, when it came out of the pipeline
    pub fn url(&self) -> Option<&str> {
        match self {
            AppError::Transport { url, .. }
            | AppError::InvalidResponse { url, .. }
            | AppError::General { url, .. }
            | AppError::Cache { url, .. }
            | AppError::RateLimit { url, .. } => Some(url),
            _ => None,
        }
    }

    /// HTTP status code carried by the error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            AppError::InvalidResponse { status, .. } => *status,
            _ => None,
        }
    }
}
