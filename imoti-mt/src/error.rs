/// Error types for the translation pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MtError {
    /// Provider failed or rejected a translation call
    TranslationError(String),
    /// Missing or unusable provider configuration
    ConfigError(String),
    /// HTTP transport failure
    NetworkError(String),
    /// Malformed locale code
    InvalidLocale(String),
    /// Input tree nested deeper than the configured bound
    RecursionLimitExceeded(usize),
    /// General error with context
    Other(String),
}

impl std::fmt::Display for MtError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MtError::TranslationError(msg) => write!(f, "Translation error: {}", msg),
            MtError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            MtError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            MtError::InvalidLocale(msg) => write!(f, "Invalid locale: {}", msg),
            MtError::RecursionLimitExceeded(limit) => {
                write!(f, "Recursion limit exceeded: tree nested deeper than {} levels", limit)
            }
            MtError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for MtError {}

impl From<reqwest::Error> for MtError {
    fn from(err: reqwest::Error) -> Self {
        MtError::NetworkError(err.to_string())
    }
}

/// Result type for translation pipeline operations
pub type MtResult<T> = Result<T, MtError>;
