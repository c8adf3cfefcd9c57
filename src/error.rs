use std::fmt;

/// Custom error type for Wiki.js operations
#[derive(Debug)]
pub enum WikiError {
    /// HTTP request failed
    Http(reqwest::Error),
    /// Endpoint answered with a non-success HTTP status
    Api { status: u16, message: String },
    /// GraphQL response carried an `errors` array
    GraphQl {
        operation: String,
        messages: Vec<String>,
    },
    /// Mutation returned `responseResult.succeeded = false`
    Rejected {
        operation: String,
        slug: String,
        message: String,
    },
    /// A config value envelope could not be decoded
    Decode { key: String, message: String },
    /// Server echoed a different identifier than the one requested
    Consistency {
        kind: String,
        expected: String,
        actual: String,
    },
    /// Local validation failed before any network call
    Validation(String),
    /// No credentials found in any source
    CredentialsNotFound(String),
    /// No site URL found in any source
    SiteNotFound(String),
    /// Failed to read or parse credentials file
    Credentials(String),
    /// JSON parsing error
    Json(String),
    /// Configuration error
    Config(String),
    /// Manifest could not be read or is invalid
    Manifest(String),
    /// State file could not be read or written
    State(String),
}

impl WikiError {
    /// True when a GraphQL error list contains the given message verbatim
    pub fn has_graphql_message(&self, needle: &str) -> bool {
        match self {
            WikiError::GraphQl { messages, .. } => messages.iter().any(|m| m == needle),
            _ => false,
        }
    }
}

impl fmt::Display for WikiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WikiError::Http(e) => write!(f, "HTTP request failed: {}", e),
            WikiError::Api { status, message } => {
                write!(f, "API error (status {}): {}", status, message)
            }
            WikiError::GraphQl {
                operation,
                messages,
            } => write!(
                f,
                "GraphQL request '{}' failed: {}",
                operation,
                messages.join("; ")
            ),
            WikiError::Rejected {
                operation,
                slug,
                message,
            } => write!(f, "{} rejected by Wiki.js ({}): {}", operation, slug, message),
            WikiError::Decode { key, message } => {
                write!(f, "Could not decode config value '{}': {}", key, message)
            }
            WikiError::Consistency {
                kind,
                expected,
                actual,
            } => write!(
                f,
                "Wiki.js returned the wrong {}: expected {} {}, got {}",
                kind, kind, expected, actual
            ),
            WikiError::Validation(msg) => write!(f, "Validation error: {}", msg),
            WikiError::CredentialsNotFound(msg) => write!(f, "{}", msg),
            WikiError::SiteNotFound(msg) => write!(f, "{}", msg),
            WikiError::Credentials(msg) => write!(f, "{}", msg),
            WikiError::Json(msg) => write!(f, "JSON error: {}", msg),
            WikiError::Config(msg) => write!(f, "Configuration error: {}", msg),
            WikiError::Manifest(msg) => write!(f, "Manifest error: {}", msg),
            WikiError::State(msg) => write!(f, "State error: {}", msg),
        }
    }
}

impl std::error::Error for WikiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WikiError::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for WikiError {
    fn from(err: reqwest::Error) -> Self {
        WikiError::Http(err)
    }
}

impl From<serde_json::Error> for WikiError {
    fn from(err: serde_json::Error) -> Self {
        WikiError::Json(err.to_string())
    }
}

impl From<std::io::Error> for WikiError {
    fn from(err: std::io::Error) -> Self {
        WikiError::Credentials(err.to_string())
    }
}

/// Result type alias for Wiki.js operations
pub type Result<T> = std::result::Result<T, WikiError>;
