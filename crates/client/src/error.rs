use commerce_core::contract::ContractError;
use commerce_core::schema::ValidationError;

/// Errors surfaced by [`crate::ApiClient`].
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The payload was rejected, either locally before sending or by the
    /// server with a 400.
    #[error("{message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    /// The server answered 404.
    #[error("{0}")]
    NotFound(String),

    /// The server answered a status the caller has no mapping for.
    #[error("Unexpected response ({status}): {body}")]
    Unexpected {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// A success body did not match the schema the registry declares.
    #[error(transparent)]
    Contract(#[from] ContractError),

    /// The body matched its schema but could not be decoded into the typed
    /// record.
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// A body was not valid JSON.
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
}

impl From<ValidationError> for ClientError {
    fn from(err: ValidationError) -> Self {
        ClientError::Validation {
            message: err.message,
            field: err.field,
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
