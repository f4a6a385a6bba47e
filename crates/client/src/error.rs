use lightbox_core::ValidationError;

/// Failure of a single API call.
///
/// Every client operation returns this unmodified; views decide whether to
/// show it, log it, or both.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClientError {
    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),

    #[error("server responded with status {status}{}", detail(.message))]
    Response { status: u16, message: Option<String> },

    #[error("not found: {path}")]
    NotFound { path: String },

    /// Rejected before any request was sent.
    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),

    /// A success response whose body did not match the expected shape.
    #[error("unexpected response body: {0}")]
    Decode(String),

    #[error("could not encode request: {0}")]
    Encode(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Network,
    Response,
    NotFound,
    Validation,
    Decode,
    Encode,
}

impl ClientError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::Network(_) => ErrorKind::Network,
            ClientError::Response { .. } => ErrorKind::Response,
            ClientError::NotFound { .. } => ErrorKind::NotFound,
            ClientError::Validation(_) => ErrorKind::Validation,
            ClientError::Decode(_) => ErrorKind::Decode,
            ClientError::Encode(_) => ErrorKind::Encode,
        }
    }

    /// HTTP status, when the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Response { status, .. } => Some(*status),
            ClientError::NotFound { .. } => Some(404),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}

fn detail(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(": {m}"))
        .unwrap_or_default()
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else if err.is_builder() {
            ClientError::Encode(err.to_string())
        } else {
            ClientError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Encode(err.to_string())
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
