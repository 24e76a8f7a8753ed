use models::ModelError;
use service::SessionError;
use thiserror::Error;

use crate::client::LoginRedirect;

/// Every failure the client can surface; nothing is swallowed or retried.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Rejected locally, before any request was sent.
    #[error("validation failed: {0}")]
    Validation(String),
    /// The backend answered 401. The session has already been cleared.
    #[error("unauthorized: session expired")]
    Unauthorized { body: String },
    /// Any other non-2xx answer; `body` is the raw response text.
    #[error("request failed with status {status}: {body}")]
    Api { status: u16, body: String },
    #[error("transport error: {0}")]
    Transport(String),
    #[error("decode error: {0}")]
    Decode(String),
    /// Body decoded but violates the response contract.
    #[error("contract violation: {0}")]
    Contract(String),
    #[error(transparent)]
    Session(#[from] SessionError),
}

impl ClientError {
    /// HTTP status behind the error, if the backend answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Unauthorized { .. } => Some(401),
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::Unauthorized { .. })
    }

    /// Where the caller should send the user after this error, if anywhere.
    pub fn login_redirect(&self) -> Option<LoginRedirect> {
        self.is_unauthorized().then(LoginRedirect::default)
    }

    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            ClientError::Validation(_) => 2001,
            ClientError::Unauthorized { .. } => 2002,
            ClientError::Api { .. } => 2003,
            ClientError::Transport(_) => 2101,
            ClientError::Decode(_) => 2102,
            ClientError::Contract(_) => 2103,
            ClientError::Session(_) => 2200,
        }
    }
}

impl From<ModelError> for ClientError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Validation(msg) => ClientError::Validation(msg),
            ModelError::Contract(msg) => ClientError::Contract(msg),
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ClientError::Decode(e.to_string())
        } else {
            ClientError::Transport(e.to_string())
        }
    }
}
