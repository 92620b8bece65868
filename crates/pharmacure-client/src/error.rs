use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The server answered with a non-success status.
    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },

    /// The request never produced a response.
    #[error("request failed: {0}")]
    Transport(String),

    /// The response body was not a cart.
    #[error("invalid response body: {0}")]
    Decode(String),

    #[error("failed to encode request: {0}")]
    Encode(String),
}

impl ClientError {
    /// Returns `true` if the server rejected the request as invalid input.
    pub fn is_bad_request(&self) -> bool {
        matches!(self, Self::Status { status: 400, .. })
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
