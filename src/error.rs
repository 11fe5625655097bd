/// Error type returned by this crate.
#[derive(Debug, thiserror::Error)]
pub enum SendPigeonError {
    /// Transport could not complete (DNS, connect, request build).
    #[error("network error: {0}")]
    Network(reqwest::Error),
    /// The per-attempt deadline elapsed before a response arrived.
    #[error("timeout error: {0}")]
    Timeout(reqwest::Error),
    /// Non-success HTTP status returned by the SendPigeon API.
    #[error("api error {status}: {message}")]
    Api {
        /// HTTP status code of the final response.
        status: u16,
        /// Optional machine-readable code from `error.code`.
        code: Option<String>,
        /// Message from `error.message`, or `HTTP <status>`.
        message: String,
    },
    /// The call was cancelled before it resolved.
    #[error("request cancelled")]
    Cancelled,
    /// Caller-supplied request parts could not be encoded.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    /// A successful response did not match the expected shape.
    #[error("decode error: {0}")]
    Decode(String),
}

impl SendPigeonError {
    /// HTTP status attached to this error, if a response was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Network(err) | Self::Timeout(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// API error code from the response body, if any.
    pub fn api_code(&self) -> Option<&str> {
        match self {
            Self::Api { code, .. } => code.as_deref(),
            _ => None,
        }
    }

    /// Stable error-kind label for programmatic branching.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Network(_) => "network_error",
            Self::Timeout(_) => "timeout_error",
            Self::Api { .. } => "api_error",
            Self::Cancelled => "cancelled",
            Self::InvalidRequest(_) => "invalid_request",
            Self::Decode(_) => "decode_error",
        }
    }

    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err)
        } else {
            Self::Network(err)
        }
    }
}
