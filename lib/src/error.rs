/// Error condition variants.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Messaging socket errors.
    #[error("messaging socket error: {0}")]
    Transport(#[from] zmq::Error),
    /// JSON encoding and decoding errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    /// A reply frame was not valid UTF-8.
    #[error("reply is not valid utf-8")]
    Utf8(#[from] std::str::Utf8Error),
    /// A query parameter is not a valid IP address.
    #[error("invalid {param} '{value}': {reason}")]
    InvalidAddress {
        /// Name of the offending parameter.
        param: &'static str,
        /// The value that failed to parse.
        value: String,
        /// Parser error message.
        reason: String,
    },
    /// The reply summary was valid JSON, but not an object.
    #[error("reply summary is not a JSON object")]
    NotAnObject,
    /// A required element was absent from the reply summary.
    #[error("no '{0}' element in reply summary")]
    MissingField(&'static str),
    /// A reply summary element had the wrong type.
    #[error("'{0}' element in reply summary is not a valid integer")]
    InvalidField(&'static str),
    /// The reply ended before the announced number of results was received.
    #[error("reply ended after {received} of {expected} results")]
    TruncatedReply {
        /// Number of results announced in the summary.
        expected: u64,
        /// Number of results received.
        received: u64,
    },
}

impl Error {
    pub(crate) fn invalid_address<E: std::fmt::Display>(
        param: &'static str,
        value: &str,
        err: E,
    ) -> Self {
        Self::InvalidAddress {
            param,
            value: value.to_string(),
            reason: err.to_string(),
        }
    }
}
