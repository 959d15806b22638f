//! Validation errors raised at the payload boundary.

/// Crate-wide result alias for the alignment and snapshot operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// An observation names a fuel type that is not in the registry.
    #[error("unknown fuel type: {0}")]
    UnknownFuelType(String),

    /// A region record names a prefecture that is not in the registry.
    #[error("unknown region: {0}")]
    UnknownRegion(String),

    /// A record is missing a field, has an invalid value or breaks date ordering.
    #[error("malformed record: {0}")]
    MalformedRecord(String),

    /// A date range that is reversed or falls outside the supported calendar.
    #[error("invalid date range: {0}")]
    InvalidRange(String),

    /// The payload is not JSON at all (syntax error or truncated input).
    #[error("JSON error: {0}")]
    Json(serde_json::Error),
}

// A well-formed document with a wrongly typed field is a bad record, not bad JSON.
impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        match e.classify() {
            serde_json::error::Category::Data => Error::MalformedRecord(e.to_string()),
            _ => Error::Json(e),
        }
    }
}

impl Error {
    pub(crate) fn malformed(msg: impl Into<String>) -> Self {
        Error::MalformedRecord(msg.into())
    }
}
