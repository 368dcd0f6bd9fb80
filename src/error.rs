//! Error types returned by the transaction store and input validation.

/// Problems with user-entered field values.
///
/// These are detected before the store is touched, so a validation failure
/// never results in a partial write.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub(crate) enum ValidationError {
    #[error("\"{0}\" is not a valid amount")]
    InvalidAmount(String),

    #[error("\"{0}\" is not a valid date, expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("\"{0}\" is not a valid transaction ID")]
    InvalidId(String),

    #[error("category must not be empty")]
    EmptyCategory,
}

/// The errors that may occur while reading or writing transactions.
#[derive(Debug, thiserror::Error)]
pub(crate) enum Error {
    /// The user provided a field value that could not be parsed.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The underlying SQLite connection or query failed.
    ///
    /// The operation had no effect and may be retried.
    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    /// An update or delete targeted an ID with no matching transaction.
    #[error("no transaction with ID {0}")]
    NotFound(i64),
}

pub(crate) type Result<T, E = Error> = std::result::Result<T, E>;
