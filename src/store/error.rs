use super::record::MAX_NAME_LENGTH;

/// A candidate submission rejected before touching the store.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ValidationError {
    BlankName,
    NameTooLong { length: usize },
    NegativeScore { score: f64 },
}

impl std::error::Error for ValidationError {}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankName => write!(f, "name is blank after trimming"),
            Self::NameTooLong { length } => write!(
                f,
                "name is {} characters long, the maximum is {}",
                length, MAX_NAME_LENGTH
            ),
            Self::NegativeScore { score } => {
                write!(f, "score {} is not a non-negative number", score)
            }
        }
    }
}

/// The persistence layer could not serve an operation. Never retried; the
/// API layer surfaces it as a server error.
#[derive(Debug)]
pub enum StoreError {
    Unavailable(sqlx::Error),
    Timeout,
}

impl std::error::Error for StoreError {}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(error) => write!(f, "score store unavailable: {}", error),
            Self::Timeout => write!(f, "score store operation timed out"),
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(error: sqlx::Error) -> Self {
        Self::Unavailable(error)
    }
}
