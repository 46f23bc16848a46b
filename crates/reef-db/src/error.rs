use std::fmt;

use reef_sql::ParseError;

#[derive(Debug)]
pub enum DbError {
    /// Statement text does not parse. Never retried.
    Parse(ParseError),
    DatabaseNotFound(String),
    CollectionNotFound(String),
    /// Kind-checked field access found a different kind than requested.
    TypeMismatch(String),
    /// A cursor method other than `close` was called after `close`.
    ClosedCursor,
    /// Field access on a cursor that has not been advanced with `next`.
    NoCurrentRow,
    /// The statement exceeded its execution budget; no partial mutation
    /// is visible.
    Timeout,
}

impl fmt::Display for DbError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DbError::Parse(e) => write!(f, "{e}"),
            DbError::DatabaseNotFound(name) => write!(f, "database not found: {name}"),
            DbError::CollectionNotFound(name) => write!(f, "collection not found: {name}"),
            DbError::TypeMismatch(msg) => write!(f, "type mismatch: {msg}"),
            DbError::ClosedCursor => write!(f, "cursor is closed"),
            DbError::NoCurrentRow => write!(f, "cursor has no current row; call next() first"),
            DbError::Timeout => write!(f, "statement timed out"),
        }
    }
}

impl std::error::Error for DbError {}

impl From<ParseError> for DbError {
    fn from(e: ParseError) -> Self {
        DbError::Parse(e)
    }
}
