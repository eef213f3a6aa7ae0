use thiserror::Error;

/// A fragment, item group or persisted row that could not be decoded.
///
/// Bulk loaders recover from these by skipping the offending row; they only
/// reach a caller when the caller supplied the malformed text itself.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown component kind: {0:?}")]
    UnknownKind(String),

    #[error("{kind} takes {expected} fields, found {found}")]
    FieldCount {
        kind: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("invalid {field}: {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("{0} cannot be empty")]
    EmptyField(&'static str),

    #[error("{0} cannot contain line breaks or control characters")]
    ControlCharacter(&'static str),

    #[error("malformed row: {0}")]
    Row(String),
}

#[derive(Error, Debug)]
pub enum KitStockError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Store error: {0}")]
    Store(String),
}

pub type Result<T> = std::result::Result<T, KitStockError>;
