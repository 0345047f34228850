use std::fmt;

/// Error type for all store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A single-record get, update, or attribute update matched zero records.
    NotFound,
    /// A field access or attribute update referenced a field the shape does not have.
    FieldNotFound(String),
    /// A field write could not be applied in place to the target record.
    Unaddressable,
    /// Update predicates matched more than one record.
    UpdateMultiRecords,
    /// A predicate failed during evaluation; wraps the inner cause.
    Filter(Box<StoreError>),
    /// Field access or identifier handling hit a value of the wrong kind.
    UnexpectedType(String),
    /// Snapshot copy between stored state and a caller value failed.
    Copy(String),
    /// The store lock was poisoned (a thread panicked while holding it).
    LockPoisoned(&'static str),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::NotFound => write!(f, "record not found"),
            StoreError::FieldNotFound(name) => write!(f, "field `{}` does not exist", name),
            StoreError::Unaddressable => {
                write!(f, "record cannot be mutated in place")
            }
            StoreError::UpdateMultiRecords => {
                write!(f, "update matched more than one record")
            }
            StoreError::Filter(inner) => write!(f, "filter error: {}", inner),
            StoreError::UnexpectedType(what) => write!(f, "unexpected type: {}", what),
            StoreError::Copy(msg) => write!(f, "copy error: {}", msg),
            StoreError::LockPoisoned(operation) => {
                write!(f, "store lock poisoned during {}", operation)
            }
        }
    }
}

impl std::error::Error for StoreError {}
