use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoreError>;

/// Store-level error taxonomy. "Not found" is not an error: lookups return
/// `Ok(None)` and the web layer maps that to a 404.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A user with this name already exists. Raised by the UNIQUE constraint
    /// on `users.name`, so concurrent registrations cannot both succeed.
    #[error("that user already exists")]
    DuplicateUser,

    /// Rejected input, recovered by re-rendering the form.
    #[error("{0}")]
    Validation(String),

    #[error("database lock poisoned")]
    LockPoisoned,

    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
}
