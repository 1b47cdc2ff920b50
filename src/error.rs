use thiserror::Error;

/// Result type for controller and store operations.
pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    /// User input failed a precondition; reported and recovered locally.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// A row-scoped action was invoked with no row selected.
    #[error("no task selected")]
    NoSelection,

    /// The backing store rejected an operation. Fatal to the operation,
    /// not to the session.
    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("all fields are required")]
    MissingField,

    #[error("due date must be in YYYY-MM-DD format")]
    BadDateFormat,
}
