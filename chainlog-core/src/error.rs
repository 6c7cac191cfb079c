use thiserror::Error;

/// Errors reported by history operations.
///
/// Missing commits and empty chains are not errors; those are reported
/// through `bool` and `Option` return values.
#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
