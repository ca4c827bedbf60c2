use thiserror::Error;

/// Errors raised by the filter and aggregation layer.
///
/// Loading and UI glue wrap these in `anyhow::Error` with context.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataError {
    #[error("column not found: '{0}'")]
    ColumnNotFound(String),

    #[error("column '{0}' is not numeric")]
    NotNumeric(String),
}

pub type DataResult<T> = std::result::Result<T, DataError>;
