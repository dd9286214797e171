//! Property table errors.

use thiserror::Error;

/// Result type for property table operations.
pub type PropsResult<T> = Result<T, PropsError>;

/// Errors that can occur while loading or querying property tables.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PropsError {
    /// Query outside the tabulated domain of the lookup column.
    #[error("{property} = {value} outside table range [{min}, {max}]")]
    OutOfRange {
        property: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Table violates a structural invariant (too short, non-monotonic, ...).
    #[error("Malformed table: {reason}")]
    MalformedTable { reason: String },

    /// A row could not be parsed.
    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    /// The table source could not be read.
    #[error("I/O error reading table: {message}")]
    Io { message: String },
}

impl PropsError {
    /// True when the query lies above the top of the table.
    pub fn is_above_range(&self) -> bool {
        matches!(self, PropsError::OutOfRange { value, max, .. } if value > max)
    }

    /// True for errors raised while loading a table rather than querying one.
    pub fn is_load_error(&self) -> bool {
        !matches!(self, PropsError::OutOfRange { .. })
    }
}

impl From<std::io::Error> for PropsError {
    fn from(err: std::io::Error) -> Self {
        PropsError::Io {
            message: err.to_string(),
        }
    }
}
