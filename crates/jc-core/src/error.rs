use thiserror::Error;

pub type JcResult<T> = Result<T, JcError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum JcError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Value for {what} out of bounds: {value} not in [{min}, {max}]")]
    OutOfBounds {
        what: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("Invariant violated: {what}")]
    Invariant { what: &'static str },
}
