use thiserror::Error;

pub type RlResult<T> = Result<T, RlError>;

#[derive(Error, Debug)]
pub enum RlError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },
}
