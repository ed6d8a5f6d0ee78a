use thiserror::Error;

pub type SpResult<T> = Result<T, SpError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SpError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: String, value: f64 },

    #[error("Index out of bounds: {what} (index={index}, len={len})")]
    IndexOob {
        what: &'static str,
        index: usize,
        len: usize,
    },
}
