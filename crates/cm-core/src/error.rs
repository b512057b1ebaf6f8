use thiserror::Error;

pub type CoreResult<T> = Result<T, CoreError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Unknown quantity label: {label}")]
    UnknownQuantity { label: String },

    #[error("Unknown series group: {name}")]
    UnknownGroup { name: String },
}
