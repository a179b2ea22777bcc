use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("unknown field: {0}")]
    UnknownField(String),
    #[error("unknown summary table: {0}")]
    UnknownTable(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
