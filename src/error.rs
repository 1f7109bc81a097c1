use thiserror::Error;

pub type Result<T> = std::result::Result<T, CasError>;

#[derive(Debug, Error)]
pub enum CasError {
    #[error("parse error: {0}")]
    Parse(String),
    #[error("invalid symbol name: {0:?}")]
    InvalidSymbol(String),
    #[error("report output failed: {0}")]
    Report(#[from] std::io::Error),
}
