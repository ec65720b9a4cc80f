
use thiserror::Error;

#[derive(Error, Debug)]
pub enum KindredError {
    #[error("Config error: {0}")]
    Config(String),
    #[error("Incomplete date: {0}")]
    IncompleteDate(String),
    #[error("Parse error: {message}")]
    Parse { message: String },
    #[error("Internal invariant violated: {0}")]
    Invariant(String),
}

pub type Result<T> = std::result::Result<T, KindredError>;
