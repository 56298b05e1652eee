use thiserror::Error;

/// Failure of a viewport read or write
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ViewportError {
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("Viewport unavailable: {0}")]
    Unavailable(String),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Viewport error: {0}")]
    Viewport(#[from] ViewportError),

    #[error("Invalid animation: {0}")]
    InvalidAnimation(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, Error>;
