use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("connection failed: {0}")]
    Connect(String),

    #[error("request timed out")]
    Timeout,

    #[error("transport failure: {0}")]
    Failure(String),
}

pub type Result<T> = std::result::Result<T, TransportError>;
