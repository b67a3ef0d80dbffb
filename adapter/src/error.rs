use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Authentication: {0}")]
    Authentication(String),
    #[error("Database: {0}")]
    Database(#[from] mongodb::error::Error),
}

impl Error {
    pub fn authentication<S: Into<String>>(message: S) -> Self {
        Self::Authentication(message.into())
    }
}
