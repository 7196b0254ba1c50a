use thiserror::Error;

#[derive(Error, Debug)]
pub enum FolioError {
    /// A record the operation depends on is missing or has the wrong type.
    #[error("{0}")]
    NodeNotFound(String),

    /// The operation is not allowed on this node.
    #[error("{0}")]
    InvalidOperation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Api Error: {0}")]
    Api(String),
}

impl FolioError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NodeNotFound(message.into())
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidOperation(message.into())
    }
}

pub type Result<T> = std::result::Result<T, FolioError>;
