use thiserror::Error;

#[derive(Error, Debug)]
pub enum BoardError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("{0} already exists")]
    AlreadyExists(String),

    #[error("Partition '{partition}' is corrupt: {reason}")]
    CorruptPartition { partition: String, reason: String },

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, BoardError>;

impl BoardError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn corrupt(partition: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::CorruptPartition {
            partition: partition.into(),
            reason: reason.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl From<std::io::Error> for BoardError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for BoardError {
    fn from(err: std::sync::PoisonError<T>) -> Self {
        Self::Io(format!("Lock poisoned: {}", err))
    }
}
