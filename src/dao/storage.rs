use std::error::Error;
use thiserror::Error;

/// Result alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Error raised by snapshot stores regardless of the underlying medium.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backing medium could not be read or written.
    #[error("storage unavailable: {message}")]
    Unavailable {
        /// Human readable description of the failed operation.
        message: String,
        /// Underlying backend failure.
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
    /// A snapshot could not be encoded for persistence.
    #[error("snapshot serialization failed: {message}")]
    Serialization {
        /// Human readable description of the failed operation.
        message: String,
        /// Underlying encoder failure.
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
}

impl StorageError {
    /// Construct an unavailable error from any backend failure.
    pub fn unavailable(message: String, source: impl Error + Send + Sync + 'static) -> Self {
        StorageError::Unavailable {
            message,
            source: Box::new(source),
        }
    }

    /// Construct a serialization error from an encoder failure.
    pub fn serialization(message: String, source: impl Error + Send + Sync + 'static) -> Self {
        StorageError::Serialization {
            message,
            source: Box::new(source),
        }
    }
}
