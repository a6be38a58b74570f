use std::fmt;

// === StorageError ===

/// Errors raised by a key-value store backend.
#[derive(Debug)]
pub enum StorageError {
    /// Reading a key failed.
    ReadFailed(String),
    /// Writing or removing a key failed.
    WriteFailed(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::ReadFailed(msg) => write!(f, "Storage read failed: {}", msg),
            StorageError::WriteFailed(msg) => write!(f, "Storage write failed: {}", msg),
        }
    }
}

impl std::error::Error for StorageError {}

// === HistoryError ===

/// Errors related to recipe history persistence.
#[derive(Debug)]
pub enum HistoryError {
    /// History entry with the given ID was not found.
    NotFound(i64),
    /// The history list could not be serialized.
    SerializationError(String),
    /// The underlying store rejected the operation.
    StorageError(String),
}

impl fmt::Display for HistoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryError::NotFound(id) => write!(f, "History entry not found: {}", id),
            HistoryError::SerializationError(msg) => {
                write!(f, "History serialization error: {}", msg)
            }
            HistoryError::StorageError(msg) => write!(f, "History storage error: {}", msg),
        }
    }
}

impl std::error::Error for HistoryError {}

impl From<StorageError> for HistoryError {
    fn from(err: StorageError) -> Self {
        HistoryError::StorageError(err.to_string())
    }
}

// === ApiError ===

/// Errors related to talking to the recipe server.
#[derive(Debug)]
pub enum ApiError {
    /// The configured base URL or endpoint path is not a valid URL.
    InvalidUrl(String),
    /// The HTTP client could not be built.
    ClientError(String),
    /// The request could not be sent or the body could not be read.
    NetworkError(String),
    /// The server answered with a non-success status.
    Status(u16),
    /// The server kept the client on its login page.
    LoginRejected,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::InvalidUrl(url) => write!(f, "Invalid server URL: {}", url),
            ApiError::ClientError(msg) => write!(f, "HTTP client error: {}", msg),
            ApiError::NetworkError(msg) => write!(f, "Recipe server network error: {}", msg),
            ApiError::Status(status) => write!(f, "Recipe server returned status {}", status),
            ApiError::LoginRejected => write!(f, "Recipe server rejected the login"),
        }
    }
}

impl std::error::Error for ApiError {}

// === CardError ===

/// Errors related to actions on rendered recipe cards.
#[derive(Debug)]
pub enum CardError {
    /// No card is rendered at the given index.
    NotFound(usize),
}

impl fmt::Display for CardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardError::NotFound(index) => write!(f, "Recipe card not found: {}", index),
        }
    }
}

impl std::error::Error for CardError {}

// === SettingsError ===

/// Errors related to settings management.
#[derive(Debug)]
pub enum SettingsError {
    /// An I/O error occurred while reading or writing settings.
    IoError(String),
    /// Failed to serialize or deserialize settings.
    SerializationError(String),
    /// The provided settings key is invalid.
    InvalidKey(String),
    /// The provided settings value is invalid.
    InvalidValue(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::IoError(msg) => write!(f, "Settings I/O error: {}", msg),
            SettingsError::SerializationError(msg) => {
                write!(f, "Settings serialization error: {}", msg)
            }
            SettingsError::InvalidKey(key) => write!(f, "Invalid settings key: {}", key),
            SettingsError::InvalidValue(msg) => {
                write!(f, "Invalid settings value: {}", msg)
            }
        }
    }
}

impl std::error::Error for SettingsError {}
