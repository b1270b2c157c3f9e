use std::fmt;

// === BookmarkError ===

/// Errors related to bookmark storage operations.
#[derive(Debug)]
pub enum BookmarkError {
    /// No bookmark exists at the given list position.
    InvalidPosition(usize),
    /// A bookmark with the same regular-size URL already exists.
    DuplicateUrl(String),
    /// Database operation failed.
    DatabaseError(String),
}

impl fmt::Display for BookmarkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookmarkError::InvalidPosition(pos) => {
                write!(f, "No bookmark at position: {}", pos)
            }
            BookmarkError::DuplicateUrl(url) => write!(f, "Duplicate bookmark URL: {}", url),
            BookmarkError::DatabaseError(msg) => {
                write!(f, "Bookmark database error: {}", msg)
            }
        }
    }
}

impl std::error::Error for BookmarkError {}

impl From<rusqlite::Error> for BookmarkError {
    fn from(e: rusqlite::Error) -> Self {
        BookmarkError::DatabaseError(e.to_string())
    }
}

// === ImageError ===

/// Errors related to fetching pages of remote images.
#[derive(Debug)]
pub enum ImageError {
    /// Transport failure, including timeouts.
    Network(String),
    /// The response body could not be decoded.
    Decode(String),
    /// The server answered with a non-success status.
    Server(u16, String),
    /// The requested page is beyond the configured maximum.
    PageLimitExceeded { page: u32, max: u32 },
    /// The caller asked for something the contract forbids (page 0, empty page size).
    PreconditionViolation(String),
}

impl fmt::Display for ImageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageError::Network(msg) => write!(f, "Image fetch network error: {}", msg),
            ImageError::Decode(msg) => write!(f, "Image fetch decode error: {}", msg),
            ImageError::Server(status, msg) => {
                write!(f, "Image server error ({}): {}", status, msg)
            }
            ImageError::PageLimitExceeded { page, max } => {
                write!(f, "Page {} exceeds maximum page number {}", page, max)
            }
            ImageError::PreconditionViolation(msg) => {
                write!(f, "Precondition violated: {}", msg)
            }
        }
    }
}

impl std::error::Error for ImageError {}

impl ImageError {
    /// Returns `true` for errors rejected locally, before any request was made.
    pub fn is_local_rejection(&self) -> bool {
        matches!(
            self,
            ImageError::PageLimitExceeded { .. } | ImageError::PreconditionViolation(_)
        )
    }
}

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
