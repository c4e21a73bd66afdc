use thiserror::Error;

// === StorageError ===

/// Errors raised by a key-value storage medium.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The medium could not be opened (missing directory, blocked storage, bad file).
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
    /// The medium was opened but the individual read or write failed.
    #[error("Storage operation failed: {0}")]
    Operation(String),
}

impl StorageError {
    pub fn is_unavailable(&self) -> bool {
        matches!(self, StorageError::Unavailable(_))
    }
}

// === AuthError ===

/// Errors related to registration, login and session persistence.
#[derive(Debug, Error)]
pub enum AuthError {
    /// A user with this email is already registered.
    #[error("User already exists: {0}")]
    AlreadyExists(String),
    /// No registered user has this email.
    #[error("User not found")]
    UserNotFound,
    /// The password did not match the stored hash.
    #[error("Invalid password")]
    InvalidPassword,
    /// Password hashing could not be performed.
    #[error("Password hashing failed: {0}")]
    Hashing(String),
    /// Session or user payload could not be encoded.
    #[error("Auth serialization error: {0}")]
    Serialization(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl AuthError {
    /// Short inline message suitable for a login or registration form.
    ///
    /// Unknown email and wrong password are deliberately indistinguishable here.
    pub fn user_message(&self) -> &'static str {
        match self {
            AuthError::AlreadyExists(_) => "User already exists",
            AuthError::UserNotFound | AuthError::InvalidPassword => "Invalid email or password",
            AuthError::Hashing(_) | AuthError::Serialization(_) | AuthError::Storage(_) => {
                "Something went wrong, please try again"
            }
        }
    }
}

// === BookmarkError ===

/// Errors related to bookmark persistence.
#[derive(Debug, Error)]
pub enum BookmarkError {
    /// The operation needs an authenticated session.
    #[error("Not authenticated")]
    Unauthenticated,
    /// The submitted URL was blank.
    #[error("Bookmark URL is empty")]
    EmptyUrl,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

// === SettingsError ===

/// Errors related to loading or saving the configuration file.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Reading or writing the config file failed.
    #[error("Settings I/O error: {0}")]
    IoError(String),
    /// The config file is not valid JSON for `AppConfig`.
    #[error("Settings serialization error: {0}")]
    Serialization(String),
}
