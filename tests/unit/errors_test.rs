use link_saver::types::errors::*;

// === StorageError Tests ===

#[test]
fn storage_error_display_variants() {
    assert_eq!(
        StorageError::Unavailable("disk gone".to_string()).to_string(),
        "Storage unavailable: disk gone"
    );
    assert_eq!(
        StorageError::Operation("locked".to_string()).to_string(),
        "Storage operation failed: locked"
    );
}

#[test]
fn storage_error_is_unavailable() {
    assert!(StorageError::Unavailable("x".to_string()).is_unavailable());
    assert!(!StorageError::Operation("x".to_string()).is_unavailable());
}

// === AuthError Tests ===

#[test]
fn auth_error_display_variants() {
    assert_eq!(
        AuthError::AlreadyExists("a@b.c".to_string()).to_string(),
        "User already exists: a@b.c"
    );
    assert_eq!(AuthError::UserNotFound.to_string(), "User not found");
    assert_eq!(AuthError::InvalidPassword.to_string(), "Invalid password");
}

#[test]
fn auth_error_user_message_hides_which_credential_failed() {
    assert_eq!(
        AuthError::UserNotFound.user_message(),
        AuthError::InvalidPassword.user_message()
    );
    assert_eq!(
        AuthError::AlreadyExists("a@b.c".to_string()).user_message(),
        "User already exists"
    );
}

#[test]
fn auth_error_wraps_storage_error_transparently() {
    let err: AuthError = StorageError::Unavailable("blocked".to_string()).into();
    assert_eq!(err.to_string(), "Storage unavailable: blocked");
    assert!(matches!(err, AuthError::Storage(StorageError::Unavailable(_))));
}

// === BookmarkError Tests ===

#[test]
fn bookmark_error_display_variants() {
    assert_eq!(BookmarkError::Unauthenticated.to_string(), "Not authenticated");
    assert_eq!(BookmarkError::EmptyUrl.to_string(), "Bookmark URL is empty");
    let err: BookmarkError = StorageError::Operation("full".to_string()).into();
    assert_eq!(err.to_string(), "Storage operation failed: full");
}

// === SettingsError Tests ===

#[test]
fn settings_error_display_variants() {
    assert_eq!(
        SettingsError::IoError("denied".to_string()).to_string(),
        "Settings I/O error: denied"
    );
    assert_eq!(
        SettingsError::Serialization("bad json".to_string()).to_string(),
        "Settings serialization error: bad json"
    );
}

#[test]
fn errors_implement_error_trait() {
    let err: Box<dyn std::error::Error> = Box::new(AuthError::UserNotFound);
    assert!(err.source().is_none());
}
