// Link Saver state managers
// Managers own persisted state: the user directory, the session and the bookmark list.

pub mod bookmark_manager;
pub mod credential_manager;
pub mod session_manager;
