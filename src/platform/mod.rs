// Link Saver platform paths
//
// Linux follows the XDG base directory layout, macOS uses Application Support,
// Windows uses %APPDATA%. Selected at compile time with `cfg(target_os)`.

use std::env;
use std::path::PathBuf;

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
const APP_DIR_NAME: &str = "link-saver";

#[cfg(any(target_os = "macos", target_os = "windows"))]
const APP_DIR_NAME: &str = "LinkSaver";

fn home_dir() -> PathBuf {
    PathBuf::from(env::var("HOME").unwrap_or_else(|_| String::from("/tmp")))
}

/// Resolves `$<xdg_var>/link-saver`, falling back to `~/<fallback>/link-saver`.
#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn xdg_dir(xdg_var: &str, fallback: &[&str]) -> PathBuf {
    match env::var(xdg_var) {
        Ok(dir) if !dir.is_empty() => PathBuf::from(dir).join(APP_DIR_NAME),
        _ => fallback
            .iter()
            .fold(home_dir(), |path, part| path.join(part))
            .join(APP_DIR_NAME),
    }
}

/// Directory holding `config.json`.
///
/// - **Linux**: `$XDG_CONFIG_HOME/link-saver` or `~/.config/link-saver`
/// - **macOS**: `~/Library/Application Support/LinkSaver`
/// - **Windows**: `%APPDATA%/LinkSaver`
pub fn get_config_dir() -> PathBuf {
    #[cfg(target_os = "macos")]
    {
        home_dir().join("Library").join("Application Support").join(APP_DIR_NAME)
    }
    #[cfg(target_os = "windows")]
    {
        let appdata = env::var("APPDATA")
            .unwrap_or_else(|_| String::from("C:\\Users\\Default\\AppData\\Roaming"));
        PathBuf::from(appdata).join(APP_DIR_NAME)
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        xdg_dir("XDG_CONFIG_HOME", &[".config"])
    }
}

/// Directory holding the SQLite key-value database.
///
/// Same as the config dir on macOS and Windows; `$XDG_DATA_HOME/link-saver`
/// or `~/.local/share/link-saver` elsewhere.
pub fn get_data_dir() -> PathBuf {
    #[cfg(any(target_os = "macos", target_os = "windows"))]
    {
        get_config_dir()
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        xdg_dir("XDG_DATA_HOME", &[".local", "share"])
    }
}
