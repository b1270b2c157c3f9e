// ImageBrowser platform paths
// Each target OS has its own module; the one matching the build target is
// compiled in and the functions below forward to it.

use std::path::PathBuf;

#[cfg(target_os = "linux")]
mod linux;

#[cfg(target_os = "macos")]
mod macos;

#[cfg(target_os = "windows")]
mod windows;

/// Directory holding `settings.json`.
///
/// - **Linux**: `$XDG_CONFIG_HOME/imagebrowser` or `~/.config/imagebrowser`
/// - **macOS**: `~/Library/Application Support/ImageBrowser`
/// - **Windows**: `%APPDATA%/ImageBrowser`
pub fn get_config_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        linux::get_config_dir()
    }
    #[cfg(target_os = "macos")]
    {
        macos::get_config_dir()
    }
    #[cfg(target_os = "windows")]
    {
        windows::get_config_dir()
    }
}

/// Directory holding the bookmark database.
///
/// - **Linux**: `$XDG_DATA_HOME/imagebrowser` or `~/.local/share/imagebrowser`
/// - **macOS**: `~/Library/Application Support/ImageBrowser`
/// - **Windows**: `%APPDATA%/ImageBrowser`
pub fn get_data_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        linux::get_data_dir()
    }
    #[cfg(target_os = "macos")]
    {
        macos::get_data_dir()
    }
    #[cfg(target_os = "windows")]
    {
        windows::get_data_dir()
    }
}
