// ImageBrowser paths on Linux, following the XDG base directory layout.
// Config: $XDG_CONFIG_HOME/imagebrowser, else ~/.config/imagebrowser
// Data:   $XDG_DATA_HOME/imagebrowser,   else ~/.local/share/imagebrowser

use std::env;
use std::path::PathBuf;

const APP_DIR: &str = "imagebrowser";

pub fn get_config_dir() -> PathBuf {
    resolve(env::var("XDG_CONFIG_HOME").ok(), home(), &[".config"])
}

pub fn get_data_dir() -> PathBuf {
    resolve(env::var("XDG_DATA_HOME").ok(), home(), &[".local", "share"])
}

fn home() -> String {
    env::var("HOME").unwrap_or_else(|_| String::from("/tmp"))
}

/// An XDG variable wins when set to something non-empty; otherwise the
/// app directory goes under `home` joined with `fallback`.
fn resolve(xdg: Option<String>, home: String, fallback: &[&str]) -> PathBuf {
    match xdg.filter(|v| !v.is_empty()) {
        Some(base) => PathBuf::from(base).join(APP_DIR),
        None => fallback
            .iter()
            .fold(PathBuf::from(home), |path, part| path.join(part))
            .join(APP_DIR),
    }
}
