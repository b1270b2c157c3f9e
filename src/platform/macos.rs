// ImageBrowser paths on macOS. Settings and the bookmark database share
// ~/Library/Application Support/ImageBrowser.

use std::env;
use std::path::PathBuf;

pub fn get_config_dir() -> PathBuf {
    let home = env::var("HOME").unwrap_or_else(|_| String::from("/tmp"));
    PathBuf::from(home)
        .join("Library")
        .join("Application Support")
        .join("ImageBrowser")
}

pub fn get_data_dir() -> PathBuf {
    get_config_dir()
}
