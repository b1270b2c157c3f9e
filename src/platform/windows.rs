// ImageBrowser paths on Windows. Settings and the bookmark database share
// %APPDATA%/ImageBrowser.

use std::env;
use std::path::PathBuf;

pub fn get_config_dir() -> PathBuf {
    env::var("APPDATA")
        .map(PathBuf::from)
        .or_else(|_| env::var("USERPROFILE").map(|p| PathBuf::from(p).join("AppData").join("Roaming")))
        .unwrap_or_else(|_| env::temp_dir())
        .join("ImageBrowser")
}

pub fn get_data_dir() -> PathBuf {
    get_config_dir()
}
