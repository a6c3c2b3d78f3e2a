// linkqr platform paths for Linux
// Config:    ~/.config/linkqr
// Data:      ~/.local/share/linkqr
// Downloads: ~/Downloads

use std::env;
use std::path::PathBuf;

fn home_dir() -> PathBuf {
    PathBuf::from(env::var("HOME").unwrap_or_else(|_| String::from("/tmp")))
}

/// Uses `$XDG_CONFIG_HOME/linkqr` if set, otherwise `~/.config/linkqr`.
pub fn get_config_dir() -> PathBuf {
    if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
        PathBuf::from(xdg).join("linkqr")
    } else {
        home_dir().join(".config").join("linkqr")
    }
}

/// Uses `$XDG_DATA_HOME/linkqr` if set, otherwise `~/.local/share/linkqr`.
pub fn get_data_dir() -> PathBuf {
    if let Ok(xdg) = env::var("XDG_DATA_HOME") {
        PathBuf::from(xdg).join("linkqr")
    } else {
        home_dir().join(".local").join("share").join("linkqr")
    }
}

/// Uses `$XDG_DOWNLOAD_DIR` if set, otherwise `~/Downloads`.
pub fn get_downloads_dir() -> PathBuf {
    match env::var("XDG_DOWNLOAD_DIR") {
        Ok(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => home_dir().join("Downloads"),
    }
}
