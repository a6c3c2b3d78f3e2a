// linkqr platform paths for Windows
// Config:    %APPDATA%\linkqr
// Data:      %APPDATA%\linkqr
// Downloads: %USERPROFILE%\Downloads

use std::env;
use std::path::PathBuf;

fn app_data() -> PathBuf {
    match env::var("APPDATA") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => PathBuf::from("C:\\Users\\Default\\AppData\\Roaming"),
    }
}

pub fn get_config_dir() -> PathBuf {
    app_data().join("linkqr")
}

pub fn get_data_dir() -> PathBuf {
    app_data().join("linkqr")
}

pub fn get_downloads_dir() -> PathBuf {
    match env::var("USERPROFILE") {
        Ok(profile) => PathBuf::from(profile).join("Downloads"),
        Err(_) => PathBuf::from("C:\\Users\\Default\\Downloads"),
    }
}
