use crate::core::error::NavigatorError;
use std::path::PathBuf;

const APP_DIR: &str = "forecast-navigator";

pub fn get_config_directory() -> Result<PathBuf, NavigatorError> {
    let base = match std::env::consts::OS {
        "linux" | "freebsd" | "netbsd" | "openbsd" => std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| dirs::home_dir().unwrap_or_default().join(".config")),
        "macos" => dirs::home_dir()
            .unwrap_or_default()
            .join("Library/Application Support"),
        _ => dirs::config_dir().ok_or_else(|| {
            NavigatorError::config_error("could not determine the configuration directory")
        })?,
    };

    Ok(base.join(APP_DIR))
}

pub fn get_cache_directory() -> Result<PathBuf, NavigatorError> {
    let base = match std::env::consts::OS {
        "linux" | "freebsd" | "netbsd" | "openbsd" => std::env::var("XDG_CACHE_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| dirs::home_dir().unwrap_or_default().join(".cache")),
        "macos" => dirs::home_dir().unwrap_or_default().join("Library/Caches"),
        _ => dirs::cache_dir().ok_or_else(|| {
            NavigatorError::config_error("could not determine the cache directory")
        })?,
    };

    Ok(base.join(APP_DIR))
}
