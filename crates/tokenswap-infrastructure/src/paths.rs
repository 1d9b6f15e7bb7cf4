//! Path resolution for TokenSwap files.
//!
//! ```text
//! ~/.config/tokenswap/         # Config directory (platform specific)
//! ├── settings.toml            # authKey + playerModels
//! └── scene.json               # Default scene file for the CLI host
//! ```

use std::path::PathBuf;

/// Environment variable that overrides the settings file location.
pub const SETTINGS_ENV: &str = "TOKENSWAP_SETTINGS";

const APP_DIR: &str = "tokenswap";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for tokenswap_core::SwapError {
    fn from(err: PathError) -> Self {
        tokenswap_core::SwapError::config(err.to_string())
    }
}

pub struct TokenSwapPaths;

impl TokenSwapPaths {
    /// Returns the TokenSwap configuration directory (e.g. `~/.config/tokenswap/`).
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// Returns the settings file path, honoring `TOKENSWAP_SETTINGS`.
    pub fn settings_file() -> Result<PathBuf, PathError> {
        if let Some(path) = std::env::var_os(SETTINGS_ENV).filter(|p| !p.is_empty()) {
            return Ok(PathBuf::from(path));
        }
        Ok(Self::config_dir()?.join("settings.toml"))
    }

    /// Returns the default scene file path.
    pub fn scene_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("scene.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_files_live_in_app_dir() {
        // Only meaningful where the platform exposes a config dir.
        if let Ok(dir) = TokenSwapPaths::config_dir() {
            assert!(dir.ends_with(APP_DIR));
            assert_eq!(TokenSwapPaths::scene_file().unwrap(), dir.join("scene.json"));
        }
    }
}
