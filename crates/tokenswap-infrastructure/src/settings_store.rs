//! TOML-file implementation of [`SettingsStore`].

use crate::paths::TokenSwapPaths;
use crate::storage::ConfigStorage;
use std::path::PathBuf;
use tokenswap_core::SwapError;
use tokenswap_core::error::Result;
use tokenswap_core::settings::{ModuleSettings, SettingsStore};
use tokenswap_core::swap::PlayerModels;

/// Settings persisted in a single TOML file.
///
/// File access is blocking and short, so it runs on the blocking pool.
#[derive(Debug, Clone)]
pub struct TomlSettingsStore {
    storage: ConfigStorage,
}

impl TomlSettingsStore {
    /// Uses the default settings location (see [`TokenSwapPaths::settings_file`]).
    pub fn new() -> Result<Self> {
        Ok(Self::with_path(TokenSwapPaths::settings_file()?))
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self {
            storage: ConfigStorage::new(path),
        }
    }

    pub fn path(&self) -> PathBuf {
        self.storage.path().to_path_buf()
    }

    async fn update<F>(&self, f: F) -> Result<()>
    where
        F: FnOnce(&mut ModuleSettings) + Send + 'static,
    {
        let storage = self.storage.clone();
        tokio::task::spawn_blocking(move || storage.update(f))
            .await
            .map_err(|e| SwapError::internal(format!("Settings task failed: {e}")))??;
        Ok(())
    }
}

#[async_trait::async_trait]
impl SettingsStore for TomlSettingsStore {
    async fn load(&self) -> Result<ModuleSettings> {
        let storage = self.storage.clone();
        let loaded = tokio::task::spawn_blocking(move || storage.load::<ModuleSettings>())
            .await
            .map_err(|e| SwapError::internal(format!("Settings task failed: {e}")))??;
        Ok(loaded.unwrap_or_default())
    }

    async fn save_player_models(&self, models: &PlayerModels) -> Result<()> {
        let models = models.clone();
        self.update(move |settings| settings.player_models = models).await?;
        tracing::info!(path = %self.storage.path().display(), "Saved player models");
        Ok(())
    }

    async fn save_auth_key(&self, auth_key: &str) -> Result<()> {
        let auth_key = auth_key.trim().to_string();
        self.update(move |settings| settings.auth_key = auth_key).await?;
        tracing::info!(path = %self.storage.path().display(), "Saved auth key");
        Ok(())
    }
}
