//! Persisted module settings.

use crate::error::Result;
use crate::swap::PlayerModels;
use serde::{Deserialize, Serialize};

/// Everything TokenSwap persists between sessions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleSettings {
    /// Comma-separated catalog bearer tokens.
    #[serde(default, rename = "authKey")]
    pub auth_key: String,
    /// Per-actor normal/battle model paths.
    #[serde(default, rename = "playerModels")]
    pub player_models: PlayerModels,
}

/// Settings persistence.
///
/// Mappings are only ever replaced, never removed automatically.
#[async_trait::async_trait]
pub trait SettingsStore: Send + Sync {
    /// Loads the settings; a store that was never written yields defaults.
    async fn load(&self) -> Result<ModuleSettings>;

    /// Replaces the stored player models wholesale.
    async fn save_player_models(&self, models: &PlayerModels) -> Result<()>;

    /// Replaces the stored auth key.
    async fn save_auth_key(&self, auth_key: &str) -> Result<()>;
}
