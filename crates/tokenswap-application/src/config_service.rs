//! Configuration Form Service
//!
//! Backs the per-actor model assignment form: lists character rows, saves
//! submitted forms, and fills single fields from the catalog browser or from
//! a token already on the scene.

use std::sync::Arc;

use tokenswap_core::browser::BrowserState;
use tokenswap_core::config_form::{
    ActorRow, TokenModelChoice, build_rows, parse_form, token_model_choices,
};
use tokenswap_core::error::Result;
use tokenswap_core::settings::SettingsStore;
use tokenswap_core::swap::{ActorDirectory, Notifier, PlayerModels, SwapMode, TokenHost};
use tokenswap_core::SwapError;

pub struct ConfigFormService {
    settings: Arc<dyn SettingsStore>,
    actors: Arc<dyn ActorDirectory>,
    host: Arc<dyn TokenHost>,
    notifier: Arc<dyn Notifier>,
}

impl ConfigFormService {
    pub fn new(
        settings: Arc<dyn SettingsStore>,
        actors: Arc<dyn ActorDirectory>,
        host: Arc<dyn TokenHost>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            settings,
            actors,
            host,
            notifier,
        }
    }

    /// Character rows, sorted by name, with their stored paths.
    pub async fn rows(&self) -> Result<Vec<ActorRow>> {
        let actors = self.actors.actors().await?;
        let settings = self.settings.load().await?;
        Ok(build_rows(&actors, &settings.player_models))
    }

    /// Saves a submitted form. The parsed mapping replaces the stored one.
    pub async fn submit<I, K, V>(&self, fields: I) -> Result<PlayerModels>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let models = parse_form(fields);
        self.settings.save_player_models(&models).await?;
        tracing::debug!(actors = models.len(), "Saved model assignment form");
        Ok(models)
    }

    /// Sets one actor's path for `mode`, keeping every other entry.
    pub async fn assign(&self, actor_id: &str, mode: SwapMode, path: &str) -> Result<PlayerModels> {
        if actor_id.trim().is_empty() {
            return Err(SwapError::config("Actor id must not be empty"));
        }
        let mut models = self.settings.load().await?.player_models;
        models
            .entry(actor_id.to_string())
            .or_default()
            .set(mode, path.trim());
        self.settings.save_player_models(&models).await?;
        Ok(models)
    }

    /// Confirms `browser` and stores its selection as the actor's path.
    pub async fn pick_from_browser(
        &self,
        actor_id: &str,
        mode: SwapMode,
        browser: BrowserState,
    ) -> Result<String> {
        let reference = match browser.confirm() {
            Ok(reference) => reference.to_string(),
            Err(err) => {
                self.notifier.error(&err.to_string());
                return Err(err);
            }
        };
        self.assign(actor_id, mode, &reference).await?;
        Ok(reference)
    }

    /// Actor-bound scene tokens and their current models.
    pub async fn token_model_choices(&self) -> Result<Vec<TokenModelChoice>> {
        let tokens = self.host.scene_tokens().await?;
        if tokens.is_empty() {
            self.notifier.warn("No tokens found on the scene.");
        }
        Ok(token_model_choices(&tokens))
    }

    pub async fn set_auth_key(&self, auth_key: &str) -> Result<()> {
        self.settings.save_auth_key(auth_key).await
    }
}
