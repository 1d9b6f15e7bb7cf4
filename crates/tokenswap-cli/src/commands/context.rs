use anyhow::Result;
use std::sync::Arc;
use tokenswap_application::{CatalogService, ConfigFormService, ModelSwapService};
use chrono::Duration;
use tokenswap_core::catalog::{CatalogCache, Normalizer, PackColorPolicy};
use tokenswap_core::settings::SettingsStore;
use tokenswap_core::swap::Notifier;
use tokenswap_infrastructure::{JsonSceneHost, TokenSwapPaths, TomlSettingsStore, TracingNotifier};
use tokenswap_interaction::{CatalogClient, HeroForgeClient};

use crate::GlobalOptions;

/// Stores, host and notifier shared by every command.
pub struct AppContext {
    settings: Arc<TomlSettingsStore>,
    host: Arc<JsonSceneHost>,
    notifier: Arc<dyn Notifier>,
    base_url: String,
    auth_key_override: Option<String>,
    cache_max_age: Option<Duration>,
    pack_colors: PackColorPolicy,
}

impl AppContext {
    pub async fn load(options: &GlobalOptions) -> Result<Self> {
        let settings = match &options.settings {
            Some(path) => TomlSettingsStore::with_path(path.clone()),
            None => TomlSettingsStore::new()?,
        };
        let scene_path = match &options.scene {
            Some(path) => path.clone(),
            None => TokenSwapPaths::scene_file()?,
        };
        tracing::debug!(
            settings = %settings.path().display(),
            scene = %scene_path.display(),
            "Loading context"
        );

        Ok(Self {
            settings: Arc::new(settings),
            host: Arc::new(JsonSceneHost::open(scene_path).await?),
            notifier: Arc::new(TracingNotifier),
            base_url: options.base_url.clone(),
            auth_key_override: options.auth_key.clone(),
            cache_max_age: options
                .cache_max_age
                .map(|secs| Duration::seconds(i64::from(secs))),
            pack_colors: if options.stable_pack_colors {
                PackColorPolicy::Stable
            } else {
                PackColorPolicy::Random
            },
        })
    }

    /// The auth key from the command line or environment, else the stored one.
    pub async fn auth_key(&self) -> Result<String> {
        if let Some(key) = &self.auth_key_override {
            return Ok(key.clone());
        }
        Ok(self.settings.load().await?.auth_key)
    }

    pub fn catalog_service(&self) -> CatalogService {
        let source = Arc::new(HeroForgeClient::with_base_url(&self.base_url));
        let client = CatalogClient::new(source).with_notifier(self.notifier.clone());
        let cache = match self.cache_max_age {
            Some(max_age) => CatalogCache::with_max_age(max_age),
            None => CatalogCache::new(),
        };
        CatalogService::new(client, cache, self.notifier.clone())
            .with_normalizer(Normalizer::new(self.pack_colors))
    }

    pub fn config_service(&self) -> ConfigFormService {
        ConfigFormService::new(
            self.settings.clone(),
            self.host.clone(),
            self.host.clone(),
            self.notifier.clone(),
        )
    }

    pub fn swap_service(&self) -> ModelSwapService {
        ModelSwapService::new(
            self.settings.clone(),
            self.host.clone(),
            self.notifier.clone(),
        )
    }
}
