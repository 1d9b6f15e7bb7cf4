//! Boundary traits for the virtual-tabletop host.
//!
//! The host owns actors, scene tokens and user notifications. TokenSwap only
//! reads actors and tokens and writes a single model field on a token.

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Document path of the 3D model field written on a token.
pub const MODEL_FLAG_KEY: &str = "flags.levels-3d-preview.model3d";

/// Actor type whose members appear in the configuration form.
pub const CHARACTER_KIND: &str = "character";

/// An actor known to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl Actor {
    pub fn is_character(&self) -> bool {
        self.kind == CHARACTER_KIND
    }
}

/// A token placed on the current scene.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenInfo {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub actor_id: Option<String>,
    /// Current value of the model field, if set.
    #[serde(default)]
    pub model: Option<String>,
}

/// Scene token access.
#[async_trait::async_trait]
pub trait TokenHost: Send + Sync {
    /// Returns every token on the current scene.
    async fn scene_tokens(&self) -> Result<Vec<TokenInfo>>;

    /// Writes `model_path` into the token's model field.
    async fn update_token_model(&self, token_id: &str, model_path: &str) -> Result<()>;

    /// Finds the first live token bound to `actor_id`.
    async fn token_for_actor(&self, actor_id: &str) -> Result<Option<TokenInfo>> {
        Ok(self
            .scene_tokens()
            .await?
            .into_iter()
            .find(|token| token.actor_id.as_deref() == Some(actor_id)))
    }
}

/// Actor listing.
#[async_trait::async_trait]
pub trait ActorDirectory: Send + Sync {
    async fn actors(&self) -> Result<Vec<Actor>>;
}

/// Non-blocking, user-visible notifications.
pub trait Notifier: Send + Sync {
    fn info(&self, message: &str);
    fn warn(&self, message: &str);
    fn error(&self, message: &str);
}
