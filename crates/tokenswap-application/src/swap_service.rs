//! Model Swap Service
//!
//! Reacts to combat lifecycle events by writing each mapped actor's
//! normal or battle model path onto that actor's token.

use std::sync::Arc;

use tokenswap_core::error::Result;
use tokenswap_core::settings::SettingsStore;
use tokenswap_core::swap::{
    CombatEvent, Notifier, SkipReason, SwapMode, SwapReport, TokenHost, TokenUpdate,
};

pub struct ModelSwapService {
    settings: Arc<dyn SettingsStore>,
    host: Arc<dyn TokenHost>,
    notifier: Arc<dyn Notifier>,
}

impl ModelSwapService {
    pub fn new(
        settings: Arc<dyn SettingsStore>,
        host: Arc<dyn TokenHost>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            settings,
            host,
            notifier,
        }
    }

    /// Entry point for host combat hooks.
    pub async fn handle_combat_event(&self, event: CombatEvent) -> Result<SwapReport> {
        let mode = event.target_mode();
        match event {
            CombatEvent::Created => {
                tracing::info!("Combat started - swapping to battle models.")
            }
            CombatEvent::Deleted => {
                tracing::info!("Combat ended - swapping to normal models.")
            }
        }
        self.swap_all(mode).await
    }

    /// Points every mapped actor's token at its `mode` model.
    ///
    /// Actors are handled one at a time and independently: a missing path,
    /// a missing token or a rejected update skips that actor only. The
    /// returned report lists what was updated and what was skipped. Only a
    /// failure to read the settings aborts the pass.
    pub async fn swap_all(&self, mode: SwapMode) -> Result<SwapReport> {
        let settings = self.settings.load().await?;
        let mut report = SwapReport::new(mode);

        for (actor_id, models) in &settings.player_models {
            let Some(path) = models.path(mode) else {
                tracing::warn!(actor_id, %mode, "No model path defined for actor");
                self.skip(&mut report, actor_id, SkipReason::MissingMapping);
                continue;
            };

            let token = match self.host.token_for_actor(actor_id).await {
                Ok(Some(token)) => token,
                Ok(None) => {
                    tracing::warn!(actor_id, "Could not find token for actor on the scene");
                    self.skip(&mut report, actor_id, SkipReason::MissingToken);
                    continue;
                }
                Err(err) => {
                    tracing::warn!(actor_id, error = %err, "Token lookup failed");
                    self.skip(&mut report, actor_id, SkipReason::UpdateFailed(err.to_string()));
                    continue;
                }
            };

            if let Err(err) = self.host.update_token_model(&token.id, path).await {
                tracing::warn!(actor_id, token = %token.name, error = %err, "Token update failed");
                self.skip(&mut report, actor_id, SkipReason::UpdateFailed(err.to_string()));
                continue;
            }

            tracing::info!(token = %token.name, path, "Updated token model");
            report.updated.push(TokenUpdate {
                actor_id: actor_id.clone(),
                token_id: token.id,
                token_name: token.name,
                path: path.to_string(),
            });
        }

        Ok(report)
    }

    // One user-visible warning per skipped actor.
    fn skip(&self, report: &mut SwapReport, actor_id: &str, reason: SkipReason) {
        self.notifier.warn(&format!(
            "Actor {actor_id} kept its current model for {} mode: {reason}.",
            report.mode
        ));
        report.skip(actor_id, reason);
    }
}
