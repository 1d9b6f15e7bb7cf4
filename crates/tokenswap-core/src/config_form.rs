//! Data shaping for the per-actor model assignment form.

use crate::swap::{Actor, ModelPaths, PlayerModels, SwapMode, TokenInfo};
use crate::text::locale_compare;
use serde::Serialize;

/// One row of the form: a character and its current paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActorRow {
    pub id: String,
    pub name: String,
    pub settings: ModelPaths,
}

/// Builds form rows for every character actor, sorted by name. Actors
/// without stored paths get empty ones.
pub fn build_rows(actors: &[Actor], models: &PlayerModels) -> Vec<ActorRow> {
    let mut characters: Vec<&Actor> = actors.iter().filter(|a| a.is_character()).collect();
    characters.sort_by(|a, b| locale_compare(&a.name, &b.name));

    characters
        .into_iter()
        .map(|actor| ActorRow {
            id: actor.id.clone(),
            name: actor.name.clone(),
            settings: models.get(&actor.id).cloned().unwrap_or_default(),
        })
        .collect()
}

/// Form field name for an actor's path in `mode`, e.g. `abc123-battle`.
pub fn field_name(actor_id: &str, mode: SwapMode) -> String {
    format!("{actor_id}-{mode}")
}

/// Parses submitted form fields (`<actorId>-<mode>` → path) into a complete
/// replacement mapping. Fields without both parts, or with an unknown mode,
/// are ignored. Values are trimmed.
pub fn parse_form<I, K, V>(fields: I) -> PlayerModels
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut models = PlayerModels::new();

    for (key, value) in fields {
        let mut parts = key.as_ref().split('-');
        let (Some(actor_id), Some(mode)) = (parts.next(), parts.next()) else {
            continue;
        };
        if actor_id.is_empty() || mode.is_empty() {
            continue;
        }
        let Ok(mode) = mode.parse::<SwapMode>() else {
            tracing::debug!(field = key.as_ref(), "Ignoring form field with unknown mode");
            continue;
        };

        models
            .entry(actor_id.to_string())
            .or_default()
            .set(mode, value.as_ref().trim());
    }

    models
}

/// A scene token offered by the "pick from token" helper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenModelChoice {
    pub token_name: String,
    pub model: String,
}

/// Lists actor-bound tokens with their current model paths.
pub fn token_model_choices(tokens: &[TokenInfo]) -> Vec<TokenModelChoice> {
    tokens
        .iter()
        .filter(|t| t.actor_id.is_some())
        .map(|t| TokenModelChoice {
            token_name: t.name.clone(),
            model: t.model.clone().unwrap_or_default(),
        })
        .collect()
}
