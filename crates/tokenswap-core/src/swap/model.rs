use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum::{AsRefStr, Display, EnumString};

/// Which display variant a token should show.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SwapMode {
    /// Out of combat.
    Normal,
    /// In combat.
    Battle,
}

/// Host combat lifecycle events the swap listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum CombatEvent {
    /// A combat encounter was created.
    Created,
    /// A combat encounter was deleted.
    Deleted,
}

impl CombatEvent {
    /// The mode every mapped token switches to on this event.
    pub fn target_mode(self) -> SwapMode {
        match self {
            CombatEvent::Created => SwapMode::Battle,
            CombatEvent::Deleted => SwapMode::Normal,
        }
    }
}

/// Model paths configured for one actor. Either may be a plain path or an
/// opaque catalog reference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelPaths {
    #[serde(default)]
    pub normal: String,
    #[serde(default)]
    pub battle: String,
}

impl ModelPaths {
    pub fn new(normal: impl Into<String>, battle: impl Into<String>) -> Self {
        Self {
            normal: normal.into(),
            battle: battle.into(),
        }
    }

    /// The configured path for `mode`, or `None` when blank.
    pub fn path(&self, mode: SwapMode) -> Option<&str> {
        let path = match mode {
            SwapMode::Normal => self.normal.as_str(),
            SwapMode::Battle => self.battle.as_str(),
        };
        let path = path.trim();
        (!path.is_empty()).then_some(path)
    }

    pub fn set(&mut self, mode: SwapMode, path: impl Into<String>) {
        match mode {
            SwapMode::Normal => self.normal = path.into(),
            SwapMode::Battle => self.battle = path.into(),
        }
    }
}

/// Actor id to model paths. Ordered so swaps run in a predictable order.
pub type PlayerModels = BTreeMap<String, ModelPaths>;

/// Why an actor was left untouched by a swap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// No path configured for the requested mode.
    MissingMapping,
    /// No token on the current scene is bound to the actor.
    MissingToken,
    /// The host rejected the update.
    UpdateFailed(String),
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::MissingMapping => write!(f, "no model path defined"),
            SkipReason::MissingToken => write!(f, "no token on the scene"),
            SkipReason::UpdateFailed(message) => write!(f, "update failed: {message}"),
        }
    }
}

/// A token whose model field was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenUpdate {
    pub actor_id: String,
    pub token_id: String,
    pub token_name: String,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedActor {
    pub actor_id: String,
    pub reason: SkipReason,
}

/// Outcome of one swap pass. Partial application is expected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapReport {
    pub mode: SwapMode,
    pub updated: Vec<TokenUpdate>,
    pub skipped: Vec<SkippedActor>,
}

impl SwapReport {
    pub fn new(mode: SwapMode) -> Self {
        Self {
            mode,
            updated: Vec::new(),
            skipped: Vec::new(),
        }
    }

    pub fn skip(&mut self, actor_id: impl Into<String>, reason: SkipReason) {
        self.skipped.push(SkippedActor {
            actor_id: actor_id.into(),
            reason,
        });
    }

    pub fn skipped_for(&self, actor_id: &str) -> Option<&SkipReason> {
        self.skipped
            .iter()
            .find(|s| s.actor_id == actor_id)
            .map(|s| &s.reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_strings() {
        assert_eq!(SwapMode::Battle.to_string(), "battle");
        assert_eq!("Normal".parse::<SwapMode>().unwrap(), SwapMode::Normal);
        assert!("peace".parse::<SwapMode>().is_err());
    }

    #[test]
    fn test_combat_event_modes() {
        assert_eq!(CombatEvent::Created.target_mode(), SwapMode::Battle);
        assert_eq!(CombatEvent::Deleted.target_mode(), SwapMode::Normal);
        assert_eq!("deleted".parse::<CombatEvent>().unwrap(), CombatEvent::Deleted);
    }

    #[test]
    fn test_blank_path_is_absent() {
        let paths = ModelPaths::new("  ", "battle.glb");
        assert_eq!(paths.path(SwapMode::Normal), None);
        assert_eq!(paths.path(SwapMode::Battle), Some("battle.glb"));
    }

    #[test]
    fn test_model_paths_deserialize_partial() {
        let models: PlayerModels =
            serde_json::from_str(r#"{"actorA": {"battle": "pathX"}}"#).unwrap();
        assert_eq!(models["actorA"].battle, "pathX");
        assert_eq!(models["actorA"].normal, "");
    }

    #[test]
    fn test_report_lookup() {
        let mut report = SwapReport::new(SwapMode::Battle);
        report.skip("a1", SkipReason::UpdateFailed("locked".into()));
        assert_eq!(
            report.skipped_for("a1").map(ToString::to_string).as_deref(),
            Some("update failed: locked")
        );
        assert!(report.skipped_for("a2").is_none());
    }
}
