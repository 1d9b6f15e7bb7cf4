//! Combat-driven model swapping: modes, per-actor mappings and the host
//! boundary the swap is applied through.

pub mod host;
pub mod model;

pub use host::{Actor, ActorDirectory, MODEL_FLAG_KEY, Notifier, TokenHost, TokenInfo};
pub use model::{
    CombatEvent, ModelPaths, PlayerModels, SkipReason, SkippedActor, SwapMode, SwapReport,
    TokenUpdate,
};
