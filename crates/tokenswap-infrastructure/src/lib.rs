pub mod notifier;
pub mod paths;
pub mod scene_host;
pub mod settings_store;
pub mod storage;

pub use crate::notifier::TracingNotifier;
pub use crate::paths::TokenSwapPaths;
pub use crate::scene_host::JsonSceneHost;
pub use crate::settings_store::TomlSettingsStore;
