//! Application layer for TokenSwap.
//!
//! Use cases that coordinate the catalog client, the snapshot cache, the
//! settings store and the host: browsing the catalog, editing per-actor
//! model assignments, and swapping token models on combat events.

pub mod browser_view;
pub mod catalog_service;
pub mod config_service;
pub mod swap_service;

pub use browser_view::BrowserRenderer;
pub use catalog_service::CatalogService;
pub use config_service::ConfigFormService;
pub use swap_service::ModelSwapService;
