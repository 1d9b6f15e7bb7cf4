//! Remote catalog access for TokenSwap.
//!
//! [`HeroForgeClient`] talks to the HeroForge REST API for a single account;
//! [`CatalogClient`] aggregates several accounts and applies the retry policy.

pub mod catalog_client;
pub mod heroforge_api;

pub use catalog_client::{CatalogClient, RetryPolicy};
pub use heroforge_api::HeroForgeClient;
