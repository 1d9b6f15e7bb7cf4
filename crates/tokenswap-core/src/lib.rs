//! Domain layer for TokenSwap.
//!
//! Catalog goods fetched from HeroForge are normalized for browsing, picked
//! as opaque references, stored per actor, and swapped onto scene tokens
//! when combat starts or ends. This crate holds the types, the pure logic and
//! the boundary traits; I/O lives in the interaction and infrastructure
//! crates.

pub mod browser;
pub mod catalog;
pub mod config_form;
pub mod error;
pub mod reference;
pub mod settings;
pub mod swap;
pub mod text;

// Re-export common error type
pub use error::SwapError;

pub use reference::{OpaqueReference, resolve, resolve_cached};
