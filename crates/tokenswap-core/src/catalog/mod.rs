//! Remote figurine catalog: data model, cache, normalization and the
//! account-level source abstraction.

pub mod cache;
pub mod model;
pub mod normalize;
pub mod source;

pub use cache::CatalogCache;
pub use model::{CatalogItem, CatalogSnapshot, GoodsResponse, SourceType};
pub use normalize::{NormalizedItem, Normalizer, PackColorPolicy, PackColors};
pub use source::{GoodsSource, parse_auth_keys};
