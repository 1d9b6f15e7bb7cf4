//! Account-level catalog source trait.

use super::model::CatalogItem;
use crate::error::{Result, SwapError};

/// Fetches the goods owned by one catalog account.
///
/// Implementations perform exactly one authenticated request per call and
/// return the goods in server order. Aggregation across accounts and retry
/// are layered on top by the caller.
#[async_trait::async_trait]
pub trait GoodsSource: Send + Sync {
    /// Fetches every good visible to `auth_token`.
    ///
    /// # Returns
    ///
    /// - `Ok(Vec<CatalogItem>)`: The account's goods
    /// - `Err(SwapError::CatalogFetch)`: Network, status or parse failure
    async fn fetch_goods(&self, auth_token: &str) -> Result<Vec<CatalogItem>>;
}

/// Splits the configured auth key setting into individual bearer tokens.
///
/// Tokens are comma-separated; surrounding whitespace and empty entries are
/// dropped. An empty result is reported as [`SwapError::MissingAuthKey`].
pub fn parse_auth_keys(raw: &str) -> Result<Vec<String>> {
    let keys: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .map(str::to_string)
        .collect();

    if keys.is_empty() {
        return Err(SwapError::MissingAuthKey);
    }
    Ok(keys)
}
