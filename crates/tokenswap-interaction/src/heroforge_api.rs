//! HeroForgeClient - Direct REST API access to a HeroForge account.
//!
//! One authenticated `GET /v1/user/` per call; the response's `goods` list is
//! returned as-is.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tokenswap_core::SwapError;
use tokenswap_core::catalog::{CatalogItem, GoodsResponse, GoodsSource};
use tokenswap_core::error::Result;

pub const DEFAULT_BASE_URL: &str = "https://api.heroforge.com";
const USER_GOODS_PATH: &str = "/v1/user/";

/// Client for the HeroForge user-goods endpoint.
#[derive(Clone)]
pub struct HeroForgeClient {
    client: Client,
    base_url: String,
}

impl HeroForgeClient {
    /// Creates a client against the public HeroForge API.
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Creates a client against another host (mirrors, tests).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Reuses an existing reqwest client (shared connection pool, custom
    /// timeouts).
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, USER_GOODS_PATH)
    }
}

impl Default for HeroForgeClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GoodsSource for HeroForgeClient {
    async fn fetch_goods(&self, auth_token: &str) -> Result<Vec<CatalogItem>> {
        let url = self.endpoint();
        tracing::debug!(url = %url, "Fetching HeroForge goods");

        let response = self
            .client
            .get(&url)
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Token {auth_token}"))
            .send()
            .await
            .map_err(|err| SwapError::catalog_fetch(format!("HeroForge request failed: {err}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read HeroForge error body".to_string());
            return Err(map_http_error(status, body));
        }

        let parsed: GoodsResponse = response.json().await.map_err(|err| {
            SwapError::catalog_fetch(format!("Failed to parse HeroForge response: {err}"))
        })?;

        tracing::debug!(goods = parsed.goods.len(), "HeroForge goods received");
        Ok(parsed.goods)
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

fn map_http_error(status: StatusCode, body: String) -> SwapError {
    let detail = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|e| e.detail)
        .unwrap_or(body);

    let hint = match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => "API Key is Invalid",
        s if s.is_server_error() => "HeroForge servers are down",
        _ => "unexpected response",
    };

    let message = format!("{hint} ({}): {detail}", status.as_u16());
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => SwapError::catalog_rejected(message),
        _ => SwapError::catalog_fetch(message),
    }
}
