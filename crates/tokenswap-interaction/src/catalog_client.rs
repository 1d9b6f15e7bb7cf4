//! Multi-account catalog fetch with a bounded retry.

use std::sync::Arc;
use std::time::Duration;

use tokenswap_core::catalog::{CatalogItem, CatalogSnapshot, GoodsSource};
use tokenswap_core::error::Result;
use tokenswap_core::swap::Notifier;

/// How often a failed catalog fetch is re-issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Extra attempts after the first one fails.
    pub max_retries: u32,
    /// Fixed pause before each retry.
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 1,
            backoff: Duration::from_millis(500),
        }
    }
}

impl RetryPolicy {
    /// No retries at all.
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            backoff: Duration::ZERO,
        }
    }
}

/// Fetches and merges the goods of every configured account.
///
/// Accounts are queried one after another in the given order; the merged
/// list keeps that order and is not deduplicated. Any failure fails the
/// whole attempt, which is then retried according to the [`RetryPolicy`].
#[derive(Clone)]
pub struct CatalogClient {
    source: Arc<dyn GoodsSource>,
    policy: RetryPolicy,
    notifier: Option<Arc<dyn Notifier>>,
}

impl CatalogClient {
    pub fn new(source: Arc<dyn GoodsSource>) -> Self {
        Self {
            source,
            policy: RetryPolicy::default(),
            notifier: None,
        }
    }

    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Every failed attempt is reported through `notifier`.
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.policy
    }

    /// Fetches every account's goods into one snapshot.
    ///
    /// # Returns
    ///
    /// - `Ok(CatalogSnapshot)`: All accounts answered in some attempt
    /// - `Err(SwapError::CatalogFetch)`: The last allowed attempt failed, or
    ///   the service rejected the credentials (never retried)
    pub async fn fetch_catalog(&self, auth_tokens: &[String]) -> Result<CatalogSnapshot> {
        let mut attempt = 0;
        loop {
            match self.fetch_once(auth_tokens).await {
                Ok(goods) => {
                    tracing::info!(
                        accounts = auth_tokens.len(),
                        goods = goods.len(),
                        attempt,
                        "Catalog fetched"
                    );
                    return Ok(CatalogSnapshot::new(goods));
                }
                Err(err) => {
                    tracing::error!(attempt, error = %err, "Catalog fetch failed");
                    if let Some(notifier) = &self.notifier {
                        notifier.error(
                            "Error fetching data from HeroForge: API Key is Invalid or Heroforge servers are down.",
                        );
                    }
                    if !err.is_retryable() || attempt >= self.policy.max_retries {
                        return Err(err);
                    }
                    attempt += 1;
                    if !self.policy.backoff.is_zero() {
                        tokio::time::sleep(self.policy.backoff).await;
                    }
                }
            }
        }
    }

    async fn fetch_once(&self, auth_tokens: &[String]) -> Result<Vec<CatalogItem>> {
        let mut goods = Vec::new();
        for token in auth_tokens {
            goods.extend(self.source.fetch_goods(token).await?);
        }
        Ok(goods)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use tokenswap_core::SwapError;
    use tokenswap_core::catalog::SourceType;

    /// Serves fixed goods per token; the first `failures` calls fail.
    struct ScriptedSource {
        goods: HashMap<String, Vec<CatalogItem>>,
        failures: Mutex<u32>,
        calls: Mutex<Vec<String>>,
    }

    impl ScriptedSource {
        fn new(failures: u32) -> Self {
            let mut goods = HashMap::new();
            goods.insert(
                "tok-a".to_string(),
                vec![
                    CatalogItem::new("a1", "Alpha", SourceType::User),
                    CatalogItem::new("a2", "Beta", SourceType::User),
                ],
            );
            goods.insert(
                "tok-b".to_string(),
                vec![CatalogItem::new("a1", "Alpha", SourceType::Pack).in_pack("Core")],
            );
            Self {
                goods,
                failures: Mutex::new(failures),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl GoodsSource for ScriptedSource {
        async fn fetch_goods(&self, auth_token: &str) -> Result<Vec<CatalogItem>> {
            self.calls.lock().unwrap().push(auth_token.to_string());
            let mut failures = self.failures.lock().unwrap();
            if *failures > 0 {
                *failures -= 1;
                return Err(SwapError::catalog_fetch("connection reset"));
            }
            self.goods
                .get(auth_token)
                .cloned()
                .ok_or_else(|| SwapError::catalog_rejected("401"))
        }
    }

    #[derive(Default)]
    struct RecordingNotifier(Mutex<Vec<String>>);

    impl Notifier for RecordingNotifier {
        fn info(&self, _message: &str) {}
        fn warn(&self, _message: &str) {}
        fn error(&self, message: &str) {
            self.0.lock().unwrap().push(message.to_string());
        }
    }

    fn tokens(list: &[&str]) -> Vec<String> {
        list.iter().map(|t| t.to_string()).collect()
    }

    fn fast_retry() -> RetryPolicy {
        RetryPolicy {
            max_retries: 1,
            backoff: Duration::ZERO,
        }
    }

    #[tokio::test]
    async fn test_merges_accounts_in_token_order() {
        let source = Arc::new(ScriptedSource::new(0));
        let client = CatalogClient::new(source.clone()).with_retry_policy(fast_retry());

        let snapshot = client.fetch_catalog(&tokens(&["tok-a", "tok-b"])).await.unwrap();

        let ids: Vec<_> = snapshot.goods.iter().map(|g| g.id.as_str()).collect();
        assert_eq!(ids, vec!["a1", "a2", "a1"]);
        assert_eq!(snapshot.goods[2].source_type, SourceType::Pack);
        assert_eq!(source.calls(), tokens(&["tok-a", "tok-b"]));
    }

    #[tokio::test]
    async fn test_single_retry_recovers() {
        let source = Arc::new(ScriptedSource::new(1));
        let notifier = Arc::new(RecordingNotifier::default());
        let client = CatalogClient::new(source.clone())
            .with_retry_policy(fast_retry())
            .with_notifier(notifier.clone());

        let snapshot = client.fetch_catalog(&tokens(&["tok-a"])).await.unwrap();

        assert_eq!(snapshot.len(), 2);
        assert_eq!(source.calls().len(), 2);
        assert_eq!(notifier.0.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_retry_is_bounded() {
        let source = Arc::new(ScriptedSource::new(u32::MAX));
        let notifier = Arc::new(RecordingNotifier::default());
        let client = CatalogClient::new(source.clone())
            .with_retry_policy(fast_retry())
            .with_notifier(notifier.clone());

        let err = client.fetch_catalog(&tokens(&["tok-a"])).await.unwrap_err();

        assert!(err.is_catalog_fetch());
        assert_eq!(source.calls().len(), 2);
        assert_eq!(notifier.0.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_one_bad_account_fails_the_attempt() {
        let source = Arc::new(ScriptedSource::new(0));
        let client = CatalogClient::new(source.clone()).with_retry_policy(RetryPolicy::none());

        let err = client
            .fetch_catalog(&tokens(&["tok-a", "unknown"]))
            .await
            .unwrap_err();

        assert!(err.is_catalog_fetch());
        assert_eq!(source.calls(), tokens(&["tok-a", "unknown"]));
    }

    #[tokio::test]
    async fn test_rejected_key_is_not_retried() {
        let source = Arc::new(ScriptedSource::new(0));
        let notifier = Arc::new(RecordingNotifier::default());
        let client = CatalogClient::new(source.clone())
            .with_retry_policy(fast_retry())
            .with_notifier(notifier.clone());

        let err = client.fetch_catalog(&tokens(&["unknown"])).await.unwrap_err();

        assert!(!err.is_retryable());
        assert_eq!(source.calls(), tokens(&["unknown"]));
        assert_eq!(notifier.0.lock().unwrap().len(), 1);
    }
}
