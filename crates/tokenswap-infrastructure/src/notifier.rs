//! Notifier that routes user-facing messages into the log.

use tokenswap_core::swap::Notifier;

/// Forwards notifications to `tracing` under the `tokenswap::notify` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn info(&self, message: &str) {
        tracing::info!(target: "tokenswap::notify", "{message}");
    }

    fn warn(&self, message: &str) {
        tracing::warn!(target: "tokenswap::notify", "{message}");
    }

    fn error(&self, message: &str) {
        tracing::error!(target: "tokenswap::notify", "{message}");
    }
}
