//! Backend seam between the session engine and the gateway.

use async_trait::async_trait;
use console_client::{ChatMessage, ChatResponse, Client, MetricsPeriod, MetricsSnapshot, Result};

/// The gateway operations the session engine needs.
///
/// Implemented for [`console_client::Client`]; tests substitute a mock.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Complete a conversation, optionally requesting routing analysis.
    async fn complete(
        &self,
        messages: &[ChatMessage],
        include_analysis: bool,
    ) -> Result<ChatResponse>;

    /// Fetch aggregated metrics for the given period.
    async fn metrics(&self, period: MetricsPeriod) -> Result<MetricsSnapshot>;
}

#[async_trait]
impl ChatBackend for Client {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        include_analysis: bool,
    ) -> Result<ChatResponse> {
        Client::complete(self, messages, include_analysis).await
    }

    async fn metrics(&self, period: MetricsPeriod) -> Result<MetricsSnapshot> {
        Client::metrics(self, period).await
    }
}
