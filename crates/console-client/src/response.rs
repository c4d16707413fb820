//! Response types for the router console client.

use crate::request::ChatMessage;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Response from a chat completion request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Unique identifier for this completion.
    pub id: String,
    /// Object type (always "chat.completion").
    #[serde(default)]
    pub object: String,
    /// Unix timestamp of when the completion was created.
    #[serde(default)]
    pub created: i64,
    /// Model that generated the response.
    pub model: String,
    /// List of completion choices.
    pub choices: Vec<ChatChoice>,
    /// Token usage statistics.
    #[serde(default)]
    pub usage: Option<Usage>,
    /// Routing decision details, present when `include_analysis` was set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub routing_info: Option<RoutingInfo>,
}

impl ChatResponse {
    /// Get the content of the first choice.
    pub fn content(&self) -> &str {
        self.choices
            .first()
            .map(|c| c.message.content.as_str())
            .unwrap_or("")
    }

    /// Get the total number of tokens used.
    pub fn total_tokens(&self) -> u32 {
        self.usage.as_ref().map(|u| u.total_tokens).unwrap_or(0)
    }
}

/// A single completion choice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatChoice {
    /// Index of this choice.
    #[serde(default)]
    pub index: u32,
    /// The generated message.
    pub message: ChatMessage,
    /// Reason the generation stopped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

/// Token usage statistics.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Usage {
    /// Number of tokens in the prompt.
    pub prompt_tokens: u32,
    /// Number of tokens in the completion.
    pub completion_tokens: u32,
    /// Total number of tokens.
    pub total_tokens: u32,
}

/// Routing decision details attached to a completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingInfo {
    /// Prompt complexity score (0-100).
    pub complexity_score: u32,
    /// Complexity level label (low/medium/high).
    pub complexity_level: String,
    /// Initially selected model, before any escalation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_model: Option<String>,
    /// Final model used, after any escalation.
    pub final_model: String,
    /// Whether escalation to the complex tier occurred.
    #[serde(default)]
    pub was_escalated: bool,
    /// Response quality score, when a quality check ran.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality_score: Option<u32>,
    /// Explanation of the routing decision.
    pub routing_reasoning: String,
    /// Complexity signal kinds detected in the prompt, in detection order.
    /// Repeats are allowed and meaningful.
    #[serde(default)]
    pub detected_signals: Vec<String>,
}

/// Aggregation period for the metrics endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricsPeriod {
    /// Last hour.
    LastHour,
    /// Last 24 hours.
    LastDay,
    /// Last 7 days.
    LastWeek,
}

impl MetricsPeriod {
    /// Query-string value for this period.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::LastHour => "last_hour",
            Self::LastDay => "last_day",
            Self::LastWeek => "last_week",
        }
    }
}

impl std::fmt::Display for MetricsPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Aggregated metrics reported by the gateway.
///
/// Only a subset is consumed for session seeding; the rest is surfaced by
/// the `stats` command. Every field defaults so that older gateways that
/// omit some of them still deserialize.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    /// Total requests in the period.
    #[serde(default)]
    pub total_requests: u64,
    /// Request counts keyed by model identifier.
    #[serde(default)]
    pub requests_by_model: HashMap<String, u64>,
    /// Total cost in USD for the period.
    #[serde(default)]
    pub total_cost: f64,
    /// Estimated savings versus serving everything on the complex tier.
    #[serde(default)]
    pub cost_savings: f64,
    /// Percentage of requests that were escalated.
    #[serde(default)]
    pub escalation_rate: f64,
    /// Average response quality score.
    #[serde(default)]
    pub avg_quality_score: f64,
}
