//! Projection of the gateway's routing decision into a renderable view.

use crate::tier::ModelTier;
use console_client::RoutingInfo;
use serde::Serialize;

/// A complexity signal kind the analyzer can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalKind {
    /// Reasoning keyword ("analyze", "step by step", ...).
    ReasoningKeyword,
    /// Code block or code-like pattern.
    CodeBlock,
    /// Mathematical expression.
    MathExpression,
    /// Multi-part question.
    MultipartQuestion,
    /// Prompt length.
    Length,
}

impl SignalKind {
    /// Parse a wire tag into a known kind.
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "reasoning_keyword" => Some(Self::ReasoningKeyword),
            "code_block" => Some(Self::CodeBlock),
            "math_expression" => Some(Self::MathExpression),
            "multipart_question" => Some(Self::MultipartQuestion),
            "length" => Some(Self::Length),
            _ => None,
        }
    }

    /// Human label for display.
    pub fn label(self) -> &'static str {
        match self {
            Self::ReasoningKeyword => "Reasoning",
            Self::CodeBlock => "Code",
            Self::MathExpression => "Math",
            Self::MultipartQuestion => "Multi-part",
            Self::Length => "Length",
        }
    }
}

/// Renderable view of a routing decision.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisView {
    /// Complexity score (0-100).
    pub complexity_score: u32,
    /// Complexity level label as reported by the gateway.
    pub complexity_level: String,
    /// Model that served the request.
    pub selected_model: String,
    /// Tier derived from the selected model.
    pub model_tier: ModelTier,
    /// Whether the request was escalated to the complex tier.
    pub was_escalated: bool,
    /// Gateway's stated rationale.
    pub reasoning: String,
    /// Aggregated signal tags, first-seen order, repeats counted.
    pub signal_tags: Vec<String>,
}

impl AnalysisView {
    /// Project a raw routing payload into a view model.
    pub fn project(info: &RoutingInfo) -> Self {
        Self {
            complexity_score: info.complexity_score,
            complexity_level: info.complexity_level.clone(),
            selected_model: info.final_model.clone(),
            model_tier: ModelTier::classify(&info.final_model),
            was_escalated: info.was_escalated,
            reasoning: info.routing_reasoning.clone(),
            signal_tags: aggregate_signals(&info.detected_signals),
        }
    }

    /// Signal tags joined for display, with a placeholder when none were
    /// detected.
    pub fn signals_display(&self) -> String {
        if self.signal_tags.is_empty() {
            "none detected".to_string()
        } else {
            self.signal_tags.join(", ")
        }
    }
}

/// Group signal tags by kind, preserving first-seen order, appending a
/// repeat count when a kind occurs more than once. Unknown kinds fall back
/// to the raw tag string.
fn aggregate_signals(tags: &[String]) -> Vec<String> {
    let mut order: Vec<&str> = Vec::new();
    let mut counts: Vec<usize> = Vec::new();

    for tag in tags {
        match order.iter().position(|t| *t == tag.as_str()) {
            Some(i) => counts[i] += 1,
            None => {
                order.push(tag);
                counts.push(1);
            }
        }
    }

    order
        .into_iter()
        .zip(counts)
        .map(|(tag, count)| {
            let label = SignalKind::parse(tag).map(SignalKind::label).unwrap_or(tag);
            if count > 1 {
                format!("{} ({})", label, count)
            } else {
                label.to_string()
            }
        })
        .collect()
}
