//! Model tier classification.
//!
//! The gateway serves prompts from one of two tiers: a fast, cheap model
//! for simple prompts and a slower reasoning model for complex ones. Cost
//! estimation, routing-analysis display, and session accounting all need
//! the same identifier-to-tier mapping, so it lives here once.

use serde::{Deserialize, Serialize};

/// Substring marking the lightweight model family.
const FAST_MARKER: &str = "flash";
/// Substring marking the heavy variant within that family.
const HEAVY_MARKER: &str = "pro";

/// Coarse classification of a model as fast or complex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelTier {
    /// Fast, cheap, low-latency model.
    Fast,
    /// Higher-quality, costlier reasoning model.
    Complex,
}

impl ModelTier {
    /// Classify a model identifier into a tier.
    ///
    /// A model is fast iff its identifier contains the lightweight-family
    /// marker and not the heavy-variant marker. Everything else, including
    /// identifiers from unknown families, is treated as complex.
    pub fn classify(model_id: &str) -> Self {
        let id = model_id.to_lowercase();
        if id.contains(FAST_MARKER) && !id.contains(HEAVY_MARKER) {
            Self::Fast
        } else {
            Self::Complex
        }
    }

    /// Whether this is the fast tier.
    pub fn is_fast(self) -> bool {
        matches!(self, Self::Fast)
    }

    /// Display label for this tier.
    pub fn label(self) -> &'static str {
        match self {
            Self::Fast => "fast",
            Self::Complex => "complex",
        }
    }
}

impl std::fmt::Display for ModelTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fast_family() {
        assert_eq!(ModelTier::classify("gemini-2.0-flash"), ModelTier::Fast);
        assert_eq!(
            ModelTier::classify("gemini-2.0-flash-thinking-exp"),
            ModelTier::Fast
        );
        assert_eq!(ModelTier::classify("GEMINI-2.0-FLASH"), ModelTier::Fast);
    }

    #[test]
    fn test_heavy_variant_is_complex() {
        assert_eq!(ModelTier::classify("gemini-1.5-pro"), ModelTier::Complex);
        assert_eq!(
            ModelTier::classify("gemini-2.0-flash-pro"),
            ModelTier::Complex
        );
    }

    #[test]
    fn test_unknown_family_is_complex() {
        assert_eq!(ModelTier::classify("gpt-4o"), ModelTier::Complex);
        assert_eq!(ModelTier::classify(""), ModelTier::Complex);
    }

    #[test]
    fn test_labels() {
        assert_eq!(ModelTier::Fast.to_string(), "fast");
        assert_eq!(ModelTier::Complex.label(), "complex");
        assert!(ModelTier::Fast.is_fast());
        assert!(!ModelTier::Complex.is_fast());
    }
}
