//! Cost estimation and display formatting.
//!
//! Rates are blended per-1K-token figures for the two tiers, matching what
//! the gateway itself reports. Estimation is linear in token count.

use crate::tier::ModelTier;

/// Blended cost per 1K tokens on the fast tier (USD).
pub const FAST_RATE_PER_1K: f64 = 0.000375;
/// Blended cost per 1K tokens on the complex tier (USD).
pub const COMPLEX_RATE_PER_1K: f64 = 0.00625;

/// Rate per 1K tokens for a tier.
pub fn rate_per_1k(tier: ModelTier) -> f64 {
    match tier {
        ModelTier::Fast => FAST_RATE_PER_1K,
        ModelTier::Complex => COMPLEX_RATE_PER_1K,
    }
}

/// Estimate the cost of a request in USD.
pub fn estimate_cost(tokens: u32, model_id: &str) -> f64 {
    let rate = rate_per_1k(ModelTier::classify(model_id));
    (f64::from(tokens) / 1000.0) * rate
}

/// What the same request would have cost on the complex tier.
///
/// Used for savings accounting: fast-tier requests save the difference
/// between this and their actual cost.
pub fn counterfactual_complex_cost(tokens: u32) -> f64 {
    (f64::from(tokens) / 1000.0) * COMPLEX_RATE_PER_1K
}

/// Format a cost for display with tiered precision.
///
/// Small costs get more decimal places so that sub-cent amounts do not
/// collapse to `$0.00`; exactly zero is pinned to `$0.00`.
pub fn format_cost(cost: f64) -> String {
    if cost == 0.0 {
        "$0.00".to_string()
    } else if cost < 0.0001 {
        format!("${:.6}", cost)
    } else if cost < 0.01 {
        format!("${:.4}", cost)
    } else {
        format!("${:.2}", cost)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimate_by_tier() {
        let fast = estimate_cost(1000, "gemini-2.0-flash");
        let complex = estimate_cost(1000, "gemini-1.5-pro");
        assert!((fast - 0.000375).abs() < 1e-12);
        assert!((complex - 0.00625).abs() < 1e-12);
    }

    #[test]
    fn test_estimate_linear_and_monotonic() {
        for model in ["gemini-2.0-flash", "gemini-1.5-pro"] {
            let unit = estimate_cost(1, model);
            let mut prev = 0.0;
            for t in [0u32, 1, 10, 500, 1000, 250_000] {
                let cost = estimate_cost(t, model);
                assert!((cost - unit * f64::from(t)).abs() < 1e-9, "linear in t");
                assert!(cost >= prev, "monotonically non-decreasing");
                prev = cost;
            }
        }
    }

    #[test]
    fn test_zero_tokens_cost_nothing() {
        assert_eq!(estimate_cost(0, "gemini-2.0-flash"), 0.0);
        assert_eq!(counterfactual_complex_cost(0), 0.0);
    }

    #[test]
    fn test_counterfactual_uses_complex_rate() {
        assert!((counterfactual_complex_cost(2000) - 0.0125).abs() < 1e-12);
    }

    #[test]
    fn test_format_cost_tiers() {
        assert_eq!(format_cost(0.0), "$0.00");
        assert_eq!(format_cost(0.00005), "$0.000050");
        assert_eq!(format_cost(0.0005), "$0.0005");
        assert_eq!(format_cost(0.005875), "$0.0059");
        assert_eq!(format_cost(0.05), "$0.05");
        assert_eq!(format_cost(1.5), "$1.50");
        assert_eq!(format_cost(12.345), "$12.35");
    }

    #[test]
    fn test_format_cost_tier_boundaries() {
        // Boundaries belong to the coarser tier.
        assert_eq!(format_cost(0.0001), "$0.0001");
        assert_eq!(format_cost(0.01), "$0.01");
        assert_eq!(format_cost(1.0), "$1.00");
    }
}
