//! Session metrics accumulator.
//!
//! Aggregates request counts, cumulative estimated cost, and cumulative
//! savings versus always serving the complex tier. Owned explicitly and
//! injected into the session rather than held in shared global state, so it
//! can be tested in isolation.

use crate::cost::{counterfactual_complex_cost, estimate_cost};
use crate::tier::ModelTier;
use console_client::MetricsSnapshot;
use serde::Serialize;
use tracing::debug;

/// Running aggregate for the lifetime of a session.
///
/// Invariant: `requests == fast + complex` at all times after seeding.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SessionStats {
    /// Completed requests.
    pub requests: u64,
    /// Requests served by the fast tier.
    pub fast: u64,
    /// Requests served by the complex tier.
    pub complex: u64,
    /// Cumulative estimated cost (USD). Session-local, never seeded.
    pub total_cost: f64,
    /// Cumulative estimated savings versus the complex tier (USD).
    pub saved_cost: f64,
    /// Whether the one-time server seed has been applied.
    #[serde(skip)]
    seeded: bool,
}

impl SessionStats {
    /// Create a zeroed accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a completed request.
    ///
    /// Fast-tier requests additionally accrue the difference between the
    /// counterfactual complex-tier cost and the actual cost as savings;
    /// complex-tier requests contribute zero savings.
    pub fn on_request_completed(&mut self, model_id: &str, total_tokens: u32) {
        let tier = ModelTier::classify(model_id);
        let actual_cost = estimate_cost(total_tokens, model_id);

        self.requests += 1;
        match tier {
            ModelTier::Fast => {
                self.fast += 1;
                self.saved_cost += counterfactual_complex_cost(total_tokens) - actual_cost;
            }
            ModelTier::Complex => self.complex += 1,
        }
        self.total_cost += actual_cost;

        debug!(
            model = model_id,
            tier = %tier,
            tokens = total_tokens,
            cost = actual_cost,
            "Recorded completed request"
        );
    }

    /// One-time reconciliation with a server-reported aggregate.
    ///
    /// Overwrites `requests`, `fast`, `complex`, and `saved_cost` from the
    /// snapshot; `total_cost` stays session-local. Calls after the first are
    /// ignored.
    pub fn seed(&mut self, snapshot: &MetricsSnapshot) {
        if self.seeded {
            debug!("Ignoring repeated stats seed");
            return;
        }
        self.seeded = true;

        let mut fast = 0;
        let mut complex = 0;
        for (model, count) in &snapshot.requests_by_model {
            if ModelTier::classify(model).is_fast() {
                fast += count;
            } else {
                complex += count;
            }
        }

        self.requests = snapshot.total_requests;
        self.fast = fast;
        self.complex = complex;
        self.saved_cost = snapshot.cost_savings;

        debug!(
            requests = self.requests,
            fast = self.fast,
            complex = self.complex,
            "Seeded session stats from server snapshot"
        );
    }

    /// Whether the server seed has been applied.
    pub fn is_seeded(&self) -> bool {
        self.seeded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_mixed_tier_accounting() {
        let mut stats = SessionStats::new();
        stats.on_request_completed("gemini-2.0-flash", 1000);
        stats.on_request_completed("gemini-1.5-pro", 2000);

        assert_eq!(stats.requests, 2);
        assert_eq!(stats.fast, 1);
        assert_eq!(stats.complex, 1);
        assert!((stats.saved_cost - 0.005875).abs() < 1e-9);
        assert!((stats.total_cost - 0.012875).abs() < 1e-9);
    }

    #[test]
    fn test_complex_requests_save_nothing() {
        let mut stats = SessionStats::new();
        stats.on_request_completed("gemini-1.5-pro", 5000);
        assert_eq!(stats.saved_cost, 0.0);
        assert!(stats.total_cost > 0.0);
    }

    #[test]
    fn test_count_invariant_holds() {
        let mut stats = SessionStats::new();
        for (model, tokens) in [
            ("gemini-2.0-flash", 100),
            ("gemini-2.0-flash-thinking-exp", 200),
            ("gemini-1.5-pro", 300),
            ("gpt-4o", 400),
        ] {
            stats.on_request_completed(model, tokens);
            assert_eq!(stats.requests, stats.fast + stats.complex);
        }
    }

    #[test]
    fn test_seed_overwrites_counts_not_cost() {
        let mut stats = SessionStats::new();
        stats.total_cost = 0.5;

        let snapshot = MetricsSnapshot {
            total_requests: 150,
            requests_by_model: HashMap::from([
                ("gemini-2.0-flash".to_string(), 120),
                ("gemini-1.5-pro".to_string(), 30),
            ]),
            cost_savings: 1.75,
            ..Default::default()
        };
        stats.seed(&snapshot);

        assert_eq!(stats.requests, 150);
        assert_eq!(stats.fast, 120);
        assert_eq!(stats.complex, 30);
        assert!((stats.saved_cost - 1.75).abs() < f64::EPSILON);
        assert!((stats.total_cost - 0.5).abs() < f64::EPSILON, "total_cost not reconciled");
        assert!(stats.is_seeded());
    }

    #[test]
    fn test_seed_is_one_time() {
        let mut stats = SessionStats::new();
        stats.seed(&MetricsSnapshot {
            total_requests: 10,
            ..Default::default()
        });
        stats.seed(&MetricsSnapshot {
            total_requests: 999,
            ..Default::default()
        });
        assert_eq!(stats.requests, 10);
    }

    #[test]
    fn test_increments_continue_after_seed() {
        let mut stats = SessionStats::new();
        stats.seed(&MetricsSnapshot {
            total_requests: 5,
            requests_by_model: HashMap::from([("gemini-2.0-flash".to_string(), 5)]),
            ..Default::default()
        });
        stats.on_request_completed("gemini-1.5-pro", 1000);

        assert_eq!(stats.requests, 6);
        assert_eq!(stats.fast, 5);
        assert_eq!(stats.complex, 1);
        assert_eq!(stats.requests, stats.fast + stats.complex);
    }
}
