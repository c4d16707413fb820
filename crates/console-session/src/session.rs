//! Request orchestrator.
//!
//! Drives one submit-response cycle as an explicit state machine:
//! `Idle -> Submitting -> Idle`. The outbound call is the only suspension
//! point; a submission while one is in flight is rejected outright rather
//! than interleaved.

use crate::analysis::AnalysisView;
use crate::backend::ChatBackend;
use crate::cost::{estimate_cost, format_cost};
use crate::quality::QualityView;
use crate::stats::SessionStats;
use crate::tier::ModelTier;
use crate::transcript::Transcript;
use console_client::{ChatMessage, MetricsPeriod};
use serde::Serialize;
use std::time::Instant;
use tracing::{debug, warn};

/// Orchestrator state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    /// Waiting for user input.
    Idle,
    /// A request is in flight.
    Submitting,
}

/// Telemetry for one completed request cycle.
#[derive(Debug, Clone, Serialize)]
pub struct Exchange {
    /// Model that served the request.
    pub model: String,
    /// Tier of that model.
    pub tier: ModelTier,
    /// Total tokens used.
    pub total_tokens: u32,
    /// Estimated cost (USD).
    pub cost: f64,
    /// Estimated cost formatted for display.
    pub cost_display: String,
    /// Wall-clock time for the round trip, in milliseconds.
    pub elapsed_ms: u64,
    /// Routing decision view, when the gateway attached one.
    pub analysis: Option<AnalysisView>,
    /// Quality view, when the gateway reported a quality score.
    pub quality: Option<QualityView>,
}

/// Result of a submission attempt.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// Empty or whitespace-only input; nothing happened.
    Ignored,
    /// A request was already in flight; this one was rejected.
    Busy,
    /// The request completed and telemetry was recorded.
    Completed(Exchange),
    /// The request failed; an error entry was appended to the transcript
    /// and session statistics were left untouched.
    Failed {
        /// Failure description, as rendered in the transcript.
        detail: String,
    },
}

/// A conversation session against the router gateway.
///
/// Owns the transcript, the metrics accumulator, and the outbound
/// conversation history. All mutation happens through [`Session::submit`]
/// and the seeding call; the accumulator is injected state, not a global.
pub struct Session<B: ChatBackend> {
    backend: B,
    transcript: Transcript,
    stats: SessionStats,
    state: SessionState,
    history: Vec<ChatMessage>,
}

impl<B: ChatBackend> Session<B> {
    /// Create a new session over the given backend.
    pub fn new(backend: B) -> Self {
        Self::with_stats(backend, SessionStats::new())
    }

    /// Create a session with a pre-existing accumulator.
    pub fn with_stats(backend: B, stats: SessionStats) -> Self {
        Self {
            backend,
            transcript: Transcript::new(),
            stats,
            state: SessionState::Idle,
            history: Vec::new(),
        }
    }

    /// Submit a prompt and run one full request cycle.
    pub async fn submit(&mut self, input: &str) -> SubmitOutcome {
        let prompt = input.trim();
        if prompt.is_empty() {
            return SubmitOutcome::Ignored;
        }
        if self.state == SessionState::Submitting {
            warn!("Rejecting submission while a request is in flight");
            return SubmitOutcome::Busy;
        }

        self.state = SessionState::Submitting;
        self.transcript.append_user(prompt);
        let pending = self.transcript.show_pending();
        self.history.push(ChatMessage::user(prompt));

        let started = Instant::now();
        let result = self.backend.complete(&self.history, true).await;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        // The indicator is cleared on both paths, never left dangling.
        self.transcript.clear_pending(pending);
        self.state = SessionState::Idle;

        match result {
            Ok(response) => {
                let content = response.content().to_string();
                self.transcript.append_assistant(&content);
                self.history.push(ChatMessage::assistant(&content));

                let analysis = response.routing_info.as_ref().map(AnalysisView::project);
                let quality = response
                    .routing_info
                    .as_ref()
                    .and_then(|info| info.quality_score)
                    .map(QualityView::project);

                let total_tokens = response.total_tokens();
                let cost = estimate_cost(total_tokens, &response.model);
                self.stats.on_request_completed(&response.model, total_tokens);

                debug!(
                    model = %response.model,
                    tokens = total_tokens,
                    elapsed_ms,
                    "Request cycle completed"
                );

                SubmitOutcome::Completed(Exchange {
                    tier: ModelTier::classify(&response.model),
                    model: response.model,
                    total_tokens,
                    cost,
                    cost_display: format_cost(cost),
                    elapsed_ms,
                    analysis,
                    quality,
                })
            }
            Err(e) => {
                let detail = e.display_detail();
                warn!(error = %e, "Request cycle failed");

                // The failed prompt is dropped from the outbound history so
                // the next request does not resend it; the transcript keeps
                // the user message and gains exactly one error entry.
                self.history.pop();
                self.transcript.append_error(&detail);

                SubmitOutcome::Failed { detail }
            }
        }
    }

    /// Seed the metrics accumulator from the gateway's daily aggregate.
    ///
    /// Fetch failures are logged and swallowed; the accumulator keeps its
    /// prior values.
    pub async fn seed_stats(&mut self) {
        match self.backend.metrics(MetricsPeriod::LastDay).await {
            Ok(snapshot) => self.stats.seed(&snapshot),
            Err(e) => warn!(error = %e, "Metrics seed failed; keeping local stats"),
        }
    }

    /// Current orchestrator state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The conversation transcript.
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Session statistics.
    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    /// Clear the transcript and outbound history. Statistics are untouched.
    pub fn reset(&mut self) {
        self.transcript.reset();
        self.history.clear();
    }

    #[cfg(test)]
    pub(crate) fn force_state(&mut self, state: SessionState) {
        self.state = state;
    }
}
