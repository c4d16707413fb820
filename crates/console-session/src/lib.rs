//! # Router Console Session Engine
//!
//! Owns everything a routing-gateway client has to get right locally:
//! conversation history, the request lifecycle, derived telemetry (cost
//! estimation, tier classification, savings accounting), and safe rendering
//! of model output.
//!
//! The engine is transport-agnostic: the orchestrator talks to the gateway
//! through the [`ChatBackend`] trait, implemented for
//! [`console_client::Client`] and trivially mockable in tests.
//!
//! ```rust,no_run
//! use console_client::Client;
//! use console_session::{Session, SubmitOutcome};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), console_client::Error> {
//!     let client = Client::builder().base_url("http://localhost:8000").build()?;
//!     let mut session = Session::new(client);
//!
//!     session.seed_stats().await;
//!
//!     match session.submit("Explain ownership in Rust").await {
//!         SubmitOutcome::Completed(exchange) => println!("{:?}", exchange.analysis),
//!         SubmitOutcome::Failed { detail } => eprintln!("{detail}"),
//!         _ => {}
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod analysis;
mod backend;
mod cost;
mod markup;
mod quality;
mod session;
mod stats;
mod tier;
mod transcript;

pub use analysis::{AnalysisView, SignalKind};
pub use backend::ChatBackend;
pub use cost::{estimate_cost, format_cost, rate_per_1k, COMPLEX_RATE_PER_1K, FAST_RATE_PER_1K};
pub use markup::{render, Author};
pub use quality::{QualityLevel, QualityView};
pub use session::{Exchange, Session, SessionState, SubmitOutcome};
pub use stats::SessionStats;
pub use tier::ModelTier;
pub use transcript::{Message, MessageRole, PendingToken, Transcript};
