//! # Router Console Client
//!
//! Typed HTTP client for the adaptive LLM router gateway. The gateway picks
//! a model per prompt (fast tier for simple prompts, complex tier for hard
//! ones) and can attach its routing decision to the response.
//!
//! Two endpoints are covered:
//!
//! - `POST /v1/chat/completions` — single-shot chat completion, optionally
//!   carrying `routing_info` when `include_analysis` is set.
//! - `GET /v1/metrics` — aggregated request counts and cost savings for a
//!   period, used to seed session accounting.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use console_client::Client;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), console_client::Error> {
//!     let client = Client::builder()
//!         .base_url("http://localhost:8000")
//!         .build()?;
//!
//!     let response = client
//!         .chat()
//!         .user_message("What is Rust?")
//!         .include_analysis(true)
//!         .send()
//!         .await?;
//!
//!     println!("{}", response.content());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod client;
mod config;
mod error;
mod request;
mod response;

pub use client::{ChatBuilder, Client, ClientBuilder};
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use request::{ChatMessage, ChatRequest, ChatRequestBuilder, MessageRole};
pub use response::{
    ChatChoice, ChatResponse, MetricsPeriod, MetricsSnapshot, RoutingInfo, Usage,
};
