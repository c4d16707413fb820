//! HTTP client for the router gateway.

use crate::config::ClientConfig;
use crate::error::{ApiErrorBody, Error, Result};
use crate::request::{ChatMessage, ChatRequest, ChatRequestBuilder};
use crate::response::{ChatResponse, MetricsPeriod, MetricsSnapshot};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use secrecy::Secret;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

/// Client for the adaptive LLM router gateway.
///
/// # Example
///
/// ```rust,no_run
/// use console_client::Client;
///
/// #[tokio::main]
/// async fn main() -> Result<(), console_client::Error> {
///     let client = Client::builder()
///         .base_url("http://localhost:8000")
///         .build()?;
///
///     let response = client
///         .chat()
///         .user_message("Explain quantum entanglement step by step")
///         .include_analysis(true)
///         .send()
///         .await?;
///
///     println!("{}", response.content());
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct Client {
    /// HTTP client.
    http: reqwest::Client,
    /// Client configuration.
    config: Arc<ClientConfig>,
}

impl Client {
    /// Create a new client builder.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Create a new client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .map_err(|e| Error::configuration(format!("Invalid user agent: {}", e)))?,
        );

        if let Some(api_key) = config.api_key_value() {
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&format!("Bearer {}", api_key))
                    .map_err(|e| Error::configuration(format!("Invalid API key: {}", e)))?,
            );
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| Error::configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            config: Arc::new(config),
        })
    }

    /// Get the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Create a chat request builder bound to this client.
    pub fn chat(&self) -> ChatBuilder {
        ChatBuilder::new(self.clone())
    }

    /// Send a chat completion request.
    #[instrument(skip(self, request), fields(messages = request.messages.len()))]
    pub async fn chat_completion(&self, request: &ChatRequest) -> Result<ChatResponse> {
        let url = self.url("/v1/chat/completions")?;

        debug!("Sending chat completion request to {}", url);

        let response = self
            .http
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(|e| self.map_reqwest_error(e))?;

        self.handle_response(response).await
    }

    /// Send a full conversation history for completion.
    pub async fn complete(
        &self,
        messages: &[ChatMessage],
        include_analysis: bool,
    ) -> Result<ChatResponse> {
        let request = ChatRequest::builder()
            .messages(messages)
            .include_analysis(include_analysis)
            .build()?;
        self.chat_completion(&request).await
    }

    /// Fetch aggregated metrics for the given period.
    #[instrument(skip(self))]
    pub async fn metrics(&self, period: MetricsPeriod) -> Result<MetricsSnapshot> {
        let mut url = self.url("/v1/metrics")?;
        url.query_pairs_mut().append_pair("period", period.as_str());

        debug!("Fetching metrics from {}", url);

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| self.map_reqwest_error(e))?;

        self.handle_response(response).await
    }

    /// Build a URL for the given path.
    fn url(&self, path: &str) -> Result<Url> {
        self.config
            .base_url
            .join(path)
            .map_err(|e| Error::configuration(format!("Invalid URL path '{}': {}", path, e)))
    }

    /// Handle a response, deserializing on success.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();

        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| Error::parse(format!("Failed to parse response: {}", e)))
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(Error::api(
                status.as_u16(),
                ApiErrorBody::detail_or_default(&body),
            ))
        }
    }

    /// Map a reqwest error to a client error.
    fn map_reqwest_error(&self, error: reqwest::Error) -> Error {
        if error.is_timeout() {
            Error::Timeout {
                duration_ms: self.config.timeout.as_millis() as u64,
            }
        } else if error.is_connect() {
            Error::connection(error.to_string())
        } else {
            Error::Http(error)
        }
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.config.base_url)
            .field("has_api_key", &self.config.has_api_key())
            .finish()
    }
}

/// Builder for creating a [`Client`].
#[derive(Debug, Default)]
pub struct ClientBuilder {
    base_url: Option<Url>,
    api_key: Option<Secret<String>>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl ClientBuilder {
    /// Create a new client builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL.
    pub fn base_url(mut self, url: impl AsRef<str>) -> Self {
        self.base_url = Url::parse(url.as_ref()).ok();
        self
    }

    /// Set the API key.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(Secret::new(key.into()));
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the connection timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Set the user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<Client> {
        let base_url = self
            .base_url
            .unwrap_or_else(|| Url::parse("http://localhost:8000").expect("valid default URL"));

        let mut config = ClientConfig::new(base_url);
        config.api_key = self.api_key;
        if let Some(timeout) = self.timeout {
            config.timeout = timeout;
        }
        if let Some(connect_timeout) = self.connect_timeout {
            config.connect_timeout = connect_timeout;
        }
        if let Some(user_agent) = self.user_agent {
            config.user_agent = user_agent;
        }

        Client::new(config)
    }
}

/// Builder for chat completion requests bound to a client.
pub struct ChatBuilder {
    client: Client,
    builder: ChatRequestBuilder,
}

impl ChatBuilder {
    fn new(client: Client) -> Self {
        Self {
            client,
            builder: ChatRequestBuilder::new(),
        }
    }

    /// Force a specific model, bypassing routing.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.builder = self.builder.model(model);
        self
    }

    /// Add a message.
    pub fn message(mut self, message: ChatMessage) -> Self {
        self.builder = self.builder.message(message);
        self
    }

    /// Add a user message.
    pub fn user_message(mut self, content: impl Into<String>) -> Self {
        self.builder = self.builder.user_message(content);
        self
    }

    /// Set the sampling temperature.
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.builder = self.builder.temperature(temperature);
        self
    }

    /// Set max tokens.
    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.builder = self.builder.max_tokens(max_tokens);
        self
    }

    /// Request routing analysis in the response.
    pub fn include_analysis(mut self, include: bool) -> Self {
        self.builder = self.builder.include_analysis(include);
        self
    }

    /// Send the request.
    pub async fn send(self) -> Result<ChatResponse> {
        let request = self.builder.build()?;
        self.client.chat_completion(&request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn completion_body() -> serde_json::Value {
        serde_json::json!({
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "created": 1705312200,
            "model": "gemini-2.0-flash",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": "Hi there"},
                "finish_reason": "stop"
            }],
            "usage": {"prompt_tokens": 5, "completion_tokens": 7, "total_tokens": 12}
        })
    }

    #[test]
    fn test_client_builder() {
        let client = Client::builder()
            .base_url("http://localhost:8000")
            .api_key("test-key")
            .timeout(Duration::from_secs(60))
            .build()
            .unwrap();

        assert_eq!(client.config.base_url.as_str(), "http://localhost:8000/");
        assert!(client.config.has_api_key());
        assert_eq!(client.config.timeout, Duration::from_secs(60));
    }

    #[tokio::test]
    async fn test_chat_completion_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(body_partial_json(serde_json::json!({
                "include_analysis": true
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_body()))
            .mount(&server)
            .await;

        let client = Client::builder().base_url(server.uri()).build().unwrap();
        let response = client
            .chat()
            .user_message("hello")
            .include_analysis(true)
            .send()
            .await
            .unwrap();

        assert_eq!(response.content(), "Hi there");
        assert_eq!(response.total_tokens(), 12);
    }

    #[tokio::test]
    async fn test_chat_completion_error_detail() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(
                ResponseTemplate::new(500)
                    .set_body_json(serde_json::json!({"detail": "provider exploded"})),
            )
            .mount(&server)
            .await;

        let client = Client::builder().base_url(server.uri()).build().unwrap();
        let err = client.chat().user_message("hello").send().await.unwrap_err();

        assert_eq!(err.status_code(), Some(500));
        assert_eq!(err.display_detail(), "provider exploded");
    }

    #[tokio::test]
    async fn test_chat_completion_error_fallback() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&server)
            .await;

        let client = Client::builder().base_url(server.uri()).build().unwrap();
        let err = client.chat().user_message("hello").send().await.unwrap_err();

        assert_eq!(err.display_detail(), "Request failed");
    }

    #[tokio::test]
    async fn test_metrics_fetch() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/metrics"))
            .and(query_param("period", "last_day"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "total_requests": 150,
                "requests_by_model": {
                    "gemini-2.0-flash": 120,
                    "gemini-2.0-flash-thinking-exp": 30
                },
                "total_cost": 0.25,
                "cost_savings": 1.75
            })))
            .mount(&server)
            .await;

        let client = Client::builder().base_url(server.uri()).build().unwrap();
        let snapshot = client.metrics(MetricsPeriod::LastDay).await.unwrap();

        assert_eq!(snapshot.total_requests, 150);
        assert_eq!(snapshot.requests_by_model["gemini-2.0-flash"], 120);
        assert!((snapshot.cost_savings - 1.75).abs() < f64::EPSILON);
    }
}
