//! End-to-end console flow against a mocked gateway.

use console_client::Client;
use console_session::{ModelTier, Session, SessionState, SubmitOutcome};
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn completion(model: &str, content: &str, total_tokens: u32) -> serde_json::Value {
    serde_json::json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "created": 1705312200,
        "model": model,
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }],
        "usage": {
            "prompt_tokens": total_tokens / 2,
            "completion_tokens": total_tokens - total_tokens / 2,
            "total_tokens": total_tokens
        },
        "routing_info": {
            "complexity_score": 25,
            "complexity_level": "low",
            "initial_model": model,
            "final_model": model,
            "was_escalated": false,
            "quality_score": 85,
            "routing_reasoning": "Low complexity (25) below threshold (30)",
            "detected_signals": ["code_block", "code_block", "math_expression"]
        }
    })
}

async fn client_for(server: &MockServer) -> Client {
    Client::builder()
        .base_url(server.uri())
        .build()
        .expect("client builds")
}

#[tokio::test]
async fn full_cycle_records_telemetry_and_sanitizes_output() {
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
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_partial_json(serde_json::json!({"include_analysis": true})))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(
            "gemini-2.0-flash",
            "Use `<Vec>` like this:\n```rust\nlet v = vec![1];\n```",
            1000,
        )))
        .mount(&server)
        .await;

    let mut session = Session::new(client_for(&server).await);
    session.seed_stats().await;
    assert_eq!(session.stats().requests, 150);
    assert_eq!(session.stats().fast, 150, "both gateway models are fast tier");

    let outcome = session.submit("  show me a vec  ").await;
    let SubmitOutcome::Completed(exchange) = outcome else {
        panic!("expected completion, got {outcome:?}");
    };

    // Telemetry.
    assert_eq!(exchange.model, "gemini-2.0-flash");
    assert_eq!(exchange.tier, ModelTier::Fast);
    assert_eq!(exchange.total_tokens, 1000);
    assert_eq!(exchange.cost_display, "$0.0004");
    let analysis = exchange.analysis.expect("analysis present");
    assert_eq!(analysis.signal_tags, vec!["Code (2)", "Math"]);
    assert_eq!(exchange.quality.expect("quality present").label, "Good (85/100)");

    // Stats incremented on top of the seed.
    assert_eq!(session.stats().requests, 151);
    assert_eq!(session.stats().fast, 121);
    assert_eq!(session.stats().requests, session.stats().fast + session.stats().complex);

    // Transcript: trimmed user message, sanitized assistant markup.
    let messages = session.transcript().messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].content, "show me a vec");
    let rendered = &messages[1].rendered;
    assert!(rendered.contains("<code>&lt;Vec&gt;</code>"));
    assert!(rendered.contains("<pre><code class=\"language-rust\">let v = vec![1];</code></pre>"));
    assert!(!rendered.contains("<Vec>"));

    assert_eq!(session.state(), SessionState::Idle);
    assert!(!session.transcript().is_pending());
}

#[tokio::test]
async fn http_error_surfaces_detail_and_skips_accounting() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/metrics"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(
            ResponseTemplate::new(503)
                .set_body_json(serde_json::json!({"detail": "All providers are busy"})),
        )
        .mount(&server)
        .await;

    let mut session = Session::new(client_for(&server).await);

    // Metrics failure is swallowed; stats stay zeroed.
    session.seed_stats().await;
    assert_eq!(session.stats().requests, 0);

    let outcome = session.submit("hello").await;
    let SubmitOutcome::Failed { detail } = outcome else {
        panic!("expected failure, got {outcome:?}");
    };
    assert_eq!(detail, "All providers are busy");

    assert_eq!(session.stats().requests, 0);
    assert_eq!(session.stats().total_cost, 0.0);
    assert_eq!(session.stats().saved_cost, 0.0);

    let messages = session.transcript().messages();
    assert_eq!(messages.len(), 2);
    assert!(messages[1].is_error);
    assert!(!session.transcript().is_pending());

    // The session is not poisoned; the user can submit again immediately.
    assert_eq!(session.state(), SessionState::Idle);
}

#[tokio::test]
async fn reset_clears_transcript_but_not_stats() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(
            "gemini-1.5-pro",
            "answer",
            2000,
        )))
        .mount(&server)
        .await;

    let mut session = Session::new(client_for(&server).await);
    session.submit("question").await;

    assert_eq!(session.transcript().len(), 2);
    assert_eq!(session.stats().complex, 1);

    session.reset();

    assert!(session.transcript().is_empty());
    assert_eq!(session.stats().complex, 1);
    assert!(session.stats().total_cost > 0.0);
}
