// End-to-end pipeline tests against mock HTTP backends

use std::sync::Arc;

use greenroute::backends::{CapableBackend, FastBackend};
use greenroute::config::{CapableBackendConfig, Config, FastBackendConfig};
use greenroute::orchestrator::Orchestrator;
use greenroute::router::{ModelKind, RoutingMode};

/// Mock servers standing in for the local model and the hosted API.
struct MockBackends {
    fast: mockito::ServerGuard,
    capable: mockito::ServerGuard,
}

async fn mock_backends() -> MockBackends {
    let mut fast = mockito::Server::new_async().await;
    fast.mock("POST", "/api/generate")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"response": "A short local answer right here", "prompt_eval_count": 8, "eval_count": 48}"#)
        .create_async()
        .await;

    let mut capable = mockito::Server::new_async().await;
    capable
        .mock("POST", "/models/test")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"[{"generated_text": "A much longer hosted answer with several supporting details and caveats"}]"#)
        .create_async()
        .await;

    MockBackends { fast, capable }
}

fn orchestrator(mocks: &MockBackends) -> Orchestrator {
    let config = Config::default();
    let fast = FastBackend::new(&FastBackendConfig {
        base_url: mocks.fast.url(),
        model: "tinyllama".to_string(),
        timeout_secs: 5,
    })
    .unwrap();
    let capable = CapableBackend::new(&CapableBackendConfig {
        api_url: format!("{}/models/test", mocks.capable.url()),
        api_key: Some("hf_test".to_string()),
        max_tokens: 100,
        timeout_secs: 5,
    })
    .unwrap();

    Orchestrator::new(&config, Arc::new(fast), Arc::new(capable))
}

#[tokio::test]
async fn test_simple_query_end_to_end() {
    let mocks = mock_backends().await;
    let orch = orchestrator(&mocks);

    let record = orch.process("What is 2+2?", RoutingMode::Auto).await.unwrap();

    assert_eq!(record.backend(), ModelKind::Fast);
    assert_eq!(record.decision.score, 5);
    assert!(record.decision.reason.contains("simple"));
    assert_eq!(record.input_tokens, 8);
    assert_eq!(record.output_tokens, 48);
    assert_eq!(record.total_tokens, 56);
    assert_eq!(record.cost_usd, 0.0);

    // ~56 total tokens on the fast tier: reference savings figures
    assert!((record.impact.carbon_saved_g - 0.00812).abs() < 1e-6);
    assert!((record.impact.water_saved_ml - 0.13552).abs() < 1e-6);
}

#[tokio::test]
async fn test_complex_query_end_to_end() {
    let mocks = mock_backends().await;
    let orch = orchestrator(&mocks);

    let record = orch
        .process(
            "Design a REST API with authentication and database.",
            RoutingMode::Auto,
        )
        .await
        .unwrap();

    assert_eq!(record.backend(), ModelKind::Capable);
    assert_eq!(record.decision.score, 17);
    assert!(record.decision.reason.contains("complex"));
    assert_eq!(record.cost_usd, 0.0);
    assert_eq!(record.impact.carbon_saved_g, 0.0);
    assert!(record.impact.carbon_emitted_g > 0.0);
}

#[tokio::test]
async fn test_forced_capable_end_to_end() {
    let mocks = mock_backends().await;
    let orch = orchestrator(&mocks);

    let record = orch
        .process("Hello world", RoutingMode::ForceCapable)
        .await
        .unwrap();

    assert_eq!(record.decision.score, 2);
    assert_eq!(record.backend(), ModelKind::Capable);
    assert!(record.decision.was_overridden);
    assert!(record.decision.reason.contains("override"));
}

#[tokio::test]
async fn test_summary_accumulates_across_queries() {
    let mocks = mock_backends().await;
    let orch = orchestrator(&mocks);

    orch.process("What is 2+2?", RoutingMode::Auto).await.unwrap();
    orch.process("hello there", RoutingMode::Auto).await.unwrap();
    orch.process(
        "Design a REST API with authentication and database.",
        RoutingMode::Auto,
    )
    .await
    .unwrap();

    let summary = orch.metrics().summary();
    assert_eq!(summary.total_queries, 3);
    assert_eq!(summary.fast_queries, 2);
    assert_eq!(summary.capable_queries, 1);
    assert!((summary.fast_percentage - 66.666).abs() < 0.01);
    assert_eq!(summary.total_cost_usd, 0.0);
    assert!(summary.total_carbon_saved_g > 0.0);

    let comparison = orch.metrics().comparison();
    assert_eq!(comparison.fast.count, 2);
    assert_eq!(comparison.capable.count, 1);
}

#[tokio::test]
async fn test_capable_outage_fails_without_downgrade() {
    let fast = {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/generate")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"response": "ok"}"#)
            .expect(0)
            .create_async()
            .await;
        server
    };
    let mut capable = mockito::Server::new_async().await;
    capable
        .mock("POST", "/models/test")
        .with_status(503)
        .with_body("overloaded")
        .create_async()
        .await;

    let mocks = MockBackends { fast, capable };
    let orch = orchestrator(&mocks);

    let err = orch
        .process("Hello world", RoutingMode::ForceCapable)
        .await
        .unwrap_err();

    // The fast backend was never consulted and nothing was recorded
    assert_eq!(err.backend(), Some(ModelKind::Capable));
    assert_eq!(orch.metrics().summary().total_queries, 0);
}
