use async_trait::async_trait;
use mockito::{Matcher, Server};
use serde_json::json;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;
use url::Url;

use summarizer::clients::{LlmClient, ProxyBackend, SummarizerClient, SummaryBackend};
use summarizer::core::config::{AppConfig, BackendKind};
use summarizer::core::credential::Credential;
use summarizer::core::models::{SummaryFormat, SummaryOptions, Tone};
use summarizer::errors::SummarizerError;
use summarizer::features::summarize::{SummarizeForm, prepare_request, summarize_form};
use summarizer::prompt::Prompt;

/// Backend double that records every call and replays a canned answer.
struct FakeBackend {
    needs_key: bool,
    reply: Result<String, String>,
    calls: Mutex<Vec<(String, Option<String>)>>,
}

impl FakeBackend {
    fn answering(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            needs_key: false,
            reply: Ok(reply.to_string()),
            calls: Mutex::new(Vec::new()),
        })
    }

    fn keyed(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            needs_key: true,
            reply: Ok(reply.to_string()),
            calls: Mutex::new(Vec::new()),
        })
    }

    fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            needs_key: false,
            reply: Err(message.to_string()),
            calls: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> Vec<(String, Option<String>)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SummaryBackend for FakeBackend {
    fn name(&self) -> &'static str {
        "fake"
    }

    fn requires_credential(&self) -> bool {
        self.needs_key
    }

    async fn generate(
        &self,
        prompt: &str,
        credential: Option<&Credential>,
    ) -> Result<String, SummarizerError> {
        self.calls.lock().unwrap().push((
            prompt.to_string(),
            credential.map(|c| c.expose().to_string()),
        ));
        self.reply
            .clone()
            .map_err(SummarizerError::TransportError)
    }
}

fn prompt() -> Prompt {
    Prompt::from_raw("Summarize this.".to_string())
}

fn proxy_client(server: &Server) -> SummarizerClient {
    let url = Url::parse(&format!("{}/summarize", server.url())).unwrap();
    let backend = ProxyBackend::new(url, Duration::from_secs(5)).unwrap();
    SummarizerClient::new(Arc::new(backend), None)
}

// ============================================================================
// SummarizerClient over a fake backend
// ============================================================================

#[tokio::test]
async fn test_summary_is_trimmed() {
    let backend = FakeBackend::answering(" Key point one. Key point two. ");
    let client = SummarizerClient::new(backend.clone(), None);

    let summary = client.summarize(&prompt(), None).await.unwrap();
    assert_eq!(summary, "Key point one. Key point two.");
    assert_eq!(backend.calls().len(), 1);
}

#[tokio::test]
async fn test_blank_summary_is_format_error() {
    let client = SummarizerClient::new(FakeBackend::answering(" \n "), None);
    let err = client.summarize(&prompt(), None).await.unwrap_err();
    assert!(matches!(err, SummarizerError::ResponseFormatError(_)));
}

#[tokio::test]
async fn test_missing_key_is_configuration_error_and_nothing_is_sent() {
    let backend = FakeBackend::keyed("unused");
    let client = SummarizerClient::new(backend.clone(), None);

    let err = client.summarize(&prompt(), Some("   ")).await.unwrap_err();
    assert!(matches!(err, SummarizerError::ConfigurationError(_)));
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn test_caller_key_overrides_process_key() {
    let backend = FakeBackend::keyed("ok");
    let client = SummarizerClient::new(backend.clone(), Credential::new("server-key"));

    client.summarize(&prompt(), Some("caller-key")).await.unwrap();
    client.summarize(&prompt(), None).await.unwrap();

    let keys: Vec<Option<String>> = backend.calls().into_iter().map(|(_, k)| k).collect();
    assert_eq!(
        keys,
        vec![Some("caller-key".to_string()), Some("server-key".to_string())]
    );
}

#[tokio::test]
async fn test_failures_are_not_retried() {
    let backend = FakeBackend::failing("connection reset");
    let client = SummarizerClient::new(backend.clone(), None);

    let err = client.summarize(&prompt(), None).await.unwrap_err();
    assert!(matches!(err, SummarizerError::TransportError(_)));
    assert_eq!(backend.calls().len(), 1);
}

// ============================================================================
// Pipeline
// ============================================================================

#[tokio::test]
async fn test_pipeline_clamps_validates_and_sends_prompt() {
    let backend = FakeBackend::answering("Done.");
    let client = SummarizerClient::new(backend.clone(), None);
    let form = SummarizeForm {
        text: "alpha, beta; gamma delta".into(),
        options: SummaryOptions {
            format: SummaryFormat::BulletPoints,
            tone: Tone::Confident,
            ..SummaryOptions::default()
        },
        api_key: None,
    };

    let summary = summarize_form(&client, &form, 3).await.unwrap();
    assert_eq!(summary, "Done.");

    let calls = backend.calls();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].0.ends_with("User's text:\nalpha beta gamma"));
    assert!(calls[0].0.contains("- Tone: Confident."));
}

#[tokio::test]
async fn test_pipeline_blocks_before_calling_backend() {
    let backend = FakeBackend::answering("unused");
    let client = SummarizerClient::new(backend.clone(), None);
    let form = SummarizeForm {
        text: "Some text".into(),
        options: SummaryOptions {
            tone: Tone::Custom,
            ..SummaryOptions::default()
        },
        api_key: None,
    };

    let err = summarize_form(&client, &form, 1000).await.unwrap_err();
    assert!(matches!(err, SummarizerError::ValidationBlocked(ref r) if r == "Custom tone can't be empty."));
    assert!(backend.calls().is_empty());
}

#[test]
fn test_prepare_request_reports_truncation() {
    let form = SummarizeForm {
        text: "one two three four".into(),
        ..SummarizeForm::default()
    };
    let prepared = prepare_request(&form, 2).unwrap();
    assert!(prepared.input.truncated);
    assert_eq!(prepared.input.text, "one two");
    assert!(prepared.prompt.as_str().ends_with("\none two"));
}

// ============================================================================
// ProxyBackend over HTTP
// ============================================================================

#[tokio::test]
async fn test_proxy_posts_prompt_json_and_trims_summary() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/summarize")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({ "prompt": "Summarize this." })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"summary": " Key point one. Key point two. "}"#)
        .expect(1)
        .create_async()
        .await;

    let summary = proxy_client(&server)
        .summarize(&prompt(), None)
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(summary, "Key point one. Key point two.");
}

#[tokio::test]
async fn test_proxy_server_error_is_transport_error_with_status() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/summarize")
        .with_status(500)
        .with_body("upstream exploded")
        .expect(1)
        .create_async()
        .await;

    let err = proxy_client(&server)
        .summarize(&prompt(), None)
        .await
        .unwrap_err();

    mock.assert_async().await;
    match err {
        SummarizerError::TransportError(msg) => {
            assert!(msg.contains("500"), "status missing from: {msg}");
            assert!(msg.contains("upstream exploded"));
        }
        other => panic!("Unexpected error type: {other}"),
    }
}

#[tokio::test]
async fn test_proxy_empty_summary_is_format_error() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/summarize")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"summary": ""}"#)
        .create_async()
        .await;

    let err = proxy_client(&server)
        .summarize(&prompt(), None)
        .await
        .unwrap_err();
    assert!(matches!(err, SummarizerError::ResponseFormatError(_)));
}

#[tokio::test]
async fn test_proxy_missing_field_and_bad_json_are_format_errors() {
    for body in [r#"{"result": "text"}"#, "<html>oops</html>"] {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/summarize")
            .with_status(200)
            .with_body(body)
            .create_async()
            .await;

        let err = proxy_client(&server)
            .summarize(&prompt(), None)
            .await
            .unwrap_err();
        assert!(
            matches!(err, SummarizerError::ResponseFormatError(_)),
            "body {body:?} gave {err}"
        );
    }
}

#[tokio::test]
async fn test_proxy_never_receives_process_key() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/summarize")
        .match_header("authorization", Matcher::Missing)
        .with_status(200)
        .with_body(r#"{"summary": "ok"}"#)
        .expect(1)
        .create_async()
        .await;

    let config = AppConfig {
        backend: BackendKind::Proxy,
        backend_url: Url::parse(&format!("{}/summarize", server.url())).unwrap(),
        openai_api_key: Credential::new("sk-process-secret"),
        ..AppConfig::default()
    };
    let client = SummarizerClient::from_config(&config).unwrap();
    assert_eq!(client.backend_name(), "proxy");

    client.summarize(&prompt(), None).await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_proxy_forwards_caller_key_as_bearer() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/summarize")
        .match_header("authorization", "Bearer caller-key")
        .with_status(200)
        .with_body(r#"{"summary": "ok"}"#)
        .expect(1)
        .create_async()
        .await;

    proxy_client(&server)
        .summarize(&prompt(), Some("caller-key"))
        .await
        .unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_proxy_timeout_is_transport_error() {
    // Accepts connections and never answers.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let holder = tokio::spawn(async move {
        let mut open = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            open.push(socket);
        }
    });

    let url = Url::parse(&format!("http://{addr}/summarize")).unwrap();
    let backend = ProxyBackend::new(url, Duration::from_millis(200)).unwrap();
    let client = SummarizerClient::new(Arc::new(backend), None);

    let err = client.summarize(&prompt(), None).await.unwrap_err();
    holder.abort();
    match err {
        SummarizerError::TransportError(msg) => {
            assert!(msg.contains("timed out"), "timeout missing from: {msg}");
        }
        other => panic!("Unexpected error type: {other}"),
    }
}

#[tokio::test]
async fn test_proxy_unreachable_is_transport_error() {
    let url = Url::parse("http://127.0.0.1:1/summarize").unwrap();
    let backend = ProxyBackend::new(url, Duration::from_secs(2)).unwrap();
    let client = SummarizerClient::new(Arc::new(backend), None);

    let err = client.summarize(&prompt(), None).await.unwrap_err();
    assert!(matches!(err, SummarizerError::TransportError(_)));
}

// ============================================================================
// LlmClient (direct provider) over HTTP
// ============================================================================

fn provider_config(server: &Server, key: Option<&str>) -> AppConfig {
    AppConfig {
        backend: BackendKind::Provider,
        provider_base_url: Url::parse(&server.url()).unwrap(),
        openai_api_key: key.and_then(Credential::new),
        openai_model: "gpt-test".to_string(),
        ..AppConfig::default()
    }
}

#[tokio::test]
async fn test_provider_sends_model_and_bearer_and_reads_output() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/responses")
        .match_header("authorization", "Bearer sk-test")
        .match_body(Matcher::PartialJson(json!({ "model": "gpt-test" })))
        .with_status(200)
        .with_body(
            r#"{"output":[{"type":"message","content":[{"type":"output_text","text":"  Provider summary. "}]}]}"#,
        )
        .expect(1)
        .create_async()
        .await;

    let client = SummarizerClient::from_config(&provider_config(&server, Some("sk-test"))).unwrap();
    assert_eq!(client.backend_name(), "openai");

    let summary = client.summarize(&prompt(), None).await.unwrap();
    mock.assert_async().await;
    assert_eq!(summary, "Provider summary.");
}

#[tokio::test]
async fn test_provider_without_key_never_calls_out() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/responses")
        .expect(0)
        .create_async()
        .await;

    let client = SummarizerClient::from_config(&provider_config(&server, None)).unwrap();
    let err = client.summarize(&prompt(), None).await.unwrap_err();

    mock.assert_async().await;
    assert!(matches!(err, SummarizerError::ConfigurationError(_)));
}

#[tokio::test]
async fn test_provider_error_status_and_empty_output() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/responses")
        .with_status(429)
        .with_body(r#"{"error":{"message":"rate limited"}}"#)
        .create_async()
        .await;

    let client = SummarizerClient::from_config(&provider_config(&server, Some("sk"))).unwrap();
    let err = client.summarize(&prompt(), None).await.unwrap_err();
    assert!(matches!(err, SummarizerError::TransportError(ref m) if m.contains("429")));

    let mut server = Server::new_async().await;
    server
        .mock("POST", "/responses")
        .with_status(200)
        .with_body(r#"{"output":[]}"#)
        .create_async()
        .await;

    let client = SummarizerClient::from_config(&provider_config(&server, Some("sk"))).unwrap();
    let err = client.summarize(&prompt(), None).await.unwrap_err();
    assert!(matches!(err, SummarizerError::ResponseFormatError(_)));
}

#[test]
fn test_llm_client_reports_model() {
    let client = LlmClient::new(
        Url::parse("https://example.invalid/v1").unwrap(),
        None,
        "gpt-5".to_string(),
        Duration::from_secs(30),
    )
    .unwrap();
    assert_eq!(client.model_name(), "gpt-5");
    assert!(client.requires_credential());
}
