use bbot_core::llm::{build_client, ClaudeClient, OpenAIClient};
use bbot_core::{LlmClient, Message, ProviderId, Settings};
use serde_json::Value;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// Captured request: the header block and the decoded JSON body.
struct CapturedRequest {
    head: String,
    body: Value,
}

/// Serve exactly one HTTP request with a canned response and hand back
/// what the client sent.
async fn serve_once(status: &'static str, body: &'static str) -> (String, oneshot::Receiver<CapturedRequest>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];

        let header_end = loop {
            let n = socket.read(&mut chunk).await.unwrap();
            assert!(n > 0, "client closed the connection early");
            buf.extend_from_slice(&chunk[..n]);
            if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                break pos + 4;
            }
        };

        let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
        let content_length = head
            .lines()
            .find_map(|line| {
                let (name, value) = line.split_once(':')?;
                name.eq_ignore_ascii_case("content-length")
                    .then(|| value.trim().parse::<usize>().ok())
                    .flatten()
            })
            .unwrap_or(0);

        while buf.len() < header_end + content_length {
            let n = socket.read(&mut chunk).await.unwrap();
            assert!(n > 0, "client closed the connection early");
            buf.extend_from_slice(&chunk[..n]);
        }

        let request_body: Value =
            serde_json::from_slice(&buf[header_end..header_end + content_length]).unwrap();

        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();

        let _ = tx.send(CapturedRequest {
            head,
            body: request_body,
        });
    });

    (format!("http://{addr}"), rx)
}

/// Talk to the fake endpoint without any proxy from the environment.
fn direct_client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

fn history() -> Vec<Message> {
    vec![
        Message::system("You are a friendly chatbot called BBot."),
        Message::user("Hello"),
        Message::assistant("Hi there"),
        Message::user("Tell me more"),
    ]
}

#[tokio::test]
async fn test_openai_sends_full_history_and_takes_first_choice() {
    let (url, captured) = serve_once(
        "200 OK",
        r#"{"choices":[{"message":{"role":"assistant","content":"More things"}},{"message":{"role":"assistant","content":"ignored"}}]}"#,
    )
    .await;

    let client = OpenAIClient::new("sk-test")
        .with_model("gpt-4o-mini")
        .with_base_url(url)
        .with_http_client(direct_client());
    let reply = client.generate_reply(&history(), "Tell me more").await.unwrap();
    assert_eq!(reply, "More things");

    let request = captured.await.unwrap();
    assert!(request.head.starts_with("POST /v1/chat/completions"));
    assert!(request.head.to_lowercase().contains("authorization: bearer sk-test"));
    assert_eq!(request.body["model"], "gpt-4o-mini");
    let messages = request.body["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 4);
    assert_eq!(messages[0]["role"], "system");
    assert_eq!(messages[2]["role"], "assistant");
}

#[tokio::test]
async fn test_anthropic_sends_only_latest_message() {
    let (url, captured) = serve_once(
        "200 OK",
        r#"{"content":[{"type":"text","text":"Short answer"}]}"#,
    )
    .await;

    let client = ClaudeClient::new("ak-test")
        .with_base_url(url)
        .with_http_client(direct_client());
    let reply = client.generate_reply(&history(), "Tell me more").await.unwrap();
    assert_eq!(reply, "Short answer");

    let request = captured.await.unwrap();
    let head = request.head.to_lowercase();
    assert!(request.head.starts_with("POST /v1/messages"));
    assert!(head.contains("x-api-key: ak-test"));
    assert!(head.contains("anthropic-version: 2023-06-01"));
    assert_eq!(request.body["max_tokens"], 100);
    assert_eq!(
        request.body["messages"],
        serde_json::json!([{"role": "user", "content": "Tell me more"}])
    );
}

#[tokio::test]
async fn test_anthropic_empty_content_placeholder() {
    let (url, _captured) = serve_once("200 OK", r#"{"content":[]}"#).await;

    let client = ClaudeClient::new("ak-test")
        .with_base_url(url)
        .with_http_client(direct_client());
    let reply = client.generate_reply(&history(), "Tell me more").await.unwrap();
    assert_eq!(reply, "No response from AI.");
}

#[tokio::test]
async fn test_error_status_becomes_provider_error() {
    let (url, _captured) = serve_once(
        "401 Unauthorized",
        r#"{"error":{"message":"Incorrect API key provided"}}"#,
    )
    .await;

    let client = OpenAIClient::new("bad")
        .with_base_url(url)
        .with_http_client(direct_client());
    let err = client.generate_reply(&history(), "Tell me more").await.unwrap_err();
    assert!(err.message().contains("401"));
    assert!(err.message().contains("Incorrect API key provided"));
}

#[tokio::test]
async fn test_connection_failure_becomes_provider_error() {
    // Bind then drop to get a port nobody is listening on.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = ClaudeClient::new("k")
        .with_base_url(format!("http://{addr}"))
        .with_http_client(direct_client());
    let err = client.generate_reply(&history(), "hi").await.unwrap_err();
    assert!(!err.message().is_empty());
}

#[test]
fn test_build_client_follows_configured_provider() {
    let mut settings = Settings::default();
    settings.provider = ProviderId::Anthropic;
    settings.model = "claude-3-haiku-20240307".to_string();
    let anthropic = build_client(&settings.clone().into_config("ak-test").unwrap());
    assert_eq!(anthropic.model(), "claude-3-haiku-20240307");

    settings.provider = ProviderId::OpenAI;
    settings.model = "gpt-4o-mini".to_string();
    let openai = build_client(&settings.into_config("sk-test").unwrap());
    assert_eq!(openai.model(), "gpt-4o-mini");
}
