use std::sync::Arc;

use reqwest::StatusCode;
use serde_json::json;
use signet_auth::{AuditError, AuditEvent, AuditSink, AuthConfig, InMemoryAuditSink, SecretKey};
use signet_core::SubjectId;

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn(config: AuthConfig, audit: Arc<dyn AuditSink>) -> Self {
        // Build app (same router as prod), but bind to an ephemeral port.
        let app = signet_api::app::build_app_with_audit(&config, audit).expect("valid test config");
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Sink that always fails; must never affect responses.
struct BrokenSink;

impl AuditSink for BrokenSink {
    fn record(&self, _event: &AuditEvent) -> Result<(), AuditError> {
        Err(AuditError("disk full".to_string()))
    }
}

fn test_config() -> AuthConfig {
    AuthConfig {
        secret_key: SecretKey::new("test-secret"),
        ..AuthConfig::default()
    }
}

/// `name=value` part of a `Set-Cookie` header.
fn cookie_pair(res: &reqwest::Response) -> String {
    let header = res
        .headers()
        .get(reqwest::header::SET_COOKIE)
        .expect("missing set-cookie")
        .to_str()
        .unwrap();
    header.split(';').next().unwrap().to_string()
}

async fn login(client: &reqwest::Client, base_url: &str, subject: SubjectId) -> reqwest::Response {
    client
        .post(format!("{}/login", base_url))
        .json(&json!({ "user_id": subject }))
        .send()
        .await
        .unwrap()
}

async fn audit_events_eventually(sink: &InMemoryAuditSink, count: usize) -> Vec<AuditEvent> {
    // Audit recording is out-of-band; poll briefly until it lands.
    for _ in 0..50 {
        let events = sink.all();
        if events.len() >= count {
            return events;
        }
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    }

    panic!("audit events did not arrive within timeout");
}

#[tokio::test]
async fn health_is_public() {
    let srv = TestServer::spawn(test_config(), Arc::new(InMemoryAuditSink::new())).await;

    let res = reqwest::get(format!("{}/health", srv.base_url)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn login_sets_hardened_session_cookie() {
    let srv = TestServer::spawn(test_config(), Arc::new(InMemoryAuditSink::new())).await;
    let client = reqwest::Client::new();

    let res = login(&client, &srv.base_url, SubjectId::new()).await;
    assert_eq!(res.status(), StatusCode::OK);

    let set_cookie = res
        .headers()
        .get(reqwest::header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(set_cookie.starts_with("session="));
    assert!(set_cookie.contains("Max-Age=3600"));
    assert!(set_cookie.contains("Path=/"));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("Secure"));
    assert!(set_cookie.contains("SameSite=Lax"));

    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["message"], "Logged in");
}

#[tokio::test]
async fn session_cookie_identifies_user_on_me() {
    let srv = TestServer::spawn(test_config(), Arc::new(InMemoryAuditSink::new())).await;
    let client = reqwest::Client::new();
    let subject: SubjectId = "11111111-1111-1111-1111-111111111111".parse().unwrap();

    let res = login(&client, &srv.base_url, subject).await;
    let cookie = cookie_pair(&res);

    let res = client
        .get(format!("{}/me", srv.base_url))
        .header(reqwest::header::COOKIE, cookie)
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["user_id"], "11111111-1111-1111-1111-111111111111");
}

#[tokio::test]
async fn me_requires_a_session() {
    let srv = TestServer::spawn(test_config(), Arc::new(InMemoryAuditSink::new())).await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/me", srv.base_url))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "missing_credential");
}

#[tokio::test]
async fn cookie_from_another_secret_is_rejected() {
    let other = TestServer::spawn(
        AuthConfig {
            secret_key: SecretKey::new("someone-else"),
            ..AuthConfig::default()
        },
        Arc::new(InMemoryAuditSink::new()),
    )
    .await;
    let srv = TestServer::spawn(test_config(), Arc::new(InMemoryAuditSink::new())).await;
    let client = reqwest::Client::new();

    let res = login(&client, &other.base_url, SubjectId::new()).await;
    let foreign_cookie = cookie_pair(&res);

    let res = client
        .get(format!("{}/me", srv.base_url))
        .header(reqwest::header::COOKIE, foreign_cookie)
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "invalid_credential");
}

#[tokio::test]
async fn logout_always_succeeds_and_clears_cookie() {
    let srv = TestServer::spawn(test_config(), Arc::new(InMemoryAuditSink::new())).await;
    let client = reqwest::Client::new();

    for cookie in [None, Some("session=garbage"), Some("session=")] {
        let mut req = client.post(format!("{}/logout", srv.base_url));
        if let Some(cookie) = cookie {
            req = req.header(reqwest::header::COOKIE, cookie);
        }
        let res = req.send().await.unwrap();

        assert_eq!(res.status(), StatusCode::OK, "cookie {cookie:?}");
        let set_cookie = res
            .headers()
            .get(reqwest::header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(set_cookie.starts_with("session=;"));
        assert!(set_cookie.contains("Max-Age=0"));

        let body: serde_json::Value = res.json().await.unwrap();
        assert_eq!(body["message"], "Logged out");
    }
}

#[tokio::test]
async fn login_and_logout_are_audited() {
    let sink = Arc::new(InMemoryAuditSink::new());
    let srv = TestServer::spawn(test_config(), sink.clone()).await;
    let client = reqwest::Client::new();
    let subject = SubjectId::new();

    let res = login(&client, &srv.base_url, subject).await;
    let cookie = cookie_pair(&res);
    audit_events_eventually(&sink, 1).await;

    client
        .post(format!("{}/logout", srv.base_url))
        .header(reqwest::header::COOKIE, cookie)
        .send()
        .await
        .unwrap();

    let events = audit_events_eventually(&sink, 2).await;
    assert_eq!(events[0].name, AuditEvent::LOGIN);
    assert_eq!(events[0].subject, Some(subject));
    assert_eq!(events[1].name, AuditEvent::LOGOUT);
    assert_eq!(events[1].subject, Some(subject));
}

#[tokio::test]
async fn failing_audit_sink_does_not_affect_login() {
    let srv = TestServer::spawn(test_config(), Arc::new(BrokenSink)).await;
    let client = reqwest::Client::new();

    let res = login(&client, &srv.base_url, SubjectId::new()).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().get(reqwest::header::SET_COOKIE).is_some());
}

#[tokio::test]
async fn malformed_login_body_is_rejected() {
    let srv = TestServer::spawn(test_config(), Arc::new(InMemoryAuditSink::new())).await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/login", srv.base_url))
        .json(&json!({ "user_id": "not-a-uuid" }))
        .send()
        .await
        .unwrap();

    assert!(res.status().is_client_error());
    assert!(res.headers().get(reqwest::header::SET_COOKIE).is_none());
}
