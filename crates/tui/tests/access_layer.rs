mod support;

use serde::de::IgnoredAny;
use serde_json::{Value, json};

use api_types::{auth::AuthToken, report::TransactionSummary};
use finbot_tui::client::{Client, ClientError, Endpoint, Session};

use support::{MockBackend, TOKEN, signed_in};

#[tokio::test]
async fn reads_without_token_fail_before_any_request() {
    let backend = MockBackend::start().await;
    let client = backend.client();
    let session = Session::anonymous();

    let err = client
        .get::<Value>(&session, "/transactions")
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::MissingToken));
    assert_eq!(err.to_string(), "No authentication token found");

    let err = client
        .put::<_, Value>(&session, "/budgets/1", &json!({ "amount": 1 }))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::MissingToken));

    let err = client
        .delete::<Value>(&session, "/transactions/1")
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::MissingToken));

    assert!(backend.requests().is_empty());
}

#[tokio::test]
async fn get_sends_bearer_token_and_returns_data() {
    let backend = MockBackend::start().await;
    backend.respond_data(
        "GET",
        "/transactions/stats",
        json!({ "income": 500000, "expense": 125000, "balance": 375000 }),
    );

    let summary: TransactionSummary = backend
        .client()
        .get(&signed_in(), "/transactions/stats")
        .await
        .unwrap();
    assert_eq!(summary.balance, 375000.0);

    let requests = backend.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0].authorization.as_deref(),
        Some(format!("Bearer {TOKEN}").as_str())
    );
}

#[tokio::test]
async fn auth_posts_never_carry_a_token() {
    let backend = MockBackend::start().await;
    backend.respond_data("POST", "/auth/login", json!({ "token": "fresh" }));

    let auth: AuthToken = backend
        .client()
        .post(&signed_in(), "/auth/login", &json!({ "email": "a@b.c", "password": "x" }))
        .await
        .unwrap();
    assert_eq!(auth.token, "fresh");

    let requests = backend.requests_to("POST", "/auth/login");
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].authorization, None);
    assert_eq!(
        requests[0].body,
        Some(json!({ "email": "a@b.c", "password": "x" }))
    );
}

#[tokio::test]
async fn other_posts_attach_the_token_only_when_present() {
    let backend = MockBackend::start().await;
    let client = backend.client();
    let body = json!({ "amount": 1000 });

    client
        .post::<_, IgnoredAny>(&signed_in(), "/transactions", &body)
        .await
        .unwrap();
    client
        .post::<_, IgnoredAny>(&Session::anonymous(), "/transactions", &body)
        .await
        .unwrap();

    let requests = backend.requests_to("POST", "/transactions");
    assert_eq!(requests.len(), 2);
    assert_eq!(
        requests[0].authorization.as_deref(),
        Some("Bearer test-token")
    );
    assert_eq!(requests[1].authorization, None);
}

#[tokio::test]
async fn failure_prefers_message_then_error_then_fallback() {
    let backend = MockBackend::start().await;
    backend.respond(
        "GET",
        "/one",
        400,
        json!({ "success": false, "message": "Invalid date range", "error": "ignored" }),
    );
    backend.respond("GET", "/two", 500, json!({ "success": false, "error": "Boom" }));
    backend.respond("GET", "/three", 404, json!({ "success": false }));
    backend.respond_raw("GET", "/four", 502, "<html>bad gateway</html>");

    let client = backend.client();
    let session = signed_in();
    let mut messages = Vec::new();
    for path in ["/one", "/two", "/three", "/four"] {
        let err = client.get::<Value>(&session, path).await.unwrap_err();
        messages.push(err.to_string());
    }

    assert_eq!(
        messages,
        [
            "Invalid date range",
            "Boom",
            "An error occurred",
            "An error occurred"
        ]
    );
}

#[tokio::test]
async fn failed_status_is_kept_on_the_error() {
    let backend = MockBackend::start().await;
    backend.respond("DELETE", "/budgets/9", 404, json!({ "message": "Budget not found" }));

    let err = backend
        .client()
        .delete::<Value>(&signed_in(), "/budgets/9")
        .await
        .unwrap_err();
    match err {
        ClientError::RequestFailed { status, message } => {
            assert_eq!(status.as_u16(), 404);
            assert_eq!(message, "Budget not found");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn query_parameters_are_encoded() {
    let backend = MockBackend::start().await;
    backend.respond_data("GET", "/transactions", json!([]));

    let endpoint = Endpoint::new("/transactions")
        .query("category", "food & drinks")
        .query("type", "expense");
    let items: Vec<Value> = backend
        .client()
        .get(&signed_in(), endpoint)
        .await
        .unwrap();
    assert!(items.is_empty());

    let requests = backend.requests();
    assert_eq!(
        requests[0].query.as_deref(),
        Some("category=food+%26+drinks&type=expense")
    );
}

#[tokio::test]
async fn unreachable_backend_is_a_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let http = reqwest::Client::builder().no_proxy().build().unwrap();
    let client = Client::with_http(http, &format!("http://{addr}/api")).unwrap();

    let err = client
        .get::<Value>(&signed_in(), "/transactions")
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Transport(_)));
}

#[test]
fn base_url_must_be_absolute() {
    let err = Client::new("not a url").unwrap_err();
    assert!(matches!(err, ClientError::InvalidBaseUrl(_)));
}
