// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Gateway and transformer wired together over real sockets.

use std::{sync::Arc, time::Duration};

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    response::Response,
    routing::post,
    Router,
};
use chrono::Utc;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower::ServiceExt;
use url::Url;

use textrelay::{
    api::{gateway_router, transformer_router},
    auth::{InternalTrustGate, TokenCodec},
    error::ServiceError,
    providers::TransformerClient,
    server::serve,
    state::{GatewayState, TransformerState},
    storage::{AuditStore, IdentityStore, InMemoryStore, RedbStore},
};

const INTERNAL_SECRET: &str = "e2e-internal-secret";
const SIGNING_SECRET: &[u8] = b"e2e-signing-secret-that-is-long-enough";
const CREDENTIALS: &str = r#"{"email":"a@x.com","password":"pw"}"#;

/// A server on an ephemeral port, stopped when dropped.
struct Running {
    base: Url,
    shutdown: CancellationToken,
}

impl Drop for Running {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

async fn spawn(router: Router) -> Running {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = CancellationToken::new();
    tokio::spawn(serve(listener, router, shutdown.clone()));

    Running {
        base: Url::parse(&format!("http://{addr}")).unwrap(),
        shutdown,
    }
}

async fn spawn_transformer() -> Running {
    spawn(transformer_router(TransformerState::new(
        InternalTrustGate::new(INTERNAL_SECRET),
    )))
    .await
}

fn client(base: &Url, secret: &str, timeout: Duration) -> TransformerClient {
    TransformerClient::new(base, timeout, InternalTrustGate::new(secret)).unwrap()
}

fn codec() -> Arc<TokenCodec> {
    Arc::new(TokenCodec::new(SIGNING_SECRET, Duration::from_secs(3600)).unwrap())
}

fn gateway<S>(store: Arc<S>, transformer: TransformerClient) -> Router
where
    S: IdentityStore + AuditStore + 'static,
{
    gateway_router(GatewayState::new(
        codec(),
        store.clone(),
        store,
        transformer,
    ))
}

fn json_post(path: &str, body: &str, bearer: Option<&str>) -> Request<Body> {
    let mut builder = Request::post(path).header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = bearer {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

async fn body_json(response: Response) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn register(app: &Router) -> String {
    let response = app
        .clone()
        .oneshot(json_post("/api/register", CREDENTIALS, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["token"]
        .as_str()
        .unwrap()
        .to_string()
}

#[tokio::test]
async fn register_login_process_round_trip() {
    let transformer = spawn_transformer().await;
    let store = Arc::new(InMemoryStore::new());
    let app = gateway(
        store.clone(),
        client(&transformer.base, INTERNAL_SECRET, Duration::from_secs(5)),
    );

    register(&app).await;

    let login = app
        .clone()
        .oneshot(json_post("/api/login", CREDENTIALS, None))
        .await
        .unwrap();
    assert_eq!(login.status(), StatusCode::OK);
    let token = body_json(login).await["token"].as_str().unwrap().to_string();

    let response = app
        .oneshot(json_post("/api/process", r#"{"text":"hello"}"#, Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        serde_json::json!({"result": "OLLEH [TRANSFORMED]"})
    );

    let identity = store.find_by_email("a@x.com").unwrap().unwrap();
    let records = store.list_by_identity(identity.id).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].input_text, "hello");
    assert_eq!(records[0].output_text, "OLLEH [TRANSFORMED]");
}

#[tokio::test]
async fn absent_text_is_processed_as_empty() {
    let transformer = spawn_transformer().await;
    let store = Arc::new(InMemoryStore::new());
    let app = gateway(
        store.clone(),
        client(&transformer.base, INTERNAL_SECRET, Duration::from_secs(5)),
    );
    let token = register(&app).await;

    let response = app
        .oneshot(json_post("/api/process", "{}", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["result"], "");
    assert_eq!(store.audit_len().unwrap(), 1);
}

#[tokio::test]
async fn expired_token_is_rejected_without_audit() {
    let transformer = spawn_transformer().await;
    let store = Arc::new(InMemoryStore::new());
    let app = gateway(
        store.clone(),
        client(&transformer.base, INTERNAL_SECRET, Duration::from_secs(5)),
    );
    register(&app).await;

    let identity = store.find_by_email("a@x.com").unwrap().unwrap();
    let stale = codec()
        .issue_at(
            "a@x.com",
            identity.id,
            Utc::now() - chrono::Duration::hours(2),
        )
        .unwrap();

    let response = app
        .oneshot(json_post("/api/process", r#"{"text":"hello"}"#, Some(&stale)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(store.audit_len().unwrap(), 0);
}

#[tokio::test]
async fn wrong_internal_secret_fails_without_audit() {
    let transformer = spawn_transformer().await;
    let store = Arc::new(InMemoryStore::new());
    let app = gateway(
        store.clone(),
        client(&transformer.base, "not-the-secret", Duration::from_secs(5)),
    );
    let token = register(&app).await;

    let response = app
        .oneshot(json_post("/api/process", r#"{"text":"hello"}"#, Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(response).await,
        serde_json::json!({"error": "Internal server error"})
    );
    assert_eq!(store.audit_len().unwrap(), 0);
}

#[tokio::test]
async fn empty_upstream_body_is_reported() {
    let upstream = spawn(Router::new().route("/api/transform", post(|| async { "" }))).await;
    let result = client(&upstream.base, INTERNAL_SECRET, Duration::from_secs(5))
        .transform("hello")
        .await;
    assert!(matches!(result, Err(ServiceError::EmptyUpstreamResponse)));

    let null = spawn(Router::new().route("/api/transform", post(|| async { "null" }))).await;
    let result = client(&null.base, INTERNAL_SECRET, Duration::from_secs(5))
        .transform("hello")
        .await;
    assert!(matches!(result, Err(ServiceError::EmptyUpstreamResponse)));
}

#[tokio::test]
async fn slow_upstream_times_out() {
    let upstream = spawn(Router::new().route(
        "/api/transform",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            r#"{"result":"late"}"#
        }),
    ))
    .await;

    let result = client(&upstream.base, INTERNAL_SECRET, Duration::from_millis(200))
        .transform("hello")
        .await;
    assert!(matches!(result, Err(ServiceError::UpstreamFailure(_))));
}

#[tokio::test]
async fn readiness_follows_transformer_liveness() {
    let transformer = spawn_transformer().await;
    let app = gateway(
        Arc::new(InMemoryStore::new()),
        client(&transformer.base, INTERNAL_SECRET, Duration::from_secs(5)),
    );

    let response = app
        .oneshot(Request::get("/health/ready").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["checks"]["transformer"], "ok");
}

#[tokio::test]
async fn identities_survive_a_restart() {
    let data_dir = tempfile::tempdir().unwrap();
    // Nothing listens here; login never reaches the transformer.
    let offline = Url::parse("http://127.0.0.1:9").unwrap();

    {
        let store = Arc::new(RedbStore::open_in(data_dir.path()).unwrap());
        let app = gateway(
            store,
            client(&offline, INTERNAL_SECRET, Duration::from_secs(1)),
        );
        register(&app).await;
    }

    let store = Arc::new(RedbStore::open_in(data_dir.path()).unwrap());
    let app = gateway(
        store,
        client(&offline, INTERNAL_SECRET, Duration::from_secs(1)),
    );

    let login = app
        .clone()
        .oneshot(json_post("/api/login", CREDENTIALS, None))
        .await
        .unwrap();
    assert_eq!(login.status(), StatusCode::OK);

    let again = app
        .oneshot(json_post("/api/register", CREDENTIALS, None))
        .await
        .unwrap();
    assert_eq!(again.status(), StatusCode::CONFLICT);
}
