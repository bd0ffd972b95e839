use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{Path, Query};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{delete, get};
use axum::{Json, Router};
use serde_json::{Value, json};

use campus_portal::api::{self, ApiClient, HttpApiClient};
use campus_portal::config::PortalConfig;
use campus_portal::error::AppError;
use campus_portal::models::ClassEntity;
use campus_portal::session::{Session, SessionUser};

fn bearer(headers: &HeaderMap) -> Value {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(|v| json!(v))
        .unwrap_or(Value::Null)
}

async fn echo(headers: HeaderMap, Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    Json(json!({ "auth": bearer(&headers), "params": params }))
}

async fn create_class(Json(body): Json<Value>) -> (StatusCode, String) {
    (StatusCode::CREATED, format!("Created {}", body["name"].as_str().unwrap_or_default()))
}

async fn delete_class(Path(id): Path<i64>) -> (StatusCode, String) {
    if id == 404 {
        (StatusCode::NOT_FOUND, "Class not found".to_string())
    } else {
        (StatusCode::OK, "Deleted".to_string())
    }
}

async fn spawn_backend() -> SocketAddr {
    let app = Router::new()
        .route("/api/echo", get(echo))
        .route(
            "/api/classes",
            get(|| async { Json(json!([{ "id": 1, "name": "CNTT01", "year": 2023 }])) })
                .post(create_class),
        )
        .route("/api/classes/{id}", delete(delete_class))
        .route("/api/empty", get(|| async { "" }));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    addr
}

fn client(addr: SocketAddr, session: Arc<Session>) -> HttpApiClient {
    let config = PortalConfig::new(&format!("http://{}/api", addr)).expect("config");
    HttpApiClient::new(&config, session).expect("client")
}

fn signed_in() -> Arc<Session> {
    Arc::new(Session::signed_in(
        "secret-token",
        SessionUser {
            id: Some(1),
            username: "admin".to_string(),
            full_name: "Admin".to_string(),
            role_id: Some(1),
        },
    ))
}

#[tokio::test]
async fn get_sends_bearer_token_and_query() {
    let addr = spawn_backend().await;
    let api = client(addr, signed_in());

    let value = api
        .get("echo", &[("semester", "2024-1"), ("status", "PAID")])
        .await
        .expect("get");

    assert_eq!(value["auth"], json!("Bearer secret-token"));
    assert_eq!(value["params"], json!({ "semester": "2024-1", "status": "PAID" }));
}

#[tokio::test]
async fn anonymous_session_sends_no_token() {
    let addr = spawn_backend().await;
    let session = signed_in();
    session.clear();
    let api = client(addr, session);

    let value = api.get("/echo", &[]).await.expect("get");

    assert_eq!(value["auth"], Value::Null);
}

#[tokio::test]
async fn list_decodes_into_entities() {
    let addr = spawn_backend().await;
    let api = client(addr, signed_in());

    let classes: Vec<ClassEntity> = api::fetch_list(&api, "classes", &[]).await.expect("list");

    assert_eq!(classes.len(), 1);
    assert_eq!(classes[0].year, "2023");

    let empty: Vec<ClassEntity> = api::fetch_list(&api, "empty", &[]).await.expect("empty");
    assert!(empty.is_empty());
}

#[tokio::test]
async fn writes_return_plain_text_acknowledgement() {
    let addr = spawn_backend().await;
    let api = client(addr, signed_in());

    let ack = api
        .post("classes", &[], Some(&json!({ "name": "CNTT02", "year": "2024" })))
        .await
        .expect("post");
    assert_eq!(ack, "Created CNTT02");

    assert_eq!(api.delete("classes/3").await.expect("delete"), "Deleted");
}

#[tokio::test]
async fn non_success_status_becomes_error() {
    let addr = spawn_backend().await;
    let api = client(addr, signed_in());

    let err = api.delete("classes/404").await.expect_err("should fail");

    match err {
        AppError::Status { status, body } => {
            assert_eq!(status.as_u16(), 404);
            assert_eq!(body, "Class not found");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(
        api.get("missing", &[]).await.expect_err("missing").user_message(),
        "404 - Not Found"
    );
}
