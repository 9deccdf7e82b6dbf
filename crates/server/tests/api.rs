use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use chrono::{Duration, Utc};
use http_body_util::BodyExt;
use sea_orm::Database;
use serde_json::{Value, json};
use tower::ServiceExt;

use engine::{Engine, Money};
use migration::MigratorTrait;
use server::{ServerState, router};

struct TestApp {
    router: Router,
    engine: Arc<Engine>,
    token: String,
    wallet_a: i32,
    wallet_b: i32,
}

async fn app() -> TestApp {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder().database(db).build().await.unwrap();

    let alice = engine.new_user("alice", "password").await.unwrap();
    let token = engine
        .issue_token("alice", Duration::hours(1), Utc::now())
        .await
        .unwrap();
    let wallet_a = engine
        .new_wallet(alice, "A", "#ff0000", Money::new(10_000))
        .await
        .unwrap();
    let wallet_b = engine
        .new_wallet(alice, "B", "#0000ff", Money::new(5_000))
        .await
        .unwrap();

    let engine = Arc::new(engine);
    let router = router(ServerState {
        engine: engine.clone(),
    });
    TestApp {
        router,
        engine,
        token,
        wallet_a,
        wallet_b,
    }
}

async fn send(
    app: &TestApp,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn requests_without_token_need_login() {
    let app = app().await;

    let (status, body) = send(&app, "GET", "/transaction/list", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 100);

    let (status, body) = send(&app, "GET", "/transaction/list", Some("nope"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 105);
}

#[tokio::test]
async fn expired_session_is_rejected() {
    let app = app().await;
    let stale = app
        .engine
        .issue_token("alice", Duration::hours(-1), Utc::now())
        .await
        .unwrap();

    let (status, body) = send(&app, "GET", "/wallet/list", Some(&stale), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 106);
}

#[tokio::test]
async fn bare_token_is_accepted() {
    let app = app().await;
    let request = Request::builder()
        .uri("/wallet/list")
        .header(header::AUTHORIZATION, app.token.as_str())
        .body(Body::empty())
        .unwrap();

    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn transfer_round_trip_over_http() {
    let app = app().await;
    let token = Some(app.token.as_str());

    let (status, body) = send(
        &app,
        "POST",
        "/transaction/new",
        token,
        Some(json!({
            "description": "savings",
            "date": "2024-03-01T10:00:00.000Z",
            "value": 30,
            "wallet": app.wallet_a,
            "walletDestination": app.wallet_b,
            "typeId": 1
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let source_id = body["id"].as_i64().unwrap();

    let (status, source) = send(
        &app,
        "GET",
        &format!("/transaction/get/{source_id}"),
        token,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(source["value"], "-30.00");
    assert_eq!(source["date"], "2024-03-01");
    let target_id = source["transactionDestinationId"].as_i64().unwrap();

    let (_, target) = send(
        &app,
        "GET",
        &format!("/transaction/get/{target_id}"),
        token,
        None,
    )
    .await;
    assert_eq!(target["value"], "30.00");
    assert_eq!(target["transactionDestinationId"], source_id);

    let (status, rows) = send(&app, "GET", "/transaction/list?sort=value:desc", token, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(rows[0]["value"], "30.00");
    assert_eq!(rows[0]["wallet"], "B");
    assert_eq!(rows[0]["type"], "Exchange");

    let (status, graph) = send(&app, "GET", "/transaction/graph", token, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(graph[0]["id"], "A");
    assert_eq!(graph[0]["data"][0]["x"], "2024-03-01");
    assert_eq!(graph[0]["data"][0]["y"], "70.00");
    assert_eq!(graph[1]["data"][0]["y"], "80.00");

    let (status, _) = send(
        &app,
        "GET",
        &format!("/transaction/delete/{source_id}"),
        token,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, target) = send(
        &app,
        "GET",
        &format!("/transaction/get/{target_id}"),
        token,
        None,
    )
    .await;
    assert_eq!(target["transactionDestinationId"], source_id);
}

#[tokio::test]
async fn edit_and_validation_errors() {
    let app = app().await;
    let token = Some(app.token.as_str());

    let (status, body) = send(
        &app,
        "POST",
        "/transaction/new",
        token,
        Some(json!({
            "description": "lunch",
            "date": "2024-03-01T12:00:00.000+01",
            "value": "-8,40",
            "wallet": app.wallet_a,
            "typeId": 3
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let id = body["id"].as_i64().unwrap();

    let (status, _) = send(
        &app,
        "POST",
        &format!("/transaction/edit/{id}"),
        token,
        Some(json!({
            "description": "dinner",
            "date": "2024-03-02T20:00:00.000Z",
            "value": "-12",
            "wallet": app.wallet_a,
            "typeId": 3
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, tx) = send(&app, "GET", &format!("/transaction/get/{id}"), token, None).await;
    assert_eq!(tx["description"], "dinner");
    assert_eq!(tx["value"], "-12.00");

    let (status, body) = send(
        &app,
        "POST",
        "/transaction/new",
        token,
        Some(json!({ "date": "2024-03-01", "wallet": app.wallet_a, "typeId": 3 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 1);

    let (status, body) = send(&app, "GET", "/transaction/list?sort=color", token, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 2);

    let (status, body) = send(&app, "GET", "/transaction/get/9999", token, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 107);
}

#[tokio::test]
async fn wallets_over_http() {
    let app = app().await;
    let token = Some(app.token.as_str());

    let (status, body) = send(
        &app,
        "POST",
        "/wallet/new",
        token,
        Some(json!({ "name": "Savings", "color": "#00ff00", "value": "12.5" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(body["id"].as_i64().is_some());

    let (status, body) = send(
        &app,
        "POST",
        "/wallet/new",
        token,
        Some(json!({ "name": "Savings", "color": "#00ff00" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 3);

    let (_, wallets) = send(&app, "GET", "/wallet/list", token, None).await;
    let names: Vec<&str> = wallets
        .as_array()
        .unwrap()
        .iter()
        .map(|w| w["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["A", "B", "Savings"]);
    assert_eq!(wallets[2]["value"], "12.50");
}

#[tokio::test]
async fn unreadable_requests_answer_with_the_error_body() {
    let app = app().await;
    let token = Some(app.token.as_str());

    let (status, body) = send(&app, "GET", "/transaction/get/abc", token, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 2);
    assert!(body["message"].is_string());

    let (status, body) = send(
        &app,
        "POST",
        "/transaction/new",
        token,
        Some(json!({
            "date": "2024-03-01",
            "value": "-5",
            "wallet": "x",
            "typeId": 3
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 2);

    let (status, body) = send(
        &app,
        "POST",
        "/wallet/new",
        token,
        Some(json!({ "color": "#00ff00" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 1);

    let request = Request::builder()
        .method("POST")
        .uri("/wallet/new")
        .header(header::AUTHORIZATION, format!("Bearer {}", app.token))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"name\":"))
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["code"], 2);
}
