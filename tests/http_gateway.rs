use std::collections::HashMap;
use std::path::{Path, PathBuf};

use axum::extract::Query;
use axum::http::{HeaderMap, StatusCode, header};
use axum::routing::{get, post};
use axum::{Json, Router};
use quiz_client::auth::{AuthContext, SessionStore};
use quiz_client::config::Config;
use quiz_client::error::ApiError;
use quiz_client::gateway::Gateway;
use quiz_client::models::QuizId;
use quiz_client::session::Submission;
use serde_json::{Value, json};

const TOKEN: &str = "jwt-integration";

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        == Some(&format!("Bearer {}", TOKEN))
}

fn is_multipart(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("multipart/form-data"))
}

async fn login(headers: HeaderMap) -> (StatusCode, Json<Value>) {
    if !is_multipart(&headers) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "expected form data"})),
        );
    }
    (
        StatusCode::OK,
        Json(json!({"status": "success", "token": TOKEN, "message": "Welcome, tester!"})),
    )
}

async fn themes(headers: HeaderMap) -> (StatusCode, Json<Value>) {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!({"error": "no token"})));
    }
    (StatusCode::OK, Json(json!({"themes": ["General", "Sports"]})))
}

async fn profile(headers: HeaderMap) -> (StatusCode, Json<Value>) {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!({"error": "no token"})));
    }
    (
        StatusCode::OK,
        Json(json!({"first_name": "Test", "last_name": "User", "bio": null})),
    )
}

async fn theme_leaderboard(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    let theme = params.get("theme").cloned().unwrap_or_default();
    Json(json!({"leaderboard": [{"username": theme, "total_score": 7}]}))
}

async fn expired() -> (StatusCode, Json<Value>) {
    (StatusCode::UNAUTHORIZED, Json(json!({"error": "Token has expired"})))
}

async fn broken() -> (StatusCode, Json<Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"error": "database unavailable"})),
    )
}

async fn spawn_app() -> String {
    // Only POST is routed for themes so the GET variants get 405.
    let app = Router::new()
        .route("/login", post(login))
        .route("/get_all_themes", post(themes))
        .route("/view_profile", get(profile))
        .route("/leaderboard_theme", get(theme_leaderboard))
        .route("/recent_quizzes", get(expired))
        .route("/submit_quiz", post(broken));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    address
}

fn session_file() -> PathBuf {
    std::env::temp_dir().join(format!("quiz-session-{}.json", uuid::Uuid::new_v4()))
}

fn gateway_for(address: &str, session_file: &Path) -> Gateway {
    let config = Config::from_lookup(|key| match key {
        "QUIZ_API_BASE_URL" => Some(format!("{}/", address)),
        _ => None,
    })
    .unwrap();
    let auth = AuthContext::init(SessionStore::at(session_file));
    Gateway::from_config(&config, auth).unwrap()
}

#[tokio::test]
async fn test_login_then_authenticated_calls() {
    let address = spawn_app().await;
    let path = session_file();
    let gateway = gateway_for(&address, &path);

    let session = gateway.login("tester@example.com", "secret").await.unwrap();
    assert_eq!(session.username, "tester");
    assert!(path.exists());

    let profile = gateway.fetch_profile().await.unwrap();
    assert_eq!(profile.first_name, "Test");
    assert_eq!(profile.username, "tester");
    assert_eq!(profile.bio, "");

    // A fresh context restores the session from disk.
    let restored = gateway_for(&address, &path);
    assert_eq!(restored.auth().token().await.as_deref(), Some(TOKEN));

    let _ = std::fs::remove_file(&path);
}

#[tokio::test]
async fn test_themes_fall_back_to_post_variant() {
    let address = spawn_app().await;
    let path = session_file();
    let gateway = gateway_for(&address, &path);
    gateway.login("tester@example.com", "secret").await.unwrap();

    let themes = gateway.fetch_all_themes().await.unwrap();

    assert_eq!(themes, vec!["general", "sports"]);
    let _ = std::fs::remove_file(&path);
}

#[tokio::test]
async fn test_theme_leaderboard_sent_as_query() {
    let address = spawn_app().await;
    let path = session_file();
    let gateway = gateway_for(&address, &path);

    let entries = gateway.fetch_theme_leaderboard("history").await.unwrap();

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].username, "history");
    assert_eq!(entries[0].score, 7);
}

#[tokio::test]
async fn test_expired_token_clears_session_file() {
    let address = spawn_app().await;
    let path = session_file();
    let gateway = gateway_for(&address, &path);
    gateway.login("tester@example.com", "secret").await.unwrap();
    assert!(path.exists());

    let err = gateway.fetch_recent_quizzes().await.unwrap_err();

    assert!(err.is_unauthorized());
    assert!(!gateway.auth().is_authenticated().await);
    assert!(!path.exists());
}

#[tokio::test]
async fn test_submit_server_error_is_reported() {
    let address = spawn_app().await;
    let path = session_file();
    let gateway = gateway_for(&address, &path);
    let submission = Submission {
        quiz_id: QuizId::Bank(42),
        theme: "history".into(),
        responses: ["A", "C", "B", "A", "D"].iter().map(|r| r.to_string()).collect(),
        start_time: "12:00:00".into(),
        end_time: "12:02:30".into(),
    };

    let err = gateway.submit_quiz(&submission).await.unwrap_err();

    assert_eq!(
        err,
        ApiError::ServerError {
            status: 500,
            message: "database unavailable".into()
        }
    );
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_unreachable_backend() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);
    let path = session_file();
    let gateway = gateway_for(&address, &path);

    let err = gateway.fetch_daily_leaderboard().await.unwrap_err();

    assert!(matches!(err, ApiError::NetworkUnreachable(_)));
}
