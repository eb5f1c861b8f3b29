//! Integration tests for the session store and the login redirect flow
//!
//! The store talks to an in-process stub backend; session state lives in a
//! `MemoryStore` unless a test needs it on disk.

use std::sync::{Arc, Mutex};

use api::{ClientError, HttpClient, LoginCredentials, User};
use auth::persisted::{LOGIN_REDIRECT_KEY, TOKEN_KEY, USER_KEY};
use auth::{LoginRedirect, Navigator, PersistedSession, SessionStore};
use common::{ClientConfig, FileStore, KeyValueStore, MemoryStore};
use serde_json::{Value, json};
use stub_backend::StubServer;
use tokio_test::{assert_err, assert_ok};

#[derive(Default)]
struct RecordingNavigator {
    visited: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    fn visited(&self) -> Vec<String> {
        self.visited.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, path: &str) {
        self.visited.lock().unwrap().push(path.to_string());
    }
}

struct Harness {
    server: StubServer,
    store: Arc<dyn KeyValueStore>,
    navigator: Arc<RecordingNavigator>,
    sessions: SessionStore,
    redirect: LoginRedirect,
}

async fn harness_with(store: Arc<dyn KeyValueStore>) -> Harness {
    let server = StubServer::start().await;
    let config = ClientConfig {
        base_url: server.base_url.clone(),
        ..ClientConfig::default()
    };

    let navigator = Arc::new(RecordingNavigator::default());
    let session = PersistedSession::new(store.clone());
    let http = HttpClient::new(&config, Arc::new(session.clone())).unwrap();
    let sessions = SessionStore::new(http, session.clone(), navigator.clone(), &config);
    let redirect = LoginRedirect::new(session, navigator.clone(), &config);

    Harness {
        server,
        store,
        navigator,
        sessions,
        redirect,
    }
}

async fn harness() -> Harness {
    harness_with(Arc::new(MemoryStore::new())).await
}

fn credentials() -> LoginCredentials {
    LoginCredentials {
        email: "ama@example.com".to_string(),
        password: "S3cret!pass".to_string(),
    }
}

fn login_response() -> serde_json::Value {
    json!({
        "token": "jwt-abc",
        "user": {
            "id": "64b7f",
            "name": "Ama Mensah",
            "email": "ama@example.com",
            "role": "donor",
            "bloodType": "O-"
        }
    })
}

#[tokio::test]
async fn test_login_persists_session() {
    let h = harness().await;
    h.server
        .respond("POST", "/api/auth/login", 200, &login_response().to_string());

    let response = assert_ok!(h.sessions.login(&credentials()).await);
    assert_eq!(response, login_response());

    let call = h.server.last_call();
    assert_eq!(call.uri, "/api/auth/login");
    assert_eq!(
        call.body,
        Some(json!({"email": "ama@example.com", "password": "S3cret!pass"}))
    );
    assert_eq!(call.authorization, None);

    assert!(h.sessions.is_authenticated());
    let expected: User = serde_json::from_value(login_response()["user"].clone()).unwrap();
    assert_eq!(h.sessions.get_current_user(), Some(expected));
    assert_eq!(
        serde_json::to_value(h.sessions.get_current_user().unwrap()).unwrap(),
        login_response()["user"]
    );
}

#[tokio::test]
async fn test_requests_after_login_carry_token() {
    let h = harness().await;
    h.server
        .respond("POST", "/api/auth/login", 200, &login_response().to_string());
    h.server.respond(
        "GET",
        "/api/auth/me",
        200,
        r#"{"user":{"id":"64b7f","name":"Ama M.","email":"ama@example.com"}}"#,
    );

    assert_ok!(h.sessions.login(&credentials()).await);
    let user = assert_ok!(h.sessions.fetch_current_user().await).unwrap();

    assert_eq!(user.name(), Some("Ama M."));
    assert_eq!(
        h.server.last_call().authorization.as_deref(),
        Some("Bearer jwt-abc")
    );
    assert_eq!(
        h.sessions.get_current_user().unwrap().name(),
        Some("Ama M.")
    );
}

#[tokio::test]
async fn test_login_keeps_user_object_verbatim() {
    let h = harness().await;
    let user = json!({
        "id": 42,
        "name": null,
        "email": "kofi@example.com",
        "role": null,
        "location": {"city": "Accra"}
    });
    h.server.respond(
        "POST",
        "/api/auth/login",
        200,
        &json!({"token": "jwt-abc", "user": user}).to_string(),
    );

    assert_ok!(h.sessions.login(&credentials()).await);

    let current = h.sessions.get_current_user().unwrap();
    assert_eq!(Value::from(current.clone()), user);
    assert_eq!(current.id(), Some(&json!(42)));
    assert_eq!(h.sessions.status().display_name.as_deref(), Some("User"));
}

#[tokio::test]
async fn test_fetch_current_user_accepts_any_user_object() {
    let h = harness().await;
    h.server.respond(
        "POST",
        "/api/auth/login",
        200,
        r#"{"token":"jwt-abc","user":{"_id":"64b7","name":"Kofi"}}"#,
    );
    h.server.respond(
        "GET",
        "/api/auth/me",
        200,
        r#"{"user":{"_id":"64b7","name":"Kofi Boateng","verified":true}}"#,
    );
    assert_ok!(h.sessions.login(&credentials()).await);
    assert_eq!(h.sessions.get_current_user().unwrap().id(), Some(&json!("64b7")));

    let user = assert_ok!(h.sessions.fetch_current_user().await).unwrap();
    let expected = json!({"_id": "64b7", "name": "Kofi Boateng", "verified": true});
    assert_eq!(Value::from(user), expected);
    assert_eq!(Value::from(h.sessions.get_current_user().unwrap()), expected);
}

#[tokio::test]
async fn test_register_persists_session() {
    let h = harness().await;
    h.server
        .respond("POST", "/api/auth/register", 201, &login_response().to_string());

    let data = json!({
        "name": "Ama Mensah",
        "email": "ama@example.com",
        "password": "S3cret!pass",
        "bloodType": "O-"
    });
    assert_ok!(h.sessions.register(&data).await);

    assert_eq!(h.server.last_call().body, Some(data));
    assert_eq!(
        h.store.get(TOKEN_KEY).unwrap(),
        Some("jwt-abc".to_string())
    );
    assert!(h.store.contains(USER_KEY).unwrap());
}

#[tokio::test]
async fn test_login_failure_is_generic_and_leaves_session_empty() {
    let h = harness().await;
    h.server.respond(
        "POST",
        "/api/auth/login",
        401,
        r#"{"message":"Invalid credentials"}"#,
    );

    let err = assert_err!(h.sessions.login(&credentials()).await);
    assert!(matches!(err, ClientError::Auth(_)));
    assert_eq!(
        err.to_string(),
        "Login failed. Please check your credentials and try again."
    );
    assert!(!h.sessions.is_authenticated());
    assert_eq!(h.sessions.get_current_user(), None);
}

#[tokio::test]
async fn test_register_failure_is_generic() {
    let h = harness().await;
    h.server.respond(
        "POST",
        "/api/auth/register",
        409,
        r#"{"message":"Email already registered"}"#,
    );

    let err = assert_err!(h.sessions.register(&json!({"email": "ama@example.com"})).await);
    assert_eq!(
        err.to_string(),
        "Registration failed. Please try again later."
    );
}

#[tokio::test]
async fn test_response_without_token_does_not_start_session() {
    let h = harness().await;
    h.server.respond(
        "POST",
        "/api/auth/register",
        200,
        r#"{"message":"Check your inbox to verify your email"}"#,
    );

    let response = assert_ok!(h.sessions.register(&json!({"email": "ama@example.com"})).await);
    assert_eq!(response["message"], "Check your inbox to verify your email");
    assert!(!h.sessions.is_authenticated());
}

#[tokio::test]
async fn test_token_without_user_is_not_saved() {
    let h = harness().await;
    h.server
        .respond("POST", "/api/auth/login", 200, r#"{"token":"jwt-abc"}"#);

    assert_ok!(h.sessions.login(&credentials()).await);
    assert!(!h.store.contains(TOKEN_KEY).unwrap());
    assert!(!h.store.contains(USER_KEY).unwrap());
}

#[tokio::test]
async fn test_logout_clears_session_and_goes_home() {
    let h = harness().await;
    h.server
        .respond("POST", "/api/auth/login", 200, &login_response().to_string());
    assert_ok!(h.sessions.login(&credentials()).await);

    h.sessions.logout();

    assert!(!h.sessions.is_authenticated());
    assert_eq!(h.sessions.get_current_user(), None);
    assert_eq!(h.navigator.visited(), vec!["/index.html"]);
}

#[tokio::test]
async fn test_fetch_current_user_when_anonymous_makes_no_call() {
    let h = harness().await;

    let user = assert_ok!(h.sessions.fetch_current_user().await);
    assert_eq!(user, None);
    assert!(h.server.calls().is_empty());
}

#[tokio::test]
async fn test_unauthorized_fetch_logs_out() {
    let h = harness().await;
    h.server
        .respond("POST", "/api/auth/login", 200, &login_response().to_string());
    h.server
        .respond("GET", "/api/auth/me", 401, r#"{"message":"unauthorized"}"#);
    assert_ok!(h.sessions.login(&credentials()).await);

    let err = assert_err!(h.sessions.fetch_current_user().await);
    assert_eq!(
        err.to_string(),
        "Failed to fetch current user. Please try again later."
    );

    assert!(!h.store.contains(TOKEN_KEY).unwrap());
    assert!(!h.store.contains(USER_KEY).unwrap());
    assert_eq!(h.navigator.visited(), vec!["/index.html"]);
}

#[tokio::test]
async fn test_other_fetch_failures_keep_session() {
    let h = harness().await;
    h.server
        .respond("POST", "/api/auth/login", 200, &login_response().to_string());
    h.server
        .respond("GET", "/api/auth/me", 503, r#"{"message":"Maintenance"}"#);
    assert_ok!(h.sessions.login(&credentials()).await);

    assert_err!(h.sessions.fetch_current_user().await);

    assert!(h.sessions.is_authenticated());
    assert!(h.navigator.visited().is_empty());
}

#[tokio::test]
async fn test_forgot_password() {
    let h = harness().await;
    h.server.respond(
        "POST",
        "/api/auth/forgot-password",
        200,
        r#"{"message":"Reset email sent"}"#,
    );

    let response = assert_ok!(h.sessions.forgot_password("ama@example.com").await);
    assert_eq!(response, json!({"message": "Reset email sent"}));
    assert_eq!(
        h.server.last_call().body,
        Some(json!({"email": "ama@example.com"}))
    );

    h.server.respond(
        "POST",
        "/api/auth/forgot-password",
        404,
        r#"{"message":"No account with that email"}"#,
    );
    let err = assert_err!(h.sessions.forgot_password("nobody@example.com").await);
    assert_eq!(
        err.to_string(),
        "Failed to send password reset email. Please try again later."
    );
}

#[tokio::test]
async fn test_status_display_name() {
    let h = harness().await;
    assert!(!h.sessions.status().authenticated);

    h.server.respond(
        "POST",
        "/api/auth/login",
        200,
        r#"{"token":"jwt-abc","user":{"id":"1","email":"anon@example.com"}}"#,
    );
    assert_ok!(h.sessions.login(&credentials()).await);

    let status = h.sessions.status();
    assert!(status.authenticated);
    assert_eq!(status.display_name.as_deref(), Some("User"));
}

#[tokio::test]
async fn test_require_auth_redirects_to_login() {
    let h = harness().await;

    assert!(!h.redirect.require_auth("/request-blood.html"));
    assert_eq!(
        h.navigator.visited(),
        vec!["/login.html?redirect=%2Frequest-blood.html"]
    );

    let remembered = h
        .redirect
        .remember_from_query("?redirect=%2Frequest-blood.html")
        .unwrap();
    assert_eq!(remembered.as_deref(), Some("/request-blood.html"));
    assert_eq!(
        h.store.get(LOGIN_REDIRECT_KEY).unwrap(),
        Some("/request-blood.html".to_string())
    );

    h.server
        .respond("POST", "/api/auth/login", 200, &login_response().to_string());
    assert_ok!(h.sessions.login(&credentials()).await);
    assert!(h.redirect.require_auth("/request-blood.html"));

    assert_eq!(h.redirect.redirect_after_login(), "/request-blood.html");
    assert_eq!(h.redirect.redirect_after_login(), "/index.html");
    assert_eq!(h.store.get(LOGIN_REDIRECT_KEY).unwrap(), None);
}

#[tokio::test]
async fn test_query_without_redirect_is_ignored() {
    let h = harness().await;

    assert_eq!(h.redirect.remember_from_query("tab=signup").unwrap(), None);
    assert!(!h.store.contains(LOGIN_REDIRECT_KEY).unwrap());
}

#[tokio::test]
async fn test_session_survives_reopening_file_store() {
    let dir = std::env::temp_dir().join(format!("lifeblood-{}", uuid::Uuid::new_v4()));
    let path = dir.join("session.json");

    let h = harness_with(Arc::new(FileStore::open(&path).unwrap())).await;
    h.server
        .respond("POST", "/api/auth/login", 200, &login_response().to_string());
    assert_ok!(h.sessions.login(&credentials()).await);
    drop(h);

    let reopened = PersistedSession::new(Arc::new(FileStore::open(&path).unwrap()));
    assert!(reopened.is_authenticated());
    assert_eq!(reopened.user().unwrap().email(), Some("ama@example.com"));

    std::fs::remove_dir_all(&dir).unwrap();
}
