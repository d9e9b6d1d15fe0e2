//! Shared helpers for HTTP integration tests
//!
//! Every test gets a fresh `MemoryStore`, so tests never share state.
#![allow(dead_code)]

use actix_http::Request;
use actix_web::body::{to_bytes, MessageBody};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{Method, StatusCode};
use actix_web::{test, App};
use crypto_core::TokenSigner;
use serde_json::{json, Value};
use social_post_service::db::{DynStore, MemoryStore};
use social_post_service::register_routes;
use std::sync::Arc;

pub const TEST_SECRET: &str = "integration-test-secret-at-least-32-bytes";
pub const PASSWORD: &str = "password123";

pub fn signer() -> Arc<TokenSigner> {
    Arc::new(TokenSigner::new(TEST_SECRET, 3600).unwrap())
}

pub async fn init_app(
) -> impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error> {
    let store: DynStore = Arc::new(MemoryStore::new());
    let signer = signer();
    test::init_service(App::new().configure(move |cfg| register_routes(cfg, store, signer))).await
}

/// Send a request and return the status with the decoded JSON body
///
/// Middleware rejections come back as `Err` from the service; they are
/// rendered the same way the server would render them.
pub async fn send<S, B>(
    app: &S,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let mut req = test::TestRequest::default().method(method).uri(uri);
    if let Some(token) = token {
        req = req.insert_header(("Authorization", format!("Bearer {}", token)));
    }
    if let Some(body) = body {
        req = req.set_json(body);
    }

    match test::try_call_service(app, req.to_request()).await {
        Ok(resp) => {
            let status = resp.status();
            let bytes = test::read_body(resp).await;
            (status, parse_body(&bytes))
        }
        Err(err) => {
            let resp = err.error_response();
            let status = resp.status();
            let bytes = to_bytes(resp.into_body()).await.unwrap();
            (status, parse_body(&bytes))
        }
    }
}

fn parse_body(bytes: &[u8]) -> Value {
    if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
    }
}

pub fn email_for(name: &str) -> String {
    format!("{}@email.com", name.to_lowercase())
}

/// Register `name` and return the user id
pub async fn register<S, B>(app: &S, name: &str) -> String
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let (status, body) = send(
        app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({"name": name, "email": email_for(name), "password": PASSWORD})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "register failed: {}", body);
    body["id"].as_str().unwrap().to_string()
}

pub async fn login<S, B>(app: &S, name: &str) -> String
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let (status, body) = send(
        app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({"email": email_for(name), "password": PASSWORD})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {}", body);
    body["token"].as_str().unwrap().to_string()
}

/// Register then log in; returns the bearer token
pub async fn sign_up<S, B>(app: &S, name: &str) -> String
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    register(app, name).await;
    login(app, name).await
}

/// Create a post and return its id
pub async fn create_post<S, B>(app: &S, token: &str, title: &str) -> String
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let (status, body) = send(
        app,
        Method::POST,
        "/api/posts",
        Some(token),
        Some(json!({"title": title, "content": format!("{} content", title)})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "create post failed: {}", body);
    body["id"].as_str().unwrap().to_string()
}
