/// Authentication and ownership rules over HTTP
mod common;

use actix_web::http::{Method, StatusCode};
use chrono::Utc;
use common::{create_post, init_app, send, sign_up, signer, TEST_SECRET};
use crypto_core::{Claims, TokenSigner};
use serde_json::json;
use uuid::Uuid;

#[actix_web::test]
async fn test_unauthenticated_requests_rejected_without_mutation() {
    let app = init_app().await;
    let token = sign_up(&app, "Olga").await;
    let mary = sign_up(&app, "Mary").await;
    let post_id = create_post(&app, &token, "Hello").await;

    let (status, comment) = send(
        &app,
        Method::POST,
        &format!("/api/posts/{}/comments", post_id),
        Some(&mary),
        Some(json!({"content": "nice"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let comment_uri = format!("/api/comments/{}", comment["id"].as_str().unwrap());

    let (status, _) = send(
        &app,
        Method::POST,
        &format!("/api/posts/{}/likes", post_id),
        Some(&mary),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let attempts = [
        (Method::GET, "/api/posts".to_string(), None),
        (
            Method::POST,
            "/api/posts".to_string(),
            Some(json!({"title": "t", "content": "c"})),
        ),
        (
            Method::PUT,
            format!("/api/posts/{}", post_id),
            Some(json!({"content": "hijacked"})),
        ),
        (Method::DELETE, format!("/api/posts/{}", post_id), None),
        (
            Method::POST,
            format!("/api/posts/{}/comments", post_id),
            Some(json!({"content": "hi"})),
        ),
        (Method::GET, format!("/api/posts/{}", post_id), None),
        (Method::GET, format!("/api/posts/{}/comments", post_id), None),
        (Method::GET, comment_uri.clone(), None),
        (
            Method::PUT,
            comment_uri.clone(),
            Some(json!({"content": "hijacked"})),
        ),
        (Method::DELETE, comment_uri.clone(), None),
        (Method::POST, format!("/api/posts/{}/likes", post_id), None),
        (Method::GET, format!("/api/posts/{}/likes", post_id), None),
        (Method::DELETE, format!("/api/posts/{}/likes", post_id), None),
    ];

    for (method, uri, body) in attempts {
        let (status, error) = send(&app, method.clone(), &uri, None, body).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{} {}", method, uri);
        assert_eq!(error["status"], 401);
    }

    let (_, feed) = send(&app, Method::GET, "/api/posts", Some(&token), None).await;
    let feed = feed.as_array().unwrap();
    assert_eq!(feed.len(), 1);
    assert_eq!(feed[0]["content"], "Hello content");
    assert_eq!(feed[0]["comments"].as_array().unwrap().len(), 1);
    assert_eq!(feed[0]["comments"][0]["content"], "nice");
    assert_eq!(feed[0]["like_count"], 1);
}

#[actix_web::test]
async fn test_malformed_authorization_headers() {
    let app = init_app().await;

    for header in ["Bearer", "Bearer ", "Token abc", "Bearerabc", "bearer not.a.jwt"] {
        let req = actix_web::test::TestRequest::get()
            .uri("/api/posts")
            .insert_header(("Authorization", header))
            .to_request();
        let result = actix_web::test::try_call_service(&app, req).await;
        let status = match result {
            Ok(resp) => resp.status(),
            Err(err) => err.as_response_error().status_code(),
        };
        assert_eq!(status, StatusCode::UNAUTHORIZED, "header {:?}", header);
    }
}

#[actix_web::test]
async fn test_lowercase_bearer_scheme_accepted() {
    let app = init_app().await;
    let token = sign_up(&app, "Olga").await;

    let req = actix_web::test::TestRequest::get()
        .uri("/api/posts")
        .insert_header(("Authorization", format!("bearer {}", token)))
        .to_request();
    let resp = actix_web::test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_expired_token_rejected() {
    let app = init_app().await;
    sign_up(&app, "Olga").await;

    let now = Utc::now().timestamp();
    let expired = signer()
        .encode_claims(&Claims {
            sub: Uuid::new_v4().to_string(),
            email: "olga@email.com".to_string(),
            iat: now - 7200,
            exp: now - 3600,
        })
        .unwrap();

    let (status, body) = send(&app, Method::GET, "/api/posts", Some(&expired), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "token expired");
}

#[actix_web::test]
async fn test_wrongly_signed_token_rejected() {
    let app = init_app().await;
    assert_ne!(TEST_SECRET, "another-secret-that-is-also-32-bytes-long");

    let forged = TokenSigner::new("another-secret-that-is-also-32-bytes-long", 3600)
        .unwrap()
        .issue(Uuid::new_v4(), "forger@email.com")
        .unwrap();

    let (status, body) = send(&app, Method::GET, "/api/posts", Some(&forged), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "invalid token");
}

#[actix_web::test]
async fn test_token_for_unknown_user_cannot_write() {
    let app = init_app().await;
    let ghost = signer().issue(Uuid::new_v4(), "ghost@email.com").unwrap();

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/posts",
        Some(&ghost),
        Some(json!({"title": "boo", "content": "boo"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_only_author_edits_or_deletes_post() {
    let app = init_app().await;
    let olga = sign_up(&app, "Olga").await;
    let mary = sign_up(&app, "Mary").await;
    let post_id = create_post(&app, &olga, "Mine").await;
    let uri = format!("/api/posts/{}", post_id);

    let (status, body) = send(
        &app,
        Method::PUT,
        &uri,
        Some(&mary),
        Some(json!({"content": "not yours"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "unauthorized");

    let (status, _) = send(&app, Method::DELETE, &uri, Some(&mary), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, updated) = send(
        &app,
        Method::PUT,
        &uri,
        Some(&olga),
        Some(json!({"content": "edited"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["content"], "edited");
    assert_eq!(updated["title"], "Mine");

    let (status, _) = send(&app, Method::DELETE, &uri, Some(&olga), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, Method::GET, &uri, Some(&olga), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_author_cannot_comment_on_own_post() {
    let app = init_app().await;
    let olga = sign_up(&app, "Olga").await;
    let post_id = create_post(&app, &olga, "Mine").await;

    let (status, _) = send(
        &app,
        Method::POST,
        &format!("/api/posts/{}/comments", post_id),
        Some(&olga),
        Some(json!({"content": "talking to myself"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (_, post) = send(
        &app,
        Method::GET,
        &format!("/api/posts/{}", post_id),
        Some(&olga),
        None,
    )
    .await;
    assert_eq!(post["comments"], json!([]));
}

#[actix_web::test]
async fn test_only_comment_author_edits_or_deletes_comment() {
    let app = init_app().await;
    let olga = sign_up(&app, "Olga").await;
    let mary = sign_up(&app, "Mary").await;
    let post_id = create_post(&app, &olga, "Mine").await;

    let (_, comment) = send(
        &app,
        Method::POST,
        &format!("/api/posts/{}/comments", post_id),
        Some(&mary),
        Some(json!({"content": "nice post"})),
    )
    .await;
    let uri = format!("/api/comments/{}", comment["id"].as_str().unwrap());

    // the post's author does not own the comment
    let (status, _) = send(
        &app,
        Method::PUT,
        &uri,
        Some(&olga),
        Some(json!({"content": "rewritten"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, Method::DELETE, &uri, Some(&olga), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, edited) = send(
        &app,
        Method::PUT,
        &uri,
        Some(&mary),
        Some(json!({"content": "very nice post"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(edited["content"], "very nice post");
    assert_eq!(edited["author"]["name"], "Mary");
}
