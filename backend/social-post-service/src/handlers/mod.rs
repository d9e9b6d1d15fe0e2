/// HTTP handlers for social-post-service
///
/// - Auth: register, login (public)
/// - Posts: feed, create, read, edit, delete
/// - Comments: list and create under a post, read/edit/delete by id
/// - Likes: list, like, unlike
/// - Health: summary and liveness (public)
pub mod auth;
pub mod comments;
pub mod health;
pub mod likes;
pub mod posts;

use crate::db::DynStore;
use crate::error::AppError;
use crate::middleware::JwtAuthMiddleware;
use crate::services::{AuthService, CommentService, LikeService, PostService};
use actix_web::web;
use crypto_core::TokenSigner;
use std::sync::Arc;

/// Malformed JSON bodies surface as 400 with the JSON error body
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(64 * 1024)
        .error_handler(|err, _req| {
            AppError::Validation(format!("invalid request body: {}", err)).into()
        })
}

/// Path ids that are not UUIDs cannot name an existing resource
fn path_config() -> web::PathConfig {
    web::PathConfig::default()
        .error_handler(|_err, _req| AppError::not_found("resource not found").into())
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        AppError::Validation(format!("invalid query string: {}", err)).into()
    })
}

/// Register every route plus the shared services they depend on
pub fn register_routes(cfg: &mut web::ServiceConfig, store: DynStore, signer: Arc<TokenSigner>) {
    cfg.app_data(json_config())
        .app_data(path_config())
        .app_data(query_config())
        .app_data(web::Data::new(store.clone()))
        .app_data(web::Data::new(AuthService::new(store.clone(), signer.clone())))
        .app_data(web::Data::new(PostService::new(store.clone())))
        .app_data(web::Data::new(CommentService::new(store.clone())))
        .app_data(web::Data::new(LikeService::new(store)))
        .service(
            web::scope("/api/health")
                .route("", web::get().to(health::health_summary))
                .route("/live", web::get().to(health::liveness_check)),
        )
        .service(
            web::scope("/api/auth")
                .route("/register", web::post().to(auth::register))
                .route("/login", web::post().to(auth::login)),
        )
        .service(
            web::scope("/api")
                .wrap(JwtAuthMiddleware::new(signer))
                .service(
                    web::scope("/posts")
                        .service(
                            web::resource("")
                                .route(web::get().to(posts::get_feed))
                                .route(web::post().to(posts::create_post)),
                        )
                        .service(
                            web::resource("/{post_id}")
                                .route(web::get().to(posts::get_post))
                                .route(web::put().to(posts::update_post))
                                .route(web::delete().to(posts::delete_post)),
                        )
                        .service(
                            web::resource("/{post_id}/comments")
                                .route(web::get().to(comments::list_comments))
                                .route(web::post().to(comments::create_comment)),
                        )
                        .service(
                            web::resource("/{post_id}/likes")
                                .route(web::get().to(likes::list_likes))
                                .route(web::post().to(likes::like_post))
                                .route(web::delete().to(likes::unlike_post)),
                        ),
                )
                .service(
                    web::resource("/comments/{comment_id}")
                        .route(web::get().to(comments::get_comment))
                        .route(web::put().to(comments::update_comment))
                        .route(web::delete().to(comments::delete_comment)),
                ),
        );
}
