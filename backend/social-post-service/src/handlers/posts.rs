/// Post handlers - HTTP endpoints for post operations
use crate::error::Result;
use crate::middleware::AuthenticatedUser;
use crate::services::{FeedPage, PostService};
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreatePostRequest {
    #[validate(length(min = 1, max = 200, message = "must be between 1 and 200 characters"))]
    pub title: String,
    #[validate(length(min = 1, max = 10000, message = "must be between 1 and 10000 characters"))]
    pub content: String,
}

/// Edit replaces the content; the title only when supplied
#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePostRequest {
    #[validate(length(min = 1, max = 200, message = "must be between 1 and 200 characters"))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 10000, message = "must be between 1 and 10000 characters"))]
    pub content: String,
}

/// Ranked feed: most liked first, oldest first among equals
pub async fn get_feed(
    posts: web::Data<PostService>,
    _user: AuthenticatedUser,
    page: web::Query<FeedPage>,
) -> Result<HttpResponse> {
    let feed = posts.list_feed(page.into_inner()).await?;
    Ok(HttpResponse::Ok().json(feed))
}

pub async fn create_post(
    posts: web::Data<PostService>,
    user: AuthenticatedUser,
    req: web::Json<CreatePostRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    let post = posts
        .create_post(user.user_id, &req.title, &req.content)
        .await?;
    Ok(HttpResponse::Ok().json(post))
}

pub async fn get_post(
    posts: web::Data<PostService>,
    _user: AuthenticatedUser,
    post_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let post = posts.get_post(post_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(post))
}

pub async fn update_post(
    posts: web::Data<PostService>,
    user: AuthenticatedUser,
    post_id: web::Path<Uuid>,
    req: web::Json<UpdatePostRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    let post = posts
        .update_post(
            user.user_id,
            post_id.into_inner(),
            req.title.as_deref(),
            &req.content,
        )
        .await?;
    Ok(HttpResponse::Ok().json(post))
}

pub async fn delete_post(
    posts: web::Data<PostService>,
    user: AuthenticatedUser,
    post_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    posts.delete_post(user.user_id, post_id.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
