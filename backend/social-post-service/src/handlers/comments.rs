/// Comment handlers
use crate::error::Result;
use crate::middleware::AuthenticatedUser;
use crate::services::CommentService;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CommentRequest {
    #[validate(length(min = 1, max = 10000, message = "must be between 1 and 10000 characters"))]
    pub content: String,
}

pub async fn list_comments(
    comments: web::Data<CommentService>,
    _user: AuthenticatedUser,
    post_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let list = comments.list_comments(post_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(list))
}

pub async fn create_comment(
    comments: web::Data<CommentService>,
    user: AuthenticatedUser,
    post_id: web::Path<Uuid>,
    req: web::Json<CommentRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    let comment = comments
        .create_comment(user.user_id, post_id.into_inner(), &req.content)
        .await?;
    Ok(HttpResponse::Ok().json(comment))
}

pub async fn get_comment(
    comments: web::Data<CommentService>,
    _user: AuthenticatedUser,
    comment_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let comment = comments.get_comment(comment_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(comment))
}

pub async fn update_comment(
    comments: web::Data<CommentService>,
    user: AuthenticatedUser,
    comment_id: web::Path<Uuid>,
    req: web::Json<CommentRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    let comment = comments
        .update_comment(user.user_id, comment_id.into_inner(), &req.content)
        .await?;
    Ok(HttpResponse::Ok().json(comment))
}

pub async fn delete_comment(
    comments: web::Data<CommentService>,
    user: AuthenticatedUser,
    comment_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    comments
        .delete_comment(user.user_id, comment_id.into_inner())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}
