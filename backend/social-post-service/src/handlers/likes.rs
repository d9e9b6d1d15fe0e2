use crate::error::Result;
use crate::middleware::AuthenticatedUser;
use crate::services::LikeService;
use actix_web::{web, HttpResponse};
use uuid::Uuid;

pub async fn list_likes(
    likes: web::Data<LikeService>,
    _user: AuthenticatedUser,
    post_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let likers = likes.list_likers(post_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(likers))
}

pub async fn like_post(
    likes: web::Data<LikeService>,
    user: AuthenticatedUser,
    post_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let post = likes.like_post(user.user_id, post_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(post))
}

pub async fn unlike_post(
    likes: web::Data<LikeService>,
    user: AuthenticatedUser,
    post_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let post = likes.unlike_post(user.user_id, post_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(post))
}
