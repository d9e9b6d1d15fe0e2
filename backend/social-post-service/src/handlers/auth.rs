/// Auth handlers - public registration and login endpoints
use crate::error::Result;
use crate::services::AuthService;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 100, message = "must be between 1 and 100 characters"))]
    pub name: String,
    #[validate(
        email(message = "must be a valid email address"),
        length(max = 255, message = "must be at most 255 characters")
    )]
    pub email: String,
    #[validate(length(min = 8, max = 128, message = "must be between 8 and 128 characters"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "is required"))]
    pub password: String,
}

pub async fn register(
    auth: web::Data<AuthService>,
    req: web::Json<RegisterRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    let user = auth.register(&req.name, &req.email, &req.password).await?;
    Ok(HttpResponse::Ok().json(user))
}

pub async fn login(
    auth: web::Data<AuthService>,
    req: web::Json<LoginRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    let login = auth.login(&req.email, &req.password).await?;
    Ok(HttpResponse::Ok().json(login))
}
