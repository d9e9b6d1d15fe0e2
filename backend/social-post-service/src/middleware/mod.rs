/// HTTP middleware for social-post-service
///
/// `JwtAuthMiddleware` guards every protected scope. On success it stores an
/// `AuthenticatedUser` in the request extensions; handlers pull it back out
/// with the `AuthenticatedUser` extractor. Failures are `AppError::Unauthorized`
/// so the client always gets the JSON error body.
pub mod permissions;

pub use permissions::*;

use crate::error::AppError;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};
use crypto_core::TokenSigner;
use futures::future::LocalBoxFuture;
use std::future::{ready, Ready};
use std::rc::Rc;
use std::sync::Arc;
use uuid::Uuid;

/// Identity decoded from a valid bearer token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub email: String,
}

/// Pull the token out of an `Authorization: Bearer <token>` header
fn bearer_token(req: &ServiceRequest) -> Result<String, AppError> {
    let header = req
        .headers()
        .get("Authorization")
        .ok_or_else(|| AppError::unauthorized("missing authorization header"))?;

    let value = header
        .to_str()
        .map_err(|_| AppError::unauthorized("invalid authorization header"))?;

    // the scheme name is case-insensitive (RFC 7235)
    let token = value
        .split_once(' ')
        .filter(|(scheme, _)| scheme.eq_ignore_ascii_case("Bearer"))
        .map(|(_, token)| token.trim())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::unauthorized("authorization must use Bearer scheme"))?;

    Ok(token.to_string())
}

/// Actix middleware that validates a Bearer token with the shared signer
#[derive(Clone)]
pub struct JwtAuthMiddleware {
    signer: Arc<TokenSigner>,
}

impl JwtAuthMiddleware {
    pub fn new(signer: Arc<TokenSigner>) -> Self {
        Self { signer }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddlewareService {
            service: Rc::new(service),
            signer: self.signer.clone(),
        }))
    }
}

pub struct JwtAuthMiddlewareService<S> {
    service: Rc<S>,
    signer: Arc<TokenSigner>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let signer = self.signer.clone();

        Box::pin(async move {
            let token = bearer_token(&req)?;

            let claims = signer.validate(&token).map_err(|e| {
                tracing::debug!(error = %e, path = %req.path(), "rejected bearer token");
                AppError::from(e)
            })?;
            let user_id = claims.user_id().map_err(AppError::from)?;

            req.extensions_mut().insert(AuthenticatedUser {
                user_id,
                email: claims.email,
            });

            service.call(req).await
        })
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<AuthenticatedUser>()
                .cloned()
                .ok_or_else(|| AppError::unauthorized("unauthorized")),
        )
    }
}
