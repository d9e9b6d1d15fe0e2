/// Error types for the social-post service
///
/// Every handler, service and store call returns `AppError`. It renders as
/// `{"error": <message>, "status": <code>}` so clients always get a JSON body,
/// including for authentication failures raised by the middleware.
use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use thiserror::Error;

/// Result type for social-post-service operations
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error types
#[derive(Debug, Error)]
pub enum AppError {
    /// Request body or field failed validation
    #[error("{0}")]
    Validation(String),

    /// Repeated action that may only happen once (second like, taken email)
    #[error("{0}")]
    Duplicate(String),

    /// Missing/invalid credentials, or an actor not allowed to do this
    #[error("{0}")]
    Unauthorized(String),

    /// Resource not found
    #[error("{0}")]
    NotFound(String),

    /// Store operation failed
    #[error("Database error: {0}")]
    Database(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn unauthorized(msg: impl Into<String>) -> Self {
        AppError::Unauthorized(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        AppError::NotFound(msg.into())
    }

    fn is_server_error(&self) -> bool {
        matches!(self, AppError::Database(_) | AppError::Internal(_))
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::Duplicate(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        let message = if self.is_server_error() {
            tracing::error!(error = %self, "request failed");
            "internal server error".to_string()
        } else {
            self.to_string()
        };

        HttpResponse::build(status).json(serde_json::json!({
            "error": message,
            "status": status.as_u16(),
        }))
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Database(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<String> = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| {
                let reason = errs
                    .first()
                    .and_then(|e| e.message.as_ref())
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "is invalid".to_string());
                format!("{} {}", field, reason)
            })
            .collect();
        fields.sort();

        AppError::Validation(fields.join(", "))
    }
}

impl From<crypto_core::JwtError> for AppError {
    fn from(err: crypto_core::JwtError) -> Self {
        match err {
            crypto_core::JwtError::Signing(msg) => AppError::Internal(msg),
            crypto_core::JwtError::WeakSecret(len) => {
                AppError::Internal(format!("JWT secret too short ({} bytes)", len))
            }
            crypto_core::JwtError::Expired => AppError::unauthorized("token expired"),
            crypto_core::JwtError::Invalid(_) | crypto_core::JwtError::MalformedSubject => {
                AppError::unauthorized("invalid token")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::Validation("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Duplicate("already liked".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::unauthorized("unauthorized").status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::not_found("post not found").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Database("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[actix_web::test]
    async fn test_error_body_is_json() {
        let resp = AppError::Duplicate("already liked".into()).error_response();
        let body = to_bytes(resp.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(json["error"], "already liked");
        assert_eq!(json["status"], 400);
    }

    #[actix_web::test]
    async fn test_server_error_hides_details() {
        let resp = AppError::Database("relation \"posts\" does not exist".into()).error_response();
        let body = to_bytes(resp.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(json["error"], "internal server error");
    }

    #[test]
    fn test_jwt_errors_map_to_unauthorized() {
        let err: AppError = crypto_core::JwtError::Expired.into();
        assert!(matches!(err, AppError::Unauthorized(_)));

        let err: AppError = crypto_core::JwtError::Invalid("bad signature".into()).into();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }
}
