use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

/// Crate-wide error type covering the booking domain taxonomy plus the
/// boundary-layer failures (auth, validation, infrastructure).
#[derive(Debug)]
pub enum AppError {
    /// A referenced entity does not exist.
    NotFound(String),
    /// A field is malformed or out of range.
    InvalidInput(String),
    /// The operation is not valid for the entity's current lifecycle state.
    InvalidState(String),
    /// The session does not have enough available spots.
    CapacityExceeded(String),
    /// The booking belongs to a different user.
    OwnershipMismatch(String),
    /// The booking is not for the session being reviewed.
    SessionMismatch(String),
    /// An instructor attempted to review their own session.
    SelfReview(String),
    /// The booking already has a review attached.
    DuplicateReview(String),
    /// The referenced user does not hold the required role.
    InvalidRole(String),
    Unauthorized(String),
    Forbidden(String),
    Validation(Vec<String>),
    InternalServerError(anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message, code, details) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, "NOT_FOUND".to_string(), None),
            AppError::InvalidInput(msg) => (
                StatusCode::BAD_REQUEST,
                msg,
                "INVALID_INPUT".to_string(),
                None,
            ),
            AppError::InvalidState(msg) => {
                (StatusCode::CONFLICT, msg, "INVALID_STATE".to_string(), None)
            }
            AppError::CapacityExceeded(msg) => (
                StatusCode::CONFLICT,
                msg,
                "CAPACITY_EXCEEDED".to_string(),
                None,
            ),
            AppError::OwnershipMismatch(msg) => (
                StatusCode::FORBIDDEN,
                msg,
                "OWNERSHIP_MISMATCH".to_string(),
                None,
            ),
            AppError::SessionMismatch(msg) => (
                StatusCode::BAD_REQUEST,
                msg,
                "SESSION_MISMATCH".to_string(),
                None,
            ),
            AppError::SelfReview(msg) => {
                (StatusCode::FORBIDDEN, msg, "SELF_REVIEW".to_string(), None)
            }
            AppError::DuplicateReview(msg) => (
                StatusCode::CONFLICT,
                msg,
                "DUPLICATE_REVIEW".to_string(),
                None,
            ),
            AppError::InvalidRole(msg) => {
                (StatusCode::FORBIDDEN, msg, "INVALID_ROLE".to_string(), None)
            }
            AppError::Unauthorized(msg) => (
                StatusCode::UNAUTHORIZED,
                msg,
                "UNAUTHORIZED".to_string(),
                None,
            ),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg, "FORBIDDEN".to_string(), None),
            AppError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                "Validation failed".to_string(),
                "VALIDATION_ERROR".to_string(),
                Some(serde_json::json!({ "errors": errors })),
            ),
            AppError::InternalServerError(err) => {
                tracing::error!("Internal server error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    "INTERNAL_SERVER_ERROR".to_string(),
                    None,
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error_message,
            code,
            details,
        });

        (status, body).into_response()
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalServerError(err)
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => AppError::NotFound("Resource not found".to_string()),
            _ => AppError::InternalServerError(err.into()),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| {
                    let code = e.code.as_ref();
                    format!("{}: {}", field, code)
                })
            })
            .collect();
        AppError::Validation(messages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn response_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        serde_json::from_slice(&bytes).expect("json")
    }

    #[tokio::test]
    async fn app_error_into_response_maps_status_and_body() {
        let response = AppError::NotFound("missing".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = response_json(response).await;
        assert_eq!(json["error"], "missing");
        assert_eq!(json["code"], "NOT_FOUND");

        let response = AppError::InvalidInput("bad".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = response_json(response).await;
        assert_eq!(json["code"], "INVALID_INPUT");

        let response = AppError::InvalidState("terminal".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        let json = response_json(response).await;
        assert_eq!(json["code"], "INVALID_STATE");

        let response = AppError::CapacityExceeded("full".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        let json = response_json(response).await;
        assert_eq!(json["code"], "CAPACITY_EXCEEDED");

        let response = AppError::DuplicateReview("again".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        let json = response_json(response).await;
        assert_eq!(json["code"], "DUPLICATE_REVIEW");
    }

    #[tokio::test]
    async fn review_gate_errors_map_to_forbidden_or_bad_request() {
        let response = AppError::OwnershipMismatch("not yours".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let json = response_json(response).await;
        assert_eq!(json["code"], "OWNERSHIP_MISMATCH");

        let response = AppError::SelfReview("own session".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let json = response_json(response).await;
        assert_eq!(json["code"], "SELF_REVIEW");

        let response = AppError::SessionMismatch("other session".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = response_json(response).await;
        assert_eq!(json["code"], "SESSION_MISMATCH");

        let response = AppError::InvalidRole("not an instructor".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let json = response_json(response).await;
        assert_eq!(json["code"], "INVALID_ROLE");
    }

    #[tokio::test]
    async fn app_error_validation_includes_details() {
        let response = AppError::Validation(vec!["rating: range".to_string()]).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = response_json(response).await;
        assert_eq!(json["error"], "Validation failed");
        assert_eq!(json["code"], "VALIDATION_ERROR");
        assert_eq!(json["details"]["errors"][0], "rating: range");
    }

    #[tokio::test]
    async fn app_error_internal_maps_to_generic_message() {
        let response = AppError::InternalServerError(anyhow::anyhow!("boom")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = response_json(response).await;
        assert_eq!(json["error"], "Internal server error");
        assert!(json["details"].is_null());
    }

    #[test]
    fn sqlx_row_not_found_becomes_not_found() {
        let err: AppError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
