use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use bcrypt::BcryptError;
use jsonwebtoken::errors::Error as JwtError;
use log::warn;
use serde::Serialize;
use serde_json::Error as JsonError;
use sqlx::{Error as SqlxError, migrate::MigrateError};
use std::{error::Error as StdError, fmt, io::Error as IoError};

pub static SYSTEM_ERROR_CODE: i64 = -1000;
pub static SYSTEM_ERROR_CODE_DB: i64 = -1001;
pub static SYSTEM_ERROR_CODE_IO: i64 = -1002;
pub static SYSTEM_ERROR_CODE_CRYPTO: i64 = -1003;
pub static SYSTEM_ERROR_CODE_JSON: i64 = -1004;
pub static SYSTEM_ERROR_CODE_CONFIG: i64 = -1005;

pub static VALIDATION_ERROR_CODE: i64 = 1;
pub static AUTH_ERROR_CODE: i64 = 2;
pub static NOT_FOUND_ERROR_CODE: i64 = 3;
pub static CONFLICT_ERROR_CODE: i64 = 4;

pub const SERVER_ERROR_MESSAGE: &str = "Error del servidor";

/// Wire shape of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Clone)]
pub struct AppError {
    pub message: String,
    pub status: StatusCode,
    pub code: i64,
}

impl AppError {
    pub fn new(message: impl Into<String>, status: StatusCode, code: i64) -> Self {
        Self {
            message: message.into(),
            status,
            code,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(message, StatusCode::BAD_REQUEST, VALIDATION_ERROR_CODE)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(message, StatusCode::UNAUTHORIZED, AUTH_ERROR_CODE)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(message, StatusCode::FORBIDDEN, AUTH_ERROR_CODE)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(message, StatusCode::NOT_FOUND, NOT_FOUND_ERROR_CODE)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(message, StatusCode::CONFLICT, CONFLICT_ERROR_CODE)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(
            message,
            StatusCode::INTERNAL_SERVER_ERROR,
            SYSTEM_ERROR_CODE,
        )
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::new(
            message,
            StatusCode::INTERNAL_SERVER_ERROR,
            SYSTEM_ERROR_CODE_CONFIG,
        )
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (HTTP {}, code {})",
            self.message,
            self.status.as_u16(),
            self.code
        )
    }
}

impl StdError for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        warn!(
            "AppError ({}): {} (HTTP {})",
            self.code,
            self.message,
            self.status.as_u16()
        );
        // Internal details stay in the log; clients get the generic message.
        let error = if self.status.is_server_error() {
            SERVER_ERROR_MESSAGE.to_owned()
        } else {
            self.message
        };
        (self.status, Json(ErrorBody { error })).into_response()
    }
}

// --------------------
// Error conversions
// --------------------

impl From<JsonRejection> for AppError {
    fn from(value: JsonRejection) -> Self {
        Self::new(value.body_text(), value.status(), VALIDATION_ERROR_CODE)
    }
}

impl From<PathRejection> for AppError {
    fn from(value: PathRejection) -> Self {
        Self::new(value.body_text(), value.status(), VALIDATION_ERROR_CODE)
    }
}

impl From<SqlxError> for AppError {
    fn from(value: SqlxError) -> Self {
        if let SqlxError::Database(db_err) = &value {
            if db_err.is_unique_violation() {
                return Self::new(
                    format!("{db_err}"),
                    StatusCode::CONFLICT,
                    CONFLICT_ERROR_CODE,
                );
            }
        }
        Self::new(
            format!("{value:?}"),
            StatusCode::INTERNAL_SERVER_ERROR,
            SYSTEM_ERROR_CODE_DB,
        )
    }
}

impl From<MigrateError> for AppError {
    fn from(value: MigrateError) -> Self {
        Self::new(
            format!("{value:?}"),
            StatusCode::INTERNAL_SERVER_ERROR,
            SYSTEM_ERROR_CODE_DB,
        )
    }
}

impl From<IoError> for AppError {
    fn from(value: IoError) -> Self {
        Self::new(
            format!("{value:?}"),
            StatusCode::INTERNAL_SERVER_ERROR,
            SYSTEM_ERROR_CODE_IO,
        )
    }
}

impl From<JsonError> for AppError {
    fn from(value: JsonError) -> Self {
        Self::new(
            format!("{value:?}"),
            StatusCode::INTERNAL_SERVER_ERROR,
            SYSTEM_ERROR_CODE_JSON,
        )
    }
}

impl From<JwtError> for AppError {
    fn from(value: JwtError) -> Self {
        Self::new(
            format!("{value:?}"),
            StatusCode::FORBIDDEN,
            SYSTEM_ERROR_CODE_CRYPTO,
        )
    }
}

impl From<BcryptError> for AppError {
    fn from(value: BcryptError) -> Self {
        Self::new(
            format!("{value:?}"),
            StatusCode::INTERNAL_SERVER_ERROR,
            SYSTEM_ERROR_CODE_CRYPTO,
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_of(err: AppError) -> (StatusCode, serde_json::Value) {
        let res = err.into_response();
        let status = res.status();
        let bytes = res.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn client_errors_keep_their_message() {
        let (status, body) = body_of(AppError::not_found("Pregunta no encontrada")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, serde_json::json!({ "error": "Pregunta no encontrada" }));
    }

    #[tokio::test]
    async fn server_errors_hide_details() {
        let (status, body) = body_of(AppError::from(SqlxError::PoolTimedOut)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], SERVER_ERROR_MESSAGE);
    }

    #[test]
    fn jwt_errors_are_forbidden() {
        let err = AppError::from(JwtError::from(
            jsonwebtoken::errors::ErrorKind::ExpiredSignature,
        ));
        assert_eq!(err.status, StatusCode::FORBIDDEN);
        assert_eq!(err.code, SYSTEM_ERROR_CODE_CRYPTO);
    }
}
