//! JSON envelope shared by every route: `{success, data?, message?}`.

use crate::ingestion::IngestionError;
use crate::server::metrics::record_error;
use crate::user::UserManagerError;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::WithRejection;
use serde::Serialize;
use tracing::{debug, error};

#[derive(Serialize)]
pub struct Envelope<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

pub type ApiResult = Result<Response, ApiError>;

/// Extractors whose rejections are answered with the envelope.
pub type ApiPath<T> = WithRejection<Path<T>, ApiError>;
pub type ApiQuery<T> = WithRejection<Query<T>, ApiError>;
pub type ApiJson<T> = WithRejection<Json<T>, ApiError>;

pub fn ok<T: Serialize>(data: T) -> ApiResult {
    Ok(respond(StatusCode::OK, Some(data), None))
}

pub fn ok_with_message<T: Serialize>(message: impl Into<String>, data: T) -> ApiResult {
    Ok(respond(StatusCode::OK, Some(data), Some(message.into())))
}

pub fn ok_message(message: impl Into<String>) -> ApiResult {
    Ok(respond::<()>(StatusCode::OK, None, Some(message.into())))
}

pub fn created<T: Serialize>(message: impl Into<String>, data: T) -> ApiResult {
    Ok(respond(StatusCode::CREATED, Some(data), Some(message.into())))
}

fn respond<T: Serialize>(status: StatusCode, data: Option<T>, message: Option<String>) -> Response {
    let envelope = Envelope {
        success: status.is_success(),
        data,
        message,
    };
    (status, Json(envelope)).into_response()
}

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Unauthorized(String),
    Forbidden(String),
    NotFound(String),
    Internal(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            ApiError::BadRequest(m)
            | ApiError::Unauthorized(m)
            | ApiError::Forbidden(m)
            | ApiError::NotFound(m)
            | ApiError::Internal(m) => m,
        };
        respond::<()>(status, None, Some(message))
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        error!("Internal error: {:#}", err);
        record_error("internal", "store");
        ApiError::Internal("Internal server error".to_string())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        debug!("Rejected path: {}", rejection.body_text());
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        debug!("Rejected query: {}", rejection.body_text());
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        debug!("Rejected body: {}", rejection.body_text());
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<UserManagerError> for ApiError {
    fn from(err: UserManagerError) -> Self {
        match err {
            UserManagerError::Validation(m) => ApiError::BadRequest(m),
            UserManagerError::Unauthorized(m) => ApiError::Unauthorized(m),
            UserManagerError::Forbidden(m) => ApiError::Forbidden(m),
            UserManagerError::NotFound(m) => ApiError::NotFound(m),
            UserManagerError::Store(err) => err.into(),
        }
    }
}

impl From<IngestionError> for ApiError {
    fn from(err: IngestionError) -> Self {
        match err {
            IngestionError::InvalidRequest(m) => ApiError::BadRequest(m),
            IngestionError::Provider(err) => {
                error!("Provider request failed: {:#}", err);
                record_error("provider", "ingestion");
                ApiError::Internal(format!("Music provider request failed: {}", err))
            }
        }
    }
}
