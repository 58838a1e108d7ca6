use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{db::StoreError, domain::PostDraftError};

#[derive(Debug)]
pub struct ApiError {
    status_code: StatusCode,
    reason: &'static str,
}

impl ApiError {
    pub fn public(status_code: StatusCode, reason: &'static str) -> Self {
        Self {
            status_code,
            reason,
        }
    }

    pub fn not_found() -> Self {
        Self {
            status_code: StatusCode::NOT_FOUND,
            reason: "Post not found",
        }
    }

    pub fn internal() -> Self {
        Self {
            status_code: StatusCode::INTERNAL_SERVER_ERROR,
            reason: "Internal server error",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        self.status_code
    }

    pub fn reason(&self) -> &'static str {
        self.reason
    }
}

impl From<StoreError> for ApiError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::NotFound(_) => Self::not_found(),
            e => {
                tracing::error!(error = %e, "post store failed");
                Self::internal()
            }
        }
    }
}

impl From<PostDraftError> for ApiError {
    fn from(error: PostDraftError) -> Self {
        match error {
            PostDraftError::MissingTitle => {
                Self::public(StatusCode::UNPROCESSABLE_ENTITY, "Title is required")
            }
            PostDraftError::MissingContent => {
                Self::public(StatusCode::UNPROCESSABLE_ENTITY, "Content is required")
            }
        }
    }
}

impl From<askama::Error> for ApiError {
    fn from(error: askama::Error) -> Self {
        tracing::error!(error = %error, "failed to render template");
        Self::internal()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code, self.reason).into_response()
    }
}
