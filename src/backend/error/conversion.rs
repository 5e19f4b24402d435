/**
 * Error Conversion
 *
 * This module converts backend errors into HTTP responses and maps axum's
 * JSON body rejections into validation errors.
 *
 * # Response Format
 *
 * ```json
 * {
 *   "errors": [
 *     { "msg": "Name is Required", "param": "name", "location": "body" }
 *   ]
 * }
 * ```
 */

use axum::{
    extract::rejection::JsonRejection,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;

use crate::backend::error::types::{BackendError, ErrorDetail};

/// Body of every error response
#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub errors: Vec<ErrorDetail>,
}

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::debug!("Request rejected ({}): {}", status.as_u16(), self);
        }

        let body = ErrorEnvelope {
            errors: self.details(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for BackendError {
    fn from(rejection: JsonRejection) -> Self {
        BackendError::Validation(vec![ErrorDetail {
            msg: rejection.body_text(),
            param: None,
            location: Some("body"),
        }])
    }
}
