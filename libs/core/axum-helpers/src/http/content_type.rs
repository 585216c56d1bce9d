use axum::http::{HeaderMap, header};
use thiserror::Error;

use crate::errors::AppError;

pub const APPLICATION_JSON: &str = "application/json";

/// The request declared a media type other than the one required.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Content-Type must be {expected}")]
pub struct UnsupportedMediaType {
    pub expected: &'static str,
    /// Header value as sent, `None` when absent or not visible ASCII
    pub found: Option<String>,
}

impl From<UnsupportedMediaType> for AppError {
    fn from(err: UnsupportedMediaType) -> Self {
        AppError::UnsupportedMediaType(err.to_string())
    }
}

/// Reject requests whose `Content-Type` is not `application/json`.
///
/// Only the media type essence is compared, case-insensitively, so
/// `application/json; charset=utf-8` is accepted. A missing header is
/// rejected like any other type.
pub fn require_json_content_type(headers: &HeaderMap) -> Result<(), UnsupportedMediaType> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok());

    let essence = content_type
        .and_then(|value| value.split(';').next())
        .unwrap_or_default()
        .trim();

    if essence.eq_ignore_ascii_case(APPLICATION_JSON) {
        return Ok(());
    }

    tracing::debug!(content_type = ?content_type, "Rejected request body media type");
    Err(UnsupportedMediaType {
        expected: APPLICATION_JSON,
        found: content_type.map(str::to_string),
    })
}
