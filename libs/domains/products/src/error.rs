use axum::response::{IntoResponse, Response};
use axum_helpers::{AppError, UnsupportedMediaType};
use sea_orm::DbErr;
use thiserror::Error;

use crate::models::UnknownCategory;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Product with id '{0}' was not found")]
    NotFound(i32),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error(transparent)]
    UnsupportedMediaType(#[from] UnsupportedMediaType),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

pub type ProductResult<T> = Result<T, ProductError>;

impl From<UnknownCategory> for ProductError {
    fn from(err: UnknownCategory) -> Self {
        ProductError::Validation(err.to_string())
    }
}

/// Convert ProductError to AppError for standardized error responses
impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound(_) => AppError::NotFound(err.to_string()),
            ProductError::Validation(msg) => AppError::Validation(msg),
            ProductError::UnsupportedMediaType(e) => e.into(),
            ProductError::Database(e) => AppError::Database(e),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
