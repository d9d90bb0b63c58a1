//! HTTP mapping for page failures.
//!
//! Store and template failures both become `500 Internal Server Error` with
//! the raw error text as a plain-text body. Each failure is logged once, with
//! the request's trace identifier, when the response is built.

use actix_web::http::StatusCode;
use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;
use tracing::error;

use crate::domain::ports::DirectoryStoreError;
use crate::inbound::http::templates::RenderError;
use crate::middleware::trace::TraceId;

/// Convenient result alias for page handlers.
pub type PageResult<T> = Result<T, PageError>;

/// Failures that abort a page request.
#[derive(Debug, Error)]
pub enum PageError {
    /// The directory store could not be read.
    #[error(transparent)]
    Store(#[from] DirectoryStoreError),
    /// The page template failed to execute.
    #[error(transparent)]
    Render(#[from] RenderError),
}

impl ResponseError for PageError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse {
        let trace_id = TraceId::current().map(|id| id.to_string());
        error!(error = %self, trace_id = trace_id.as_deref(), "directory page failed");

        HttpResponse::build(self.status_code())
            .content_type(ContentType::plaintext())
            .body(format!("{self}\n"))
    }
}
