use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use tera::{Context, Tera};
use thiserror::Error;
use tracing::error;

/// Infrastructure failures that escape a page handler. Store failures never
/// end up here; every page turns those into its own state or a notice.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Template error: {0}")]
    Template(#[from] tera::Error),
    #[error("Not Found: {0}")]
    NotFound(String),
    #[error("Internal server error: {0}")]
    InternalServerError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Template(e) => {
                error!(error = ?e, "Failed to render page.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong while rendering this page.".to_string(),
                )
            }
            AppError::InternalServerError(msg) => {
                error!(message = %msg, "Internal server error.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong.".to_string(),
                )
            }
        };
        render_error_page(status, &message)
    }
}

const ERROR_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"><title>{{ status }} · Creatorverse</title></head>
<body>
  <h1>{{ status }}</h1>
  <p>{{ message }}</p>
  <p><a href="/">Back to Creatorverse</a></p>
</body>
</html>"#;

fn render_error_page(status: StatusCode, message: &str) -> Response {
    let mut context = Context::new();
    context.insert("status", &status.as_u16());
    context.insert("message", message);
    match Tera::one_off(ERROR_PAGE, &context, true) {
        Ok(body) => (status, Html(body)).into_response(),
        Err(e) => {
            error!(error = ?e, "Failed to render error page.");
            status.into_response()
        }
    }
}
