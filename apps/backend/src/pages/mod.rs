//! Server-rendered HTML: the embedded Tera registry and the HTML error page.
//!
//! Templates are compiled once, on first render. `.html` names are
//! auto-escaped by Tera.

use std::sync::LazyLock;

use actix_web::http::header::ContentType;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use tera::{Context, Tera};
use tracing::error;

use crate::error::AppError;
use crate::errors::domain::DomainError;
use crate::trace_ctx;

pub mod views;

pub const DEFAULT_ERROR_MESSAGE: &str =
    "An error occurred. Please check your request and try again.";
pub const INVALID_REQUEST_MESSAGE: &str =
    "Invalid request. Please check your input and try again.";

const TEMPLATES: [(&str, &str); 6] = [
    ("base.html", include_str!("templates/base.html")),
    ("_post.html", include_str!("templates/_post.html")),
    ("home.html", include_str!("templates/home.html")),
    ("post.html", include_str!("templates/post.html")),
    ("user_posts.html", include_str!("templates/user_posts.html")),
    ("error.html", include_str!("templates/error.html")),
];

static REGISTRY: LazyLock<Result<Tera, String>> = LazyLock::new(|| {
    let mut tera = Tera::default();
    tera.add_raw_templates(TEMPLATES)
        .map_err(|e| e.to_string())?;
    Ok(tera)
});

/// Render one of the embedded templates.
pub fn render(name: &str, context: &Context) -> Result<String, AppError> {
    let tera = REGISTRY.as_ref().map_err(|e| {
        error!(error = %e, "template registry failed to load");
        AppError::internal("Templates unavailable")
    })?;

    tera.render(name, context).map_err(|e| {
        error!(template = name, error = %e, "template render failed");
        AppError::internal(format!("Failed to render {name}"))
    })
}

/// `200 text/html` with a rendered body.
pub fn html(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(body)
}

/// Whether errors for `path` use problem details instead of the HTML page.
pub fn is_api_path(path: &str) -> bool {
    path.starts_with("/api")
}

/// Error raised by page handlers; rendered with `error.html`.
#[derive(Debug, thiserror::Error)]
#[error("{status}: {message}")]
pub struct PageError {
    status: StatusCode,
    message: String,
}

impl PageError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            status,
            message: if message.is_empty() {
                DEFAULT_ERROR_MESSAGE.to_string()
            } else {
                message
            },
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// Unparseable path or query input.
    pub fn invalid_request() -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, INVALID_REQUEST_MESSAGE)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<AppError> for PageError {
    fn from(err: AppError) -> Self {
        let status = err.status();
        if status.is_server_error() {
            error!(
                trace_id = %trace_ctx::trace_id(),
                code = %err.code(),
                detail = %err.detail(),
                "page request failed"
            );
            return Self::new(status, DEFAULT_ERROR_MESSAGE);
        }
        Self::new(status, err.detail())
    }
}

impl From<DomainError> for PageError {
    fn from(err: DomainError) -> Self {
        AppError::from(err).into()
    }
}

impl ResponseError for PageError {
    fn status_code(&self) -> StatusCode {
        self.status
    }

    fn error_response(&self) -> HttpResponse {
        let mut context = Context::new();
        context.insert("status_code", &self.status.as_u16());
        context.insert("title", self.status.canonical_reason().unwrap_or("Error"));
        context.insert("message", &self.message);

        let mut builder = HttpResponse::build(self.status);
        builder.insert_header(("x-trace-id", trace_ctx::trace_id()));

        match render("error.html", &context) {
            Ok(body) => builder.content_type(ContentType::html()).body(body),
            Err(_) => builder
                .content_type(ContentType::plaintext())
                .body(format!("{} {}", self.status.as_u16(), self.message)),
        }
    }
}
