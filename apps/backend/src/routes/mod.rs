use actix_web::error::PathError;
use actix_web::{web, HttpRequest, HttpResponse};

use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::pages::{is_api_path, PageError};

pub mod health;
pub mod pages;
pub mod posts;
pub mod users;

/// Register every route. Shared by `main` and the integration tests.
///
/// The app's default service should be [`not_found`] so unknown paths get
/// the same error shape as the routes around them.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::PathConfig::default().error_handler(path_error));

    // Health check: /health
    cfg.configure(health::configure_routes);

    // JSON API: /api/users/**, /api/posts/**
    cfg.service(web::scope("/api/users").configure(users::configure_routes));
    cfg.service(web::scope("/api/posts").configure(posts::configure_routes));

    // HTML pages: /, /posts, /posts/{id}, /users/{id}/posts
    cfg.configure(pages::configure_routes);
}

/// Unparseable path segments (`/api/posts/abc`) are 422 in either shape.
fn path_error(err: PathError, req: &HttpRequest) -> actix_web::Error {
    if is_api_path(req.path()) {
        AppError::invalid(format!("Invalid path parameter: {err}")).into()
    } else {
        PageError::invalid_request().into()
    }
}

/// Fallback for unmatched routes.
pub async fn not_found(req: HttpRequest) -> Result<HttpResponse, actix_web::Error> {
    if is_api_path(req.path()) {
        Err(AppError::not_found(ErrorCode::NotFound, "Not Found").into())
    } else {
        Err(PageError::not_found("Not Found").into())
    }
}
