use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;

use crate::db::require_db;
use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::extractors::current_user::CurrentUser;
use crate::extractors::ValidatedJson;
use crate::repos::posts::{self as posts_repo, Post};
use crate::routes::users::UserPublicResponse;
use crate::services::posts::{self as posts_service, PostInput, PostPatch};
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
pub struct PostResponse {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub user_id: i64,
    /// RFC 3339, UTC
    pub date_posted: String,
    pub author: UserPublicResponse,
}

impl From<&Post> for PostResponse {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id,
            title: post.title.clone(),
            content: post.content.clone(),
            user_id: post.user_id,
            date_posted: post
                .date_posted
                .format(&Rfc3339)
                .unwrap_or_else(|_| post.date_posted.to_string()),
            author: UserPublicResponse::from(&post.author),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PostRequest {
    pub title: String,
    pub content: String,
}

impl From<PostRequest> for PostInput {
    fn from(value: PostRequest) -> Self {
        Self {
            title: value.title,
            content: value.content,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PatchPostRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

async fn list_posts(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let posts = posts_repo::list_posts(db).await?;
    let body: Vec<PostResponse> = posts.iter().map(PostResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

async fn create_post(
    app_state: web::Data<AppState>,
    current_user: CurrentUser,
    body: ValidatedJson<PostRequest>,
) -> Result<HttpResponse, AppError> {
    let author_id = current_user.id();
    let input = PostInput::from(body.into_inner());

    let post = with_txn(&app_state, move |txn| {
        Box::pin(async move { posts_service::create_post(txn, author_id, input).await })
    })
    .await?;

    Ok(HttpResponse::Created().json(PostResponse::from(&post)))
}

async fn get_post(
    app_state: web::Data<AppState>,
    post_id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let post = posts_repo::require_post(db, post_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(PostResponse::from(&post)))
}

async fn replace_post(
    app_state: web::Data<AppState>,
    current_user: CurrentUser,
    post_id: web::Path<i64>,
    body: ValidatedJson<PostRequest>,
) -> Result<HttpResponse, AppError> {
    let caller_id = current_user.id();
    let post_id = post_id.into_inner();
    let input = PostInput::from(body.into_inner());

    let post = with_txn(&app_state, move |txn| {
        Box::pin(async move { posts_service::replace_post(txn, caller_id, post_id, input).await })
    })
    .await?;

    Ok(HttpResponse::Ok().json(PostResponse::from(&post)))
}

async fn patch_post(
    app_state: web::Data<AppState>,
    current_user: CurrentUser,
    post_id: web::Path<i64>,
    body: ValidatedJson<PatchPostRequest>,
) -> Result<HttpResponse, AppError> {
    let caller_id = current_user.id();
    let post_id = post_id.into_inner();
    let payload = body.into_inner();
    let patch = PostPatch {
        title: payload.title,
        content: payload.content,
    };

    let post = with_txn(&app_state, move |txn| {
        Box::pin(async move { posts_service::patch_post(txn, caller_id, post_id, patch).await })
    })
    .await?;

    Ok(HttpResponse::Ok().json(PostResponse::from(&post)))
}

async fn delete_post(
    app_state: web::Data<AppState>,
    current_user: CurrentUser,
    post_id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let caller_id = current_user.id();
    let post_id = post_id.into_inner();

    with_txn(&app_state, move |txn| {
        Box::pin(async move { posts_service::delete_post(txn, caller_id, post_id).await })
    })
    .await?;

    Ok(HttpResponse::NoContent().finish())
}

/// Routes under `/api/posts`.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::get().to(list_posts))
            .route(web::post().to(create_post)),
    )
    .service(
        web::resource("/{id}")
            .route(web::get().to(get_post))
            .route(web::put().to(replace_post))
            .route(web::patch().to(patch_post))
            .route(web::delete().to(delete_post)),
    );
}
