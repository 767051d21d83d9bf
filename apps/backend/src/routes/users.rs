use actix_web::{web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_with::rust::double_option;
use tracing::info;

use crate::auth::jwt::{self, Claims};
use crate::db::require_db;
use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::extractors::current_user::CurrentUser;
use crate::extractors::ValidatedJson;
use crate::repos::posts as posts_repo;
use crate::repos::users::{self as users_repo, User};
use crate::routes::posts::PostResponse;
use crate::services::users::{self as users_service, NewUser, UserPatch};
use crate::state::app_state::AppState;

/// What anyone may see about a user.
#[derive(Debug, Serialize)]
pub struct UserPublicResponse {
    pub id: i64,
    pub username: String,
    pub image_file: Option<String>,
    pub image_path: String,
}

impl From<&User> for UserPublicResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            image_file: user.image_file.clone(),
            image_path: user.image_path(),
        }
    }
}

/// Public view plus the email, returned only to the account owner.
#[derive(Debug, Serialize)]
pub struct UserPrivateResponse {
    #[serde(flatten)]
    pub public: UserPublicResponse,
    pub email: String,
}

impl From<&User> for UserPrivateResponse {
    fn from(user: &User) -> Self {
        Self {
            public: UserPublicResponse::from(user),
            email: user.email.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// OAuth2 password-grant form. `username` may also be an email address;
/// other grant fields (`grant_type`, `scope`) are accepted and ignored.
#[derive(Debug, Deserialize)]
pub struct TokenForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    // None = leave as is, Some(None) = reset to the default picture
    #[serde(default, with = "double_option")]
    pub image_file: Option<Option<String>>,
}

async fn create_user(
    app_state: web::Data<AppState>,
    body: ValidatedJson<CreateUserRequest>,
) -> Result<HttpResponse, AppError> {
    let payload = body.into_inner();
    let input = NewUser {
        username: payload.username,
        email: payload.email,
        password: payload.password,
    };

    let user = with_txn(&app_state, move |txn| {
        Box::pin(async move { users_service::register(txn, input).await })
    })
    .await?;

    Ok(HttpResponse::Created().json(UserPrivateResponse::from(&user)))
}

async fn login(
    app_state: web::Data<AppState>,
    form: web::Form<TokenForm>,
) -> Result<HttpResponse, AppError> {
    let form = form.into_inner();
    let db = require_db(&app_state)?;
    let user = users_service::authenticate(db, &form.username, &form.password).await?;

    let access_token = jwt::issue(
        &Claims::for_subject(user.id.to_string()),
        None,
        &app_state.security,
    )?;
    info!(user_id = user.id, "access token issued");

    Ok(HttpResponse::Ok().json(TokenResponse {
        access_token,
        token_type: "bearer",
    }))
}

async fn me(current_user: CurrentUser) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(UserPrivateResponse::from(&*current_user)))
}

async fn get_user(
    app_state: web::Data<AppState>,
    user_id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let user = users_repo::require_user(db, user_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(UserPublicResponse::from(&user)))
}

async fn get_user_posts(
    app_state: web::Data<AppState>,
    user_id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let user_id = user_id.into_inner();
    let db = require_db(&app_state)?;
    users_repo::require_user(db, user_id).await?;

    let posts = posts_repo::list_posts_by_user(db, user_id).await?;
    let body: Vec<PostResponse> = posts.iter().map(PostResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

async fn update_user(
    app_state: web::Data<AppState>,
    current_user: CurrentUser,
    user_id: web::Path<i64>,
    body: ValidatedJson<UpdateUserRequest>,
) -> Result<HttpResponse, AppError> {
    let caller_id = current_user.id();
    let target_id = user_id.into_inner();
    let payload = body.into_inner();
    let patch = UserPatch {
        username: payload.username,
        email: payload.email,
        image_file: payload.image_file,
    };

    let user = with_txn(&app_state, move |txn| {
        Box::pin(async move { users_service::update_user(txn, caller_id, target_id, patch).await })
    })
    .await?;

    Ok(HttpResponse::Ok().json(UserPrivateResponse::from(&user)))
}

async fn delete_user(
    app_state: web::Data<AppState>,
    current_user: CurrentUser,
    user_id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let caller_id = current_user.id();
    let target_id = user_id.into_inner();

    with_txn(&app_state, move |txn| {
        Box::pin(async move { users_service::delete_user(txn, caller_id, target_id).await })
    })
    .await?;

    Ok(HttpResponse::NoContent().finish())
}

fn form_error(err: actix_web::error::UrlencodedError, _req: &HttpRequest) -> actix_web::Error {
    AppError::invalid(format!("Invalid login form: {err}")).into()
}

/// Routes under `/api/users`. Fixed segments are registered before `/{id}`.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("").route(web::post().to(create_user)))
        .service(
            web::resource("/token")
                .app_data(web::FormConfig::default().error_handler(form_error))
                .route(web::post().to(login)),
        )
        .service(web::resource("/me").route(web::get().to(me)))
        .service(
            web::resource("/{id}")
                .route(web::get().to(get_user))
                .route(web::patch().to(update_user))
                .route(web::delete().to(delete_user)),
        )
        .service(web::resource("/{id}/posts").route(web::get().to(get_user_posts)));
}
