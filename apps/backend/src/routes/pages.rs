use actix_web::{web, HttpResponse};
use tera::Context;

use crate::db::require_db;
use crate::pages::views::{page_title, post_views, AuthorView, PostView};
use crate::pages::{html, render, PageError};
use crate::repos::posts as posts_repo;
use crate::repos::users as users_repo;
use crate::state::app_state::AppState;

async fn home(app_state: web::Data<AppState>) -> Result<HttpResponse, PageError> {
    let db = require_db(&app_state)?;
    let posts = posts_repo::list_posts(db).await?;

    let mut context = Context::new();
    context.insert("title", "Home");
    context.insert("posts", &post_views(&posts));
    Ok(html(render("home.html", &context)?))
}

async fn post_page(
    app_state: web::Data<AppState>,
    post_id: web::Path<i64>,
) -> Result<HttpResponse, PageError> {
    let db = require_db(&app_state)?;
    let Some(post) = posts_repo::find_post(db, post_id.into_inner()).await? else {
        return Err(PageError::not_found("Post not found"));
    };

    let mut context = Context::new();
    context.insert("title", &page_title(&post.title));
    context.insert("post", &PostView::from(&post));
    Ok(html(render("post.html", &context)?))
}

async fn user_posts_page(
    app_state: web::Data<AppState>,
    user_id: web::Path<i64>,
) -> Result<HttpResponse, PageError> {
    let user_id = user_id.into_inner();
    let db = require_db(&app_state)?;
    let Some(user) = users_repo::find_user_by_id(db, user_id).await? else {
        return Err(PageError::not_found("User not found"));
    };
    let posts = posts_repo::list_posts_by_user(db, user_id).await?;

    let mut context = Context::new();
    context.insert("title", &format!("{}'s Posts", user.username));
    context.insert("user", &AuthorView::from(&user));
    context.insert("posts", &post_views(&posts));
    Ok(html(render("user_posts.html", &context)?))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(home))
        .route("/posts", web::get().to(home))
        .route("/posts/{id}", web::get().to(post_page))
        .route("/users/{id}/posts", web::get().to(user_posts_page));
}
