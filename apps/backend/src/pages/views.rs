//! Template view models.

use serde::Serialize;
use time::macros::format_description;

use crate::repos::posts::Post;
use crate::repos::users::User;

/// Longest `<title>` a post page uses, in characters.
pub const PAGE_TITLE_MAX_CHARS: usize = 50;

#[derive(Debug, Serialize)]
pub struct AuthorView {
    pub id: i64,
    pub username: String,
    pub image_path: String,
}

impl From<&User> for AuthorView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            image_path: user.image_path(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PostView {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub date_posted: String,
    pub author: AuthorView,
}

impl From<&Post> for PostView {
    fn from(post: &Post) -> Self {
        let date_posted = post
            .date_posted
            .format(format_description!("[month repr:long] [day], [year]"))
            .unwrap_or_else(|_| post.date_posted.date().to_string());

        Self {
            id: post.id,
            title: post.title.clone(),
            content: post.content.clone(),
            date_posted,
            author: AuthorView::from(&post.author),
        }
    }
}

pub fn post_views(posts: &[Post]) -> Vec<PostView> {
    posts.iter().map(PostView::from).collect()
}

/// First `PAGE_TITLE_MAX_CHARS` characters of a post title.
pub fn page_title(title: &str) -> String {
    title.chars().take(PAGE_TITLE_MAX_CHARS).collect()
}
