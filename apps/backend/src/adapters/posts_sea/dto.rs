//! DTOs for posts_sea adapter.

use time::OffsetDateTime;

#[derive(Debug, Clone)]
pub struct PostCreate {
    pub user_id: i64,
    pub title: String,
    pub content: String,
    pub date_posted: OffsetDateTime,
}

impl PostCreate {
    /// New post stamped with the current UTC time.
    pub fn new(user_id: i64, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            user_id,
            title: title.into(),
            content: content.into(),
            date_posted: OffsetDateTime::now_utc(),
        }
    }

    pub fn with_date_posted(mut self, date_posted: OffsetDateTime) -> Self {
        self.date_posted = date_posted;
        self
    }
}

/// Partial update of a post; `None` leaves the column untouched.
#[derive(Debug, Clone, Default)]
pub struct PostUpdate {
    pub id: i64,
    pub title: Option<String>,
    pub content: Option<String>,
}

impl PostUpdate {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }
}
