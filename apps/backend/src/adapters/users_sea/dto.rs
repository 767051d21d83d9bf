//! DTOs for users_sea adapter.

/// New user row. `email` is expected already normalized.
#[derive(Debug, Clone)]
pub struct UserCreate {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub image_file: Option<String>,
}

impl UserCreate {
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            image_file: None,
        }
    }

    pub fn with_image_file(mut self, image_file: impl Into<String>) -> Self {
        self.image_file = Some(image_file.into());
        self
    }
}

/// Partial update of a user row; `None` leaves the column untouched.
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub id: i64,
    pub username: Option<String>,
    pub email: Option<String>,
    /// `Some(None)` clears the column
    pub image_file: Option<Option<String>>,
}

impl UserUpdate {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_image_file(mut self, image_file: Option<String>) -> Self {
        self.image_file = Some(image_file);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.email.is_none() && self.image_file.is_none()
    }
}
