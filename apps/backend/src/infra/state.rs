use crate::error::AppError;
use crate::infra::db::bootstrap_db;
use crate::state::app_state::AppState;
use crate::state::security_config::SecurityConfig;

/// Builder for `AppState`, shared by `main` and the tests.
pub struct StateBuilder {
    security_config: SecurityConfig,
    database_url: Option<String>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            security_config: SecurityConfig::default(),
            database_url: None,
        }
    }

    pub fn with_db(mut self, database_url: impl Into<String>) -> Self {
        self.database_url = Some(database_url.into());
        self
    }

    pub fn with_security(mut self, security_config: SecurityConfig) -> Self {
        self.security_config = security_config;
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        match self.database_url {
            Some(url) => {
                // single entrypoint: connect + migrate
                let conn = bootstrap_db(&url).await?;
                Ok(AppState::new(conn, self.security_config))
            }
            None => Ok(AppState::new_without_db(self.security_config)),
        }
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
