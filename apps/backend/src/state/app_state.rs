use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::security_config::SecurityConfig;

/// Application state containing shared resources
#[derive(Debug, Clone)]
pub struct AppState {
    /// Database connection (optional for test scenarios)
    db: Option<DatabaseConnection>,
    /// Security configuration shared with the request gate
    pub security: Arc<SecurityConfig>,
}

impl AppState {
    /// Create a new AppState with the given database connection and security config
    pub fn new(db: DatabaseConnection, security: SecurityConfig) -> Self {
        Self {
            db: Some(db),
            security: Arc::new(security),
        }
    }

    /// Create a new AppState without a database connection
    pub fn new_without_db(security: SecurityConfig) -> Self {
        Self {
            db: None,
            security: Arc::new(security),
        }
    }

    pub fn db(&self) -> Option<&DatabaseConnection> {
        self.db.as_ref()
    }

    /// Create a test AppState without database connection
    #[cfg(test)]
    pub fn for_tests_without_db() -> Self {
        Self::new_without_db(SecurityConfig::for_tests())
    }
}
