use crate::config::db::DbKind;
use crate::error::AppError;
use crate::infra::db::bootstrap_db;
use crate::state::app_state::AppState;
use crate::state::security_config::SecurityConfig;

/// Builder for `AppState`, shared by `main` and the tests.
///
/// There is no built-in signing secret: `build` fails until `with_security`
/// has been called.
#[derive(Default)]
pub struct StateBuilder {
    security: Option<SecurityConfig>,
    db: Option<DbKind>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_db(mut self, kind: DbKind) -> Self {
        self.db = Some(kind);
        self
    }

    pub fn with_security(mut self, security: SecurityConfig) -> Self {
        self.security = Some(security);
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        let security = self
            .security
            .ok_or_else(|| AppError::config("security configuration was not provided"))?;

        match self.db {
            Some(kind) => {
                let conn = bootstrap_db(&kind).await?;
                Ok(AppState::new(conn, security))
            }
            None => Ok(AppState::new_without_db(security)),
        }
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn builds_without_db() {
        let state = build_state()
            .with_security(SecurityConfig::for_tests())
            .build()
            .await
            .unwrap();
        assert!(state.db().is_none());
    }

    #[tokio::test]
    async fn refuses_to_build_without_security() {
        let err = build_state().build().await.unwrap_err();
        assert!(matches!(err, AppError::Config { .. }));
        assert!(err.to_string().contains("security configuration"));
    }

    #[tokio::test]
    async fn builds_with_in_memory_db() {
        let state = build_state()
            .with_db(DbKind::SqliteMemory)
            .with_security(SecurityConfig::for_tests())
            .build()
            .await
            .unwrap();
        assert!(state.db().is_some());
        assert_eq!(state.security.issuer, "bookshelf");
    }
}
