use sea_orm::DatabaseConnection;

use crate::error::AppError;
use crate::state::app_state::AppState;

/// The connection from `AppState`, or `DbUnavailable` when none is configured.
pub fn require_db(state: &AppState) -> Result<&DatabaseConnection, AppError> {
    state.db().ok_or_else(AppError::db_unavailable)
}

#[cfg(test)]
mod tests {
    use actix_web::ResponseError;

    use super::*;

    #[test]
    fn missing_db_is_service_unavailable() {
        let state = AppState::for_tests_without_db();
        let err = require_db(&state).unwrap_err();
        assert!(matches!(err, AppError::DbUnavailable));
        assert_eq!(
            err.error_response().status(),
            actix_web::http::StatusCode::SERVICE_UNAVAILABLE
        );
    }
}
