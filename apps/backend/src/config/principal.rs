use std::env;

use crate::error::AppError;

/// The single principal the catalog issues tokens for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub user_id: i64,
    pub user_name: String,
    pub role: String,
    /// Value of the `sub` claim
    pub subject: String,
}

impl Default for Principal {
    fn default() -> Self {
        Self {
            user_id: 1,
            user_name: "User1".to_string(),
            role: "Admin".to_string(),
            subject: "user-token".to_string(),
        }
    }
}

impl Principal {
    /// Load from `APP_PRINCIPAL_*`, falling back to the defaults field by field.
    pub fn from_env() -> Result<Self, AppError> {
        let defaults = Self::default();

        let user_id = match env::var("APP_PRINCIPAL_ID") {
            Ok(raw) => raw.parse::<i64>().map_err(|_| {
                AppError::config(format!("APP_PRINCIPAL_ID must be an integer, got '{raw}'"))
            })?,
            Err(_) => defaults.user_id,
        };
        let user_name = env::var("APP_PRINCIPAL_NAME").unwrap_or(defaults.user_name);
        let role = env::var("APP_PRINCIPAL_ROLE").unwrap_or(defaults.role);
        let subject = env::var("APP_PRINCIPAL_SUBJECT").unwrap_or(defaults.subject);

        if role.trim().is_empty() {
            return Err(AppError::config("APP_PRINCIPAL_ROLE must not be blank"));
        }

        Ok(Self {
            user_id,
            user_name,
            role,
            subject,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::env;

    use serial_test::serial;

    use super::*;

    fn clear_env() {
        env::remove_var("APP_PRINCIPAL_ID");
        env::remove_var("APP_PRINCIPAL_NAME");
        env::remove_var("APP_PRINCIPAL_ROLE");
        env::remove_var("APP_PRINCIPAL_SUBJECT");
    }

    #[test]
    #[serial]
    fn defaults_when_unset() {
        clear_env();
        assert_eq!(Principal::from_env().unwrap(), Principal::default());
    }

    #[test]
    #[serial]
    fn reads_overrides() {
        clear_env();
        env::set_var("APP_PRINCIPAL_ID", "42");
        env::set_var("APP_PRINCIPAL_NAME", "librarian");
        env::set_var("APP_PRINCIPAL_ROLE", "Editor");

        let principal = Principal::from_env().unwrap();
        assert_eq!(principal.user_id, 42);
        assert_eq!(principal.user_name, "librarian");
        assert_eq!(principal.role, "Editor");
        assert_eq!(principal.subject, "user-token");
        clear_env();
    }

    #[test]
    #[serial]
    fn rejects_non_numeric_id() {
        clear_env();
        env::set_var("APP_PRINCIPAL_ID", "one");
        let err = Principal::from_env().unwrap_err();
        assert!(err.to_string().contains("APP_PRINCIPAL_ID"));
        clear_env();
    }
}
