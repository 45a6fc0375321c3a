use std::time::Duration;

use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;

use crate::config::db::{db_url, DbKind};
use crate::error::AppError;

/// Open a connection for `kind`. Does not run migrations.
pub async fn connect_db(kind: &DbKind) -> Result<DatabaseConnection, AppError> {
    let mut opts = ConnectOptions::new(db_url(kind)?);
    opts.connect_timeout(Duration::from_secs(10))
        .sqlx_logging(false);

    // Every pooled in-memory SQLite connection would see its own empty database.
    if matches!(kind, DbKind::SqliteMemory) {
        opts.max_connections(1).min_connections(1);
    }

    Ok(Database::connect(opts).await?)
}

/// Connect and bring the schema up to date.
pub async fn bootstrap_db(kind: &DbKind) -> Result<DatabaseConnection, AppError> {
    let conn = connect_db(kind).await?;
    Migrator::up(&conn, None)
        .await
        .map_err(|e| AppError::db(format!("migration failed: {e}")))?;
    info!(db = kind_label(kind), "database ready");
    Ok(conn)
}

fn kind_label(kind: &DbKind) -> &'static str {
    match kind {
        DbKind::Postgres => "postgres",
        DbKind::SqliteFile(_) => "sqlite-file",
        DbKind::SqliteMemory => "sqlite-memory",
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::{ConnectionTrait, Statement};

    use super::*;

    #[tokio::test]
    async fn bootstrap_creates_books_table() {
        let conn = bootstrap_db(&DbKind::SqliteMemory).await.unwrap();
        let row = conn
            .query_one(Statement::from_string(
                conn.get_database_backend(),
                "SELECT COUNT(*) AS n FROM books",
            ))
            .await
            .unwrap()
            .unwrap();
        let n: i64 = row.try_get("", "n").unwrap();
        assert_eq!(n, 0);
    }
}
