pub use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::{ConnectionTrait, DatabaseConnection, Statement};

mod m20250101_000001_create_books;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20250101_000001_create_books::Migration)]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationCommand {
    Up,
    Down,
    Fresh,
    Status,
}

/// Run `command` against an already-open connection.
/// Shared by the operator CLI and the test suites.
pub async fn migrate(db: &DatabaseConnection, command: MigrationCommand) -> Result<(), DbErr> {
    let backend = format!("{:?}", db.get_database_backend());
    let database = database_name(db).await.unwrap_or_else(|_| "<unknown>".to_string());
    tracing::info!(
        ?command,
        backend = %backend,
        database = %database,
        defined = Migrator::migrations().len(),
        applied = count_applied_migrations(db).await.unwrap_or(0),
        "migration starting"
    );

    let result = match command {
        MigrationCommand::Up => Migrator::up(db, None).await,
        MigrationCommand::Down => Migrator::down(db, None).await,
        MigrationCommand::Fresh => Migrator::fresh(db).await,
        MigrationCommand::Status => Migrator::status(db).await,
    };

    match result {
        Ok(()) => {
            tracing::info!(
                ?command,
                applied = count_applied_migrations(db).await.unwrap_or(0),
                "migration finished"
            );
            Ok(())
        }
        Err(e) => {
            tracing::error!(?command, error = %e, "migration failed");
            Err(e)
        }
    }
}

async fn database_name(db: &DatabaseConnection) -> Result<String, DbErr> {
    let backend = db.get_database_backend();
    let sql = match backend {
        sea_orm_migration::sea_orm::DatabaseBackend::Postgres => {
            "SELECT current_database() AS name"
        }
        sea_orm_migration::sea_orm::DatabaseBackend::Sqlite => {
            "SELECT file AS name FROM pragma_database_list WHERE name = 'main'"
        }
        _ => return Ok("<unsupported>".to_string()),
    };

    let name = match db.query_one(Statement::from_string(backend, sql)).await? {
        Some(row) => row.try_get::<String>("", "name")?,
        None => String::new(),
    };
    Ok(if name.is_empty() { ":memory:".to_string() } else { name })
}

/// Number of applied migrations; 0 when the bookkeeping table is absent.
pub async fn count_applied_migrations(db: &DatabaseConnection) -> Result<usize, DbErr> {
    match Migrator::get_applied_migrations(db).await {
        Ok(migrations) => Ok(migrations.len()),
        Err(DbErr::Exec(_)) => Ok(0),
        Err(e) => Err(e),
    }
}

/// Name of the most recently applied migration, if any.
pub async fn get_latest_migration_version(
    db: &DatabaseConnection,
) -> Result<Option<String>, DbErr> {
    match Migrator::get_applied_migrations(db).await {
        Ok(migrations) => Ok(migrations.last().map(|m| m.name().to_string())),
        Err(DbErr::Exec(_)) => Ok(None),
        Err(e) => Err(e),
    }
}
