use std::time::Duration;

use bookshelf::auth::issuer::issue;
use bookshelf::config::{DbKind, Principal};
use bookshelf::infra::db::connect_db;
use bookshelf::state::SecurityConfig;
use bookshelf::{telemetry, AppError};
use clap::{Parser, Subcommand, ValueEnum};
use migration::MigrationCommand;

#[derive(Parser, Debug)]
#[command(name = "catalog-cli")]
#[command(about = "Operator tooling for the bookshelf backend")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Apply or inspect schema migrations
    Migrate {
        #[arg(value_enum)]
        action: Action,

        /// Database to run against
        #[arg(short, long, value_enum, default_value = "postgres")]
        db: Db,

        /// SQLite file path, used with `--db sqlite-file`
        #[arg(long, default_value = "bookshelf.db")]
        path: String,
    },
    /// Print a signed token for the configured principal
    MintToken {
        /// Override APP_TOKEN_TTL_SECS for this token
        #[arg(long)]
        ttl_secs: Option<u64>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Action {
    Up,
    Down,
    Fresh,
    Status,
}

impl From<Action> for MigrationCommand {
    fn from(action: Action) -> Self {
        match action {
            Action::Up => MigrationCommand::Up,
            Action::Down => MigrationCommand::Down,
            Action::Fresh => MigrationCommand::Fresh,
            Action::Status => MigrationCommand::Status,
        }
    }
}

// In-memory SQLite is deliberately absent: it would vanish when the command exits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Db {
    Postgres,
    SqliteFile,
}

async fn run(cli: Cli) -> Result<(), AppError> {
    match cli.command {
        Command::Migrate { action, db, path } => {
            let kind = match db {
                Db::Postgres => DbKind::Postgres,
                Db::SqliteFile => DbKind::SqliteFile(path),
            };
            let conn = connect_db(&kind).await?;
            migration::migrate(&conn, action.into())
                .await
                .map_err(|e| AppError::db(format!("migration {action:?} failed: {e}")))
        }
        Command::MintToken { ttl_secs } => {
            let mut security = SecurityConfig::from_env()?;
            if let Some(secs) = ttl_secs {
                security = security.with_token_ttl(Duration::from_secs(secs))?;
            }
            let principal = Principal::from_env()?;
            let token = issue(&principal, &security)?;
            tracing::info!(user_id = principal.user_id, ttl_secs = security.token_ttl.as_secs(), "token minted");
            println!("{token}");
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() {
    telemetry::init_tracing();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        tracing::error!(error = %e, "catalog-cli failed");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_migrate_with_sqlite_file() {
        let cli = Cli::try_parse_from([
            "catalog-cli",
            "migrate",
            "status",
            "--db",
            "sqlite-file",
            "--path",
            "/tmp/books.db",
        ])
        .unwrap();
        match cli.command {
            Command::Migrate { action, db, path } => {
                assert_eq!(action, Action::Status);
                assert_eq!(db, Db::SqliteFile);
                assert_eq!(path, "/tmp/books.db");
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn parses_mint_token_override() {
        let cli = Cli::try_parse_from(["catalog-cli", "mint-token", "--ttl-secs", "60"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::MintToken { ttl_secs: Some(60) }
        ));
    }

    #[test]
    fn rejects_unknown_migration_action() {
        assert!(Cli::try_parse_from(["catalog-cli", "migrate", "reset"]).is_err());
    }
}
