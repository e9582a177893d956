//! Schema management subcommand.
//!
//! Applies, reverts, and inspects migrations against the configured
//! database without bringing up the HTTP server.

use crate::cli::args::{MigrateAction, MigrateArgs};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::Database;

/// Execute the migrate command
pub async fn execute(args: MigrateArgs, config: Config) -> AppResult<()> {
    // Only `serve` applies migrations automatically; here they stay manual.
    let db = Database::connect_without_migrations(&config)
        .await
        .map_err(|e| AppError::internal(format!("Database connection failed: {}", e)))?;

    match args.action {
        MigrateAction::Up => {
            db.run_migrations()
                .await
                .map_err(|e| AppError::internal(e.to_string()))?;
            tracing::info!("Schema is up to date");
        }
        MigrateAction::Down => {
            db.rollback_migration()
                .await
                .map_err(|e| AppError::internal(e.to_string()))?;
            tracing::info!("Reverted the most recent migration");
        }
        MigrateAction::Status => {
            let entries = db
                .migration_status()
                .await
                .map_err(|e| AppError::internal(e.to_string()))?;
            for entry in entries {
                println!("{:<48} {}", entry.name, entry.state());
            }
        }
        MigrateAction::Fresh => {
            tracing::warn!("Dropping all tables before rebuilding the schema");
            db.fresh_migrations()
                .await
                .map_err(|e| AppError::internal(e.to_string()))?;
            tracing::info!("Schema rebuilt from scratch");
        }
    }

    Ok(())
}
