//! Database Module
//!
//! Embedded SurrealDB bootstrap: opens the RocksDB-backed store, selects
//! the namespace/database and applies the schema definitions.

pub mod models;
pub mod repository;
pub mod scope;

use std::path::Path;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

use crate::utils::AppError;

/// Open (creating if missing) the embedded database under `data_dir`.
pub async fn connect(data_dir: &Path) -> Result<Surreal<Db>, AppError> {
    let db_path = data_dir.join("tracker.db");
    let db: Surreal<Db> = Surreal::new::<RocksDb>(db_path)
        .await
        .map_err(|e| AppError::database(format!("Failed to open database: {}", e)))?;

    db.use_ns("tracker")
        .use_db("tracker")
        .await
        .map_err(|e| AppError::database(format!("Failed to select namespace: {}", e)))?;

    define_schema(&db).await?;

    tracing::info!("Database connection established (embedded SurrealDB)");
    Ok(db)
}

/// Idempotent schema definitions.
///
/// Tables stay schemaless; the unique email index is the only hard
/// constraint, backing the application-level duplicate check.
async fn define_schema(db: &Surreal<Db>) -> Result<(), AppError> {
    db.query(
        r#"
        DEFINE TABLE IF NOT EXISTS user SCHEMALESS;
        DEFINE TABLE IF NOT EXISTS employee SCHEMALESS;
        DEFINE TABLE IF NOT EXISTS task SCHEMALESS;
        DEFINE INDEX IF NOT EXISTS user_email ON user FIELDS email UNIQUE;
        "#,
    )
    .await
    .map_err(|e| AppError::database(format!("Failed to apply schema: {}", e)))?;
    Ok(())
}
