// src/common/migrations.rs
//! Database migration and schema management

use sqlx::SqlitePool;
use std::env;
use tracing::{info, warn};

/// Run all database migrations
///
/// Tables are created idempotently on every startup. Set RESET_DB=true to
/// drop and recreate the whole schema (development only).
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let should_reset_db = env::var("RESET_DB").unwrap_or_else(|_| "false".to_string()) == "true";

    if should_reset_db {
        warn!("RESET_DB=true - Dropping all tables and recreating schema...");
        drop_all_tables(pool).await?;
        info!("Dropped old tables");
    }

    create_tables(pool).await?;
    create_indexes(pool).await?;

    info!("Database migration completed");

    Ok(())
}

async fn drop_all_tables(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    // Drop tables in reverse dependency order
    let tables = vec![
        "generated_documents",
        "job_descriptions",
        "resumes",
        "file_records",
        "users",
    ];

    for table in tables {
        let _ = sqlx::query(&format!("DROP TABLE IF EXISTS {}", table))
            .execute(pool)
            .await;
    }

    Ok(())
}

async fn create_tables(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    // Users table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id TEXT PRIMARY KEY,
            email TEXT UNIQUE NOT NULL,
            password_hash TEXT NOT NULL,
            created_at TEXT DEFAULT (datetime('now'))
        )
        "#,
    )
    .execute(pool)
    .await?;

    // File records table - binary blobs live in the relational database
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS file_records (
            id TEXT PRIMARY KEY,
            filename TEXT NOT NULL,
            content_type TEXT NOT NULL,
            size INTEGER NOT NULL,
            content BLOB NOT NULL,
            uploader_id TEXT NOT NULL,
            created_at TEXT DEFAULT (datetime('now')),
            FOREIGN KEY(uploader_id) REFERENCES users(id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Resumes table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS resumes (
            id TEXT PRIMARY KEY,
            owner_id TEXT NOT NULL,
            file_id TEXT NOT NULL UNIQUE,
            extracted_text TEXT,
            uploaded_at TEXT DEFAULT (datetime('now')),
            FOREIGN KEY(owner_id) REFERENCES users(id),
            FOREIGN KEY(file_id) REFERENCES file_records(id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Job descriptions table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS job_descriptions (
            id TEXT PRIMARY KEY,
            owner_id TEXT NOT NULL,
            title TEXT,
            company TEXT,
            description_text TEXT NOT NULL,
            created_at TEXT DEFAULT (datetime('now')),
            FOREIGN KEY(owner_id) REFERENCES users(id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Generated documents table - one row per requested AI output.
    // file_id is populated only after a successful PDF render.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS generated_documents (
            id TEXT PRIMARY KEY,
            owner_id TEXT NOT NULL,
            doc_type TEXT NOT NULL,
            source_resume_id TEXT,
            source_job_description_id TEXT,
            content TEXT,
            status TEXT NOT NULL DEFAULT 'pending',
            error_message TEXT,
            file_id TEXT UNIQUE,
            created_at TEXT DEFAULT (datetime('now')),
            FOREIGN KEY(owner_id) REFERENCES users(id),
            FOREIGN KEY(source_resume_id) REFERENCES resumes(id),
            FOREIGN KEY(source_job_description_id) REFERENCES job_descriptions(id),
            FOREIGN KEY(file_id) REFERENCES file_records(id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_indexes(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let indexes = vec![
        "CREATE INDEX IF NOT EXISTS idx_users_email ON users(email)",
        "CREATE INDEX IF NOT EXISTS idx_resumes_owner ON resumes(owner_id)",
        "CREATE INDEX IF NOT EXISTS idx_job_descriptions_owner ON job_descriptions(owner_id)",
        "CREATE INDEX IF NOT EXISTS idx_generated_documents_owner ON generated_documents(owner_id)",
        "CREATE INDEX IF NOT EXISTS idx_generated_documents_status ON generated_documents(status)",
        "CREATE INDEX IF NOT EXISTS idx_file_records_uploader ON file_records(uploader_id)",
    ];

    for index in indexes {
        sqlx::query(index).execute(pool).await?;
    }

    Ok(())
}
