// src/services/blob.rs
//! Blob store over the file_records table
//!
//! File bytes live as a BLOB column in the relational database rather than
//! an object store. Every fetch that serves user requests is owner-scoped:
//! a file is readable only through a resume or generated document the
//! caller owns.

use sqlx::{FromRow, Sqlite, SqlitePool};
use tracing::{debug, warn};

use crate::common::generate_file_id;

#[derive(Debug, thiserror::Error)]
pub enum BlobError {
    #[error("File content cannot be empty")]
    EmptyContent,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// A stored file row, including its binary content
#[derive(FromRow, Debug)]
pub struct StoredFile {
    pub id: String,
    pub filename: String,
    pub content_type: String,
    pub size: i64,
    pub content: Vec<u8>,
    pub uploader_id: String,
    pub created_at: Option<String>,
}

/// Insert file bytes as a new file record, returning the new file id.
///
/// Takes any executor so callers can run it inside a transaction alongside
/// the row that references the file.
pub async fn store_file<'e, E>(
    executor: E,
    content: &[u8],
    filename: &str,
    content_type: &str,
    uploader_id: &str,
) -> Result<String, BlobError>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    if content.is_empty() {
        return Err(BlobError::EmptyContent);
    }

    let file_id = generate_file_id();

    sqlx::query(
        r#"
        INSERT INTO file_records (id, filename, content_type, size, content, uploader_id)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&file_id)
    .bind(filename)
    .bind(content_type)
    .bind(content.len() as i64)
    .bind(content)
    .bind(uploader_id)
    .execute(executor)
    .await?;

    debug!(
        file_id = %file_id,
        filename = %filename,
        size = content.len(),
        "Stored file blob"
    );

    Ok(file_id)
}

/// Fetch a file by id, but only if the user owns a resume or generated
/// document linked to it.
pub async fn fetch_owned_file(
    pool: &SqlitePool,
    file_id: &str,
    user_id: &str,
) -> Result<Option<StoredFile>, BlobError> {
    let file = sqlx::query_as::<_, StoredFile>(
        r#"
        SELECT f.* FROM file_records f
        WHERE f.id = ?
          AND (
            EXISTS (SELECT 1 FROM resumes r WHERE r.file_id = f.id AND r.owner_id = ?)
            OR EXISTS (SELECT 1 FROM generated_documents g WHERE g.file_id = f.id AND g.owner_id = ?)
          )
        "#,
    )
    .bind(file_id)
    .bind(user_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    if file.is_none() {
        warn!(
            file_id = %file_id,
            user_id = %user_id,
            "File fetch denied: not found or not owned by an accessible document"
        );
    }

    Ok(file)
}

/// Fetch the uploaded file behind a resume id (used by the extraction task,
/// which already verified ownership at trigger time)
pub async fn fetch_resume_file(
    pool: &SqlitePool,
    resume_id: &str,
) -> Result<Option<StoredFile>, BlobError> {
    let file = sqlx::query_as::<_, StoredFile>(
        r#"
        SELECT f.* FROM file_records f
        JOIN resumes r ON r.file_id = f.id
        WHERE r.id = ?
        "#,
    )
    .bind(resume_id)
    .fetch_optional(pool)
    .await?;

    Ok(file)
}

/// Delete a file record by id. Used when a re-rendered PDF replaces the
/// previous one.
pub async fn delete_file<'e, E>(executor: E, file_id: &str) -> Result<(), BlobError>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    sqlx::query("DELETE FROM file_records WHERE id = ?")
        .bind(file_id)
        .execute(executor)
        .await?;

    Ok(())
}
