// src/documents/tasks.rs
//! Deferred work scheduled by the document endpoints
//!
//! Every task runs after the HTTP response has been sent (tokio::spawn,
//! fire-and-forget). A task takes no shared in-memory state beyond the
//! cloned AppState: it reads from the pool, talks to external services,
//! writes its final status, and exits. Failures are recorded on the row,
//! never surfaced to a client.

use sqlx::SqlitePool;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info, warn};

use crate::common::AppState;
use crate::services::{blob, extraction};

use super::models::{DocumentType, GeneratedDocument, JobDescription, Resume};

/// Schedule text extraction for a freshly uploaded resume
pub fn spawn_extraction(state_lock: Arc<RwLock<AppState>>, resume_id: String, user_id: String) {
    tokio::spawn(async move {
        let state = state_lock.read().await.clone();
        if let Err(e) = run_extraction(&state.db, &resume_id, &user_id).await {
            error!(
                resume_id = %resume_id,
                error = %e,
                "Resume text extraction task failed"
            );
        }
    });
}

async fn run_extraction(pool: &SqlitePool, resume_id: &str, user_id: &str) -> Result<(), String> {
    let file = blob::fetch_resume_file(pool, resume_id)
        .await
        .map_err(|e| e.to_string())?
        .ok_or_else(|| format!("No file found for resume {}", resume_id))?;

    let text = extraction::extract_text(&file.content, &file.filename)
        .map_err(|e| e.to_string())?;

    if text.is_empty() {
        warn!(resume_id = %resume_id, "No text was extracted from resume file");
        return Ok(());
    }

    let updated = sqlx::query(
        "UPDATE resumes SET extracted_text = ? WHERE id = ? AND owner_id = ?",
    )
    .bind(&text)
    .bind(resume_id)
    .bind(user_id)
    .execute(pool)
    .await
    .map_err(|e| e.to_string())?;

    if updated.rows_affected() == 0 {
        return Err(format!("Resume {} vanished before text could be saved", resume_id));
    }

    info!(
        resume_id = %resume_id,
        text_len = text.len(),
        "Extracted and saved resume text"
    );

    Ok(())
}

/// Schedule the generation pipeline for a pending generated document
pub fn spawn_generation(
    state_lock: Arc<RwLock<AppState>>,
    doc_id: String,
    doc_type: DocumentType,
    resume_id: String,
    job_description_id: Option<String>,
    user_id: String,
) {
    tokio::spawn(async move {
        let state = state_lock.read().await.clone();

        match run_generation(
            &state,
            &doc_id,
            doc_type,
            &resume_id,
            job_description_id.as_deref(),
            &user_id,
        )
        .await
        {
            Ok(true) => {
                info!(doc_id = %doc_id, doc_type = %doc_type.as_str(), "Generation task completed");
            }
            Ok(false) => {
                // Another writer owned the document; nothing to record.
            }
            Err(msg) => {
                error!(doc_id = %doc_id, error = %msg, "Generation task failed");
                mark_failed(&state.db, &doc_id, &msg).await;
            }
        }
    });
}

/// Run the generation pipeline. Returns Ok(false) when the document could
/// not be claimed, Ok(true) on completion.
async fn run_generation(
    state: &AppState,
    doc_id: &str,
    doc_type: DocumentType,
    resume_id: &str,
    job_description_id: Option<&str>,
    user_id: &str,
) -> Result<bool, String> {
    let claimed = claim_document(&state.db, doc_id)
        .await
        .map_err(|e| e.to_string())?;

    if !claimed {
        warn!(
            doc_id = %doc_id,
            "Skipping generation: document is not pending (already claimed or terminal)"
        );
        return Ok(false);
    }

    // Fetch source text
    let resume = sqlx::query_as::<_, Resume>(
        "SELECT * FROM resumes WHERE id = ? AND owner_id = ?",
    )
    .bind(resume_id)
    .bind(user_id)
    .fetch_optional(&state.db)
    .await
    .map_err(|e| e.to_string())?;

    let resume_text = resume
        .and_then(|r| r.extracted_text)
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| format!("Source resume ({}) or its text not found", resume_id))?;

    let jd_text = if doc_type.needs_job_description() {
        let jd_id = job_description_id
            .ok_or_else(|| "Job description id missing for this document type".to_string())?;

        let jd = sqlx::query_as::<_, JobDescription>(
            "SELECT * FROM job_descriptions WHERE id = ? AND owner_id = ?",
        )
        .bind(jd_id)
        .bind(user_id)
        .fetch_optional(&state.db)
        .await
        .map_err(|e| e.to_string())?;

        let text = jd
            .map(|j| j.description_text)
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| format!("Source job description ({}) or its text not found", jd_id))?;

        Some(text)
    } else {
        None
    };

    // Call the model
    let content = state
        .gemini_service
        .generate(doc_type.purpose(), &resume_text, jd_text.as_deref())
        .await
        .map_err(|e| format!("AI processing failed: {}", e))?;

    // Render the PDF. A render failure is non-fatal: the document completes
    // with text content only.
    let pdf_filename = doc_type.pdf_filename(doc_id);
    let pdf_bytes = match state.pdf_service.render_document(&pdf_filename, &content) {
        Ok(bytes) => Some(bytes),
        Err(e) => {
            warn!(
                doc_id = %doc_id,
                error = %e,
                "PDF generation failed; document will only have text content"
            );
            None
        }
    };

    // Finalize in one transaction so content, file link, and status land
    // together.
    let mut tx = state.db.begin().await.map_err(|e| e.to_string())?;

    let file_id = match pdf_bytes {
        Some(bytes) => Some(
            blob::store_file(&mut *tx, &bytes, &pdf_filename, "application/pdf", user_id)
                .await
                .map_err(|e| e.to_string())?,
        ),
        None => None,
    };

    let finalized = sqlx::query(
        r#"
        UPDATE generated_documents
        SET content = ?, file_id = ?, status = 'completed', error_message = NULL
        WHERE id = ? AND status = 'processing'
        "#,
    )
    .bind(&content)
    .bind(&file_id)
    .bind(doc_id)
    .execute(&mut *tx)
    .await
    .map_err(|e| e.to_string())?;

    // Dropping the transaction rolls back the stored blob too, so a lost
    // claim leaves no orphaned file record.
    if finalized.rows_affected() == 0 {
        warn!(
            doc_id = %doc_id,
            "Discarding generation result: document left the processing state"
        );
        return Ok(false);
    }

    tx.commit().await.map_err(|e| e.to_string())?;

    Ok(true)
}

/// Claim a document for processing. Only a pending row may enter processing;
/// two writers racing on the same id see exactly one claim succeed.
pub(crate) async fn claim_document(pool: &SqlitePool, doc_id: &str) -> Result<bool, sqlx::Error> {
    let claimed = sqlx::query(
        "UPDATE generated_documents SET status = 'processing' WHERE id = ? AND status = 'pending'",
    )
    .bind(doc_id)
    .execute(pool)
    .await?;

    Ok(claimed.rows_affected() > 0)
}

/// Record a task failure on the document row. Content and file link are
/// cleared together; the error message is what the user sees when polling.
/// Terminal rows are never touched.
pub(crate) async fn mark_failed(pool: &SqlitePool, doc_id: &str, message: &str) {
    let result = sqlx::query(
        r#"
        UPDATE generated_documents
        SET status = 'failed', content = NULL, file_id = NULL, error_message = ?
        WHERE id = ? AND status IN ('pending', 'processing')
        "#,
    )
    .bind(message)
    .bind(doc_id)
    .execute(pool)
    .await;

    match result {
        Ok(updated) if updated.rows_affected() == 0 => {
            warn!(
                doc_id = %doc_id,
                "Skipped recording failure: document already in a terminal state"
            );
        }
        Ok(_) => {}
        Err(e) => {
            error!(
                doc_id = %doc_id,
                error = %e,
                "Failed to record generation failure on document"
            );
        }
    }
}

/// Shared lookup used by handlers and tests: a document row scoped to its
/// owner.
pub async fn fetch_owned_document(
    pool: &SqlitePool,
    doc_id: &str,
    user_id: &str,
) -> Result<Option<GeneratedDocument>, sqlx::Error> {
    sqlx::query_as::<_, GeneratedDocument>(
        "SELECT * FROM generated_documents WHERE id = ? AND owner_id = ?",
    )
    .bind(doc_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await
}
