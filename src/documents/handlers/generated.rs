// src/documents/handlers/generated.rs

use axum::{
    extract::{Extension, Path},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

use crate::auth::AuthedUser;
use crate::common::{generate_document_id, ApiError, AppState};
use crate::documents::models::{
    DocumentStatus, DocumentType, GeneratedDocument, GenerationRequest, JobDescription, Resume,
    UpdateContentRequest,
};
use crate::documents::tasks;
use crate::services::blob;

/// Validate the trigger's sources, insert the pending document row, and
/// schedule the generation task. Shared by all four trigger endpoints.
async fn start_generation(
    state_lock: Arc<RwLock<AppState>>,
    authed: &AuthedUser,
    doc_type: DocumentType,
    resume_id: String,
    job_description_id: Option<String>,
) -> Result<(StatusCode, Json<GeneratedDocument>), ApiError> {
    let state = state_lock.read().await.clone();

    let resume = sqlx::query_as::<_, Resume>(
        "SELECT * FROM resumes WHERE id = ? AND owner_id = ?",
    )
    .bind(&resume_id)
    .bind(&authed.id)
    .fetch_optional(&state.db)
    .await
    .map_err(ApiError::DatabaseError)?
    .ok_or_else(|| ApiError::NotFound("Resume not found".to_string()))?;

    let has_text = resume
        .extracted_text
        .as_deref()
        .map(|t| !t.trim().is_empty())
        .unwrap_or(false);
    if !has_text {
        return Err(ApiError::BadRequest(
            "Resume text is not ready yet; try again shortly".to_string(),
        ));
    }

    if let Some(jd_id) = &job_description_id {
        sqlx::query_as::<_, JobDescription>(
            "SELECT * FROM job_descriptions WHERE id = ? AND owner_id = ?",
        )
        .bind(jd_id)
        .bind(&authed.id)
        .fetch_optional(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?
        .ok_or_else(|| ApiError::NotFound("Job description not found".to_string()))?;
    }

    let doc_id = generate_document_id();
    let doc: GeneratedDocument = sqlx::query_as(
        r#"
        INSERT INTO generated_documents
            (id, owner_id, doc_type, source_resume_id, source_job_description_id, status)
        VALUES (?, ?, ?, ?, ?, 'pending')
        RETURNING *
        "#,
    )
    .bind(&doc_id)
    .bind(&authed.id)
    .bind(doc_type.as_str())
    .bind(&resume_id)
    .bind(&job_description_id)
    .fetch_one(&state.db)
    .await
    .map_err(ApiError::DatabaseError)?;

    info!(
        user_id = %authed.id,
        doc_id = %doc_id,
        doc_type = %doc_type.as_str(),
        resume_id = %resume_id,
        "Generation accepted, task scheduled"
    );

    tasks::spawn_generation(
        state_lock,
        doc_id,
        doc_type,
        resume_id,
        job_description_id,
        authed.id.clone(),
    );

    Ok((StatusCode::ACCEPTED, Json(doc)))
}

/// POST /api/v1/documents/process/rewrite-resume/:resume_id
pub async fn trigger_resume_rewrite(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
    Path(resume_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    start_generation(state_lock, &authed, DocumentType::ResumeRewrite, resume_id, None).await
}

/// POST /api/v1/documents/process/cover-letter
pub async fn trigger_cover_letter(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
    Json(payload): Json<GenerationRequest>,
) -> Result<impl IntoResponse, ApiError> {
    start_generation(
        state_lock,
        &authed,
        DocumentType::CoverLetter,
        payload.resume_id,
        Some(payload.job_description_id),
    )
    .await
}

/// POST /api/v1/documents/process/tailor-resume
pub async fn trigger_tailor_resume(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
    Json(payload): Json<GenerationRequest>,
) -> Result<impl IntoResponse, ApiError> {
    start_generation(
        state_lock,
        &authed,
        DocumentType::TailoredResume,
        payload.resume_id,
        Some(payload.job_description_id),
    )
    .await
}

/// POST /api/v1/documents/process/interview-questions
pub async fn trigger_interview_questions(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
    Json(payload): Json<GenerationRequest>,
) -> Result<impl IntoResponse, ApiError> {
    start_generation(
        state_lock,
        &authed,
        DocumentType::InterviewQuestions,
        payload.resume_id,
        Some(payload.job_description_id),
    )
    .await
}

/// GET /api/v1/documents/generated - List the caller's generated documents,
/// newest first
pub async fn list_generated(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
) -> Result<Json<Vec<GeneratedDocument>>, ApiError> {
    let state = state_lock.read().await;

    let docs = sqlx::query_as::<_, GeneratedDocument>(
        "SELECT * FROM generated_documents WHERE owner_id = ? ORDER BY created_at DESC, id DESC",
    )
    .bind(&authed.id)
    .fetch_all(&state.db)
    .await
    .map_err(ApiError::DatabaseError)?;

    Ok(Json(docs))
}

/// GET /api/v1/documents/generated/:id - Fetch one generated document,
/// including its status and any error message
pub async fn get_generated(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
    Path(doc_id): Path<String>,
) -> Result<Json<GeneratedDocument>, ApiError> {
    let state = state_lock.read().await;

    let doc = tasks::fetch_owned_document(&state.db, &doc_id, &authed.id)
        .await
        .map_err(ApiError::DatabaseError)?
        .ok_or_else(|| ApiError::NotFound("Generated document not found".to_string()))?;

    Ok(Json(doc))
}

/// GET /api/v1/documents/generated/:id/download - Download the rendered PDF
pub async fn download_generated(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
    Path(doc_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let state = state_lock.read().await;

    let doc = tasks::fetch_owned_document(&state.db, &doc_id, &authed.id)
        .await
        .map_err(ApiError::DatabaseError)?
        .ok_or_else(|| ApiError::NotFound("Generated document not found".to_string()))?;

    let file_id = doc
        .file_id
        .ok_or_else(|| ApiError::NotFound("No file is available for this document".to_string()))?;

    let file = blob::fetch_owned_file(&state.db, &file_id, &authed.id)
        .await
        .map_err(|e| ApiError::InternalServer(format!("Failed to load file: {}", e)))?
        .ok_or_else(|| ApiError::NotFound("No file is available for this document".to_string()))?;

    let headers = [
        (header::CONTENT_TYPE, file.content_type.clone()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", file.filename),
        ),
    ];

    Ok((headers, file.content))
}

/// PATCH /api/v1/documents/generated/:id/content - Edit the text of a
/// completed document and re-render its PDF
pub async fn update_generated_content(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
    Path(doc_id): Path<String>,
    Json(payload): Json<UpdateContentRequest>,
) -> Result<Json<GeneratedDocument>, ApiError> {
    if payload.content.trim().is_empty() {
        return Err(ApiError::BadRequest("Content cannot be empty".to_string()));
    }

    let state = state_lock.read().await.clone();

    let doc = tasks::fetch_owned_document(&state.db, &doc_id, &authed.id)
        .await
        .map_err(ApiError::DatabaseError)?
        .ok_or_else(|| ApiError::NotFound("Generated document not found".to_string()))?;

    if DocumentStatus::parse(&doc.status) != Some(DocumentStatus::Completed) {
        return Err(ApiError::BadRequest(
            "Only completed documents can be edited".to_string(),
        ));
    }

    let doc_type = DocumentType::parse(&doc.doc_type)
        .ok_or_else(|| ApiError::InternalServer("Document has an unknown type".to_string()))?;

    // Re-render with the edited text. Same policy as generation: a render
    // failure leaves the document without a file rather than failing the edit.
    let pdf_filename = doc_type.pdf_filename(&doc_id);
    let pdf_bytes = state.pdf_service.render_document(&pdf_filename, &payload.content).ok();

    let mut tx = state.db.begin().await.map_err(ApiError::DatabaseError)?;

    if let Some(old_file_id) = &doc.file_id {
        blob::delete_file(&mut *tx, old_file_id)
            .await
            .map_err(|e| ApiError::InternalServer(format!("Failed to replace file: {}", e)))?;
    }

    let new_file_id = match pdf_bytes {
        Some(bytes) => Some(
            blob::store_file(&mut *tx, &bytes, &pdf_filename, "application/pdf", &authed.id)
                .await
                .map_err(|e| ApiError::InternalServer(format!("Failed to save file: {}", e)))?,
        ),
        None => None,
    };

    let updated: GeneratedDocument = sqlx::query_as(
        r#"
        UPDATE generated_documents
        SET content = ?, file_id = ?
        WHERE id = ? AND owner_id = ?
        RETURNING *
        "#,
    )
    .bind(&payload.content)
    .bind(&new_file_id)
    .bind(&doc_id)
    .bind(&authed.id)
    .fetch_one(&mut *tx)
    .await
    .map_err(ApiError::DatabaseError)?;

    tx.commit().await.map_err(ApiError::DatabaseError)?;

    info!(
        user_id = %authed.id,
        doc_id = %doc_id,
        "Generated document content updated and PDF re-rendered"
    );

    Ok(Json(updated))
}
