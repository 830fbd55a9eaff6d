// src/documents/handlers/resumes.rs

use axum::{
    extract::{Extension, Multipart, Path},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::auth::AuthedUser;
use crate::common::{generate_resume_id, ApiError, AppState};
use crate::documents::models::Resume;
use crate::documents::tasks;
use crate::documents::validators::{resume_content_type, validate_resume_upload};
use crate::services::blob;

/// POST /api/v1/documents/resumes - Upload a resume
///
/// Validates the file before any database write, stores the blob and the
/// resume row in one transaction, then schedules deferred text extraction.
pub async fn upload_resume(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let state = state_lock.read().await.clone();

    info!(user_id = %authed.id, "User uploading resume");

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| ApiError::BadRequest("Malformed multipart body".to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().unwrap_or("resume.pdf").to_string();

        let data = field
            .bytes()
            .await
            .map_err(|_| ApiError::BadRequest("Invalid file".to_string()))?;

        // Rejections happen here, before anything touches the database
        let validation = validate_resume_upload(&filename, &data, state.max_upload_bytes);
        if !validation.is_valid {
            warn!(
                user_id = %authed.id,
                filename = %filename,
                "Resume upload rejected by validation"
            );
            return Err(ApiError::from(validation));
        }

        let resume_id = generate_resume_id();
        let content_type = resume_content_type(&filename);

        let mut tx = state.db.begin().await.map_err(ApiError::DatabaseError)?;

        let file_id = blob::store_file(&mut *tx, &data, &filename, content_type, &authed.id)
            .await
            .map_err(|e| ApiError::InternalServer(format!("Failed to save file: {}", e)))?;

        let resume: Resume = sqlx::query_as(
            r#"
            INSERT INTO resumes (id, owner_id, file_id)
            VALUES (?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(&resume_id)
        .bind(&authed.id)
        .bind(&file_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(ApiError::DatabaseError)?;

        tx.commit().await.map_err(ApiError::DatabaseError)?;

        // Text extraction runs after the response is sent
        tasks::spawn_extraction(state_lock.clone(), resume_id.clone(), authed.id.clone());

        info!(
            user_id = %authed.id,
            resume_id = %resume_id,
            file_id = %file_id,
            "Resume uploaded, extraction scheduled"
        );

        return Ok((StatusCode::CREATED, Json(resume)));
    }

    Err(ApiError::BadRequest("No resume file provided".to_string()))
}

/// GET /api/v1/documents/resumes - List the caller's resumes
pub async fn list_resumes(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
) -> Result<Json<Vec<Resume>>, ApiError> {
    let state = state_lock.read().await;

    let resumes = sqlx::query_as::<_, Resume>(
        "SELECT * FROM resumes WHERE owner_id = ? ORDER BY uploaded_at DESC",
    )
    .bind(&authed.id)
    .fetch_all(&state.db)
    .await
    .map_err(ApiError::DatabaseError)?;

    Ok(Json(resumes))
}

/// GET /api/v1/documents/resumes/:id - Fetch one of the caller's resumes
pub async fn get_resume(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
    Path(resume_id): Path<String>,
) -> Result<Json<Resume>, ApiError> {
    let state = state_lock.read().await;

    let resume = sqlx::query_as::<_, Resume>(
        "SELECT * FROM resumes WHERE id = ? AND owner_id = ?",
    )
    .bind(&resume_id)
    .bind(&authed.id)
    .fetch_optional(&state.db)
    .await
    .map_err(ApiError::DatabaseError)?
    .ok_or_else(|| ApiError::NotFound("Resume not found".to_string()))?;

    Ok(Json(resume))
}
