// src/documents/handlers/job_descriptions.rs

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

use crate::auth::AuthedUser;
use crate::common::{generate_job_description_id, ApiError, AppState, Validator};
use crate::documents::models::{CreateJobDescriptionRequest, JobDescription};
use crate::documents::validators::JobDescriptionValidator;

/// POST /api/v1/documents/job-descriptions - Create a job description
pub async fn create_job_description(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
    Json(payload): Json<CreateJobDescriptionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let state = state_lock.read().await;

    let validation = JobDescriptionValidator.validate(&payload);
    if !validation.is_valid {
        return Err(ApiError::from(validation));
    }

    let jd_id = generate_job_description_id();
    let jd: JobDescription = sqlx::query_as(
        r#"
        INSERT INTO job_descriptions (id, owner_id, title, company, description_text)
        VALUES (?, ?, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(&jd_id)
    .bind(&authed.id)
    .bind(&payload.title)
    .bind(&payload.company)
    .bind(&payload.description_text)
    .fetch_one(&state.db)
    .await
    .map_err(ApiError::DatabaseError)?;

    info!(user_id = %authed.id, jd_id = %jd_id, "Job description created");

    Ok((StatusCode::CREATED, Json(jd)))
}

/// GET /api/v1/documents/job-descriptions - List the caller's job descriptions
pub async fn list_job_descriptions(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
) -> Result<Json<Vec<JobDescription>>, ApiError> {
    let state = state_lock.read().await;

    let jds = sqlx::query_as::<_, JobDescription>(
        "SELECT * FROM job_descriptions WHERE owner_id = ? ORDER BY created_at DESC",
    )
    .bind(&authed.id)
    .fetch_all(&state.db)
    .await
    .map_err(ApiError::DatabaseError)?;

    Ok(Json(jds))
}

/// GET /api/v1/documents/job-descriptions/:id - Fetch one job description
pub async fn get_job_description(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
    Path(jd_id): Path<String>,
) -> Result<Json<JobDescription>, ApiError> {
    let state = state_lock.read().await;

    let jd = sqlx::query_as::<_, JobDescription>(
        "SELECT * FROM job_descriptions WHERE id = ? AND owner_id = ?",
    )
    .bind(&jd_id)
    .bind(&authed.id)
    .fetch_optional(&state.db)
    .await
    .map_err(ApiError::DatabaseError)?
    .ok_or_else(|| ApiError::NotFound("Job description not found".to_string()))?;

    Ok(Json(jd))
}
