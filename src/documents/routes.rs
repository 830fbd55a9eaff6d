// src/documents/routes.rs

use axum::{
    routing::{get, patch, post},
    Router,
};

use super::handlers::{generated, job_descriptions, resumes};

pub fn documents_routes() -> Router {
    Router::new()
        // Resumes
        .route("/api/v1/documents/resumes", post(resumes::upload_resume))
        .route("/api/v1/documents/resumes", get(resumes::list_resumes))
        .route("/api/v1/documents/resumes/:id", get(resumes::get_resume))
        // Job descriptions
        .route(
            "/api/v1/documents/job-descriptions",
            post(job_descriptions::create_job_description),
        )
        .route(
            "/api/v1/documents/job-descriptions",
            get(job_descriptions::list_job_descriptions),
        )
        .route(
            "/api/v1/documents/job-descriptions/:id",
            get(job_descriptions::get_job_description),
        )
        // Generation triggers
        .route(
            "/api/v1/documents/process/rewrite-resume/:resume_id",
            post(generated::trigger_resume_rewrite),
        )
        .route(
            "/api/v1/documents/process/cover-letter",
            post(generated::trigger_cover_letter),
        )
        .route(
            "/api/v1/documents/process/tailor-resume",
            post(generated::trigger_tailor_resume),
        )
        .route(
            "/api/v1/documents/process/interview-questions",
            post(generated::trigger_interview_questions),
        )
        // Generated documents
        .route("/api/v1/documents/generated", get(generated::list_generated))
        .route("/api/v1/documents/generated/:id", get(generated::get_generated))
        .route(
            "/api/v1/documents/generated/:id/download",
            get(generated::download_generated),
        )
        .route(
            "/api/v1/documents/generated/:id/content",
            patch(generated::update_generated_content),
        )
}
