// Application state shared across all modules

use sqlx::SqlitePool;
use std::sync::Arc;

use crate::services::{GeminiService, PdfService};

/// Application state containing the database pool, services, and configuration
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub jwt_secret: String,
    /// Hard cap on uploaded file size in bytes
    pub max_upload_bytes: usize,
    pub gemini_service: Arc<GeminiService>,
    pub pdf_service: Arc<PdfService>,
}
