// src/services/mod.rs
//
// Shared services module containing business logic services
// that can be used across different domain modules

pub mod blob;
pub mod extraction;
pub mod gemini;
pub mod pdf;

// Re-export commonly used types for convenience
pub use gemini::{GeminiService, GenerationPurpose};
pub use pdf::PdfService;
