// src/documents/models.rs
//! Data models for resumes, job descriptions, and generated documents

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::services::GenerationPurpose;

/// Lifecycle status of a generated document.
///
/// pending -> processing -> {completed, failed}. A document is claimed by
/// exactly one task via a guarded pending->processing update; there is no
/// path out of the terminal states (failed documents are re-triggered as
/// new documents).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl DocumentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentStatus::Pending => "pending",
            DocumentStatus::Processing => "processing",
            DocumentStatus::Completed => "completed",
            DocumentStatus::Failed => "failed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(DocumentStatus::Pending),
            "processing" => Some(DocumentStatus::Processing),
            "completed" => Some(DocumentStatus::Completed),
            "failed" => Some(DocumentStatus::Failed),
            _ => None,
        }
    }

    /// Whether the state machine permits moving from self to `next`
    pub fn can_transition_to(&self, next: DocumentStatus) -> bool {
        matches!(
            (self, next),
            (DocumentStatus::Pending, DocumentStatus::Processing)
                | (DocumentStatus::Processing, DocumentStatus::Completed)
                | (DocumentStatus::Processing, DocumentStatus::Failed)
        )
    }
}

/// The four kinds of AI output a user can request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    ResumeRewrite,
    CoverLetter,
    TailoredResume,
    InterviewQuestions,
}

impl DocumentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::ResumeRewrite => "resume_rewrite",
            DocumentType::CoverLetter => "cover_letter",
            DocumentType::TailoredResume => "tailored_resume",
            DocumentType::InterviewQuestions => "interview_questions",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "resume_rewrite" => Some(DocumentType::ResumeRewrite),
            "cover_letter" => Some(DocumentType::CoverLetter),
            "tailored_resume" => Some(DocumentType::TailoredResume),
            "interview_questions" => Some(DocumentType::InterviewQuestions),
            _ => None,
        }
    }

    pub fn purpose(&self) -> GenerationPurpose {
        match self {
            DocumentType::ResumeRewrite => GenerationPurpose::ResumeRewrite,
            DocumentType::CoverLetter => GenerationPurpose::CoverLetter,
            DocumentType::TailoredResume => GenerationPurpose::TailoredResume,
            DocumentType::InterviewQuestions => GenerationPurpose::InterviewQuestions,
        }
    }

    /// Whether triggers of this type must reference a job description
    pub fn needs_job_description(&self) -> bool {
        self.purpose().needs_job_description()
    }

    /// Filename for the rendered PDF of a document of this type
    pub fn pdf_filename(&self, doc_id: &str) -> String {
        format!("{}_{}.pdf", self.as_str(), doc_id)
    }
}

/// Resume database model
#[derive(FromRow, Serialize, Deserialize, Debug, Clone)]
pub struct Resume {
    pub id: String,
    pub owner_id: String,
    pub file_id: String,
    pub extracted_text: Option<String>,
    pub uploaded_at: Option<String>,
}

/// Job description database model
#[derive(FromRow, Serialize, Deserialize, Debug, Clone)]
pub struct JobDescription {
    pub id: String,
    pub owner_id: String,
    pub title: Option<String>,
    pub company: Option<String>,
    pub description_text: String,
    pub created_at: Option<String>,
}

/// Generated document database model - one row per requested AI output
#[derive(FromRow, Serialize, Deserialize, Debug, Clone)]
pub struct GeneratedDocument {
    pub id: String,
    pub owner_id: String,
    pub doc_type: String,
    pub source_resume_id: Option<String>,
    pub source_job_description_id: Option<String>,
    pub content: Option<String>,
    pub status: String,
    pub error_message: Option<String>,
    pub file_id: Option<String>,
    pub created_at: Option<String>,
}

/// Request body for creating a job description
#[derive(Deserialize, Debug)]
pub struct CreateJobDescriptionRequest {
    pub title: Option<String>,
    pub company: Option<String>,
    pub description_text: String,
}

/// Request body for generation triggers that pair a resume with a job
/// description (cover letter, tailored resume, interview questions)
#[derive(Deserialize, Debug)]
pub struct GenerationRequest {
    pub resume_id: String,
    pub job_description_id: String,
}

/// Request body for editing a generated document's text content
#[derive(Deserialize, Debug)]
pub struct UpdateContentRequest {
    pub content: String,
}
