// src/documents/validators.rs
//! Request validation for document endpoints

use crate::common::{ValidationResult, Validator};
use crate::services::extraction::file_extension;

use super::models::CreateJobDescriptionRequest;

const MAX_TITLE_LEN: usize = 255;
const MAX_COMPANY_LEN: usize = 255;
const MAX_DESCRIPTION_LEN: usize = 50_000;

/// Validates job description create requests
pub struct JobDescriptionValidator;

impl Validator<CreateJobDescriptionRequest> for JobDescriptionValidator {
    fn validate(&self, data: &CreateJobDescriptionRequest) -> ValidationResult {
        let mut result = ValidationResult::new();

        if data.description_text.trim().is_empty() {
            result.add_error("description_text", "Description text cannot be empty");
        }
        if data.description_text.len() > MAX_DESCRIPTION_LEN {
            result.add_error(
                "description_text",
                &format!("Description text exceeds {} characters", MAX_DESCRIPTION_LEN),
            );
        }
        if let Some(title) = &data.title {
            if title.len() > MAX_TITLE_LEN {
                result.add_error("title", &format!("Title exceeds {} characters", MAX_TITLE_LEN));
            }
        }
        if let Some(company) = &data.company {
            if company.len() > MAX_COMPANY_LEN {
                result.add_error(
                    "company",
                    &format!("Company exceeds {} characters", MAX_COMPANY_LEN),
                );
            }
        }

        result
    }
}

/// Validate an uploaded resume file before anything touches the database.
///
/// Checks, in order: non-empty content, supported extension, size cap, and
/// that the bytes look like the claimed format (magic-number sniff via the
/// infer crate; DOCX is a zip container so a plain zip signature passes).
pub fn validate_resume_upload(filename: &str, data: &[u8], max_bytes: usize) -> ValidationResult {
    let mut result = ValidationResult::new();

    if data.is_empty() {
        result.add_error("file", "Cannot upload an empty file");
        return result;
    }

    let extension = file_extension(filename);
    match extension.as_deref() {
        Some("pdf") | Some("docx") => {}
        _ => {
            result.add_error("file", "Only PDF and DOCX files are allowed");
            return result;
        }
    }

    if data.len() > max_bytes {
        result.add_error(
            "file",
            &format!("File exceeds the maximum upload size of {} bytes", max_bytes),
        );
        return result;
    }

    let sniffed = infer::get(data).map(|kind| kind.mime_type());
    let matches_claim = match extension.as_deref() {
        Some("pdf") => sniffed == Some("application/pdf"),
        Some("docx") => matches!(
            sniffed,
            Some("application/vnd.openxmlformats-officedocument.wordprocessingml.document")
                | Some("application/zip")
        ),
        _ => false,
    };

    if !matches_claim {
        result.add_error("file", "File content does not match its extension");
    }

    result
}

/// MIME type stored alongside an uploaded resume, derived from its extension
pub fn resume_content_type(filename: &str) -> &'static str {
    match file_extension(filename).as_deref() {
        Some("pdf") => "application/pdf",
        Some("docx") => {
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        }
        _ => "application/octet-stream",
    }
}
