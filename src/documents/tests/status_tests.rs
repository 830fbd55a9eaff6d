// src/documents/tests/status_tests.rs

#[cfg(test)]
mod tests {
    use crate::documents::models::{DocumentStatus, DocumentType};

    #[test]
    fn test_status_round_trip() {
        for status in [
            DocumentStatus::Pending,
            DocumentStatus::Processing,
            DocumentStatus::Completed,
            DocumentStatus::Failed,
        ] {
            assert_eq!(DocumentStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(DocumentStatus::parse("done"), None);
    }

    #[test]
    fn test_status_allowed_transitions() {
        assert!(DocumentStatus::Pending.can_transition_to(DocumentStatus::Processing));
        assert!(DocumentStatus::Processing.can_transition_to(DocumentStatus::Completed));
        assert!(DocumentStatus::Processing.can_transition_to(DocumentStatus::Failed));
    }

    #[test]
    fn test_status_forbidden_transitions() {
        // No skipping the processing stage
        assert!(!DocumentStatus::Pending.can_transition_to(DocumentStatus::Completed));
        assert!(!DocumentStatus::Pending.can_transition_to(DocumentStatus::Failed));

        // Terminal states stay terminal
        assert!(!DocumentStatus::Completed.can_transition_to(DocumentStatus::Processing));
        assert!(!DocumentStatus::Completed.can_transition_to(DocumentStatus::Failed));
        assert!(!DocumentStatus::Failed.can_transition_to(DocumentStatus::Processing));
        assert!(!DocumentStatus::Failed.can_transition_to(DocumentStatus::Completed));

        // No backwards moves
        assert!(!DocumentStatus::Processing.can_transition_to(DocumentStatus::Pending));
    }

    #[test]
    fn test_document_type_round_trip() {
        for doc_type in [
            DocumentType::ResumeRewrite,
            DocumentType::CoverLetter,
            DocumentType::TailoredResume,
            DocumentType::InterviewQuestions,
        ] {
            assert_eq!(DocumentType::parse(doc_type.as_str()), Some(doc_type));
        }
        assert_eq!(DocumentType::parse("resume"), None);
    }

    #[test]
    fn test_job_description_requirement_per_type() {
        assert!(!DocumentType::ResumeRewrite.needs_job_description());
        assert!(DocumentType::CoverLetter.needs_job_description());
        assert!(DocumentType::TailoredResume.needs_job_description());
        assert!(DocumentType::InterviewQuestions.needs_job_description());
    }

    #[test]
    fn test_pdf_filename_shape() {
        let name = DocumentType::CoverLetter.pdf_filename("G_4F9QZX");
        assert_eq!(name, "cover_letter_G_4F9QZX.pdf");
        assert!(name.ends_with(".pdf"));
    }
}
