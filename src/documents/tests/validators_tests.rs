// src/documents/tests/validators_tests.rs

#[cfg(test)]
mod tests {
    use crate::documents::models::CreateJobDescriptionRequest;
    use crate::documents::validators::*;
    use crate::common::Validator;

    // Minimal but real PDF header bytes so the content sniff passes
    const PDF_BYTES: &[u8] = b"%PDF-1.4\n1 0 obj\n<< /Type /Catalog >>\nendobj\ntrailer\n<< >>\n%%EOF";
    // PK zip signature, which is what a DOCX container starts with
    const ZIP_BYTES: &[u8] = &[
        0x50, 0x4b, 0x03, 0x04, 0x14, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    ];

    #[test]
    fn test_job_description_validator_valid_request() {
        let validator = JobDescriptionValidator;
        let request = CreateJobDescriptionRequest {
            title: Some("Backend Engineer".to_string()),
            company: Some("Acme".to_string()),
            description_text: "We are looking for a backend engineer.".to_string(),
        };

        let result = validator.validate(&request);
        assert!(result.is_valid);
        assert_eq!(result.errors.len(), 0);
    }

    #[test]
    fn test_job_description_validator_empty_description() {
        let validator = JobDescriptionValidator;
        let request = CreateJobDescriptionRequest {
            title: None,
            company: None,
            description_text: "   ".to_string(),
        };

        let result = validator.validate(&request);
        assert!(!result.is_valid);
        assert_eq!(result.errors[0].field, "description_text");
    }

    #[test]
    fn test_job_description_validator_description_too_long() {
        let validator = JobDescriptionValidator;
        let request = CreateJobDescriptionRequest {
            title: None,
            company: None,
            description_text: "a".repeat(50_001),
        };

        let result = validator.validate(&request);
        assert!(!result.is_valid);
    }

    #[test]
    fn test_job_description_validator_title_too_long() {
        let validator = JobDescriptionValidator;
        let request = CreateJobDescriptionRequest {
            title: Some("t".repeat(256)),
            company: None,
            description_text: "A valid description".to_string(),
        };

        let result = validator.validate(&request);
        assert!(!result.is_valid);
        assert!(result.errors.iter().any(|e| e.field == "title"));
    }

    #[test]
    fn test_resume_upload_rejects_empty_file() {
        let result = validate_resume_upload("resume.pdf", &[], 10 * 1024 * 1024);
        assert!(!result.is_valid);
        assert!(result.errors[0].message.contains("empty"));
    }

    #[test]
    fn test_resume_upload_rejects_unsupported_extension() {
        let result = validate_resume_upload("resume.txt", b"plain text", 10 * 1024 * 1024);
        assert!(!result.is_valid);
        assert!(result.errors[0].message.contains("PDF and DOCX"));
    }

    #[test]
    fn test_resume_upload_rejects_oversized_file() {
        let result = validate_resume_upload("resume.pdf", PDF_BYTES, 8);
        assert!(!result.is_valid);
        assert!(result.errors[0].message.contains("maximum upload size"));
    }

    #[test]
    fn test_resume_upload_rejects_mismatched_content() {
        // zip bytes claiming to be a PDF
        let result = validate_resume_upload("resume.pdf", ZIP_BYTES, 10 * 1024 * 1024);
        assert!(!result.is_valid);
        assert!(result.errors[0].message.contains("does not match"));
    }

    #[test]
    fn test_resume_upload_accepts_pdf() {
        let result = validate_resume_upload("resume.pdf", PDF_BYTES, 10 * 1024 * 1024);
        assert!(result.is_valid);
    }

    #[test]
    fn test_resume_upload_accepts_docx_zip_container() {
        let result = validate_resume_upload("resume.docx", ZIP_BYTES, 10 * 1024 * 1024);
        assert!(result.is_valid);
    }

    #[test]
    fn test_resume_upload_extension_is_case_insensitive() {
        let result = validate_resume_upload("Resume.PDF", PDF_BYTES, 10 * 1024 * 1024);
        assert!(result.is_valid);
    }

    #[test]
    fn test_resume_content_type_mapping() {
        assert_eq!(resume_content_type("a.pdf"), "application/pdf");
        assert_eq!(
            resume_content_type("a.docx"),
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        );
        assert_eq!(resume_content_type("a.bin"), "application/octet-stream");
    }
}
