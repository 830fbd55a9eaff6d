// src/services/extraction.rs
//! Plain-text extraction from uploaded resume files
//!
//! PDFs go through pdf-extract. DOCX files are zip containers; the text
//! lives in `word/document.xml`, so extraction opens the archive and strips
//! the WordprocessingML markup, keeping paragraph breaks.

use std::io::{Cursor, Read};

#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("Unsupported file type for text extraction: {0}")]
    UnsupportedType(String),

    #[error("PDF extraction error: {0}")]
    Pdf(String),

    #[error("DOCX extraction error: {0}")]
    Docx(String),
}

/// Extract plain text from resume file bytes, dispatching on the filename
/// extension.
pub fn extract_text(bytes: &[u8], filename: &str) -> Result<String, ExtractionError> {
    match file_extension(filename).as_deref() {
        Some("pdf") => extract_pdf_text(bytes),
        Some("docx") => extract_docx_text(bytes),
        other => Err(ExtractionError::UnsupportedType(
            other.unwrap_or("<none>").to_string(),
        )),
    }
}

/// Lowercased extension of a filename, if any
pub fn file_extension(filename: &str) -> Option<String> {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| !ext.is_empty())
}

fn extract_pdf_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    pdf_extract::extract_text_from_mem(bytes)
        .map(|text| text.trim().to_string())
        .map_err(|e| ExtractionError::Pdf(e.to_string()))
}

fn extract_docx_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| ExtractionError::Docx(e.to_string()))?;

    let mut document_xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|e| ExtractionError::Docx(format!("missing document part: {}", e)))?
        .read_to_string(&mut document_xml)
        .map_err(|e| ExtractionError::Docx(e.to_string()))?;

    Ok(strip_wordprocessing_markup(&document_xml))
}

/// Reduce WordprocessingML to plain text: paragraph ends become newlines,
/// tabs become tabs, all other tags are dropped, entities are decoded.
fn strip_wordprocessing_markup(xml: &str) -> String {
    let with_breaks = xml
        .replace("</w:p>", "\n")
        .replace("<w:tab/>", "\t")
        .replace("<w:br/>", "\n");

    let mut text = String::with_capacity(with_breaks.len() / 4);
    let mut in_tag = false;
    for c in with_breaks.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            c if !in_tag => text.push(c),
            _ => {}
        }
    }

    let decoded = text
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'");

    decoded.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::FileOptions;

    fn build_docx(document_xml: &str) -> Vec<u8> {
        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = zip::ZipWriter::new(&mut cursor);
            writer
                .start_file("word/document.xml", FileOptions::default())
                .unwrap();
            writer.write_all(document_xml.as_bytes()).unwrap();
            writer.finish().unwrap();
        }
        cursor.into_inner()
    }

    #[test]
    fn test_file_extension() {
        assert_eq!(file_extension("resume.pdf"), Some("pdf".to_string()));
        assert_eq!(file_extension("Resume.DOCX"), Some("docx".to_string()));
        assert_eq!(file_extension("archive.tar.gz"), Some("gz".to_string()));
        assert_eq!(file_extension("noextension"), None);
    }

    #[test]
    fn test_unsupported_extension_rejected() {
        let result = extract_text(b"plain text", "resume.txt");
        assert!(matches!(result, Err(ExtractionError::UnsupportedType(_))));
    }

    #[test]
    fn test_docx_extraction() {
        let xml = r#"<w:document><w:body>
            <w:p><w:r><w:t>Jane Doe</w:t></w:r></w:p>
            <w:p><w:r><w:t>Senior Engineer &amp; Team Lead</w:t></w:r></w:p>
        </w:body></w:document>"#;

        let docx = build_docx(xml);
        let text = extract_text(&docx, "resume.docx").unwrap();

        assert!(text.contains("Jane Doe"));
        assert!(text.contains("Senior Engineer & Team Lead"));
        // Paragraphs are separated by newlines
        let jane_pos = text.find("Jane Doe").unwrap();
        let role_pos = text.find("Senior Engineer").unwrap();
        assert!(text[jane_pos..role_pos].contains('\n'));
    }

    #[test]
    fn test_docx_without_document_part() {
        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = zip::ZipWriter::new(&mut cursor);
            writer
                .start_file("word/other.xml", FileOptions::default())
                .unwrap();
            writer.write_all(b"<x/>").unwrap();
            writer.finish().unwrap();
        }

        let result = extract_text(&cursor.into_inner(), "resume.docx");
        assert!(matches!(result, Err(ExtractionError::Docx(_))));
    }

    #[test]
    fn test_invalid_pdf_is_an_error() {
        let result = extract_text(b"not a pdf at all", "resume.pdf");
        assert!(matches!(result, Err(ExtractionError::Pdf(_))));
    }

    #[test]
    fn test_strip_markup_handles_tabs_and_breaks() {
        let xml = "<w:p><w:r><w:t>left</w:t><w:tab/><w:t>right</w:t></w:r></w:p>";
        let text = strip_wordprocessing_markup(xml);
        assert_eq!(text, "left\tright");
    }
}
