// PDF rendering for generated documents
use anyhow::Result;
use printpdf::*;

/// A4 page geometry in millimetres
const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const LEFT_MARGIN: f32 = 20.0;
const TOP_MARGIN: f32 = 277.0;
const BOTTOM_MARGIN: f32 = 20.0;

/// Characters per wrapped body line at 11pt Helvetica on an A4 page
const BODY_WRAP_COLS: usize = 90;

/// How a source line should be laid out
#[derive(Debug, PartialEq, Eq)]
enum LineKind {
    Heading1(String),
    Heading2(String),
    Bullet(String),
    Paragraph(String),
    Blank,
}

/// Renders generated markdown-ish text into an A4 PDF.
///
/// Understands the subset of markdown the generation prompts ask for:
/// `#`/`##` section headings and `-`/`*` bullets. Inline emphasis markers
/// are stripped rather than styled.
#[derive(Debug)]
pub struct PdfService;

impl PdfService {
    pub fn new() -> Self {
        Self
    }

    /// Render document text to PDF bytes
    pub fn render_document(&self, title: &str, content: &str) -> Result<Vec<u8>> {
        let (doc, page1, layer1) = PdfDocument::new(title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");

        let font_bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;
        let font_regular = doc.add_builtin_font(BuiltinFont::Helvetica)?;

        let mut current_layer = doc.get_page(page1).get_layer(layer1);
        let mut current_y = Mm(TOP_MARGIN);

        for line in content.lines() {
            let kind = classify_line(line);

            let (text, font, size, advance) = match &kind {
                LineKind::Blank => {
                    current_y -= Mm(4.0);
                    continue;
                }
                LineKind::Heading1(t) => (t.clone(), &font_bold, 16.0, 9.0),
                LineKind::Heading2(t) => (t.clone(), &font_bold, 13.0, 7.5),
                LineKind::Bullet(t) => (format!("\u{2022} {}", t), &font_regular, 11.0, 5.5),
                LineKind::Paragraph(t) => (t.clone(), &font_regular, 11.0, 5.5),
            };

            for wrapped in wrap_text(&text, BODY_WRAP_COLS) {
                if current_y < Mm(BOTTOM_MARGIN) {
                    let (page, layer) =
                        doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
                    current_layer = doc.get_page(page).get_layer(layer);
                    current_y = Mm(TOP_MARGIN);
                }
                current_layer.use_text(&wrapped, size, Mm(LEFT_MARGIN), current_y, font);
                current_y -= Mm(advance);
            }

            // Extra spacing after headings
            if matches!(kind, LineKind::Heading1(_) | LineKind::Heading2(_)) {
                current_y -= Mm(2.0);
            }
        }

        let bytes = doc.save_to_bytes()?;
        Ok(bytes)
    }
}

impl Default for PdfService {
    fn default() -> Self {
        Self::new()
    }
}

/// Classify a raw source line into its layout kind
fn classify_line(line: &str) -> LineKind {
    let trimmed = line.trim_end();

    if trimmed.trim().is_empty() {
        return LineKind::Blank;
    }

    if let Some(rest) = trimmed.strip_prefix("## ") {
        return LineKind::Heading2(strip_emphasis(rest));
    }
    if let Some(rest) = trimmed.strip_prefix("# ") {
        return LineKind::Heading1(strip_emphasis(rest));
    }
    // Deeper heading levels render like subsection headings
    if let Some(rest) = trimmed.trim_start_matches('#').strip_prefix(' ') {
        if trimmed.starts_with("###") {
            return LineKind::Heading2(strip_emphasis(rest));
        }
    }

    let stripped = trimmed.trim_start();
    if let Some(rest) = stripped.strip_prefix("- ") {
        return LineKind::Bullet(strip_emphasis(rest));
    }
    if let Some(rest) = stripped.strip_prefix("* ") {
        return LineKind::Bullet(strip_emphasis(rest));
    }

    LineKind::Paragraph(strip_emphasis(trimmed))
}

/// Remove inline markdown emphasis markers (builtin PDF fonts carry no
/// per-span styling here)
fn strip_emphasis(text: &str) -> String {
    text.replace("**", "").replace('`', "")
}

/// Greedy word wrap to a column limit
fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current = word.to_string();
        } else if current.len() + 1 + word.len() <= max_chars {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(current);
            current = word.to_string();
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_text_respects_limit() {
        let lines = wrap_text("one two three four five six seven eight", 12);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(line.len() <= 12, "line too long: '{}'", line);
        }
    }

    #[test]
    fn test_wrap_text_keeps_long_word() {
        let lines = wrap_text("supercalifragilisticexpialidocious", 10);
        assert_eq!(lines, vec!["supercalifragilisticexpialidocious"]);
    }

    #[test]
    fn test_classify_headings_and_bullets() {
        assert_eq!(
            classify_line("# Experience"),
            LineKind::Heading1("Experience".to_string())
        );
        assert_eq!(
            classify_line("## Skills"),
            LineKind::Heading2("Skills".to_string())
        );
        assert_eq!(
            classify_line("### Tools"),
            LineKind::Heading2("Tools".to_string())
        );
        assert_eq!(
            classify_line("- Built things"),
            LineKind::Bullet("Built things".to_string())
        );
        assert_eq!(
            classify_line("* Shipped things"),
            LineKind::Bullet("Shipped things".to_string())
        );
        assert_eq!(classify_line("   "), LineKind::Blank);
    }

    #[test]
    fn test_strip_emphasis() {
        assert_eq!(strip_emphasis("**bold** and `code`"), "bold and code");
    }

    #[test]
    fn test_render_document_produces_pdf_bytes() {
        let service = PdfService::new();
        let bytes = service
            .render_document(
                "cover_letter_G_TEST01.pdf",
                "# Cover Letter\n\nDear Hiring Manager,\n\n- Ten years of Rust\n- Ships on time",
            )
            .expect("render failed");

        // PDF files start with the %PDF magic
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_render_document_handles_many_pages() {
        let service = PdfService::new();
        let long_text = "A line of body text that will be repeated.\n".repeat(300);
        let bytes = service
            .render_document("resume_rewrite_G_TEST02.pdf", &long_text)
            .expect("render failed");
        assert!(bytes.starts_with(b"%PDF"));
    }
}
