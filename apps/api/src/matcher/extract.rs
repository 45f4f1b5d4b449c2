//! Text extraction — turns an uploaded resume into plain text, dispatched on MIME type.

use std::io::{Cursor, Read};

use anyhow::{anyhow, bail, Context};
use quick_xml::events::Event;
use quick_xml::Reader;

use crate::errors::MatchError;

pub const PDF_MIME: &str = "application/pdf";
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const TEXT_MIME: &str = "text/plain";

/// Decompressed size allowed for `word/document.xml`.
pub const MAX_DOCX_DOCUMENT_BYTES: u64 = 16 * 1024 * 1024;

/// Declared content type of an uploaded resume.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResumeMimeType {
    Pdf,
    Docx,
    Text,
    /// Anything else. Extracted as lossy UTF-8 rather than rejected.
    Other(String),
}

impl ResumeMimeType {
    /// Parses a `Content-Type` value, ignoring parameters such as `charset`.
    pub fn from_content_type(content_type: &str) -> Self {
        let essence = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        match essence.as_str() {
            PDF_MIME => ResumeMimeType::Pdf,
            DOCX_MIME => ResumeMimeType::Docx,
            TEXT_MIME => ResumeMimeType::Text,
            _ => ResumeMimeType::Other(essence),
        }
    }

    /// Whether the upload layer accepts this type.
    pub fn is_accepted(&self) -> bool {
        !matches!(self, ResumeMimeType::Other(_))
    }
}

/// A single file-format capability: raw bytes in, plain text out.
pub trait TextExtractor: Send + Sync {
    fn extract_text(&self, bytes: &[u8]) -> anyhow::Result<String>;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn extract_text(&self, bytes: &[u8]) -> anyhow::Result<String> {
        // pdf-extract panics on some malformed documents instead of erroring.
        let outcome = std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes))
            .map_err(|_| anyhow!("PDF parser aborted on malformed input"))?;
        Ok(outcome?)
    }
}

pub struct DocxExtractor {
    pub max_document_bytes: u64,
}

impl TextExtractor for DocxExtractor {
    fn extract_text(&self, bytes: &[u8]) -> anyhow::Result<String> {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;
        let entry = archive
            .by_name("word/document.xml")
            .context("missing word/document.xml")?;

        let limit = self.max_document_bytes;
        if entry.size() > limit {
            bail!("word/document.xml exceeds {limit} bytes once decompressed");
        }

        // The declared size can lie, so the read itself is bounded too.
        let mut xml = String::new();
        entry.take(limit + 1).read_to_string(&mut xml)?;
        if xml.len() as u64 > limit {
            bail!("word/document.xml exceeds {limit} bytes once decompressed");
        }

        docx_paragraphs(&xml).map(|paragraphs| paragraphs.join("\n"))
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract_text(&self, bytes: &[u8]) -> anyhow::Result<String> {
        let text = std::str::from_utf8(strip_bom(bytes)).context("file is not valid UTF-8")?;
        Ok(text.to_string())
    }
}

/// Fallback for undeclared types: decode whatever is there.
pub struct LossyTextExtractor;

impl TextExtractor for LossyTextExtractor {
    fn extract_text(&self, bytes: &[u8]) -> anyhow::Result<String> {
        Ok(String::from_utf8_lossy(strip_bom(bytes)).into_owned())
    }
}

pub fn extractor_for(mime_type: &ResumeMimeType) -> &'static dyn TextExtractor {
    match mime_type {
        ResumeMimeType::Pdf => &PdfExtractor,
        ResumeMimeType::Docx => &DocxExtractor {
            max_document_bytes: MAX_DOCX_DOCUMENT_BYTES,
        },
        ResumeMimeType::Text => &PlainTextExtractor,
        ResumeMimeType::Other(_) => &LossyTextExtractor,
    }
}

/// Extracts text from `bytes`, attaching `file_name` to any failure.
pub fn extract_resume_text(
    bytes: &[u8],
    mime_type: &ResumeMimeType,
    file_name: &str,
) -> Result<String, MatchError> {
    extractor_for(mime_type)
        .extract_text(bytes)
        .map_err(|e| MatchError::Extraction {
            file_name: file_name.to_string(),
            cause: format!("{e:#}"),
        })
}

fn strip_bom(bytes: &[u8]) -> &[u8] {
    bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes)
}

/// Collects the text runs (`w:t`) of every paragraph (`w:p`) in a WordprocessingML body.
fn docx_paragraphs(xml: &str) -> anyhow::Result<Vec<String>> {
    let mut reader = Reader::from_str(xml);
    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut in_text = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.name().as_ref() {
                b"w:t" => in_text = true,
                b"w:p" => current.clear(),
                _ => {}
            },
            Event::Empty(e) => match e.name().as_ref() {
                b"w:tab" => current.push('\t'),
                b"w:br" | b"w:cr" => current.push('\n'),
                _ => {}
            },
            Event::End(e) => match e.name().as_ref() {
                b"w:t" => in_text = false,
                b"w:p" => paragraphs.push(std::mem::take(&mut current)),
                _ => {}
            },
            Event::Text(e) if in_text => current.push_str(&e.xml_content()?),
            Event::GeneralRef(e) if in_text => {
                if let Some(ch) = e.resolve_char_ref()? {
                    current.push(ch);
                } else {
                    let entity = match &*e.decode()? {
                        "amp" => "&",
                        "lt" => "<",
                        "gt" => ">",
                        "quot" => "\"",
                        "apos" => "'",
                        _ => "",
                    };
                    current.push_str(entity);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(paragraphs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn build_docx(document_xml: &str) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file(
                "word/document.xml",
                zip::write::SimpleFileOptions::default(),
            )
            .unwrap();
        writer.write_all(document_xml.as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }

    const DOCUMENT_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p><w:r><w:rPr><w:b/></w:rPr><w:t>Jane Doe</w:t></w:r></w:p>
    <w:p><w:r><w:t xml:space="preserve">Senior engineer, </w:t></w:r><w:r><w:t>R&amp;D team</w:t></w:r></w:p>
  </w:body>
</w:document>"#;

    #[test]
    fn test_mime_type_parsing_ignores_parameters() {
        assert_eq!(
            ResumeMimeType::from_content_type("text/plain; charset=utf-8"),
            ResumeMimeType::Text
        );
        assert_eq!(
            ResumeMimeType::from_content_type("Application/PDF"),
            ResumeMimeType::Pdf
        );
        assert_eq!(
            ResumeMimeType::from_content_type(DOCX_MIME),
            ResumeMimeType::Docx
        );
        assert_eq!(
            ResumeMimeType::from_content_type("image/png"),
            ResumeMimeType::Other("image/png".to_string())
        );
    }

    #[test]
    fn test_only_three_types_are_accepted() {
        assert!(ResumeMimeType::Pdf.is_accepted());
        assert!(ResumeMimeType::Docx.is_accepted());
        assert!(ResumeMimeType::Text.is_accepted());
        assert!(!ResumeMimeType::Other("application/msword".to_string()).is_accepted());
    }

    #[test]
    fn test_plain_text_decodes_utf8() {
        let text = extract_resume_text("Rust · Go".as_bytes(), &ResumeMimeType::Text, "cv.txt")
            .unwrap();
        assert_eq!(text, "Rust · Go");
    }

    #[test]
    fn test_plain_text_strips_bom() {
        let text =
            extract_resume_text(b"\xEF\xBB\xBFhello", &ResumeMimeType::Text, "cv.txt").unwrap();
        assert_eq!(text, "hello");
    }

    #[test]
    fn test_plain_text_invalid_utf8_is_extraction_error() {
        let err = extract_resume_text(&[0x66, 0xFF, 0xFE], &ResumeMimeType::Text, "cv.txt")
            .unwrap_err();
        match err {
            MatchError::Extraction { file_name, .. } => assert_eq!(file_name, "cv.txt"),
            other => panic!("expected extraction error, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_type_falls_back_to_lossy_text() {
        let mime = ResumeMimeType::Other("application/octet-stream".to_string());
        let text = extract_resume_text(&[0x66, 0xFF, 0x6F], &mime, "cv.bin").unwrap();
        assert!(text.starts_with('f'));
        assert!(text.ends_with('o'));
    }

    #[test]
    fn test_docx_extracts_paragraph_text() {
        let bytes = build_docx(DOCUMENT_XML);
        let text = extract_resume_text(&bytes, &ResumeMimeType::Docx, "cv.docx").unwrap();
        assert_eq!(text, "Jane Doe\nSenior engineer, R&D team");
    }

    #[test]
    fn test_docx_without_document_part_fails() {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("word/styles.xml", zip::write::SimpleFileOptions::default())
            .unwrap();
        writer.write_all(b"<w:styles/>").unwrap();
        let bytes = writer.finish().unwrap().into_inner();

        let err = extract_resume_text(&bytes, &ResumeMimeType::Docx, "broken.docx").unwrap_err();
        assert!(err.to_string().contains("broken.docx"));
    }

    fn padded_document(text_len: usize) -> String {
        format!(
            r#"<w:document xmlns:w="x"><w:body><w:p><w:r><w:t>{}</w:t></w:r></w:p></w:body></w:document>"#,
            "a".repeat(text_len)
        )
    }

    #[test]
    fn test_docx_document_over_limit_is_rejected() {
        let bytes = build_docx(&padded_document(4096));
        let extractor = DocxExtractor {
            max_document_bytes: 1024,
        };
        let err = extractor.extract_text(&bytes).unwrap_err();
        assert!(err.to_string().contains("exceeds 1024 bytes"), "{err}");

        let roomy = DocxExtractor {
            max_document_bytes: 8192,
        };
        assert_eq!(roomy.extract_text(&bytes).unwrap(), "a".repeat(4096));
    }

    #[test]
    fn test_highly_compressed_docx_is_extraction_error() {
        let bytes = build_docx(&padded_document(MAX_DOCX_DOCUMENT_BYTES as usize));
        assert!((bytes.len() as u64) < MAX_DOCX_DOCUMENT_BYTES / 100);

        let err = extract_resume_text(&bytes, &ResumeMimeType::Docx, "bomb.docx").unwrap_err();
        match err {
            MatchError::Extraction { file_name, cause } => {
                assert_eq!(file_name, "bomb.docx");
                assert!(cause.contains("exceeds"), "{cause}");
            }
            other => panic!("expected extraction error, got {other:?}"),
        }
    }

    #[test]
    fn test_corrupt_docx_is_extraction_error() {
        let err = extract_resume_text(b"not a zip file", &ResumeMimeType::Docx, "cv.docx")
            .unwrap_err();
        assert!(matches!(err, MatchError::Extraction { .. }));
    }

    #[test]
    fn test_corrupt_pdf_is_extraction_error() {
        let err = extract_resume_text(b"%PDF-1.4 garbage", &ResumeMimeType::Pdf, "cv.pdf")
            .unwrap_err();
        match err {
            MatchError::Extraction { file_name, cause } => {
                assert_eq!(file_name, "cv.pdf");
                assert!(!cause.is_empty());
            }
            other => panic!("expected extraction error, got {other:?}"),
        }
    }
}
