//! Text extraction for uploaded or local documents.
//!
//! Plain text passes through unchanged; PDFs go through `pdf-extract`;
//! DOCX and PPTX are read as ZIP archives and their XML text runs pulled
//! out with `quick-xml`. Word paragraphs and PowerPoint slides become
//! separate lines so the paragraph assembler can prefer them.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

pub const MIME_TEXT: &str = "text/plain";
pub const MIME_MARKDOWN: &str = "text/markdown";
pub const MIME_PDF: &str = "application/pdf";
pub const MIME_DOCX: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const MIME_PPTX: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presentation";

/// Maximum decompressed bytes to read from a single ZIP entry (zip-bomb protection).
const MAX_XML_ENTRY_BYTES: u64 = 50 * 1024 * 1024;

/// Kind of document, decided from a file extension or MIME type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    Text,
    Pdf,
    Docx,
    Pptx,
}

impl ContentType {
    /// Guess from the file extension. Unknown extensions are read as text.
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("pdf") => Self::Pdf,
            Some("docx") => Self::Docx,
            Some("pptx") => Self::Pptx,
            _ => Self::Text,
        }
    }

    /// Map a MIME type (parameters such as `; charset=utf-8` are ignored).
    pub fn from_mime(mime: &str) -> Result<Self, ExtractError> {
        let essence = mime.split(';').next().unwrap_or_default().trim();
        match essence {
            MIME_TEXT | MIME_MARKDOWN | "" => Ok(Self::Text),
            MIME_PDF => Ok(Self::Pdf),
            MIME_DOCX => Ok(Self::Docx),
            MIME_PPTX => Ok(Self::Pptx),
            other => Err(ExtractError::UnsupportedContentType(other.to_string())),
        }
    }
}

#[derive(Debug)]
pub enum ExtractError {
    UnsupportedContentType(String),
    Text(String),
    Pdf(String),
    Ooxml(String),
}

impl std::fmt::Display for ExtractError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtractError::UnsupportedContentType(ct) => {
                write!(f, "unsupported content-type: {}", ct)
            }
            ExtractError::Text(e) => write!(f, "text is not valid UTF-8: {}", e),
            ExtractError::Pdf(e) => write!(f, "PDF extraction failed: {}", e),
            ExtractError::Ooxml(e) => write!(f, "OOXML extraction failed: {}", e),
        }
    }
}

impl std::error::Error for ExtractError {}

/// Extract plain UTF-8 text from document bytes.
pub fn extract_text(bytes: &[u8], content_type: ContentType) -> Result<String, ExtractError> {
    match content_type {
        ContentType::Text => {
            String::from_utf8(bytes.to_vec()).map_err(|e| ExtractError::Text(e.to_string()))
        }
        ContentType::Pdf => extract_pdf(bytes),
        ContentType::Docx => extract_docx(bytes),
        ContentType::Pptx => extract_pptx(bytes),
    }
}

/// Read raw bytes from `path` (or stdin when `path` is `None` or `-`),
/// refusing inputs larger than `max_bytes`.
pub fn read_input(path: Option<&Path>, max_bytes: u64) -> Result<Vec<u8>> {
    match path.filter(|p| p.as_os_str() != "-") {
        Some(path) => {
            let len = std::fs::metadata(path)
                .with_context(|| format!("Failed to read input file: {}", path.display()))?
                .len();
            if len > max_bytes {
                anyhow::bail!(
                    "{} is {} bytes, over the {} byte limit (extract.max_bytes)",
                    path.display(),
                    len,
                    max_bytes
                );
            }
            std::fs::read(path)
                .with_context(|| format!("Failed to read input file: {}", path.display()))
        }
        None => {
            let mut bytes = Vec::new();
            std::io::stdin()
                .take(max_bytes.saturating_add(1))
                .read_to_end(&mut bytes)
                .context("Failed to read stdin")?;
            if bytes.len() as u64 > max_bytes {
                anyhow::bail!("stdin is over the {} byte limit (extract.max_bytes)", max_bytes);
            }
            Ok(bytes)
        }
    }
}

/// Read a document with [`read_input`] and extract its text. The kind is
/// taken from the file extension; stdin is read as plain text.
pub fn read_document(path: Option<&Path>, max_bytes: u64) -> Result<String> {
    let bytes = read_input(path, max_bytes)?;
    let content_type = path
        .filter(|p| p.as_os_str() != "-")
        .map_or(ContentType::Text, ContentType::from_path);

    tracing::debug!(bytes = bytes.len(), ?content_type, "extracting text");
    let text = extract_text(&bytes, content_type)?;
    Ok(text)
}

fn extract_pdf(bytes: &[u8]) -> Result<String, ExtractError> {
    pdf_extract::extract_text_from_mem(bytes).map_err(|e| ExtractError::Pdf(e.to_string()))
}

fn read_zip_entry_bounded(
    archive: &mut zip::ZipArchive<std::io::Cursor<&[u8]>>,
    name: &str,
    max_bytes: u64,
) -> Result<Vec<u8>, ExtractError> {
    let entry = archive
        .by_name(name)
        .map_err(|e| ExtractError::Ooxml(format!("{}: {}", name, e)))?;
    let mut out = Vec::new();
    entry
        .take(max_bytes)
        .read_to_end(&mut out)
        .map_err(|e| ExtractError::Ooxml(e.to_string()))?;
    if out.len() as u64 >= max_bytes {
        return Err(ExtractError::Ooxml(format!(
            "ZIP entry {} exceeds size limit ({} bytes)",
            name, max_bytes
        )));
    }
    Ok(out)
}

fn extract_docx(bytes: &[u8]) -> Result<String, ExtractError> {
    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(bytes))
        .map_err(|e| ExtractError::Ooxml(e.to_string()))?;
    let xml = read_zip_entry_bounded(&mut archive, "word/document.xml", MAX_XML_ENTRY_BYTES)?;
    extract_text_runs(&xml, b"p")
}

fn extract_pptx(bytes: &[u8]) -> Result<String, ExtractError> {
    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(bytes))
        .map_err(|e| ExtractError::Ooxml(e.to_string()))?;
    let mut slide_names: Vec<String> = archive
        .file_names()
        .filter(|n| n.starts_with("ppt/slides/slide") && n.ends_with(".xml"))
        .map(|s| s.to_string())
        .collect();
    slide_names.sort_by_key(|name| {
        name.trim_start_matches("ppt/slides/slide")
            .trim_end_matches(".xml")
            .parse::<u32>()
            .unwrap_or(u32::MAX)
    });

    let mut slides = Vec::with_capacity(slide_names.len());
    for name in slide_names {
        let xml = read_zip_entry_bounded(&mut archive, &name, MAX_XML_ENTRY_BYTES)?;
        let text = extract_text_runs(&xml, b"sld")?;
        let text = text.trim();
        if !text.is_empty() {
            slides.push(text.replace('\n', " "));
        }
    }
    Ok(slides.join("\n"))
}

/// Collect the text of every `<*:t>` element, ending a line whenever a
/// `block` element closes (`w:p` for Word, the whole slide for PowerPoint).
///
/// Runs are concatenated as-is: Word splits words into several runs at
/// formatting edges, and spaces between words live inside the runs
/// (`xml:space="preserve"`), so text is not trimmed. Inside a slide, each
/// closed `a:p` is separated from the next by a space.
fn extract_text_runs(xml: &[u8], block: &[u8]) -> Result<String, ExtractError> {
    use quick_xml::events::Event;

    let mut out = String::new();
    let mut line = String::new();
    let mut reader = quick_xml::Reader::from_reader(xml);
    reader.config_mut().trim_text(false);
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) if e.local_name().as_ref() == b"t" => {
                if let Ok(Event::Text(te)) = reader.read_event_into(&mut buf) {
                    line.push_str(te.unescape().unwrap_or_default().as_ref());
                }
            }
            Ok(Event::End(e)) => {
                let name = e.local_name();
                if name.as_ref() == block {
                    let text = line.trim();
                    if !text.is_empty() {
                        out.push_str(text);
                        out.push('\n');
                    }
                    line.clear();
                } else if name.as_ref() == b"p" && !line.is_empty() && !line.ends_with(' ') {
                    line.push(' ');
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ExtractError::Ooxml(e.to_string())),
            _ => {}
        }
        buf.clear();
    }
    out.push_str(line.trim());
    Ok(out)
}
