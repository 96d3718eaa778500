//! Turning a `--input` argument into analysable text.
//!
//! An input is either stdin (`-`), a path, or literal text. An argument that
//! names an existing file, or looks like a path, is read as a file so a
//! mistyped path fails instead of being analysed as text. Files ending in `.pdf` (or starting with the `%PDF-` header) go
//! through `pdf-extract`; everything else must be UTF-8 text.

use std::io::Read;
use std::path::{Path, PathBuf};

use pdf_extract::extract_text_from_mem;
use thiserror::Error;
use tracing::{debug, warn};

const PDF_MAGIC: &[u8] = b"%PDF-";
const DOCUMENT_EXTENSIONS: &[&str] = &["pdf", "txt", "md", "text"];

#[derive(Debug, Error)]
pub enum DocumentError {
    /// Nothing to analyze: no text supplied, or only whitespace.
    #[error("no content to analyze")]
    Empty,

    /// The file exists but no text could be extracted from it.
    #[error("unreadable document {origin}: {reason}")]
    Unreadable { origin: String, reason: String },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Where the document text comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Stdin,
    File(PathBuf),
    Text(String),
}

impl Input {
    /// Interpret a command-line value: `-` is stdin, an existing file or
    /// anything shaped like a path is a file, the rest is the document text.
    pub fn from_arg(arg: &str) -> Self {
        if arg == "-" {
            return Input::Stdin;
        }
        let path = Path::new(arg);
        if path.is_file() || looks_like_path(arg) {
            Input::File(path.to_path_buf())
        } else {
            Input::Text(arg.to_string())
        }
    }

    fn label(&self) -> String {
        match self {
            Input::Stdin => "<stdin>".to_string(),
            Input::File(path) => path.display().to_string(),
            Input::Text(_) => "<text>".to_string(),
        }
    }
}

/// Raw document text and a label describing its origin.
#[derive(Debug, Clone)]
pub struct Document {
    pub source: String,
    pub text: String,
}

/// Read the text behind `input`.
pub fn load(input: &Input) -> Result<Document, DocumentError> {
    let source = input.label();

    let text = match input {
        Input::Text(text) => text.clone(),
        Input::Stdin => {
            let mut bytes = Vec::new();
            std::io::stdin()
                .read_to_end(&mut bytes)
                .map_err(|source| DocumentError::Io {
                    path: PathBuf::from("<stdin>"),
                    source,
                })?;
            decode(&bytes, &source)?
        }
        Input::File(path) => {
            let bytes = std::fs::read(path).map_err(|source| DocumentError::Io {
                path: path.clone(),
                source,
            })?;
            if is_pdf(path, &bytes) {
                extract_pdf(&bytes, &source)?
            } else {
                decode(&bytes, &source)?
            }
        }
    };

    if text.trim().is_empty() {
        return Err(DocumentError::Empty);
    }

    debug!(source = %source, chars = text.chars().count(), "loaded document");
    Ok(Document { source, text })
}

/// Build a document from bytes already in memory (e.g. an upload).
pub fn from_bytes(bytes: &[u8], name: &str) -> Result<Document, DocumentError> {
    let text = if is_pdf(Path::new(name), bytes) {
        extract_pdf(bytes, name)?
    } else {
        decode(bytes, name)?
    };

    if text.trim().is_empty() {
        return Err(DocumentError::Empty);
    }

    Ok(Document {
        source: name.to_string(),
        text,
    })
}

/// A single whitespace-free token with a separator or a document extension.
fn looks_like_path(arg: &str) -> bool {
    if arg.is_empty() || arg.chars().any(char::is_whitespace) {
        return false;
    }
    let has_separator = arg.contains('/') || arg.contains(std::path::MAIN_SEPARATOR);
    let has_extension = Path::new(arg)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| DOCUMENT_EXTENSIONS.iter().any(|d| e.eq_ignore_ascii_case(d)));
    has_separator || has_extension
}

fn is_pdf(path: &Path, bytes: &[u8]) -> bool {
    let by_extension = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("pdf"));
    by_extension || bytes.starts_with(PDF_MAGIC)
}

fn decode(bytes: &[u8], origin: &str) -> Result<String, DocumentError> {
    String::from_utf8(bytes.to_vec()).map_err(|e| DocumentError::Unreadable {
        origin: origin.to_string(),
        reason: format!("not valid UTF-8 text ({})", e.utf8_error()),
    })
}

fn extract_pdf(bytes: &[u8], origin: &str) -> Result<String, DocumentError> {
    let unreadable = |reason: String| DocumentError::Unreadable {
        origin: origin.to_string(),
        reason,
    };

    // pdf-extract panics on some malformed files instead of returning an error
    match std::panic::catch_unwind(|| extract_text_from_mem(bytes)) {
        Ok(Ok(text)) => {
            if text.trim().is_empty() {
                warn!(source = origin, "PDF contains no extractable text (scanned?)");
            }
            Ok(text)
        }
        Ok(Err(e)) => Err(unreadable(e.to_string())),
        Err(_) => Err(unreadable("PDF parser failed on this file".to_string())),
    }
}
