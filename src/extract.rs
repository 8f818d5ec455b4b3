//! Text-extraction seam and upload validation.
//!
//! The [`TextExtractor`] trait is the boundary behind which file-format
//! parsing lives. [`PlainTextExtractor`] handles the formats that are
//! plain text already; PDF and DOCX extraction is delegated to external
//! implementations of the trait.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::document::DocumentMetadata;
use crate::error::{RagError, Result};

/// Maximum accepted upload size in bytes (10 MB).
pub const MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

/// Check an upload against [`MAX_FILE_SIZE`].
pub fn validate_file_size(size: usize) -> bool {
    size <= MAX_FILE_SIZE
}

/// Supported upload formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    /// PDF document.
    Pdf,
    /// Word document.
    Docx,
    /// Plain text file.
    Txt,
    /// Markdown file (`.md` or `.markdown`).
    Markdown,
}

impl FileType {
    /// Determine the file type from a filename's extension.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::UnsupportedFileType`] for unknown extensions
    /// or filenames without one.
    pub fn from_filename(filename: &str) -> Result<Self> {
        let extension = filename.rsplit('.').next().unwrap_or("").to_ascii_lowercase();
        match extension.as_str() {
            "pdf" => Ok(Self::Pdf),
            "docx" => Ok(Self::Docx),
            "txt" => Ok(Self::Txt),
            "md" | "markdown" => Ok(Self::Markdown),
            _ => Err(RagError::UnsupportedFileType(extension)),
        }
    }

    /// The canonical lowercase name of this file type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Docx => "docx",
            Self::Txt => "txt",
            Self::Markdown => "md",
        }
    }
}

/// The result of extracting text from an uploaded file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExtractedDocument {
    /// The extracted text content.
    pub content: String,
    /// Metadata gathered during extraction.
    pub metadata: DocumentMetadata,
}

/// A service that extracts text from uploaded file bytes.
///
/// Invoked once per uploaded document, before chunking.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    /// Extract text and metadata from the given file bytes.
    async fn extract(&self, bytes: &[u8], file_type: FileType) -> Result<ExtractedDocument>;
}

/// Extractor for formats that are already plain text.
///
/// Handles [`FileType::Txt`] and [`FileType::Markdown`]. Markdown files
/// get their title from the first level-one heading. Binary formats
/// (PDF, DOCX) are refused; wire up a format-specific [`TextExtractor`]
/// for those.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextExtractor;

#[async_trait]
impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, bytes: &[u8], file_type: FileType) -> Result<ExtractedDocument> {
        match file_type {
            FileType::Txt | FileType::Markdown => {}
            other => {
                return Err(RagError::Extraction(format!(
                    "no built-in extractor for {} documents",
                    other.as_str()
                )));
            }
        }

        let content = std::str::from_utf8(bytes)
            .map_err(|e| RagError::Extraction(format!("file is not valid UTF-8: {e}")))?
            .to_string();

        let title = match file_type {
            FileType::Markdown => content.lines().find_map(|line| {
                line.strip_prefix('#')
                    .filter(|rest| rest.chars().next().is_some_and(char::is_whitespace))
                    .map(|rest| rest.trim().to_string())
            }),
            _ => None,
        };

        let word_count = content.split_whitespace().count();

        Ok(ExtractedDocument {
            content,
            metadata: DocumentMetadata {
                title,
                author: None,
                pages: None,
                word_count: Some(word_count),
            },
        })
    }
}
