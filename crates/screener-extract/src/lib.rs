//! screener-extract: Résumé text extraction.
//!
//! Turns uploaded résumé files into lower-cased plain text for the ranker.
//! PDFs go through `pdf-extract`; everything else is decoded as UTF-8.
//! Extraction never fails outright: unreadable documents produce the
//! degraded-input sentinel the ranker recognises.

pub mod pdf;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use screener_core::ranker::DEGRADED_MARKER;
use screener_core::traits::TextExtractor;

/// File extensions `load_resumes` picks up from directories.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["pdf", "txt"];

/// Extracts text from PDF and plain-text résumés.
#[derive(Debug, Clone, Default)]
pub struct FileExtractor;

impl FileExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Read and extract a résumé from disk.
    pub fn extract_file(&self, path: &Path) -> Result<String> {
        let bytes =
            std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(self.extract(&bytes, &file_name))
    }
}

impl TextExtractor for FileExtractor {
    fn extract(&self, bytes: &[u8], file_name: &str) -> String {
        if extension(file_name).as_deref() == Some("pdf") {
            match pdf::extract_pdf_text(bytes) {
                Ok(text) => text.to_lowercase(),
                Err(e) => {
                    tracing::warn!("failed to extract {file_name}: {e}");
                    degraded("pdf", &e)
                }
            }
        } else {
            decode_plain(bytes)
        }
    }
}

/// Decode as UTF-8, dropping invalid sequences, and lower-case.
fn decode_plain(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes)
        .replace(char::REPLACEMENT_CHARACTER, "")
        .to_lowercase()
}

/// The sentinel text for a document that could not be read.
pub fn degraded(kind: &str, reason: &str) -> String {
    format!("{DEGRADED_MARKER} {kind}: {reason}").to_lowercase()
}

fn extension(file_name: &str) -> Option<String> {
    Path::new(file_name)
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
}

/// Whether `path` has an extension `load_resumes` accepts.
pub fn is_supported(path: &Path) -> bool {
    path.extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .is_some_and(|e| SUPPORTED_EXTENSIONS.contains(&e.as_str()))
}

/// A résumé read from disk.
#[derive(Debug, Clone)]
pub struct LoadedResume {
    /// File name, used as the candidate's display name.
    pub name: String,
    pub path: PathBuf,
    /// Lower-cased text, or the degraded sentinel.
    pub text: String,
}

/// Extract every résumé in `paths`, expanding directories.
///
/// Directory entries are visited in file-name order and filtered to
/// supported extensions; explicitly named files are always read.
pub fn load_resumes(extractor: &FileExtractor, paths: &[PathBuf]) -> Result<Vec<LoadedResume>> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            let mut entries: Vec<PathBuf> = std::fs::read_dir(path)
                .with_context(|| format!("failed to read directory: {}", path.display()))?
                .filter_map(|e| e.ok().map(|e| e.path()))
                .filter(|p| p.is_file() && is_supported(p))
                .collect();
            entries.sort();
            files.extend(entries);
        } else {
            files.push(path.clone());
        }
    }

    files
        .into_iter()
        .map(|path| {
            let text = extractor.extract_file(&path)?;
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            Ok(LoadedResume { name, path, text })
        })
        .collect()
}
