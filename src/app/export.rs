//! Export/download adapter.
//!
//! Serializes the current source document into a single `.html` artifact and
//! writes it to disk with no network involved. The artifact embeds all three
//! logical languages but is served as one web document, which is why both the
//! filename and extension say "html".

use std::path::{Path, PathBuf};

use tracing::info;

use crate::app::preview::compose_export_document;
use crate::app::source_document::SourceDocument;

/// Default artifact filename, dropped into the platform Downloads directory.
pub const EXPORT_FILE_NAME: &str = "promptcoder_project.html";

#[derive(Debug)]
pub enum ExportError {
    /// Every field of the document was blank; there is nothing to save.
    EmptyContent,
    /// Filesystem failure while writing the artifact.
    Io(std::io::Error),
}

impl std::fmt::Display for ExportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportError::EmptyContent => {
                write!(f, "Nothing to download. The editor is empty.")
            }
            ExportError::Io(e) => write!(f, "Failed to write export file: {}", e),
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExportError::EmptyContent => None,
            ExportError::Io(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ExportError {
    fn from(e: std::io::Error) -> Self {
        ExportError::Io(e)
    }
}

/// Default destination: `promptcoder_project.html` in the platform Downloads
/// directory, falling back to the current directory when the platform has no
/// notion of one.
pub fn default_export_path() -> PathBuf {
    dirs::download_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(EXPORT_FILE_NAME)
}

/// Write the document as a single HTML artifact at `path`.
///
/// Fails with [`ExportError::EmptyContent`] when every field is blank after
/// trimming; validation happens before anything touches the filesystem.
pub fn export_to_file(document: &SourceDocument, path: &Path) -> Result<(), ExportError> {
    if document.is_blank() {
        return Err(ExportError::EmptyContent);
    }

    let artifact = compose_export_document(document);
    std::fs::write(path, artifact)?;
    info!("Exported project to {:?}", path);
    Ok(())
}
