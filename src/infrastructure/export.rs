//! Writing documents to disk.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::{info, instrument};

use crate::domain::{Document, Renderer};
use crate::infrastructure::error::{InfraError, InfraResult};

/// Serializes `document` with the default indentation and writes it to `path`,
/// replacing any existing file.
pub fn write_document(document: &Document, path: &Path) -> InfraResult<()> {
    write_document_with(document, path, &Renderer::default())
}

/// Like [`write_document`] with an explicit renderer.
#[instrument(level = "debug", skip(document, renderer))]
pub fn write_document_with(
    document: &Document,
    path: &Path,
    renderer: &Renderer,
) -> InfraResult<()> {
    if path.as_os_str().is_empty() || path.is_dir() {
        return Err(InfraError::InvalidPath(path.to_path_buf()));
    }

    let text = document.render_with(renderer);
    let file = File::create(path)
        .map_err(|e| InfraError::io(format!("create {}", path.display()), e))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(text.as_bytes())
        .and_then(|()| writer.flush())
        .map_err(|e| InfraError::io(format!("write {}", path.display()), e))?;

    info!(path = %path.display(), bytes = text.len(), "document written");
    Ok(())
}
