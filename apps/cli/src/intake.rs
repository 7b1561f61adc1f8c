//! File intake. Files are read as text; bytes that are not valid UTF-8
//! (e.g. inside a PDF) are replaced, not parsed.

use std::path::Path;

use anyhow::{bail, Context, Result};

/// Resume file types accepted, compared case-insensitively.
const RESUME_EXTENSIONS: &[&str] = &["txt", "pdf"];

/// Reads a resume after checking it is a `.txt` or `.pdf` file.
pub async fn read_resume(path: &Path) -> Result<String> {
    let supported = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| RESUME_EXTENSIONS.iter().any(|e| ext.eq_ignore_ascii_case(e)));
    if !supported {
        bail!(
            "Invalid file type '{}': please use a .txt or .pdf file",
            path.display()
        );
    }
    read_text_lossy(path).await
}

pub async fn read_text_lossy(path: &Path) -> Result<String> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read '{}'", path.display()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
