use crate::error::SplitError;
use crate::pdf::outline::{read_outline, OutlineEntry};
use anyhow::{Context, Result};
use lopdf::Document;
use std::io::Write;
use std::path::{Path, PathBuf};

pub struct PdfDocument {
    pub doc: Document,
    pub path: PathBuf,
}

impl PdfDocument {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, SplitError> {
        let path = path.as_ref().to_path_buf();
        if !path.is_file() {
            return Err(SplitError::InputNotFound { path });
        }
        let doc = Document::load(&path).map_err(|source| SplitError::UnreadableDocument {
            path: path.clone(),
            source,
        })?;
        Ok(PdfDocument { doc, path })
    }

    pub fn page_count(&self) -> u32 {
        self.doc.get_pages().len() as u32
    }

    pub fn outline(&self) -> Result<Vec<OutlineEntry>> {
        read_outline(&self.doc)
            .with_context(|| format!("Failed to read outline of {}", self.path.display()))
    }

    /// Build a new document holding pages `[start, end)` (0-based) in order.
    pub fn extract_range(&self, start: u32, end: u32) -> Result<Document> {
        let total = self.page_count();
        if start >= end || end > total {
            anyhow::bail!(
                "Page range {}-{} is out of range (1-{})",
                start + 1,
                end,
                total
            );
        }

        let mut new_doc = self.doc.clone();

        // lopdf deletes by 1-based page number
        let pages_to_delete: Vec<u32> = (1..=total)
            .filter(|num| *num <= start || *num > end)
            .collect();
        if !pages_to_delete.is_empty() {
            new_doc.delete_pages(&pages_to_delete);
        }

        // The outline points at pages that no longer exist
        if let Ok(catalog) = new_doc.catalog_mut() {
            catalog.remove(b"Outlines");
        }
        new_doc.prune_objects();

        log::debug!(
            "extracted pages {}-{} of {} ({} object(s))",
            start + 1,
            end,
            self.path.display(),
            new_doc.objects.len()
        );

        Ok(new_doc)
    }

    /// Save through a temporary file in the target directory, so the
    /// destination either holds the complete document or is left untouched.
    pub fn save_atomic<P: AsRef<Path>>(doc: &mut Document, path: P) -> Result<(), SplitError> {
        let path = path.as_ref();
        let write_failed = |source| SplitError::WriteFailed {
            path: path.to_path_buf(),
            source,
        };

        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let mut buffer = Vec::new();
        doc.save_to(&mut buffer)
            .map_err(|e| write_failed(std::io::Error::other(e.to_string())))?;

        let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(write_failed)?;
        tmp.write_all(&buffer).map_err(write_failed)?;
        tmp.flush().map_err(write_failed)?;
        tmp.persist(path).map_err(|e| write_failed(e.error))?;
        Ok(())
    }
}
