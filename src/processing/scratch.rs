//! Short-lived on-disk copies of uploads.
//!
//! Extraction libraries want a file path, so each upload is written to a uniquely named file in
//! the scratch directory. The file is removed when the [`ScratchFile`] is dropped, which covers
//! early returns, errors, and unwinding alike. Removal is best-effort.

use super::DocumentKind;
use std::io::{self, Write};
use std::path::Path;
use tempfile::NamedTempFile;

const SCRATCH_PREFIX: &str = "upload-";

/// An upload persisted to scratch storage for the lifetime of one request.
#[derive(Debug)]
pub struct ScratchFile {
    inner: NamedTempFile,
}

impl ScratchFile {
    /// Write `bytes` to a fresh file under `dir`, creating the directory if needed.
    ///
    /// The file name is random and carries the canonical extension for `kind`; the client's
    /// filename is never used as a path component.
    pub fn persist(dir: &Path, kind: DocumentKind, bytes: &[u8]) -> io::Result<Self> {
        std::fs::create_dir_all(dir)?;
        let suffix = format!(".{}", kind.extension());
        let mut inner = tempfile::Builder::new()
            .prefix(SCRATCH_PREFIX)
            .suffix(&suffix)
            .tempfile_in(dir)?;
        inner.write_all(bytes)?;
        inner.flush()?;
        tracing::debug!(path = %inner.path().display(), bytes = bytes.len(), "Persisted upload");
        Ok(Self { inner })
    }

    /// Location of the persisted upload.
    pub fn path(&self) -> &Path {
        self.inner.path()
    }
}
