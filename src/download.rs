//! Binary downloads produced by the export and report endpoints.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::error::Result;

/// The two downloadable documents the backend generates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DownloadKind {
    /// CSV export of every merchant.
    CsvExport,
    /// JSON report with merchant statistics.
    Report,
}

impl DownloadKind {
    /// MIME type the payload is saved as.
    #[inline]
    #[must_use]
    pub const fn content_type(self) -> &'static str {
        match self {
            Self::CsvExport => "text/csv",
            Self::Report => "application/json",
        }
    }

    /// File name used when the server does not supply one.
    #[inline]
    #[must_use]
    pub fn default_filename(self, date: NaiveDate) -> String {
        match self {
            Self::CsvExport => format!("merchants_export_{date}.csv"),
            Self::Report => format!("merchant_report_{date}.json"),
        }
    }
}

/// A downloaded document, ready to be saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    /// Target file name (no directory components).
    filename: String,
    /// MIME type of the payload.
    content_type: &'static str,
    /// Raw payload.
    bytes: Vec<u8>,
}

impl Download {
    /// Builds a download, naming it from the `Content-Disposition` header
    /// when it carries a file name and from `kind`'s default pattern
    /// otherwise.
    #[inline]
    #[must_use]
    pub fn new(
        kind: DownloadKind,
        content_disposition: Option<&str>,
        today: NaiveDate,
        bytes: Vec<u8>,
    ) -> Self {
        let filename = content_disposition
            .and_then(filename_from_disposition)
            .unwrap_or_else(|| kind.default_filename(today));
        Self {
            filename,
            content_type: kind.content_type(),
            bytes,
        }
    }

    /// Returns the file name the download will be saved under.
    #[inline]
    #[must_use]
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Returns the MIME type of the payload.
    #[inline]
    #[must_use]
    pub const fn content_type(&self) -> &'static str {
        self.content_type
    }

    /// Returns the raw payload.
    #[inline]
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Writes the payload into `dir` under [`Self::filename`], creating the
    /// directory if needed. Existing files are overwritten.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::MerchantError::Io`] if the directory cannot be
    /// created or the file cannot be written.
    #[inline]
    #[tracing::instrument(skip_all, fields(filename = %self.filename))]
    pub fn save_in(&self, dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(dir)?;
        let path = dir.join(&self.filename);
        fs::write(&path, &self.bytes)?;
        tracing::debug!(path = %path.display(), bytes = self.bytes.len(), "download saved");
        Ok(path)
    }
}

/// Extracts the file name from a `Content-Disposition` header value.
///
/// Takes the text after `filename=` up to the next parameter, strips quotes,
/// and keeps only the final path component. Returns `None` when no usable
/// name is present.
#[must_use]
pub fn filename_from_disposition(header: &str) -> Option<String> {
    let (_, after) = header.split_once("filename=")?;
    let param = after.split(';').next().unwrap_or(after);
    let unquoted: String = param.chars().filter(|&ch| ch != '"').collect();
    let candidate = unquoted.trim();
    Path::new(candidate)
        .file_name()
        .and_then(|name| name.to_str())
        .filter(|name| !name.is_empty())
        .map(str::to_owned)
}
