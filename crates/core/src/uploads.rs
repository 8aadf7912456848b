//! Dog photo uploads: filename rules and the on-disk upload directory.
//!
//! The stored filename is the only link between a `dogs` row and the bytes
//! on disk. Names are sanitized to a single flat component, so two uploads
//! with the same sanitized name overwrite each other (last writer wins).

use std::io;
use std::path::{Path, PathBuf};

use tokio::sync::{Mutex, MutexGuard};
use unicode_normalization::UnicodeNormalization;

use crate::error::CoreError;
use crate::validation::IMAGE_FILENAME_MAX_LEN;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Image extensions accepted for dog photos (compared lower-cased).
pub const ALLOWED_IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif"];

/// Maximum accepted request body for a photo upload (16 MiB).
pub const MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

/// Default upload directory, relative to the working directory.
pub const DEFAULT_UPLOAD_DIR: &str = "static/uploads";

// ---------------------------------------------------------------------------
// Filename rules
// ---------------------------------------------------------------------------

/// Lower-cased extension after the last `.`, if the name has one.
pub fn extension(filename: &str) -> Option<String> {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
}

/// `true` if `filename` ends in one of [`ALLOWED_IMAGE_EXTENSIONS`] (any case).
pub fn is_allowed_image(filename: &str) -> bool {
    extension(filename).is_some_and(|ext| ALLOWED_IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

/// Reduce an uploaded filename to a safe, flat on-disk name.
///
/// - Only the final path component is kept (`/` and `\` both separate).
/// - Accented letters fold to their ASCII base (`ñ` to `n`); other
///   non-ASCII characters are dropped.
/// - Runs of whitespace collapse to a single `_`.
/// - Anything outside `[A-Za-z0-9._-]` is removed.
/// - Leading and trailing `.` / `_` are stripped.
///
/// The result may be empty; callers must reject that.
pub fn sanitize_filename(raw: &str) -> String {
    let base = raw.rsplit(['/', '\\']).next().unwrap_or("");

    let ascii: String = base.nfkd().filter(char::is_ascii).collect();
    let joined = ascii.split_whitespace().collect::<Vec<_>>().join("_");

    let kept: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect();

    kept.trim_matches(|c| c == '.' || c == '_').to_string()
}

/// Validate an uploaded photo name and return the name it is stored under.
///
/// Rejects unsupported extensions before anything is written, and rejects
/// names that lose their extension or exceed the column width once
/// sanitized.
pub fn accept_image_filename(raw: &str) -> Result<String, CoreError> {
    if !is_allowed_image(raw) {
        return Err(CoreError::Validation(format!(
            "Unsupported image type for '{raw}'. Allowed: {}",
            ALLOWED_IMAGE_EXTENSIONS.join(", ")
        )));
    }

    let sanitized = sanitize_filename(raw);
    if !is_allowed_image(&sanitized) {
        return Err(CoreError::Validation(format!(
            "Image filename '{raw}' is not usable once sanitized"
        )));
    }

    if sanitized.chars().count() > IMAGE_FILENAME_MAX_LEN {
        return Err(CoreError::Validation(format!(
            "Image filename must be at most {IMAGE_FILENAME_MAX_LEN} characters"
        )));
    }

    Ok(sanitized)
}

// ---------------------------------------------------------------------------
// Upload directory
// ---------------------------------------------------------------------------

/// A flat directory holding dog photos keyed by sanitized filename.
///
/// Writers that pair a file with a `dogs` row (store-then-insert on create,
/// delete-then-cleanup on delete) hold [`UploadDir::lock`] for the whole
/// pairing, so a cleanup never removes a file a pending insert is about to
/// reference.
#[derive(Debug)]
pub struct UploadDir {
    root: PathBuf,
    pairing: Mutex<()>,
}

impl UploadDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            pairing: Mutex::new(()),
        }
    }

    /// Serialize file-and-row pairings against each other.
    pub async fn lock(&self) -> MutexGuard<'_, ()> {
        self.pairing.lock().await
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Full path for a stored filename.
    pub fn path_for(&self, filename: &str) -> PathBuf {
        self.root.join(filename)
    }

    /// Create the directory (and parents) if it does not exist yet.
    pub async fn ensure(&self) -> io::Result<()> {
        tokio::fs::create_dir_all(&self.root).await
    }

    /// Write `data` under `filename`, replacing any existing file.
    pub async fn save(&self, filename: &str, data: &[u8]) -> io::Result<PathBuf> {
        self.ensure().await?;
        let path = self.path_for(filename);
        tokio::fs::write(&path, data).await?;
        tracing::debug!(path = %path.display(), bytes = data.len(), "Stored upload");
        Ok(path)
    }

    /// `true` if the directory exists and is not read-only.
    pub async fn is_writable(&self) -> bool {
        match tokio::fs::metadata(&self.root).await {
            Ok(meta) => meta.is_dir() && !meta.permissions().readonly(),
            Err(_) => false,
        }
    }

    /// Remove a stored file. Returns `false` if it was already gone.
    pub async fn remove(&self, filename: &str) -> io::Result<bool> {
        match tokio::fs::remove_file(self.path_for(filename)).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
