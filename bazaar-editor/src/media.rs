//! Media staging
//!
//! Turns a locally chosen file into a tracked [`PendingMedia`] record:
//! the raw bytes, a SHA-256 content hash, and a local preview reference.
//! Previews are single-owner resources — every staged file must be
//! released exactly once, when superseded, rolled back, or replaced by
//! a canonical remote URL after upload. [`MediaStager`] keeps the
//! registry of live previews so leaks are observable.

use std::collections::HashSet;

use sha2::{Digest, Sha256};
use shared::models::MediaFile;
use thiserror::Error;
use uuid::Uuid;

/// Supported image formats
const SUPPORTED_IMAGE_FORMATS: &[&str] = &["png", "jpg", "jpeg", "webp"];

/// Maximum image size (5MB)
pub const MAX_IMAGE_SIZE: u64 = 5 * 1024 * 1024;

/// Maximum video size (100MB)
pub const MAX_VIDEO_SIZE: u64 = 100 * 1024 * 1024;

/// Kind of media a slot accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
        }
    }

    fn max_size(&self) -> u64 {
        match self {
            MediaKind::Image => MAX_IMAGE_SIZE,
            MediaKind::Video => MAX_VIDEO_SIZE,
        }
    }

    fn matches_mime(&self, mime: &str) -> bool {
        match self {
            MediaKind::Image => mime.starts_with("image/"),
            MediaKind::Video => mime.starts_with("video/"),
        }
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Staging validation error — resolved entirely client-side, never
/// reaches the network
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StagingError {
    #[error("expected {expected} file, found \"{found}\"")]
    InvalidKind { expected: MediaKind, found: String },

    #[error("file too large: {size} bytes (max {max})")]
    TooLarge { size: u64, max: u64 },

    #[error("unsupported image format: {0}")]
    Unsupported(String),
}

/// Handle to a locally created preview resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewRef {
    id: Uuid,
    uri: String,
}

impl PreviewRef {
    /// Local URI the host UI can render (`local://preview/<uuid>`)
    pub fn uri(&self) -> &str {
        &self.uri
    }
}

/// A staged file: raw upload payload + content hash + live preview
#[derive(Debug, Clone)]
pub struct PendingMedia {
    pub file: MediaFile,
    /// SHA-256 of the content, used by the server for dedup
    pub hash: String,
    pub preview: PreviewRef,
}

/// Registry of live local previews.
///
/// Owned by the edit session; dropping the session drops every handle.
#[derive(Debug, Default)]
pub struct MediaStager {
    previews: HashSet<Uuid>,
}

impl MediaStager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and stage a locally chosen file.
    ///
    /// Rejects MIME-kind mismatches, oversize files, and images outside
    /// the supported-format whitelist. On success the returned
    /// [`PendingMedia`] holds a freshly registered preview which the
    /// caller owns until [`release`](Self::release).
    pub fn stage(&mut self, file: MediaFile, kind: MediaKind) -> Result<PendingMedia, StagingError> {
        let mime = resolve_mime(&file);
        if !kind.matches_mime(&mime) {
            return Err(StagingError::InvalidKind {
                expected: kind,
                found: mime,
            });
        }

        let size = file.size();
        if size > kind.max_size() {
            return Err(StagingError::TooLarge {
                size,
                max: kind.max_size(),
            });
        }

        if kind == MediaKind::Image {
            let ext = extension(&file.name);
            if !SUPPORTED_IMAGE_FORMATS.contains(&ext.as_str()) {
                return Err(StagingError::Unsupported(ext));
            }
        }

        let hash = calculate_hash(&file.bytes);
        let id = Uuid::new_v4();
        self.previews.insert(id);
        tracing::debug!(name = %file.name, size = size, kind = %kind, "media staged");

        Ok(PendingMedia {
            file,
            hash,
            preview: PreviewRef {
                id,
                uri: format!("local://preview/{}", id),
            },
        })
    }

    /// Release a preview resource. Idempotent: releasing an already
    /// released handle is a no-op, never a double-free.
    pub fn release(&mut self, preview: &PreviewRef) -> bool {
        let removed = self.previews.remove(&preview.id);
        if removed {
            tracing::debug!(uri = %preview.uri, "preview released");
        }
        removed
    }

    /// Whether a preview handle is still live
    pub fn is_active(&self, preview: &PreviewRef) -> bool {
        self.previews.contains(&preview.id)
    }

    /// Number of live previews (leak accounting)
    pub fn active_previews(&self) -> usize {
        self.previews.len()
    }
}

/// Calculate SHA256 hash of data
fn calculate_hash(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Picker MIME, falling back to a guess from the file name
fn resolve_mime(file: &MediaFile) -> String {
    if !file.mime.is_empty() {
        return file.mime.clone();
    }
    mime_guess::from_path(&file.name)
        .first_or_octet_stream()
        .to_string()
}

fn extension(name: &str) -> String {
    std::path::Path::new(name)
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}
