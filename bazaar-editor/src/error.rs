//! Editor error types

use std::collections::BTreeSet;

use bazaar_client::ClientError;
use thiserror::Error;

use crate::draft::DraftError;
use crate::media::StagingError;
use crate::validate::ShopFieldName;

/// Edit-session error type
#[derive(Debug, Error)]
pub enum EditorError {
    /// Required shop fields missing — the save never started and no
    /// network call was made
    #[error("required fields missing: {}", .fields.iter().map(|f| f.as_str()).collect::<Vec<_>>().join(", "))]
    Validation { fields: BTreeSet<ShopFieldName> },

    /// Local draft mutation rejected (feature cap, unknown id)
    #[error(transparent)]
    Draft(#[from] DraftError),

    /// Staged file rejected locally (kind mismatch, size, format)
    #[error(transparent)]
    Staging(#[from] StagingError),

    /// The session cookie is invalid; the whole save sequence was
    /// aborted and the user must re-authenticate
    #[error("authentication required")]
    AuthRequired,

    /// Cancel requested while a save is in flight
    #[error("a save is in flight")]
    SaveInFlight,

    /// Operation requires editing mode
    #[error("no edit in progress")]
    NotEditing,

    /// Operation requires viewing mode
    #[error("an edit is already in progress")]
    NotViewing,

    /// Fetch failed while opening or rolling back a session
    #[error("client error: {0}")]
    Client(#[from] ClientError),
}

impl EditorError {
    /// Staging rejections surface as [`EditorError::Staging`], not
    /// nested inside [`EditorError::Draft`]
    pub(crate) fn from_draft(err: DraftError) -> Self {
        match err {
            DraftError::Staging(e) => EditorError::Staging(e),
            other => EditorError::Draft(other),
        }
    }
}
