//! Media file payload

use serde::{Deserialize, Serialize};

/// A locally chosen file, carried as raw bytes until upload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaFile {
    /// Original file name (used for extension/MIME fallback)
    pub name: String,
    /// MIME type as reported by the picker; may be empty
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl MediaFile {
    pub fn new(name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            bytes,
        }
    }

    /// File size in bytes
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}
