//! Seller draft-editing session
//!
//! The editor core behind the shop-template editors: a local, mutable
//! working copy of the composite shop graph (profile + media + features
//! + social links + products + events), reconciled against the server
//! through a best-effort, partially-failable save protocol with a
//! full-rollback cancel path.
//!
//! Flow: [`ShopEditor::open`] fetches the canonical state and starts in
//! `Viewing`. [`ShopEditor::open_edit`] snapshots it into a
//! [`DraftStore`]; all mutations are local. [`ShopEditor::request_save`]
//! validates, then issues independent persistence operations and folds
//! their outcomes into a [`SaveReport`] — partial success is a normal
//! result, not an exception. [`ShopEditor::request_cancel`] discards the
//! draft wholesale and re-fetches.

pub mod draft;
pub mod error;
pub mod media;
pub mod report;
mod save;
pub mod session;
pub mod validate;

pub use draft::{DraftError, DraftStore, EventField, ProductField, ShopField};
pub use error::EditorError;
pub use media::{MediaKind, MediaStager, PendingMedia, PreviewRef, StagingError};
pub use report::{FailureKind, OpOutcome, SaveEntry, SaveOp, SaveReport};
pub use session::{EditorMode, ShopEditor};
pub use validate::ShopFieldName;
