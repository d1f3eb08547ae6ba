//! Edit-session state machine
//!
//! [`ShopEditor`] owns the canonical snapshot, at most one draft, and
//! the preview registry. Mode transitions:
//!
//! - `Viewing --open_edit--> Editing` (snapshot into a fresh draft)
//! - `Editing --request_save--> Saving` only when validation passes
//! - `Saving --all ok--> Viewing` (draft committed as canonical)
//! - `Saving --any failed--> Editing` (report retained for display)
//! - `Editing --request_cancel--> Viewing` (full rollback + re-fetch)
//!
//! Cancel is disabled while a save is in flight. There is no terminal
//! state; dropping the editor discards all local state, previews
//! included.

use std::collections::BTreeSet;
use std::sync::Arc;

use bazaar_client::StorefrontApi;
use shared::models::{Event, Feature, MediaFile, Product, ShopProfile, SocialMediaEntry};

use crate::draft::{DraftStore, EventField, ProductField, ShopField};
use crate::error::EditorError;
use crate::media::MediaStager;
use crate::report::SaveReport;
use crate::save::run_save;
use crate::validate::validate_shop;

/// Session mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EditorMode {
    Viewing,
    Editing,
    Saving,
}

/// One seller's draft-editing session
pub struct ShopEditor {
    api: Arc<dyn StorefrontApi>,
    shop_id: String,
    shop: ShopProfile,
    products: Vec<Product>,
    events: Vec<Event>,
    mode: EditorMode,
    draft: Option<DraftStore>,
    stager: MediaStager,
    last_report: Option<SaveReport>,
}

impl ShopEditor {
    /// Fetch the canonical state and open a session in `Viewing` mode
    pub async fn open(
        api: Arc<dyn StorefrontApi>,
        shop_id: impl Into<String>,
    ) -> Result<Self, EditorError> {
        let shop_id = shop_id.into();
        let shop = api.fetch_shop_profile(&shop_id).await?;
        let products = api.fetch_products(&shop_id).await?;
        let events = api.fetch_events(&shop_id).await?;
        tracing::info!(
            shop_id = %shop_id,
            products = products.len(),
            events = events.len(),
            "edit session opened"
        );
        Ok(Self {
            api,
            shop_id,
            shop,
            products,
            events,
            mode: EditorMode::Viewing,
            draft: None,
            stager: MediaStager::new(),
            last_report: None,
        })
    }

    // ==================== read access ====================

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    /// The profile as the user currently sees it (draft while editing)
    pub fn shop(&self) -> &ShopProfile {
        match &self.draft {
            Some(draft) => draft.shop().profile(),
            None => &self.shop,
        }
    }

    /// Visible product list (draft projection while editing)
    pub fn products(&self) -> Vec<&Product> {
        match &self.draft {
            Some(draft) => draft.products().iter().map(|p| p.entity()).collect(),
            None => self.products.iter().collect(),
        }
    }

    /// Visible event list (draft projection while editing)
    pub fn events(&self) -> Vec<&Event> {
        match &self.draft {
            Some(draft) => draft.events().iter().map(|e| e.entity()).collect(),
            None => self.events.iter().collect(),
        }
    }

    /// The current draft, if an edit is in progress
    pub fn draft(&self) -> Option<&DraftStore> {
        self.draft.as_ref()
    }

    /// Outcome of the last save attempt, per operation
    pub fn current_report(&self) -> Option<&SaveReport> {
        self.last_report.as_ref()
    }

    /// Whether the draft has unsaved changes (cancel-confirmation UX)
    pub fn is_dirty(&self) -> bool {
        self.draft.as_ref().is_some_and(|d| d.is_dirty())
    }

    /// Live local preview count (leak accounting)
    pub fn active_previews(&self) -> usize {
        self.stager.active_previews()
    }

    // ==================== transitions ====================

    /// `Viewing -> Editing`: snapshot canonical data into a fresh draft
    pub fn open_edit(&mut self) -> Result<(), EditorError> {
        if self.mode != EditorMode::Viewing {
            return Err(EditorError::NotViewing);
        }
        self.draft = Some(DraftStore::new(
            self.shop.clone(),
            self.products.clone(),
            self.events.clone(),
        ));
        self.mode = EditorMode::Editing;
        Ok(())
    }

    /// Validate, then run the save sequence.
    ///
    /// `Ok(report)` means the sequence ran to completion; the session is
    /// `Viewing` when every attempted operation succeeded, otherwise it
    /// stays `Editing` with the report retained. `Err(Validation)` means
    /// nothing was sent; `Err(AuthRequired)` means the sequence was
    /// aborted mid-way.
    pub async fn request_save(&mut self) -> Result<&SaveReport, EditorError> {
        if self.mode != EditorMode::Editing {
            return Err(EditorError::NotEditing);
        }
        {
            let draft = self.draft.as_ref().ok_or(EditorError::NotEditing)?;
            if let Err(fields) = validate_shop(draft.shop()) {
                tracing::debug!(fields = ?fields, "save blocked by validation");
                return Err(EditorError::Validation { fields });
            }
        }

        self.mode = EditorMode::Saving;
        let api = Arc::clone(&self.api);
        let draft = self.draft.as_mut().ok_or(EditorError::NotEditing)?;
        let run = run_save(api.as_ref(), &self.shop_id, draft, &mut self.stager).await;

        if run.auth_required {
            self.mode = EditorMode::Editing;
            self.last_report = Some(run.report);
            return Err(EditorError::AuthRequired);
        }

        if run.report.all_succeeded() {
            if let Some(draft) = self.draft.take() {
                let (shop, products, events) = draft.commit(&mut self.stager);
                self.shop = shop;
                self.products = products;
                self.events = events;
            }
            self.mode = EditorMode::Viewing;
        } else {
            self.mode = EditorMode::Editing;
        }

        self.last_report = Some(run.report);
        self.last_report.as_ref().ok_or(EditorError::NotEditing)
    }

    /// Full rollback: discard the draft and every staged preview, then
    /// re-fetch the canonical state.
    ///
    /// The fresh state is fetched before the draft is dropped, so a
    /// failed fetch leaves the session in `Editing` with the draft
    /// intact rather than blank.
    pub async fn request_cancel(&mut self) -> Result<(), EditorError> {
        match self.mode {
            EditorMode::Saving => return Err(EditorError::SaveInFlight),
            EditorMode::Viewing => return Ok(()),
            EditorMode::Editing => {}
        }

        let shop = self.api.fetch_shop_profile(&self.shop_id).await?;
        let products = self.api.fetch_products(&self.shop_id).await?;
        let events = self.api.fetch_events(&self.shop_id).await?;

        if let Some(mut draft) = self.draft.take() {
            draft.release_all_media(&mut self.stager);
        }
        self.shop = shop;
        self.products = products;
        self.events = events;
        self.last_report = None;
        self.mode = EditorMode::Viewing;
        tracing::info!(shop_id = %self.shop_id, "edit cancelled, draft rolled back");
        Ok(())
    }

    // ==================== draft mutations ====================
    // Thin pass-throughs so the host UI talks to one surface; each
    // requires an edit in progress.

    pub fn set_shop_field(&mut self, field: ShopField) -> Result<(), EditorError> {
        self.editing_draft()?.set_shop_field(field);
        Ok(())
    }

    pub fn set_product_field(&mut self, id: &str, field: ProductField) -> Result<(), EditorError> {
        self.editing_draft()?.set_product_field(id, field)?;
        Ok(())
    }

    pub fn set_event_field(&mut self, id: &str, field: EventField) -> Result<(), EditorError> {
        self.editing_draft()?.set_event_field(id, field)?;
        Ok(())
    }

    pub fn add_feature(&mut self, feature: Feature) -> Result<(), EditorError> {
        self.editing_draft()?.add_feature(feature)?;
        Ok(())
    }

    pub fn remove_feature(&mut self, index: usize) -> Result<Option<Feature>, EditorError> {
        Ok(self.editing_draft()?.remove_feature(index))
    }

    pub fn add_social_media(&mut self, entry: SocialMediaEntry) -> Result<(), EditorError> {
        self.editing_draft()?.add_social_media(entry);
        Ok(())
    }

    pub fn remove_social_media(
        &mut self,
        index: usize,
    ) -> Result<Option<SocialMediaEntry>, EditorError> {
        Ok(self.editing_draft()?.remove_social_media(index))
    }

    pub fn stage_logo(&mut self, file: MediaFile) -> Result<(), EditorError> {
        let (draft, stager) = self.editing_draft_with_stager()?;
        draft.stage_logo(file, stager).map_err(EditorError::from_draft)?;
        Ok(())
    }

    pub fn stage_hero_image(&mut self, file: MediaFile) -> Result<(), EditorError> {
        let (draft, stager) = self.editing_draft_with_stager()?;
        draft.stage_hero_image(file, stager).map_err(EditorError::from_draft)?;
        Ok(())
    }

    pub fn stage_about_image(&mut self, file: MediaFile) -> Result<(), EditorError> {
        let (draft, stager) = self.editing_draft_with_stager()?;
        draft.stage_about_image(file, stager).map_err(EditorError::from_draft)?;
        Ok(())
    }

    pub fn stage_product_image(&mut self, id: &str, file: MediaFile) -> Result<(), EditorError> {
        let (draft, stager) = self.editing_draft_with_stager()?;
        draft.stage_product_image(id, file, stager).map_err(EditorError::from_draft)?;
        Ok(())
    }

    pub fn stage_product_video(&mut self, id: &str, file: MediaFile) -> Result<(), EditorError> {
        let (draft, stager) = self.editing_draft_with_stager()?;
        draft.stage_product_video(id, file, stager).map_err(EditorError::from_draft)?;
        Ok(())
    }

    pub fn stage_event_image(&mut self, id: &str, file: MediaFile) -> Result<(), EditorError> {
        let (draft, stager) = self.editing_draft_with_stager()?;
        draft.stage_event_image(id, file, stager).map_err(EditorError::from_draft)?;
        Ok(())
    }

    pub fn mark_product_deleted(&mut self, id: &str) -> Result<bool, EditorError> {
        let (draft, stager) = self.editing_draft_with_stager()?;
        Ok(draft.mark_product_deleted(id, stager))
    }

    pub fn mark_event_deleted(&mut self, id: &str) -> Result<bool, EditorError> {
        let (draft, stager) = self.editing_draft_with_stager()?;
        Ok(draft.mark_event_deleted(id, stager))
    }

    fn editing_draft(&mut self) -> Result<&mut DraftStore, EditorError> {
        if self.mode != EditorMode::Editing {
            return Err(EditorError::NotEditing);
        }
        self.draft.as_mut().ok_or(EditorError::NotEditing)
    }

    fn editing_draft_with_stager(
        &mut self,
    ) -> Result<(&mut DraftStore, &mut MediaStager), EditorError> {
        if self.mode != EditorMode::Editing {
            return Err(EditorError::NotEditing);
        }
        match self.draft.as_mut() {
            Some(draft) => Ok((draft, &mut self.stager)),
            None => Err(EditorError::NotEditing),
        }
    }

    /// Validation-failure field set helper for the host UI
    pub fn validation_errors(&self) -> BTreeSet<crate::validate::ShopFieldName> {
        match &self.draft {
            Some(draft) => validate_shop(draft.shop()).err().unwrap_or_default(),
            None => BTreeSet::new(),
        }
    }
}
