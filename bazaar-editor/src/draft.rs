//! Draft store
//!
//! In-memory mutable copy of the composite shop graph. All mutations
//! are pure in-memory operations — nothing here touches the network.
//! Deletions are soft: the entity leaves the visible list and its id
//! enters the matching pending-deletion set in one step; the server
//! record lives on until a save flushes the set.

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use shared::models::{
    Event, EventUpdate, Feature, MediaFile, Product, ProductUpdate, ShopInfoUpdate,
    ShopProfile, SocialMediaEntry, MAX_FEATURES,
};
use thiserror::Error;

use crate::media::{MediaKind, MediaStager, PendingMedia, StagingError};

/// Draft mutation error
#[derive(Debug, Error)]
pub enum DraftError {
    #[error("feature limit reached: at most {} entries", MAX_FEATURES)]
    FeatureLimitReached,

    #[error("unknown product: {0}")]
    UnknownProduct(String),

    #[error("unknown event: {0}")]
    UnknownEvent(String),

    #[error(transparent)]
    Staging(#[from] StagingError),
}

/// Typed shop-profile field mutation
#[derive(Debug, Clone)]
pub enum ShopField {
    Name(String),
    Address(String),
    Phone(String),
    Description(String),
    HeroTagline(String),
    HeroDescription(String),
}

/// Typed product field mutation
#[derive(Debug, Clone)]
pub enum ProductField {
    Name(String),
    Description(String),
    Category(String),
    OriginalPrice(Decimal),
    DiscountPrice(Decimal),
    Stock(i32),
}

/// Typed event field mutation
#[derive(Debug, Clone)]
pub enum EventField {
    Name(String),
    Description(String),
    Category(String),
    OriginalPrice(Decimal),
    DiscountPrice(Decimal),
    Stock(i32),
    StartDate(String),
    FinishDate(String),
}

/// Shop-profile draft: the mutable profile copy plus the three staged
/// media slots the server models as separate resources
#[derive(Debug)]
pub struct ShopDraft {
    pub(crate) profile: ShopProfile,
    pub(crate) pending_logo: Option<PendingMedia>,
    pub(crate) pending_hero: Option<PendingMedia>,
    pub(crate) pending_about: Option<PendingMedia>,
    pub(crate) hero_about_dirty: bool,
}

impl ShopDraft {
    fn new(profile: ShopProfile) -> Self {
        Self {
            profile,
            pending_logo: None,
            pending_hero: None,
            pending_about: None,
            hero_about_dirty: false,
        }
    }

    pub fn profile(&self) -> &ShopProfile {
        &self.profile
    }

    pub fn pending_logo(&self) -> Option<&PendingMedia> {
        self.pending_logo.as_ref()
    }

    /// Hero/about needs a combined update call
    pub(crate) fn needs_hero_about_update(&self) -> bool {
        self.hero_about_dirty || self.pending_hero.is_some() || self.pending_about.is_some()
    }

    /// Full info payload for the always-attempted shop info update
    pub(crate) fn info_update(&self) -> ShopInfoUpdate {
        ShopInfoUpdate {
            name: Some(self.profile.name.clone()),
            description: Some(self.profile.description.clone()),
            address: Some(self.profile.address.clone()),
            phone: Some(self.profile.phone.clone()),
            social_media: Some(self.profile.social_media.clone()),
            features: Some(self.profile.features.clone()),
        }
    }
}

/// Product draft: entity copy + accumulated patch + transient media slots
#[derive(Debug)]
pub struct ProductDraft {
    pub(crate) entity: Product,
    pub(crate) patch: ProductUpdate,
    pub(crate) pending_image: Option<PendingMedia>,
    pub(crate) pending_video: Option<PendingMedia>,
}

impl ProductDraft {
    fn new(entity: Product) -> Self {
        Self {
            entity,
            patch: ProductUpdate::default(),
            pending_image: None,
            pending_video: None,
        }
    }

    pub fn entity(&self) -> &Product {
        &self.entity
    }

    /// Whether this draft has anything the server does not know about
    pub fn is_dirty(&self) -> bool {
        !self.patch.is_empty() || self.pending_image.is_some() || self.pending_video.is_some()
    }

    /// Replace local state with the canonical entity after a successful
    /// update; the patch starts over from clean
    pub(crate) fn adopt(&mut self, canonical: Product) {
        self.entity = canonical;
        self.patch = ProductUpdate::default();
    }
}

/// Event draft, same shape as products minus video
#[derive(Debug)]
pub struct EventDraft {
    pub(crate) entity: Event,
    pub(crate) patch: EventUpdate,
    pub(crate) pending_image: Option<PendingMedia>,
}

impl EventDraft {
    fn new(entity: Event) -> Self {
        Self {
            entity,
            patch: EventUpdate::default(),
            pending_image: None,
        }
    }

    pub fn entity(&self) -> &Event {
        &self.entity
    }

    pub fn is_dirty(&self) -> bool {
        !self.patch.is_empty() || self.pending_image.is_some()
    }

    pub(crate) fn adopt(&mut self, canonical: Event) {
        self.entity = canonical;
        self.patch = EventUpdate::default();
    }
}

/// The draft store: one shop draft, the visible product/event lists,
/// and the two pending-deletion sets.
///
/// An id never appears in a visible list and a deletion set at the same
/// time — [`mark_product_deleted`](Self::mark_product_deleted) moves it
/// atomically.
#[derive(Debug)]
pub struct DraftStore {
    pub(crate) shop: ShopDraft,
    pub(crate) products: Vec<ProductDraft>,
    pub(crate) events: Vec<EventDraft>,
    pub(crate) deleted_products: BTreeSet<String>,
    pub(crate) deleted_events: BTreeSet<String>,
    dirty: bool,
}

impl DraftStore {
    /// Snapshot canonical server state into a fresh draft
    pub fn new(shop: ShopProfile, products: Vec<Product>, events: Vec<Event>) -> Self {
        Self {
            shop: ShopDraft::new(shop),
            products: products.into_iter().map(ProductDraft::new).collect(),
            events: events.into_iter().map(EventDraft::new).collect(),
            deleted_products: BTreeSet::new(),
            deleted_events: BTreeSet::new(),
            dirty: false,
        }
    }

    // ==================== read access ====================

    pub fn shop(&self) -> &ShopDraft {
        &self.shop
    }

    /// Visible product drafts (soft-deleted entries excluded)
    pub fn products(&self) -> &[ProductDraft] {
        &self.products
    }

    /// Visible event drafts (soft-deleted entries excluded)
    pub fn events(&self) -> &[EventDraft] {
        &self.events
    }

    pub fn deleted_products(&self) -> &BTreeSet<String> {
        &self.deleted_products
    }

    pub fn deleted_events(&self) -> &BTreeSet<String> {
        &self.deleted_events
    }

    /// Whether any mutation happened since the snapshot (drives the
    /// cancel-confirmation UX)
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    // ==================== shop mutations ====================

    pub fn set_shop_field(&mut self, field: ShopField) {
        let profile = &mut self.shop.profile;
        match field {
            ShopField::Name(v) => profile.name = v,
            ShopField::Address(v) => profile.address = v,
            ShopField::Phone(v) => profile.phone = v,
            ShopField::Description(v) => profile.description = v,
            ShopField::HeroTagline(v) => {
                profile.hero_tagline = v;
                self.shop.hero_about_dirty = true;
            }
            ShopField::HeroDescription(v) => {
                profile.hero_description = v;
                self.shop.hero_about_dirty = true;
            }
        }
        self.dirty = true;
    }

    /// Append a feature entry. The cap is hard: the call that would
    /// exceed [`MAX_FEATURES`] is rejected, never silently truncated.
    pub fn add_feature(&mut self, feature: Feature) -> Result<(), DraftError> {
        if self.shop.profile.features.len() >= MAX_FEATURES {
            return Err(DraftError::FeatureLimitReached);
        }
        self.shop.profile.features.push(feature);
        self.shop.hero_about_dirty = true;
        self.dirty = true;
        Ok(())
    }

    pub fn remove_feature(&mut self, index: usize) -> Option<Feature> {
        if index >= self.shop.profile.features.len() {
            return None;
        }
        self.shop.hero_about_dirty = true;
        self.dirty = true;
        Some(self.shop.profile.features.remove(index))
    }

    pub fn add_social_media(&mut self, entry: SocialMediaEntry) {
        self.shop.profile.social_media.push(entry);
        self.dirty = true;
    }

    pub fn remove_social_media(&mut self, index: usize) -> Option<SocialMediaEntry> {
        if index >= self.shop.profile.social_media.len() {
            return None;
        }
        self.dirty = true;
        Some(self.shop.profile.social_media.remove(index))
    }

    // ==================== product/event mutations ====================

    pub fn set_product_field(&mut self, id: &str, field: ProductField) -> Result<(), DraftError> {
        let draft = self
            .products
            .iter_mut()
            .find(|p| p.entity.id == id)
            .ok_or_else(|| DraftError::UnknownProduct(id.to_string()))?;

        match field {
            ProductField::Name(v) => {
                draft.entity.name = v.clone();
                draft.patch.name = Some(v);
            }
            ProductField::Description(v) => {
                draft.entity.description = v.clone();
                draft.patch.description = Some(v);
            }
            ProductField::Category(v) => {
                draft.entity.category = v.clone();
                draft.patch.category = Some(v);
            }
            ProductField::OriginalPrice(v) => {
                draft.entity.original_price = v;
                draft.patch.original_price = Some(v);
            }
            ProductField::DiscountPrice(v) => {
                draft.entity.discount_price = v;
                draft.patch.discount_price = Some(v);
            }
            ProductField::Stock(v) => {
                draft.entity.stock = v;
                draft.patch.stock = Some(v);
            }
        }
        self.dirty = true;
        Ok(())
    }

    pub fn set_event_field(&mut self, id: &str, field: EventField) -> Result<(), DraftError> {
        let draft = self
            .events
            .iter_mut()
            .find(|e| e.entity.id == id)
            .ok_or_else(|| DraftError::UnknownEvent(id.to_string()))?;

        match field {
            EventField::Name(v) => {
                draft.entity.name = v.clone();
                draft.patch.name = Some(v);
            }
            EventField::Description(v) => {
                draft.entity.description = v.clone();
                draft.patch.description = Some(v);
            }
            EventField::Category(v) => {
                draft.entity.category = v.clone();
                draft.patch.category = Some(v);
            }
            EventField::OriginalPrice(v) => {
                draft.entity.original_price = v;
                draft.patch.original_price = Some(v);
            }
            EventField::DiscountPrice(v) => {
                draft.entity.discount_price = v;
                draft.patch.discount_price = Some(v);
            }
            EventField::Stock(v) => {
                draft.entity.stock = v;
                draft.patch.stock = Some(v);
            }
            EventField::StartDate(v) => {
                draft.entity.start_date = Some(v.clone());
                draft.patch.start_date = Some(v);
            }
            EventField::FinishDate(v) => {
                draft.entity.finish_date = Some(v.clone());
                draft.patch.finish_date = Some(v);
            }
        }
        self.dirty = true;
        Ok(())
    }

    // ==================== media staging ====================

    pub fn stage_logo(
        &mut self,
        file: MediaFile,
        stager: &mut MediaStager,
    ) -> Result<(), DraftError> {
        let staged = stager.stage(file, MediaKind::Image)?;
        supersede(&mut self.shop.pending_logo, staged, stager);
        self.dirty = true;
        Ok(())
    }

    pub fn stage_hero_image(
        &mut self,
        file: MediaFile,
        stager: &mut MediaStager,
    ) -> Result<(), DraftError> {
        let staged = stager.stage(file, MediaKind::Image)?;
        supersede(&mut self.shop.pending_hero, staged, stager);
        self.shop.hero_about_dirty = true;
        self.dirty = true;
        Ok(())
    }

    pub fn stage_about_image(
        &mut self,
        file: MediaFile,
        stager: &mut MediaStager,
    ) -> Result<(), DraftError> {
        let staged = stager.stage(file, MediaKind::Image)?;
        supersede(&mut self.shop.pending_about, staged, stager);
        self.shop.hero_about_dirty = true;
        self.dirty = true;
        Ok(())
    }

    pub fn stage_product_image(
        &mut self,
        id: &str,
        file: MediaFile,
        stager: &mut MediaStager,
    ) -> Result<(), DraftError> {
        let draft = self
            .products
            .iter_mut()
            .find(|p| p.entity.id == id)
            .ok_or_else(|| DraftError::UnknownProduct(id.to_string()))?;
        let staged = stager.stage(file, MediaKind::Image)?;
        supersede(&mut draft.pending_image, staged, stager);
        self.dirty = true;
        Ok(())
    }

    pub fn stage_product_video(
        &mut self,
        id: &str,
        file: MediaFile,
        stager: &mut MediaStager,
    ) -> Result<(), DraftError> {
        let draft = self
            .products
            .iter_mut()
            .find(|p| p.entity.id == id)
            .ok_or_else(|| DraftError::UnknownProduct(id.to_string()))?;
        let staged = stager.stage(file, MediaKind::Video)?;
        supersede(&mut draft.pending_video, staged, stager);
        self.dirty = true;
        Ok(())
    }

    pub fn stage_event_image(
        &mut self,
        id: &str,
        file: MediaFile,
        stager: &mut MediaStager,
    ) -> Result<(), DraftError> {
        let draft = self
            .events
            .iter_mut()
            .find(|e| e.entity.id == id)
            .ok_or_else(|| DraftError::UnknownEvent(id.to_string()))?;
        let staged = stager.stage(file, MediaKind::Image)?;
        supersede(&mut draft.pending_image, staged, stager);
        self.dirty = true;
        Ok(())
    }

    // ==================== soft delete ====================

    /// Move a product out of the visible list into the pending-deletion
    /// set. Idempotent; refuses empty ids (a never-persisted entity
    /// cannot be targeted by a delete). Staged media on the removed
    /// entity is released — it can never be uploaded.
    pub fn mark_product_deleted(&mut self, id: &str, stager: &mut MediaStager) -> bool {
        if id.is_empty() {
            tracing::warn!("refusing to mark product with empty id as deleted");
            return false;
        }
        if let Some(pos) = self.products.iter().position(|p| p.entity.id == id) {
            let mut removed = self.products.remove(pos);
            if let Some(m) = removed.pending_image.take() {
                stager.release(&m.preview);
            }
            if let Some(m) = removed.pending_video.take() {
                stager.release(&m.preview);
            }
            self.deleted_products.insert(id.to_string());
            self.dirty = true;
            return true;
        }
        self.deleted_products.contains(id)
    }

    /// Event counterpart of [`mark_product_deleted`](Self::mark_product_deleted)
    pub fn mark_event_deleted(&mut self, id: &str, stager: &mut MediaStager) -> bool {
        if id.is_empty() {
            tracing::warn!("refusing to mark event with empty id as deleted");
            return false;
        }
        if let Some(pos) = self.events.iter().position(|e| e.entity.id == id) {
            let mut removed = self.events.remove(pos);
            if let Some(m) = removed.pending_image.take() {
                stager.release(&m.preview);
            }
            self.deleted_events.insert(id.to_string());
            self.dirty = true;
            return true;
        }
        self.deleted_events.contains(id)
    }

    // ==================== lifecycle ====================

    /// Release every staged preview (rollback path)
    pub(crate) fn release_all_media(&mut self, stager: &mut MediaStager) {
        for slot in [
            self.shop.pending_logo.take(),
            self.shop.pending_hero.take(),
            self.shop.pending_about.take(),
        ] {
            if let Some(m) = slot {
                stager.release(&m.preview);
            }
        }
        for p in &mut self.products {
            if let Some(m) = p.pending_image.take() {
                stager.release(&m.preview);
            }
            if let Some(m) = p.pending_video.take() {
                stager.release(&m.preview);
            }
        }
        for e in &mut self.events {
            if let Some(m) = e.pending_image.take() {
                stager.release(&m.preview);
            }
        }
    }

    /// Consume the draft as the new canonical state after a fully
    /// successful save. Any preview the orchestrator did not already
    /// swap for a canonical URL is released here.
    pub(crate) fn commit(mut self, stager: &mut MediaStager) -> (ShopProfile, Vec<Product>, Vec<Event>) {
        self.release_all_media(stager);
        (
            self.shop.profile,
            self.products.into_iter().map(|p| p.entity).collect(),
            self.events.into_iter().map(|e| e.entity).collect(),
        )
    }
}

/// Last file wins: install the new staged media, releasing the previous
/// occupant of the slot
fn supersede(slot: &mut Option<PendingMedia>, staged: PendingMedia, stager: &mut MediaStager) {
    if let Some(old) = slot.replace(staged) {
        stager.release(&old.preview);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shop() -> ShopProfile {
        ShopProfile {
            id: "shop:1".to_string(),
            name: "Acme".to_string(),
            address: "1 Main St".to_string(),
            phone: "555-0100".to_string(),
            ..Default::default()
        }
    }

    fn product(id: &str, name: &str) -> Product {
        Product {
            id: id.to_string(),
            name: name.to_string(),
            description: String::new(),
            category: "cat:1".to_string(),
            original_price: Decimal::new(1000, 2),
            discount_price: Decimal::new(800, 2),
            stock: 3,
            sold_out: 0,
            images: Vec::new(),
            video_url: None,
            created_at: None,
            updated_at: None,
        }
    }

    fn event(id: &str, name: &str) -> Event {
        Event {
            id: id.to_string(),
            name: name.to_string(),
            description: String::new(),
            category: "cat:1".to_string(),
            original_price: Decimal::new(1000, 2),
            discount_price: Decimal::new(500, 2),
            stock: 5,
            sold_out: 0,
            images: Vec::new(),
            start_date: Some("2026-09-01T00:00:00Z".to_string()),
            finish_date: Some("2026-09-08T00:00:00Z".to_string()),
            status: "upcoming".to_string(),
            created_at: None,
            updated_at: None,
        }
    }

    fn feature(title: &str) -> Feature {
        Feature {
            title: title.to_string(),
            icon_key: "star".to_string(),
        }
    }

    fn image() -> MediaFile {
        MediaFile::new("a.png", "image/png", vec![1, 2, 3])
    }

    #[test]
    fn test_fresh_draft_is_clean() {
        let draft = DraftStore::new(shop(), vec![product("p1", "P1")], vec![]);
        assert!(!draft.is_dirty());
        assert!(draft.deleted_products().is_empty());
    }

    #[test]
    fn test_set_product_field_mirrors_into_patch() {
        let mut draft = DraftStore::new(shop(), vec![product("p1", "P1")], vec![]);
        draft
            .set_product_field("p1", ProductField::Name("New P1".to_string()))
            .unwrap();

        let p = &draft.products()[0];
        assert_eq!(p.entity().name, "New P1");
        assert_eq!(p.patch.name.as_deref(), Some("New P1"));
        assert!(p.is_dirty());
        assert!(draft.is_dirty());
    }

    #[test]
    fn test_set_event_field_mirrors_into_patch() {
        let mut draft = DraftStore::new(shop(), vec![], vec![event("e1", "E1")]);
        draft
            .set_event_field("e1", EventField::FinishDate("2026-09-30T00:00:00Z".to_string()))
            .unwrap();
        draft.set_event_field("e1", EventField::Stock(2)).unwrap();

        let e = &draft.events()[0];
        assert_eq!(e.entity().finish_date.as_deref(), Some("2026-09-30T00:00:00Z"));
        assert_eq!(e.patch.finish_date.as_deref(), Some("2026-09-30T00:00:00Z"));
        assert_eq!(e.patch.stock, Some(2));
        assert!(e.is_dirty());
        assert!(draft.is_dirty());
    }

    #[test]
    fn test_set_product_field_unknown_id() {
        let mut draft = DraftStore::new(shop(), vec![], vec![]);
        let err = draft
            .set_product_field("missing", ProductField::Stock(1))
            .unwrap_err();
        assert!(matches!(err, DraftError::UnknownProduct(id) if id == "missing"));
    }

    #[test]
    fn test_feature_cap_rejects_fifth_entry() {
        let mut draft = DraftStore::new(shop(), vec![], vec![]);
        for i in 0..MAX_FEATURES {
            draft.add_feature(feature(&format!("f{}", i))).unwrap();
        }

        let err = draft.add_feature(feature("one too many")).unwrap_err();
        assert!(matches!(err, DraftError::FeatureLimitReached));
        assert_eq!(draft.shop().profile().features.len(), MAX_FEATURES);
    }

    #[test]
    fn test_mark_product_deleted_moves_id_atomically() {
        let mut stager = MediaStager::new();
        let mut draft =
            DraftStore::new(shop(), vec![product("p1", "P1"), product("p2", "P2")], vec![]);

        assert!(draft.mark_product_deleted("p2", &mut stager));
        assert!(draft.products().iter().all(|p| p.entity().id != "p2"));
        assert!(draft.deleted_products().contains("p2"));

        // second call is a no-op but still reports success
        assert!(draft.mark_product_deleted("p2", &mut stager));
        assert_eq!(draft.products().len(), 1);
    }

    #[test]
    fn test_mark_deleted_refuses_empty_id() {
        let mut stager = MediaStager::new();
        let mut draft = DraftStore::new(shop(), vec![], vec![]);
        assert!(!draft.mark_product_deleted("", &mut stager));
        assert!(draft.deleted_products().is_empty());
    }

    #[test]
    fn test_mark_deleted_releases_staged_media() {
        let mut stager = MediaStager::new();
        let mut draft = DraftStore::new(shop(), vec![product("p1", "P1")], vec![]);
        draft
            .stage_product_image("p1", image(), &mut stager)
            .unwrap();
        assert_eq!(stager.active_previews(), 1);

        draft.mark_product_deleted("p1", &mut stager);
        assert_eq!(stager.active_previews(), 0);
    }

    #[test]
    fn test_stage_supersede_releases_prior_preview() {
        let mut stager = MediaStager::new();
        let mut draft = DraftStore::new(shop(), vec![], vec![]);

        draft.stage_logo(image(), &mut stager).unwrap();
        let first = draft.shop().pending_logo().unwrap().preview.clone();
        draft.stage_logo(image(), &mut stager).unwrap();

        assert!(!stager.is_active(&first));
        assert_eq!(stager.active_previews(), 1);
    }

    #[test]
    fn test_hero_fields_flag_hero_about_update() {
        let mut draft = DraftStore::new(shop(), vec![], vec![]);
        assert!(!draft.shop().needs_hero_about_update());

        draft.set_shop_field(ShopField::HeroTagline("Summer sale".to_string()));
        assert!(draft.shop().needs_hero_about_update());
    }

    #[test]
    fn test_plain_info_fields_do_not_flag_hero_about() {
        let mut draft = DraftStore::new(shop(), vec![], vec![]);
        draft.set_shop_field(ShopField::Name("Acme 2".to_string()));
        assert!(!draft.shop().needs_hero_about_update());
        assert!(draft.is_dirty());
    }

    #[test]
    fn test_release_all_media_drains_every_slot() {
        let mut stager = MediaStager::new();
        let mut draft = DraftStore::new(shop(), vec![product("p1", "P1")], vec![]);
        draft.stage_logo(image(), &mut stager).unwrap();
        draft.stage_hero_image(image(), &mut stager).unwrap();
        draft
            .stage_product_image("p1", image(), &mut stager)
            .unwrap();
        assert_eq!(stager.active_previews(), 3);

        draft.release_all_media(&mut stager);
        assert_eq!(stager.active_previews(), 0);
    }
}
