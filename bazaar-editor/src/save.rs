//! Save orchestrator
//!
//! Reconciles a draft against the server through a fixed sequence of
//! independent persistence operations. Shop-level operations (avatar,
//! hero/about, info) run strictly in order so that identity data is the
//! most likely to land on partial success; per-entity updates and
//! deletes run concurrently within their group, each failure caught
//! locally so siblings keep going. There is no transaction across the
//! server resources — failure isolation is the only safety net.

use bazaar_client::StorefrontApi;
use futures::future::join_all;
use shared::models::HeroAboutUpdate;

use crate::draft::DraftStore;
use crate::media::MediaStager;
use crate::report::{FailureKind, SaveOp, SaveReport};

/// Result of one orchestrated save attempt
pub(crate) struct SaveRun {
    pub report: SaveReport,
    /// A 401 aborted the remainder of the sequence
    pub auth_required: bool,
}

/// Run the full save sequence against the draft.
///
/// Successful operations adopt the canonical entities the server
/// returned (and release the staged media they uploaded); failed ones
/// leave the draft untouched for a retry. Both pending-deletion sets
/// are cleared unconditionally before returning — deletes are
/// attempted at most once.
pub(crate) async fn run_save(
    api: &dyn StorefrontApi,
    shop_id: &str,
    draft: &mut DraftStore,
    stager: &mut MediaStager,
) -> SaveRun {
    let mut report = SaveReport::new();
    let mut auth = false;

    // 1. avatar, only when a new logo is staged
    if let Some(result) = match draft.shop.pending_logo.as_ref() {
        Some(pending) => Some(api.update_avatar(shop_id, &pending.file).await),
        None => None,
    } {
        match result {
            Ok(resp) => {
                draft.shop.profile.logo_url = Some(resp.avatar_url);
                if let Some(p) = draft.shop.pending_logo.take() {
                    stager.release(&p.preview);
                }
                report.push_ok(SaveOp::Avatar);
            }
            Err(e) if e.is_auth() => auth = true,
            Err(e) => report.push_failed(SaveOp::Avatar, FailureKind::Api(e.to_string())),
        }
    }

    // 2. hero/about, one combined resource on the server
    if !auth && draft.shop.needs_hero_about_update() {
        let update = HeroAboutUpdate {
            tagline: Some(draft.shop.profile.hero_tagline.clone()),
            description: Some(draft.shop.profile.hero_description.clone()),
            features: Some(draft.shop.profile.features.clone()),
        };
        let result = api
            .update_hero_about(
                shop_id,
                &update,
                draft.shop.pending_hero.as_ref().map(|p| &p.file),
                draft.shop.pending_about.as_ref().map(|p| &p.file),
            )
            .await;
        match result {
            Ok(resp) => {
                if resp.hero_image_url.is_some() {
                    draft.shop.profile.hero_image_url = resp.hero_image_url;
                }
                if resp.about_image_url.is_some() {
                    draft.shop.profile.about_image_url = resp.about_image_url;
                }
                for slot in [draft.shop.pending_hero.take(), draft.shop.pending_about.take()] {
                    if let Some(p) = slot {
                        stager.release(&p.preview);
                    }
                }
                draft.shop.hero_about_dirty = false;
                report.push_ok(SaveOp::HeroAbout);
            }
            Err(e) if e.is_auth() => auth = true,
            Err(e) => report.push_failed(SaveOp::HeroAbout, FailureKind::Api(e.to_string())),
        }
    }

    // 3. shop info, always attempted once validation passed
    if !auth {
        let update = draft.shop.info_update();
        match api.update_shop_info(shop_id, &update).await {
            Ok(()) => report.push_ok(SaveOp::ShopInfo),
            Err(e) if e.is_auth() => auth = true,
            Err(e) => report.push_failed(SaveOp::ShopInfo, FailureKind::Api(e.to_string())),
        }
    }

    // 4. dirty product updates, concurrent within the group
    if !auth {
        let mut jobs = Vec::new();
        for (idx, p) in draft.products.iter().enumerate() {
            if !p.is_dirty() {
                continue;
            }
            if p.entity.id.is_empty() {
                tracing::warn!(name = %p.entity.name, "skipping product draft with empty id");
                continue;
            }
            if p.entity.name.trim().is_empty() {
                report.push_failed(
                    SaveOp::UpdateProduct {
                        id: p.entity.id.clone(),
                        name: p.entity.name.clone(),
                    },
                    FailureKind::MissingName,
                );
                continue;
            }
            jobs.push(idx);
        }

        let futures: Vec<_> = jobs
            .into_iter()
            .map(|idx| {
                let p = &draft.products[idx];
                let id = p.entity.id.clone();
                let patch = p.patch.clone();
                let image = p.pending_image.as_ref().map(|m| m.file.clone());
                let video = p.pending_video.as_ref().map(|m| m.file.clone());
                async move {
                    let result = api
                        .update_product(&id, &patch, image.as_ref(), video.as_ref())
                        .await;
                    (idx, result)
                }
            })
            .collect();

        for (idx, result) in join_all(futures).await {
            let p = &mut draft.products[idx];
            let op = SaveOp::UpdateProduct {
                id: p.entity.id.clone(),
                name: p.entity.name.clone(),
            };
            match result {
                Ok(canonical) => {
                    for slot in [p.pending_image.take(), p.pending_video.take()] {
                        if let Some(m) = slot {
                            stager.release(&m.preview);
                        }
                    }
                    p.adopt(canonical);
                    report.push_ok(op);
                }
                Err(e) if e.is_auth() => auth = true,
                Err(e) => report.push_failed(op, FailureKind::Api(e.to_string())),
            }
        }
    }

    // 5. product deletes
    if !auth {
        let ids: Vec<String> = draft.deleted_products.iter().cloned().collect();
        let futures: Vec<_> = ids
            .into_iter()
            .map(|id| async move {
                let result = api.delete_product(&id).await;
                (id, result)
            })
            .collect();

        for (id, result) in join_all(futures).await {
            let op = SaveOp::DeleteProduct { id };
            match result {
                Ok(()) => report.push_ok(op),
                Err(e) if e.is_auth() => auth = true,
                Err(e) => report.push_failed(op, FailureKind::Api(e.to_string())),
            }
        }
    }

    // 6. dirty event updates
    if !auth {
        let mut jobs = Vec::new();
        for (idx, ev) in draft.events.iter().enumerate() {
            if !ev.is_dirty() {
                continue;
            }
            if ev.entity.id.is_empty() {
                tracing::warn!(name = %ev.entity.name, "skipping event draft with empty id");
                continue;
            }
            if ev.entity.name.trim().is_empty() {
                report.push_failed(
                    SaveOp::UpdateEvent {
                        id: ev.entity.id.clone(),
                        name: ev.entity.name.clone(),
                    },
                    FailureKind::MissingName,
                );
                continue;
            }
            jobs.push(idx);
        }

        let futures: Vec<_> = jobs
            .into_iter()
            .map(|idx| {
                let ev = &draft.events[idx];
                let id = ev.entity.id.clone();
                let patch = ev.patch.clone();
                let image = ev.pending_image.as_ref().map(|m| m.file.clone());
                async move {
                    let result = api.update_event(&id, &patch, image.as_ref()).await;
                    (idx, result)
                }
            })
            .collect();

        for (idx, result) in join_all(futures).await {
            let ev = &mut draft.events[idx];
            let op = SaveOp::UpdateEvent {
                id: ev.entity.id.clone(),
                name: ev.entity.name.clone(),
            };
            match result {
                Ok(canonical) => {
                    if let Some(m) = ev.pending_image.take() {
                        stager.release(&m.preview);
                    }
                    ev.adopt(canonical);
                    report.push_ok(op);
                }
                Err(e) if e.is_auth() => auth = true,
                Err(e) => report.push_failed(op, FailureKind::Api(e.to_string())),
            }
        }
    }

    // 7. event deletes
    if !auth {
        let ids: Vec<String> = draft.deleted_events.iter().cloned().collect();
        let futures: Vec<_> = ids
            .into_iter()
            .map(|id| async move {
                let result = api.delete_event(&id).await;
                (id, result)
            })
            .collect();

        for (id, result) in join_all(futures).await {
            let op = SaveOp::DeleteEvent { id };
            match result {
                Ok(()) => report.push_ok(op),
                Err(e) if e.is_auth() => auth = true,
                Err(e) => report.push_failed(op, FailureKind::Api(e.to_string())),
            }
        }
    }

    // Deletes are attempted at most once; the sets never survive a save
    // attempt, even an aborted one.
    draft.deleted_products.clear();
    draft.deleted_events.clear();

    if auth {
        tracing::warn!(shop_id = %shop_id, "save aborted: authentication required");
    } else {
        tracing::info!(
            shop_id = %shop_id,
            operations = report.entries().len(),
            failures = report.failures().count(),
            "save sequence finished"
        );
    }

    SaveRun {
        report,
        auth_required: auth,
    }
}
