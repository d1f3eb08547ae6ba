//! Storefront API contract
//!
//! The editor core is written against this trait; production code uses
//! [`HttpStorefrontClient`](crate::HttpStorefrontClient), tests use a
//! scripted mock.

use async_trait::async_trait;
use shared::models::{
    AvatarResponse, Event, EventUpdate, HeroAboutResponse, HeroAboutUpdate, MediaFile, Product,
    ProductUpdate, ShopInfoUpdate, ShopProfile,
};

use crate::ClientResult;

/// Persistence operations the editor core needs from the server.
///
/// Every call is independent; the server offers no transaction across
/// them. All calls are credentialed (session cookie) and may fail with
/// [`ClientError::Unauthorized`](crate::ClientError::Unauthorized).
#[async_trait]
pub trait StorefrontApi: Send + Sync {
    async fn fetch_shop_profile(&self, shop_id: &str) -> ClientResult<ShopProfile>;

    async fn fetch_products(&self, shop_id: &str) -> ClientResult<Vec<Product>>;

    async fn fetch_events(&self, shop_id: &str) -> ClientResult<Vec<Event>>;

    /// Upload a new shop logo, returning its canonical URL
    async fn update_avatar(&self, shop_id: &str, file: &MediaFile) -> ClientResult<AvatarResponse>;

    /// Combined hero + about update (one server resource)
    async fn update_hero_about(
        &self,
        shop_id: &str,
        update: &HeroAboutUpdate,
        hero_file: Option<&MediaFile>,
        about_file: Option<&MediaFile>,
    ) -> ClientResult<HeroAboutResponse>;

    async fn update_shop_info(&self, shop_id: &str, update: &ShopInfoUpdate) -> ClientResult<()>;

    async fn update_product(
        &self,
        product_id: &str,
        update: &ProductUpdate,
        image_file: Option<&MediaFile>,
        video_file: Option<&MediaFile>,
    ) -> ClientResult<Product>;

    async fn delete_product(&self, product_id: &str) -> ClientResult<()>;

    async fn update_event(
        &self,
        event_id: &str,
        update: &EventUpdate,
        image_file: Option<&MediaFile>,
    ) -> ClientResult<Event>;

    async fn delete_event(&self, event_id: &str) -> ClientResult<()>;
}
