//! Scripted storefront API mock for editor integration tests
//!
//! Records every call in order and can be programmed to fail (or
//! auth-fail) specific operations by key, e.g. `update_product:p2`.

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use bazaar_client::{ClientError, ClientResult, StorefrontApi};
use rust_decimal::Decimal;
use shared::models::{
    AvatarResponse, Event, EventUpdate, HeroAboutResponse, HeroAboutUpdate, MediaFile, Product,
    ProductUpdate, ShopInfoUpdate, ShopProfile,
};

pub struct MockApi {
    pub shop: Mutex<ShopProfile>,
    pub products: Mutex<Vec<Product>>,
    pub events: Mutex<Vec<Event>>,
    calls: Mutex<Vec<String>>,
    fail: Mutex<HashSet<String>>,
    auth_fail: Mutex<HashSet<String>>,
}

impl MockApi {
    pub fn new(shop: ShopProfile, products: Vec<Product>, events: Vec<Event>) -> Self {
        Self {
            shop: Mutex::new(shop),
            products: Mutex::new(products),
            events: Mutex::new(events),
            calls: Mutex::new(Vec::new()),
            fail: Mutex::new(HashSet::new()),
            auth_fail: Mutex::new(HashSet::new()),
        }
    }

    /// Make the keyed operation fail with a simulated server error
    pub fn fail_on(&self, key: &str) {
        self.fail.lock().unwrap().insert(key.to_string());
    }

    /// Make the keyed operation fail with a 401
    pub fn auth_fail_on(&self, key: &str) {
        self.auth_fail.lock().unwrap().insert(key.to_string());
    }

    /// Every call recorded so far, in order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Index of the first call matching `key`, if any
    pub fn call_index(&self, key: &str) -> Option<usize> {
        self.calls.lock().unwrap().iter().position(|c| c == key)
    }

    fn gate(&self, key: &str) -> ClientResult<()> {
        self.calls.lock().unwrap().push(key.to_string());
        if self.auth_fail.lock().unwrap().contains(key) {
            return Err(ClientError::Unauthorized);
        }
        if self.fail.lock().unwrap().contains(key) {
            return Err(ClientError::Internal("simulated failure".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl StorefrontApi for MockApi {
    async fn fetch_shop_profile(&self, _shop_id: &str) -> ClientResult<ShopProfile> {
        self.gate("fetch_shop_profile")?;
        Ok(self.shop.lock().unwrap().clone())
    }

    async fn fetch_products(&self, _shop_id: &str) -> ClientResult<Vec<Product>> {
        self.gate("fetch_products")?;
        Ok(self.products.lock().unwrap().clone())
    }

    async fn fetch_events(&self, _shop_id: &str) -> ClientResult<Vec<Event>> {
        self.gate("fetch_events")?;
        Ok(self.events.lock().unwrap().clone())
    }

    async fn update_avatar(
        &self,
        _shop_id: &str,
        _file: &MediaFile,
    ) -> ClientResult<AvatarResponse> {
        self.gate("update_avatar")?;
        let url = "https://cdn.example.com/logo.jpg".to_string();
        self.shop.lock().unwrap().logo_url = Some(url.clone());
        Ok(AvatarResponse { avatar_url: url })
    }

    async fn update_hero_about(
        &self,
        _shop_id: &str,
        update: &HeroAboutUpdate,
        hero_file: Option<&MediaFile>,
        about_file: Option<&MediaFile>,
    ) -> ClientResult<HeroAboutResponse> {
        self.gate("update_hero_about")?;
        let mut shop = self.shop.lock().unwrap();
        if let Some(tagline) = &update.tagline {
            shop.hero_tagline = tagline.clone();
        }
        if let Some(description) = &update.description {
            shop.hero_description = description.clone();
        }
        if let Some(features) = &update.features {
            shop.features = features.clone();
        }
        let response = HeroAboutResponse {
            hero_image_url: hero_file.map(|_| "https://cdn.example.com/hero.jpg".to_string()),
            about_image_url: about_file.map(|_| "https://cdn.example.com/about.jpg".to_string()),
        };
        if response.hero_image_url.is_some() {
            shop.hero_image_url = response.hero_image_url.clone();
        }
        if response.about_image_url.is_some() {
            shop.about_image_url = response.about_image_url.clone();
        }
        Ok(response)
    }

    async fn update_shop_info(&self, _shop_id: &str, update: &ShopInfoUpdate) -> ClientResult<()> {
        self.gate("update_shop_info")?;
        let mut shop = self.shop.lock().unwrap();
        if let Some(name) = &update.name {
            shop.name = name.clone();
        }
        if let Some(description) = &update.description {
            shop.description = description.clone();
        }
        if let Some(address) = &update.address {
            shop.address = address.clone();
        }
        if let Some(phone) = &update.phone {
            shop.phone = phone.clone();
        }
        if let Some(social) = &update.social_media {
            shop.social_media = social.clone();
        }
        if let Some(features) = &update.features {
            shop.features = features.clone();
        }
        Ok(())
    }

    async fn update_product(
        &self,
        product_id: &str,
        update: &ProductUpdate,
        image_file: Option<&MediaFile>,
        video_file: Option<&MediaFile>,
    ) -> ClientResult<Product> {
        self.gate(&format!("update_product:{}", product_id))?;
        let mut products = self.products.lock().unwrap();
        let product = products
            .iter_mut()
            .find(|p| p.id == product_id)
            .ok_or_else(|| ClientError::NotFound(product_id.to_string()))?;

        if let Some(name) = &update.name {
            product.name = name.clone();
        }
        if let Some(description) = &update.description {
            product.description = description.clone();
        }
        if let Some(category) = &update.category {
            product.category = category.clone();
        }
        if let Some(price) = update.original_price {
            product.original_price = price;
        }
        if let Some(price) = update.discount_price {
            product.discount_price = price;
        }
        if let Some(stock) = update.stock {
            product.stock = stock;
        }
        if image_file.is_some() {
            product
                .images
                .push(format!("https://cdn.example.com/{}.jpg", product_id));
        }
        if video_file.is_some() {
            product.video_url = Some(format!("https://cdn.example.com/{}.mp4", product_id));
        }
        product.updated_at = Some("2026-08-29T00:00:00Z".to_string());
        Ok(product.clone())
    }

    async fn delete_product(&self, product_id: &str) -> ClientResult<()> {
        self.gate(&format!("delete_product:{}", product_id))?;
        self.products.lock().unwrap().retain(|p| p.id != product_id);
        Ok(())
    }

    async fn update_event(
        &self,
        event_id: &str,
        update: &EventUpdate,
        image_file: Option<&MediaFile>,
    ) -> ClientResult<Event> {
        self.gate(&format!("update_event:{}", event_id))?;
        let mut events = self.events.lock().unwrap();
        let event = events
            .iter_mut()
            .find(|e| e.id == event_id)
            .ok_or_else(|| ClientError::NotFound(event_id.to_string()))?;

        if let Some(name) = &update.name {
            event.name = name.clone();
        }
        if let Some(description) = &update.description {
            event.description = description.clone();
        }
        if let Some(stock) = update.stock {
            event.stock = stock;
        }
        if let Some(start) = &update.start_date {
            event.start_date = Some(start.clone());
        }
        if let Some(finish) = &update.finish_date {
            event.finish_date = Some(finish.clone());
        }
        if image_file.is_some() {
            event
                .images
                .push(format!("https://cdn.example.com/{}.jpg", event_id));
        }
        event.updated_at = Some("2026-08-29T00:00:00Z".to_string());
        Ok(event.clone())
    }

    async fn delete_event(&self, event_id: &str) -> ClientResult<()> {
        self.gate(&format!("delete_event:{}", event_id))?;
        self.events.lock().unwrap().retain(|e| e.id != event_id);
        Ok(())
    }
}

// ==================== fixtures ====================

pub fn shop() -> ShopProfile {
    ShopProfile {
        id: "shop:1".to_string(),
        name: "Acme".to_string(),
        address: "1 Main St".to_string(),
        phone: "555-0100".to_string(),
        ..Default::default()
    }
}

pub fn product(id: &str, name: &str) -> Product {
    Product {
        id: id.to_string(),
        name: name.to_string(),
        description: String::new(),
        category: "cat:1".to_string(),
        original_price: Decimal::new(1999, 2),
        discount_price: Decimal::new(1499, 2),
        stock: 10,
        sold_out: 0,
        images: Vec::new(),
        video_url: None,
        created_at: None,
        updated_at: None,
    }
}

pub fn event(id: &str, name: &str) -> Event {
    Event {
        id: id.to_string(),
        name: name.to_string(),
        description: String::new(),
        category: "cat:1".to_string(),
        original_price: Decimal::new(1999, 2),
        discount_price: Decimal::new(999, 2),
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

pub fn png() -> MediaFile {
    MediaFile::new("photo.png", "image/png", vec![0u8; 64])
}
